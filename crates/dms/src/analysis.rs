//! DMS analysis results

use serde::{Deserialize, Serialize};

use crate::mouth::MouthMetrics;
use crate::state::{DebounceCounters, DriverState};

/// Complete per-frame analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DmsAnalysis {
    /// Arbitrated driver state
    pub state: DriverState,

    /// Whether a face was present this frame
    pub face_detected: bool,

    /// Lip open ratio (only when mouth analysis ran)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lip_ratio: Option<f32>,

    /// Mouth window statistics (only once enough history exists)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mouth: Option<MouthMetrics>,

    /// Debounce counters after this frame
    pub counters: DebounceCounters,
}

impl DmsAnalysis {
    /// Check if the driver should be warned
    pub fn has_alert(&self) -> bool {
        self.state.is_alert()
    }
}
