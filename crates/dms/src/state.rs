//! Driver state labels and debounce counters

use std::fmt;

use serde::{Deserialize, Serialize};

/// Driver state emitted once per processed frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DriverState {
    /// No face in view
    #[default]
    NoDriver,
    Attentive,
    Drowsy,
    Distracted,
    Yawning,
    Talking,
}

impl DriverState {
    /// Status line shown to the driver
    pub fn status_message(&self) -> &'static str {
        match self {
            DriverState::NoDriver => "No driver detected",
            DriverState::Attentive => "Driver Attentive",
            DriverState::Drowsy => "Drowsy Driver Detected!",
            DriverState::Distracted => "Distracted Driver!",
            DriverState::Yawning => "Driver Yawning!",
            DriverState::Talking => "Driver Talking!",
        }
    }

    /// Whether this state warrants warning the driver
    pub fn is_alert(&self) -> bool {
        matches!(
            self,
            DriverState::Drowsy
                | DriverState::Distracted
                | DriverState::Yawning
                | DriverState::Talking
        )
    }
}

impl fmt::Display for DriverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DriverState::NoDriver => "no-driver",
            DriverState::Attentive => "attentive",
            DriverState::Drowsy => "drowsy",
            DriverState::Distracted => "distracted",
            DriverState::Yawning => "yawning",
            DriverState::Talking => "talking",
        };
        f.write_str(label)
    }
}

/// Consecutive-frame counters (snapshot)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DebounceCounters {
    pub closed_eye_frames: u32,
    pub distracted_frames: u32,
    pub talking_frames: u32,
    pub yawning_frames: u32,
}

impl DebounceCounters {
    /// True when every counter is back at zero
    pub fn is_clear(&self) -> bool {
        *self == Self::default()
    }
}
