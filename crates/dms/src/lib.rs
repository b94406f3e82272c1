//! Driver Monitoring System (DMS)
//!
//! Real-time driver state classification from per-frame face observations:
//! - Eye closure (drowsiness)
//! - Head pose (distraction)
//! - Lip contour dynamics (talking vs yawning)
//!
//! One [`DmsModule`] is fed one observation per frame and answers with a single
//! debounced [`DriverState`].

pub mod analysis;
pub mod config;
pub mod detector;
pub mod eye_head;
pub mod geometry;
pub mod mouth;
pub mod state;

pub use analysis::DmsAnalysis;
pub use config::{DmsConfig, EyeHeadConfig, MouthConfig};
pub use detector::{
    ClassificationMode, ContourMode, ContourType, Contours, FaceDetectionOptions,
    FaceObservation, LandmarkMode, PerformanceMode, Point2D,
};
pub use eye_head::{AttentionVerdict, EyeHeadClassifier};
pub use geometry::lip_open_ratio;
pub use mouth::{MouthHistory, MouthMetrics, MouthTracker, MouthVerdict};
pub use state::{DebounceCounters, DriverState};

use thiserror::Error;
use tracing::{debug, info};

/// DMS error types
#[derive(Error, Debug)]
pub enum DmsError {
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Driver monitoring module
///
/// Owns both sub-trackers; a frame without a face resets them together so stale
/// history cannot raise an alert the moment the driver reappears.
pub struct DmsModule {
    config: DmsConfig,
    options: FaceDetectionOptions,
    eye_head: EyeHeadClassifier,
    mouth: MouthTracker,
    last_state: Option<DriverState>,
}

impl DmsModule {
    /// Create a new DMS module with configuration
    pub fn new(config: DmsConfig) -> Result<Self, DmsError> {
        config.validate()?;
        info!("Creating DMS module with config: {:?}", config);
        Ok(Self {
            eye_head: EyeHeadClassifier::new(config.eye.clone()),
            mouth: MouthTracker::new(config.mouth.clone()),
            options: FaceDetectionOptions::default(),
            last_state: None,
            config,
        })
    }

    /// Store detector options for the host to hand to the face detector
    pub fn configure(&mut self, options: FaceDetectionOptions) {
        if !options.supplies_required_signals() {
            debug!(
                ?options,
                "Detector options omit contours or eye classification; defaults will apply"
            );
        }
        self.options = options;
    }

    /// Options last passed to [`configure`](Self::configure)
    pub fn detection_options(&self) -> FaceDetectionOptions {
        self.options
    }

    /// Classify one frame; `None` means no face was detected
    pub fn process(&mut self, observation: Option<&FaceObservation>) -> DriverState {
        self.analyze(observation).state
    }

    /// Classify one frame from the detector's face list, using the first face
    pub fn process_faces(&mut self, faces: &[FaceObservation]) -> DriverState {
        self.process(faces.first())
    }

    /// Classify one frame and report the intermediate signals
    pub fn analyze(&mut self, observation: Option<&FaceObservation>) -> DmsAnalysis {
        let Some(face) = observation else {
            self.reset_state();
            return self.finish(DmsAnalysis {
                state: DriverState::NoDriver,
                face_detected: false,
                ..Default::default()
            });
        };

        let attention = self.eye_head.update(
            face.left_eye(),
            face.right_eye(),
            face.yaw(),
            face.pitch(),
        );
        if let Some(verdict) = attention {
            let state = match verdict {
                AttentionVerdict::Drowsy => DriverState::Drowsy,
                AttentionVerdict::Distracted => DriverState::Distracted,
            };
            return self.finish(DmsAnalysis {
                state,
                face_detected: true,
                ..Default::default()
            });
        }

        let lip_ratio = lip_open_ratio(face.contours.as_ref());
        let state = match self.mouth.update(lip_ratio) {
            Some(MouthVerdict::Yawning) => DriverState::Yawning,
            Some(MouthVerdict::Talking) => DriverState::Talking,
            None => DriverState::Attentive,
        };

        self.finish(DmsAnalysis {
            state,
            face_detected: true,
            lip_ratio: Some(lip_ratio),
            mouth: self.mouth.last_metrics(),
            ..Default::default()
        })
    }

    /// Current debounce counters
    pub fn counters(&self) -> DebounceCounters {
        DebounceCounters {
            closed_eye_frames: self.eye_head.closed_eye_frames(),
            distracted_frames: self.eye_head.distracted_frames(),
            talking_frames: self.mouth.talking_frames(),
            yawning_frames: self.mouth.yawning_frames(),
        }
    }

    pub fn mouth_history(&self) -> &MouthHistory {
        self.mouth.history()
    }

    /// State emitted for the previous frame
    pub fn last_state(&self) -> Option<DriverState> {
        self.last_state
    }

    /// Reset driver state (counters and mouth history)
    pub fn reset_state(&mut self) {
        debug!("Resetting driver state");
        self.eye_head.reset();
        self.mouth.reset();
    }

    fn finish(&mut self, mut analysis: DmsAnalysis) -> DmsAnalysis {
        analysis.counters = self.counters();
        if self.last_state != Some(analysis.state) {
            info!(
                from = ?self.last_state,
                to = %analysis.state,
                "Driver state changed"
            );
            self.last_state = Some(analysis.state);
        }
        analysis
    }
}
