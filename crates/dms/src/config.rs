//! DMS configuration
//!
//! Debounce limits are "strictly greater than" frame counts: with `drowsy_frames`
//! of 15 the sixteenth consecutive closed-eye frame raises the alert.

use serde::{Deserialize, Serialize};

use crate::DmsError;

/// DMS configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DmsConfig {
    /// Eye closure and head pose thresholds
    pub eye: EyeHeadConfig,

    /// Mouth dynamics thresholds
    pub mouth: MouthConfig,
}

/// Eye/head classifier thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EyeHeadConfig {
    /// Mean eye-open probability below which a frame counts as eyes closed
    pub closed_eye_threshold: f32,

    /// Consecutive closed-eye frames tolerated before drowsiness
    pub drowsy_frames: u32,

    /// Yaw deviation threshold (degrees from center)
    pub yaw_limit_degrees: f32,

    /// Pitch deviation threshold (degrees from level)
    pub pitch_limit_degrees: f32,

    /// Consecutive looking-away frames tolerated before distraction
    pub distracted_frames: u32,
}

impl Default for EyeHeadConfig {
    fn default() -> Self {
        Self {
            closed_eye_threshold: 0.30,
            drowsy_frames: 15,
            yaw_limit_degrees: 25.0,
            pitch_limit_degrees: 20.0,
            distracted_frames: 10,
        }
    }
}

/// Mouth dynamics thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MouthConfig {
    /// Rolling window length (~0.6s at 30fps)
    pub history_capacity: usize,

    /// Samples needed before the mouth is classified at all
    pub min_samples: usize,

    /// Lip ratio above which the mouth counts as open
    pub open_threshold: f32,

    /// Window mean lip ratio above which a yawn is possible
    pub yawn_avg_threshold: f32,

    /// Most open/closed flips a yawn window may contain
    pub yawn_max_transitions: usize,

    /// Fraction of open frames a yawn window must exceed
    pub yawn_open_ratio: f32,

    /// Consecutive yawn frames tolerated before yawning is reported
    pub yawn_frames: u32,

    /// Fewest open/closed flips a talking window must contain
    pub talk_min_transitions: usize,

    /// Lip ratio variance a talking window must exceed
    pub talk_variance_threshold: f32,

    /// Consecutive talking frames tolerated before talking is reported
    pub talk_frames: u32,
}

impl Default for MouthConfig {
    fn default() -> Self {
        Self {
            history_capacity: 20,
            min_samples: 6,
            open_threshold: 0.22,
            yawn_avg_threshold: 0.3,
            yawn_max_transitions: 2,
            yawn_open_ratio: 0.7,
            yawn_frames: 5,
            talk_min_transitions: 5,
            talk_variance_threshold: 0.001,
            talk_frames: 8,
        }
    }
}

impl DmsConfig {
    /// Create strict config (shorter debounce, tighter angles)
    pub fn strict() -> Self {
        Self {
            eye: EyeHeadConfig {
                drowsy_frames: 10,
                yaw_limit_degrees: 20.0,
                pitch_limit_degrees: 15.0,
                distracted_frames: 6,
                ..Default::default()
            },
            mouth: MouthConfig {
                yawn_frames: 3,
                talk_frames: 5,
                ..Default::default()
            },
        }
    }

    /// Create lenient config (longer debounce, wider angles)
    pub fn lenient() -> Self {
        Self {
            eye: EyeHeadConfig {
                drowsy_frames: 25,
                yaw_limit_degrees: 35.0,
                pitch_limit_degrees: 30.0,
                distracted_frames: 20,
                ..Default::default()
            },
            mouth: MouthConfig {
                yawn_frames: 8,
                talk_frames: 12,
                ..Default::default()
            },
        }
    }

    /// Check thresholds for values the engine cannot work with
    pub fn validate(&self) -> Result<(), DmsError> {
        let eye = &self.eye;
        let mouth = &self.mouth;

        for (name, value) in [
            ("eye.closed_eye_threshold", eye.closed_eye_threshold),
            ("eye.yaw_limit_degrees", eye.yaw_limit_degrees),
            ("eye.pitch_limit_degrees", eye.pitch_limit_degrees),
            ("mouth.open_threshold", mouth.open_threshold),
            ("mouth.yawn_avg_threshold", mouth.yawn_avg_threshold),
            ("mouth.yawn_open_ratio", mouth.yawn_open_ratio),
            ("mouth.talk_variance_threshold", mouth.talk_variance_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(DmsError::Config(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }

        if mouth.history_capacity == 0 {
            return Err(DmsError::Config(
                "mouth.history_capacity must be at least 1".into(),
            ));
        }
        if mouth.min_samples == 0 || mouth.min_samples > mouth.history_capacity {
            return Err(DmsError::Config(format!(
                "mouth.min_samples must be in 1..={}, got {}",
                mouth.history_capacity, mouth.min_samples
            )));
        }
        if mouth.yawn_max_transitions >= mouth.talk_min_transitions {
            return Err(DmsError::Config(format!(
                "mouth.yawn_max_transitions ({}) must be below mouth.talk_min_transitions ({})",
                mouth.yawn_max_transitions, mouth.talk_min_transitions
            )));
        }

        Ok(())
    }
}
