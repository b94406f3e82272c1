//! Eye closure and head pose classification

use crate::config::EyeHeadConfig;

/// Eye/head verdict for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttentionVerdict {
    Drowsy,
    Distracted,
}

/// Debounced drowsiness and distraction detection
#[derive(Debug, Clone)]
pub struct EyeHeadClassifier {
    config: EyeHeadConfig,
    closed_eye_frames: u32,
    distracted_frames: u32,
}

impl EyeHeadClassifier {
    pub fn new(config: EyeHeadConfig) -> Self {
        Self {
            config,
            closed_eye_frames: 0,
            distracted_frames: 0,
        }
    }

    /// Feed one frame's eye probabilities and head angles
    ///
    /// Drowsiness is checked first and returns before the distraction counter is
    /// touched, so a frame that is both reports `Drowsy`.
    pub fn update(
        &mut self,
        left_eye_open: f32,
        right_eye_open: f32,
        yaw: f32,
        pitch: f32,
    ) -> Option<AttentionVerdict> {
        let avg_eye = (left_eye_open + right_eye_open) / 2.0;
        if avg_eye < self.config.closed_eye_threshold {
            self.closed_eye_frames = self.closed_eye_frames.saturating_add(1);
        } else {
            self.closed_eye_frames = 0;
        }

        if self.closed_eye_frames > self.config.drowsy_frames {
            return Some(AttentionVerdict::Drowsy);
        }

        let looking_away = yaw.abs() > self.config.yaw_limit_degrees
            || pitch.abs() > self.config.pitch_limit_degrees;
        if looking_away {
            self.distracted_frames = self.distracted_frames.saturating_add(1);
        } else {
            self.distracted_frames = 0;
        }

        if self.distracted_frames > self.config.distracted_frames {
            return Some(AttentionVerdict::Distracted);
        }

        None
    }

    pub fn closed_eye_frames(&self) -> u32 {
        self.closed_eye_frames
    }

    pub fn distracted_frames(&self) -> u32 {
        self.distracted_frames
    }

    pub fn reset(&mut self) {
        self.closed_eye_frames = 0;
        self.distracted_frames = 0;
    }
}

impl Default for EyeHeadClassifier {
    fn default() -> Self {
        Self::new(EyeHeadConfig::default())
    }
}
