//! Face detector output and detector options
//!
//! The landmark model itself lives outside this crate; these types describe what it
//! hands over once per frame and how the host asks it to run.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// 2D point in image coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f32,
    pub y: f32,
}

impl Point2D {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point2D) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Scale both coordinates by `k`
    pub fn scaled(&self, k: f32) -> Point2D {
        Point2D::new(self.x * k, self.y * k)
    }
}

/// Named facial contours reported by the landmark model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContourType {
    Face,
    LeftEyebrowTop,
    LeftEyebrowBottom,
    RightEyebrowTop,
    RightEyebrowBottom,
    LeftEye,
    RightEye,
    UpperLipTop,
    UpperLipBottom,
    LowerLipTop,
    LowerLipBottom,
    NoseBridge,
    NoseBottom,
    LeftCheek,
    RightCheek,
}

/// Contour point sequences keyed by contour name
pub type Contours = HashMap<ContourType, Vec<Point2D>>;

/// One face as delivered by the detector for a single frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceObservation {
    /// Left eye open probability (0-1)
    #[serde(default, alias = "leftEyeOpenProbability")]
    pub left_eye_open: Option<f32>,
    /// Right eye open probability (0-1)
    #[serde(default, alias = "rightEyeOpenProbability")]
    pub right_eye_open: Option<f32>,
    /// Yaw (left-right rotation) in degrees
    #[serde(default)]
    pub yaw_angle: Option<f32>,
    /// Pitch (up-down tilt) in degrees
    #[serde(default)]
    pub pitch_angle: Option<f32>,
    /// Roll (side tilt) in degrees, informational only
    #[serde(default)]
    pub roll_angle: Option<f32>,
    /// Tracker-assigned face identity, informational only
    #[serde(default)]
    pub tracking_id: Option<i32>,
    #[serde(default)]
    pub contours: Option<Contours>,
}

impl FaceObservation {
    /// Left eye openness, absent treated as fully open
    pub fn left_eye(&self) -> f32 {
        self.left_eye_open.unwrap_or(1.0)
    }

    /// Right eye openness, absent treated as fully open
    pub fn right_eye(&self) -> f32 {
        self.right_eye_open.unwrap_or(1.0)
    }

    /// Yaw in degrees, absent treated as straight ahead
    pub fn yaw(&self) -> f32 {
        self.yaw_angle.unwrap_or(0.0)
    }

    /// Pitch in degrees, absent treated as level
    pub fn pitch(&self) -> f32 {
        self.pitch_angle.unwrap_or(0.0)
    }

    /// Builder-style setter for both eye probabilities
    pub fn with_eyes(mut self, left: f32, right: f32) -> Self {
        self.left_eye_open = Some(left);
        self.right_eye_open = Some(right);
        self
    }

    /// Builder-style setter for head angles
    pub fn with_head(mut self, yaw: f32, pitch: f32) -> Self {
        self.yaw_angle = Some(yaw);
        self.pitch_angle = Some(pitch);
        self
    }

    /// Builder-style setter for a single contour
    pub fn with_contour(mut self, kind: ContourType, points: Vec<Point2D>) -> Self {
        self.contours.get_or_insert_with(HashMap::new).insert(kind, points);
        self
    }
}

/// Speed/accuracy trade-off of the detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceMode {
    Fast,
    #[default]
    Accurate,
}

/// Whether the detector reports landmarks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LandmarkMode {
    None,
    #[default]
    All,
}

/// Whether the detector reports contours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContourMode {
    None,
    #[default]
    All,
}

/// Whether the detector reports eye-open classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationMode {
    None,
    #[default]
    All,
}

/// Options forwarded untouched to the face detector
///
/// The engine needs eye probabilities, head angles and the two inner lip contours,
/// which the default (accurate, everything enabled) provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FaceDetectionOptions {
    pub performance_mode: PerformanceMode,
    pub landmark_mode: LandmarkMode,
    pub contour_mode: ContourMode,
    pub classification_mode: ClassificationMode,
}

impl FaceDetectionOptions {
    /// True when the detector will supply every signal the engine reads
    pub fn supplies_required_signals(&self) -> bool {
        self.contour_mode == ContourMode::All
            && self.classification_mode == ClassificationMode::All
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contour_len(face: &FaceObservation, kind: ContourType) -> usize {
        face.contours
            .as_ref()
            .and_then(|c| c.get(&kind))
            .map_or(0, Vec::len)
    }

    #[test]
    fn test_missing_fields_default_to_attentive() {
        let face = FaceObservation::default();
        assert_eq!(face.left_eye(), 1.0);
        assert_eq!(face.right_eye(), 1.0);
        assert_eq!(face.yaw(), 0.0);
        assert_eq!(face.pitch(), 0.0);
        assert_eq!(contour_len(&face, ContourType::UpperLipBottom), 0);
    }

    #[test]
    fn test_deserialize_detector_json() {
        let json = r#"{
            "leftEyeOpenProbability": 0.2,
            "rightEyeOpen": 0.4,
            "yawAngle": -12.5,
            "contours": {
                "UPPER_LIP_BOTTOM": [{"x": 0, "y": 0}, {"x": 1, "y": 0}, {"x": 2, "y": 0}]
            }
        }"#;
        let face: FaceObservation = serde_json::from_str(json).unwrap();
        assert_eq!(face.left_eye_open, Some(0.2));
        assert_eq!(face.right_eye_open, Some(0.4));
        assert_eq!(face.yaw(), -12.5);
        assert_eq!(face.pitch(), 0.0);
        assert_eq!(contour_len(&face, ContourType::UpperLipBottom), 3);
        assert_eq!(contour_len(&face, ContourType::LowerLipTop), 0);
    }

    #[test]
    fn test_default_options_supply_signals() {
        let opts = FaceDetectionOptions::default();
        assert_eq!(opts.performance_mode, PerformanceMode::Accurate);
        assert!(opts.supplies_required_signals());

        let no_contours = FaceDetectionOptions {
            contour_mode: ContourMode::None,
            ..Default::default()
        };
        assert!(!no_contours.supplies_required_signals());
    }

    #[test]
    fn test_point_distance() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-6);
        assert_eq!(b.scaled(2.0), Point2D::new(6.0, 8.0));
    }
}
