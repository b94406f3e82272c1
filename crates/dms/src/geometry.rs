//! Mouth geometry from lip contours

use crate::detector::{ContourType, Contours, Point2D};

/// Minimum points per lip contour before the mouth can be assessed
pub const MIN_LIP_POINTS: usize = 3;

/// Floor for mouth width to avoid division by zero
pub const MIN_MOUTH_WIDTH: f32 = 1e-6;

/// Normalized lip opening: vertical gap between the inner lips over mouth width
///
/// The gap is measured between the middle-index points of `UPPER_LIP_BOTTOM` and
/// `LOWER_LIP_TOP`; the width between the leftmost and rightmost points of both
/// contours together. Both scale with face size, so the ratio does not depend on
/// how far the driver sits from the camera. Returns 0 when either contour is
/// missing or has fewer than three points.
pub fn lip_open_ratio(contours: Option<&Contours>) -> f32 {
    let Some(contours) = contours else {
        return 0.0;
    };
    let upper = contours
        .get(&ContourType::UpperLipBottom)
        .map(Vec::as_slice)
        .unwrap_or(&[]);
    let lower = contours
        .get(&ContourType::LowerLipTop)
        .map(Vec::as_slice)
        .unwrap_or(&[]);
    lip_open_ratio_from(upper, lower)
}

/// Same as [`lip_open_ratio`] on the two inner lip contours directly
pub fn lip_open_ratio_from(upper_lip_bottom: &[Point2D], lower_lip_top: &[Point2D]) -> f32 {
    if upper_lip_bottom.len() < MIN_LIP_POINTS || lower_lip_top.len() < MIN_LIP_POINTS {
        return 0.0;
    }

    let upper_mid = upper_lip_bottom[upper_lip_bottom.len() / 2];
    let lower_mid = lower_lip_top[lower_lip_top.len() / 2];

    let Some((left, right)) = horizontal_extremes(upper_lip_bottom.iter().chain(lower_lip_top))
    else {
        return 0.0;
    };

    let vertical_gap = upper_mid.distance(&lower_mid);
    let width = left.distance(&right).max(MIN_MOUTH_WIDTH);
    vertical_gap / width
}

/// Leftmost and rightmost points; the first one seen wins ties
fn horizontal_extremes<'a>(
    mut points: impl Iterator<Item = &'a Point2D>,
) -> Option<(Point2D, Point2D)> {
    let first = *points.next()?;
    let (mut left, mut right) = (first, first);
    for p in points {
        if p.x < left.x {
            left = *p;
        }
        if p.x > right.x {
            right = *p;
        }
    }
    Some((left, right))
}
