//! Mouth dynamics: talking vs yawning
//!
//! Both behaviours open the mouth. A yawn is a large opening held with few
//! open/closed flips; talking is frequent small oscillation. Both are judged over a
//! rolling window of lip ratios and must hold for several consecutive frames before
//! they are reported.

use ring_buffer::RingBuffer;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::MouthConfig;

/// Mouth verdict for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouthVerdict {
    Talking,
    Yawning,
}

/// Window statistics computed on each classified frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MouthMetrics {
    /// Samples in the window
    pub samples: usize,
    /// Mean lip ratio
    pub avg: f32,
    /// Population variance of the lip ratio
    pub variance: f32,
    /// Adjacent open/closed flips
    pub transitions: usize,
    /// Fraction of frames with the mouth open
    pub open_ratio: f32,
}

impl MouthMetrics {
    /// Large, steady, mostly-open window
    pub fn is_yawn_like(&self, config: &MouthConfig) -> bool {
        self.avg > config.yawn_avg_threshold
            && self.transitions <= config.yawn_max_transitions
            && self.open_ratio > config.yawn_open_ratio
    }

    /// Frequently flipping window with real movement
    pub fn is_talk_like(&self, config: &MouthConfig) -> bool {
        self.transitions >= config.talk_min_transitions
            && self.variance > config.talk_variance_threshold
    }
}

/// Lip ratio and open-flag windows, evicted in lockstep
#[derive(Debug, Clone)]
pub struct MouthHistory {
    lip_ratios: RingBuffer<f32>,
    open_flags: RingBuffer<bool>,
    open_count: usize,
}

impl MouthHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            lip_ratios: RingBuffer::new(capacity),
            open_flags: RingBuffer::new(capacity),
            open_count: 0,
        }
    }

    /// Append one sample to both windows
    pub fn push(&mut self, lip_ratio: f32, open: bool) {
        self.lip_ratios.push(lip_ratio);
        if open {
            self.open_count += 1;
        }
        if let Some(true) = self.open_flags.push(open) {
            self.open_count -= 1;
        }
    }

    pub fn len(&self) -> usize {
        self.lip_ratios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lip_ratios.is_empty()
    }

    /// Length of the open-flag window (always equal to [`len`](Self::len))
    pub fn flag_len(&self) -> usize {
        self.open_flags.len()
    }

    pub fn clear(&mut self) {
        self.lip_ratios.clear();
        self.open_flags.clear();
        self.open_count = 0;
    }

    /// Mean, population variance, flip count and open fraction of the window
    pub fn metrics(&self) -> MouthMetrics {
        let samples = self.len();
        if samples == 0 {
            return MouthMetrics::default();
        }
        let n = samples as f32;

        let avg = self.lip_ratios.iter().sum::<f32>() / n;
        let variance = self
            .lip_ratios
            .iter()
            .map(|v| (v - avg) * (v - avg))
            .sum::<f32>()
            / n;

        let transitions = self
            .open_flags
            .iter()
            .zip(self.open_flags.iter().skip(1))
            .filter(|(a, b)| a != b)
            .count();

        MouthMetrics {
            samples,
            avg,
            variance,
            transitions,
            open_ratio: self.open_count as f32 / n,
        }
    }
}

/// Debounced talking/yawning detection over a rolling lip-ratio window
#[derive(Debug, Clone)]
pub struct MouthTracker {
    config: MouthConfig,
    history: MouthHistory,
    talking_frames: u32,
    yawning_frames: u32,
    last_metrics: Option<MouthMetrics>,
}

impl MouthTracker {
    pub fn new(config: MouthConfig) -> Self {
        Self {
            history: MouthHistory::new(config.history_capacity),
            config,
            talking_frames: 0,
            yawning_frames: 0,
            last_metrics: None,
        }
    }

    /// Feed one frame's lip open ratio
    pub fn update(&mut self, lip_ratio: f32) -> Option<MouthVerdict> {
        let open = lip_ratio > self.config.open_threshold;
        self.history.push(lip_ratio, open);

        if self.history.len() < self.config.min_samples {
            self.last_metrics = None;
            return None;
        }

        let metrics = self.history.metrics();
        self.last_metrics = Some(metrics);
        trace!(
            avg = metrics.avg,
            variance = metrics.variance,
            transitions = metrics.transitions,
            open_ratio = metrics.open_ratio,
            "Mouth window"
        );

        // Yawn has priority over talk
        if metrics.is_yawn_like(&self.config) {
            self.yawning_frames = self.yawning_frames.saturating_add(1);
            self.talking_frames = 0;
            if self.yawning_frames > self.config.yawn_frames {
                return Some(MouthVerdict::Yawning);
            }
            return None;
        }
        self.yawning_frames = 0;

        if metrics.is_talk_like(&self.config) {
            self.talking_frames = self.talking_frames.saturating_add(1);
            if self.talking_frames > self.config.talk_frames {
                return Some(MouthVerdict::Talking);
            }
            return None;
        }
        self.talking_frames = 0;

        None
    }

    pub fn history(&self) -> &MouthHistory {
        &self.history
    }

    /// Window statistics from the most recent classified frame
    pub fn last_metrics(&self) -> Option<MouthMetrics> {
        self.last_metrics
    }

    pub fn talking_frames(&self) -> u32 {
        self.talking_frames
    }

    pub fn yawning_frames(&self) -> u32 {
        self.yawning_frames
    }

    pub fn reset(&mut self) {
        self.history.clear();
        self.talking_frames = 0;
        self.yawning_frames = 0;
        self.last_metrics = None;
    }
}

impl Default for MouthTracker {
    fn default() -> Self {
        Self::new(MouthConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn alternating(i: usize) -> f32 {
        if i % 2 == 0 {
            0.05
        } else {
            0.35
        }
    }

    #[test]
    fn test_needs_six_samples() {
        let mut tracker = MouthTracker::default();
        for _ in 0..5 {
            assert_eq!(tracker.update(0.5), None);
            assert!(tracker.last_metrics().is_none());
        }
        tracker.update(0.5);
        assert_eq!(tracker.last_metrics().map(|m| m.samples), Some(6));
    }

    #[test]
    fn test_talking_after_nine_qualifying_frames() {
        let mut tracker = MouthTracker::default();
        let mut verdicts = Vec::new();
        for i in 0..20 {
            verdicts.push(tracker.update(alternating(i)));
        }
        // qualifying from frame 6 (index 5); reported once talking_frames > 8
        assert!(verdicts[..13].iter().all(Option::is_none));
        assert!(verdicts[13..]
            .iter()
            .all(|v| *v == Some(MouthVerdict::Talking)));
        assert_eq!(tracker.last_metrics().unwrap().transitions, 19);
    }

    #[test]
    fn test_yawning_after_six_qualifying_frames() {
        let mut tracker = MouthTracker::default();
        let verdicts: Vec<_> = (0..15).map(|_| tracker.update(0.5)).collect();
        // qualifying from frame 6; reported once yawning_frames > 5, i.e. frame 11
        assert!(verdicts[..10].iter().all(Option::is_none));
        assert!(verdicts[10..]
            .iter()
            .all(|v| *v == Some(MouthVerdict::Yawning)));
        assert_eq!(tracker.talking_frames(), 0);
    }

    #[test]
    fn test_closed_mouth_never_classified() {
        let mut tracker = MouthTracker::default();
        for _ in 0..100 {
            assert_eq!(tracker.update(0.0), None);
        }
        assert_eq!(tracker.talking_frames(), 0);
        assert_eq!(tracker.yawning_frames(), 0);
    }

    #[test]
    fn test_steady_mouth_breaks_talking() {
        let mut tracker = MouthTracker::default();
        for i in 0..12 {
            tracker.update(alternating(i));
        }
        assert!(tracker.talking_frames() > 0);
        // A long closed stretch drains the flips out of the window
        for _ in 0..20 {
            tracker.update(0.05);
        }
        assert_eq!(tracker.talking_frames(), 0);
    }

    #[test]
    fn test_window_capacity_bound() {
        let mut tracker = MouthTracker::default();
        for i in 0..100 {
            tracker.update(alternating(i));
        }
        assert_eq!(tracker.history().len(), 20);
        assert_eq!(tracker.history().flag_len(), 20);
    }

    #[test]
    fn test_metrics_population_variance() {
        let mut history = MouthHistory::new(20);
        for v in [0.1, 0.3, 0.1, 0.3] {
            history.push(v, v > 0.22);
        }
        let metrics = history.metrics();
        assert!((metrics.avg - 0.2).abs() < 1e-6);
        assert!((metrics.variance - 0.01).abs() < 1e-6);
        assert_eq!(metrics.transitions, 3);
        assert!((metrics.open_ratio - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_open_count_follows_eviction() {
        let mut history = MouthHistory::new(3);
        for open in [true, true, false, false, false] {
            history.push(if open { 0.4 } else { 0.0 }, open);
        }
        assert_eq!(history.metrics().open_ratio, 0.0);
    }

    #[test]
    fn test_counters_saturate_on_long_streams() {
        let mut tracker = MouthTracker::default();
        for _ in 0..6 {
            tracker.update(0.5);
        }
        tracker.yawning_frames = u32::MAX - 1;
        assert_eq!(tracker.update(0.5), Some(MouthVerdict::Yawning));
        assert_eq!(tracker.update(0.5), Some(MouthVerdict::Yawning));
        assert_eq!(tracker.yawning_frames(), u32::MAX);

        let mut tracker = MouthTracker::default();
        for i in 0..6 {
            tracker.update(alternating(i));
        }
        tracker.talking_frames = u32::MAX;
        assert_eq!(tracker.update(alternating(6)), Some(MouthVerdict::Talking));
        assert_eq!(tracker.talking_frames(), u32::MAX);
    }

    #[test]
    fn test_reset_clears_history() {
        let mut tracker = MouthTracker::default();
        for _ in 0..10 {
            tracker.update(0.5);
        }
        tracker.reset();
        assert!(tracker.history().is_empty());
        assert_eq!(tracker.yawning_frames(), 0);
        assert!(tracker.last_metrics().is_none());
    }

    proptest! {
        #[test]
        fn prop_yawn_and_talk_never_both_hold(
            ratios in proptest::collection::vec(0.0f32..1.0, 6..60),
        ) {
            let config = MouthConfig::default();
            let mut history = MouthHistory::new(config.history_capacity);
            for r in ratios {
                history.push(r, r > config.open_threshold);
                let metrics = history.metrics();
                prop_assert!(!(metrics.is_yawn_like(&config) && metrics.is_talk_like(&config)));
                prop_assert_eq!(history.len(), history.flag_len());
                prop_assert!(history.len() <= config.history_capacity);
            }
        }
    }
}
