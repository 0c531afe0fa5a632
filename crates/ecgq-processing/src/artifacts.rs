//! Per-sample artifact detection within one window
//!
//! Each sample is compared with its two neighbours, treating the window as a
//! ring: the sample before the first is the last and the sample after the
//! last is the first. A one-sample window is therefore its own neighbour on
//! both sides and always reads as stuck.

use crate::config::QualityConfig;
use ecgq_core::{QualityError, QualityResult};
use serde::{Deserialize, Serialize};

/// What a single sample was classified as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleKind {
    /// Differs from a neighbour by more than the discontinuity jump
    Discontinuous,
    /// Equal to both neighbours
    Stuck,
    /// Differs from a neighbour by more than the flip jump
    Flip,
    /// At or above the high outlier threshold
    StuckHigh,
    /// At or below the low outlier threshold
    StuckLow,
    /// Usable; contributes to the window's amplitude range
    Clean,
}

/// Artifact counters for one window, recomputed from scratch every window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactCounts {
    pub stuck: usize,
    pub stuck_high: usize,
    pub stuck_low: usize,
    pub flip: usize,
    pub discontinuous: usize,
}

impl ArtifactCounts {
    /// Outlier samples of any kind
    pub fn total(&self) -> usize {
        self.stuck + self.stuck_high + self.stuck_low + self.flip + self.discontinuous
    }

    fn record(&mut self, kind: SampleKind) {
        match kind {
            SampleKind::Discontinuous => self.discontinuous += 1,
            SampleKind::Stuck => self.stuck += 1,
            SampleKind::Flip => self.flip += 1,
            SampleKind::StuckHigh => self.stuck_high += 1,
            SampleKind::StuckLow => self.stuck_low += 1,
            SampleKind::Clean => {}
        }
    }
}

/// Result of scanning one window sample by sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowScan {
    pub counts: ArtifactCounts,
    /// Largest clean value, or the first sample if none were clean
    pub max_value: i32,
    /// Smallest clean value, or the first sample if none were clean
    pub min_value: i32,
    pub clean_samples: usize,
    pub len: usize,
}

impl WindowScan {
    /// Peak-to-peak amplitude of the clean samples
    pub fn peak_to_peak(&self) -> i32 {
        self.max_value.saturating_sub(self.min_value)
    }
}

/// Classify one sample against its neighbours
///
/// Checks run in priority order and the first match wins, so a sample is
/// counted under exactly one kind.
pub fn classify_sample(prev: i32, value: i32, next: i32, config: &QualityConfig) -> SampleKind {
    let jump_prev = (i64::from(value) - i64::from(prev)).abs();
    let jump_next = (i64::from(value) - i64::from(next)).abs();
    let exceeds = |limit: i32| jump_prev > i64::from(limit) || jump_next > i64::from(limit);

    if exceeds(config.discontinuity_jump) {
        SampleKind::Discontinuous
    } else if value == prev && value == next {
        SampleKind::Stuck
    } else if exceeds(config.flip_jump) {
        SampleKind::Flip
    } else if value >= config.outlier_threshold_high {
        SampleKind::StuckHigh
    } else if value <= config.outlier_threshold_low {
        SampleKind::StuckLow
    } else {
        SampleKind::Clean
    }
}

/// Count artifacts and track the clean amplitude range of a window
pub fn scan_window(values: &[i32], config: &QualityConfig) -> QualityResult<WindowScan> {
    let first = *values.first().ok_or(QualityError::EmptyWindow)?;
    let len = values.len();

    let mut scan = WindowScan {
        counts: ArtifactCounts::default(),
        max_value: first,
        min_value: first,
        clean_samples: 0,
        len,
    };

    for i in 0..len {
        let prev = values[(i + len - 1) % len];
        let next = values[(i + 1) % len];
        let value = values[i];

        match classify_sample(prev, value, next, config) {
            SampleKind::Clean => {
                scan.clean_samples += 1;
                scan.max_value = scan.max_value.max(value);
                scan.min_value = scan.min_value.min(value);
            }
            kind => scan.counts.record(kind),
        }
    }

    Ok(scan)
}
