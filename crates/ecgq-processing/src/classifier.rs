//! Windowed ECG quality classifier
//!
//! Labels each window of raw ECG as GOOD, BAND_LOOSE or BAND_OFF from its
//! artifact counts, its clean peak-to-peak amplitude and the amplitudes of
//! the most recent windows. The two circular histories are the only state
//! carried from one window to the next, so one classifier serves exactly
//! one recording or live session.

use crate::artifacts::{scan_window, ArtifactCounts};
use crate::config::{validate_quality_threshold, QualityConfig};
use crate::history::CircularHistory;
use ecgq_core::{
    AggregateLabel, LabeledPoint, QualityError, QualityLabel, QualityResult, SegmentClass, Timestamp,
    Window,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Intermediate values behind one window's label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowAssessment {
    pub counts: ArtifactCounts,
    pub segment: SegmentClass,
    pub peak_to_peak: i32,
    /// Recent windows, this one included, whose amplitude is below the loose-band threshold
    pub amplitude_small: usize,
    pub label: QualityLabel,
}

/// Labels for a whole recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingQuality {
    /// Pass/fail verdict stamped with the first window's start time
    pub aggregate: LabeledPoint<AggregateLabel>,
    /// One label per classified window, in order
    pub windows: Vec<LabeledPoint<QualityLabel>>,
    /// Fraction of classified windows labeled GOOD
    pub good_fraction: f64,
}

/// Stateful classifier over successive fixed-duration windows
#[derive(Debug, Clone)]
pub struct WindowedQualityClassifier {
    config: QualityConfig,
    amplitude_history: CircularHistory<i32>,
    // Written every window, never consulted by a decision
    class_history: CircularHistory<SegmentClass>,
    windows_processed: u64,
}

impl WindowedQualityClassifier {
    /// Create a classifier with sentinel-filled histories
    ///
    /// Amplitude slots start at twice the loose-band threshold and class
    /// slots at GOOD, so the first `buffer_length` windows are not judged
    /// against an empty history.
    pub fn new(config: QualityConfig) -> QualityResult<Self> {
        config.validate()?;

        let amplitude_sentinel = config.band_loose_threshold.saturating_mul(2);
        let amplitude_history = CircularHistory::new(config.buffer_length, amplitude_sentinel)?;
        let class_history = CircularHistory::new(config.buffer_length, SegmentClass::Good)?;

        Ok(Self {
            config,
            amplitude_history,
            class_history,
            windows_processed: 0,
        })
    }

    /// Label one window of raw values
    pub fn classify_window(&mut self, values: &[i32]) -> QualityResult<QualityLabel> {
        self.assess_window(values).map(|assessment| assessment.label)
    }

    /// Label one window and return the values the decision was based on
    ///
    /// An empty window is rejected before either history is touched.
    pub fn assess_window(&mut self, values: &[i32]) -> QualityResult<WindowAssessment> {
        let scan = scan_window(values, &self.config)?;

        let outliers = scan.counts.total() as u64;
        let segment = if 100 * outliers
            > u64::from(self.config.acceptable_outlier_percent) * scan.len as u64
        {
            SegmentClass::Bad
        } else {
            SegmentClass::Good
        };

        let peak_to_peak = scan.peak_to_peak();
        self.class_history.push(segment);
        self.amplitude_history.push(peak_to_peak);
        self.windows_processed += 1;

        let threshold = self.config.band_loose_threshold;
        let amplitude_small = self.amplitude_history.count_where(|&a| a < threshold);

        let label = if segment == SegmentClass::Bad {
            QualityLabel::BandOff
        } else if 2 * amplitude_small > self.amplitude_history.capacity() {
            QualityLabel::BandLoose
        } else if peak_to_peak <= threshold {
            QualityLabel::BandLoose
        } else {
            QualityLabel::Good
        };

        debug!(
            window = self.windows_processed,
            outliers,
            peak_to_peak,
            amplitude_small,
            %segment,
            %label,
            "classified window"
        );

        Ok(WindowAssessment {
            counts: scan.counts,
            segment,
            peak_to_peak,
            amplitude_small,
            label,
        })
    }

    /// Assess windows in order, skipping empty ones
    ///
    /// Each result is paired with its window's start time. History carries
    /// over from one window to the next.
    pub fn assess_windows(
        &mut self,
        windows: &[Window],
    ) -> QualityResult<Vec<(Timestamp, WindowAssessment)>> {
        let mut assessed = Vec::with_capacity(windows.len());
        for window in windows {
            let Some(start) = window.start_time() else {
                debug!("skipping empty window");
                continue;
            };
            assessed.push((start, self.assess_window(&window.values())?));
        }
        Ok(assessed)
    }

    /// Label every window of a recording and aggregate the result
    ///
    /// The recording is GOOD when the fraction of GOOD windows is strictly
    /// greater than `quality_threshold`.
    pub fn classify_recording(
        &mut self,
        windows: &[Window],
        quality_threshold: f64,
    ) -> QualityResult<RecordingQuality> {
        validate_quality_threshold(quality_threshold)?;

        let labels = self
            .assess_windows(windows)?
            .into_iter()
            .map(|(start, assessment)| LabeledPoint::new(start, assessment.label))
            .collect();

        aggregate_labels(labels, quality_threshold)
    }

    pub fn config(&self) -> &QualityConfig {
        &self.config
    }

    pub fn amplitude_history(&self) -> &CircularHistory<i32> {
        &self.amplitude_history
    }

    pub fn class_history(&self) -> &CircularHistory<SegmentClass> {
        &self.class_history
    }

    /// Windows classified since construction
    pub fn windows_processed(&self) -> u64 {
        self.windows_processed
    }
}

/// Reduce per-window labels to a recording verdict
pub fn aggregate_labels(
    windows: Vec<LabeledPoint<QualityLabel>>,
    quality_threshold: f64,
) -> QualityResult<RecordingQuality> {
    let first = windows.first().ok_or(QualityError::EmptyRecording)?.timestamp;

    let good = windows.iter().filter(|w| w.label.is_good()).count();
    let good_fraction = good as f64 / windows.len() as f64;

    let label = if good_fraction > quality_threshold {
        AggregateLabel::Good
    } else {
        AggregateLabel::Bad
    };

    Ok(RecordingQuality {
        aggregate: LabeledPoint::new(first, label),
        windows,
        good_fraction,
    })
}
