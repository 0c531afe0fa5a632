//! End-to-end quality assessment of a recording
//!
//! Windows a recording, runs every window through a fresh classifier and
//! summarises the result for downstream consumers.

use crate::classifier::{aggregate_labels, RecordingQuality, WindowedQualityClassifier};
use crate::config::AssessmentConfig;
use crate::running_stats::OnlineMeanVariance;
use crate::windowing::window_by_duration;
use ecgq_core::{AggregateLabel, EcgRecording, LabeledPoint, QualityLabel, QualityResult, Uuid};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, warn};

/// Number of windows per label
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCounts {
    pub good: usize,
    pub band_loose: usize,
    pub band_off: usize,
}

impl LabelCounts {
    pub fn record(&mut self, label: QualityLabel) {
        match label {
            QualityLabel::Good => self.good += 1,
            QualityLabel::BandLoose => self.band_loose += 1,
            QualityLabel::BandOff => self.band_off += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.good + self.band_loose + self.band_off
    }
}

/// Normalization statistics of GOOD-window peak-to-peak amplitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmplitudeSummary {
    pub mean: f64,
    pub stdev: f64,
    pub windows: u64,
}

/// Everything known about one recording's quality
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingAssessment {
    pub recording_id: Uuid,
    pub config_name: String,
    pub quality: RecordingQuality,
    pub label_counts: LabelCounts,
    /// Present once at least two windows are GOOD
    pub amplitude: Option<AmplitudeSummary>,
}

impl RecordingAssessment {
    pub fn aggregate(&self) -> LabeledPoint<AggregateLabel> {
        self.quality.aggregate
    }
}

/// Assess a recording with the given configuration
pub fn assess_recording(
    recording: &EcgRecording,
    config: &AssessmentConfig,
) -> QualityResult<RecordingAssessment> {
    let span = info_span!("assess_recording", recording = %recording.id, config = %config.name);
    let _guard = span.enter();

    config.validate()?;

    let windows = window_by_duration(&recording.samples, config.window.window_duration_ms)?;
    debug!(samples = recording.len(), windows = windows.len(), "windowed recording");

    let mut classifier = WindowedQualityClassifier::new(config.quality.clone())?;
    let mut labels = Vec::with_capacity(windows.len());
    let mut label_counts = LabelCounts::default();
    let mut amplitude = OnlineMeanVariance::new();

    for (start, assessment) in classifier.assess_windows(&windows)? {
        label_counts.record(assessment.label);
        if assessment.label.is_good() {
            amplitude.add(f64::from(assessment.peak_to_peak));
        }
        labels.push(LabeledPoint::new(start, assessment.label));
    }

    let quality = aggregate_labels(labels, config.quality_threshold)?;

    let amplitude = match (amplitude.mean(), amplitude.stdev()) {
        (Ok(mean), Ok(stdev)) => Some(AmplitudeSummary {
            mean,
            stdev,
            windows: amplitude.count(),
        }),
        _ => None,
    };

    info!(
        windows = label_counts.total(),
        good = label_counts.good,
        band_loose = label_counts.band_loose,
        band_off = label_counts.band_off,
        good_fraction = quality.good_fraction,
        aggregate = %quality.aggregate.label,
        "assessed recording"
    );
    if quality.aggregate.label == AggregateLabel::Bad {
        warn!(
            good_fraction = quality.good_fraction,
            threshold = config.quality_threshold,
            "recording failed quality threshold"
        );
    }

    Ok(RecordingAssessment {
        recording_id: recording.id,
        config_name: config.name.clone(),
        quality,
        label_counts,
        amplitude,
    })
}
