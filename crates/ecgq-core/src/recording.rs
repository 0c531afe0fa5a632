//! EcgRecording: container for one continuous ECG capture

use crate::error::{QualityError, QualityResult};
use crate::sample::Sample;
use crate::timestamp::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Descriptive metadata for a recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingMetadata {
    /// Nominal sampling rate in Hz
    pub sampling_rate_hz: f32,
    /// Free-form sensor or subject label
    pub source: String,
    /// Creation timestamp
    pub created_at: Timestamp,
}

impl RecordingMetadata {
    pub fn new(sampling_rate_hz: f32, source: impl Into<String>) -> QualityResult<Self> {
        if !(sampling_rate_hz.is_finite() && sampling_rate_hz > 0.0) {
            return Err(QualityError::InvalidRecording {
                reason: format!("sampling rate must be positive, got {}", sampling_rate_hz),
            });
        }

        Ok(RecordingMetadata {
            sampling_rate_hz,
            source: source.into(),
            created_at: Timestamp::now(),
        })
    }
}

/// Raw ECG samples from one continuous session of one sensor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EcgRecording {
    /// Unique identifier for this recording
    pub id: Uuid,
    /// Samples in arrival order
    pub samples: Vec<Sample>,
    /// Recording metadata
    pub metadata: RecordingMetadata,
}

impl EcgRecording {
    pub fn new(samples: Vec<Sample>, metadata: RecordingMetadata) -> Self {
        EcgRecording {
            id: Uuid::new_v4(),
            samples,
            metadata,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn start_time(&self) -> Option<Timestamp> {
        self.samples.first().map(|s| s.timestamp)
    }

    pub fn end_time(&self) -> Option<Timestamp> {
        self.samples.last().map(|s| s.timestamp)
    }

    /// Span between first and last sample in milliseconds
    pub fn duration_ms(&self) -> u64 {
        match (self.start_time(), self.end_time()) {
            (Some(start), Some(end)) => end.millis_since(start),
            _ => 0,
        }
    }

    /// Append samples captured after the existing ones
    pub fn extend(&mut self, samples: impl IntoIterator<Item = Sample>) {
        self.samples.extend(samples);
    }
}
