//! Raw ECG samples and fixed-duration windows

use crate::timestamp::Timestamp;
use serde::{Deserialize, Serialize};

/// One raw ECG reading in sensor units, no scaling applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: Timestamp,
    pub value: i32,
}

impl Sample {
    /// Create a sample from a millisecond timestamp and raw value
    pub const fn new(timestamp_ms: u64, value: i32) -> Self {
        Self {
            timestamp: Timestamp::from_millis(timestamp_ms),
            value,
        }
    }
}

/// Ordered block of samples covering one window duration
///
/// Windows at the edges of a recording may hold fewer samples than the
/// nominal duration implies. Construction does not require samples; the
/// classifier rejects empty windows when asked to classify them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub samples: Vec<Sample>,
}

impl Window {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    /// Build a window from raw values spaced `period_ms` apart
    pub fn from_values(start_ms: u64, period_ms: u64, values: &[i32]) -> Self {
        let samples = values
            .iter()
            .enumerate()
            .map(|(i, &value)| Sample::new(start_ms + i as u64 * period_ms, value))
            .collect();
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Timestamp of the first sample, which labels the whole window
    pub fn start_time(&self) -> Option<Timestamp> {
        self.samples.first().map(|s| s.timestamp)
    }

    /// Timestamp of the last sample
    pub fn end_time(&self) -> Option<Timestamp> {
        self.samples.last().map(|s| s.timestamp)
    }

    /// Raw values in arrival order
    pub fn values(&self) -> Vec<i32> {
        self.samples.iter().map(|s| s.value).collect()
    }
}
