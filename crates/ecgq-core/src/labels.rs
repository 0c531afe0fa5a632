//! Quality labels emitted per window and per recording

use crate::timestamp::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of the artifact count check for one window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentClass {
    Good,
    Bad,
}

/// Per-window electrode contact quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualityLabel {
    /// Physiologically usable signal
    Good,
    /// Weak electrode contact, amplitude too small
    BandLoose,
    /// No usable signal, artifacts dominate the window
    BandOff,
}

/// Pass/fail verdict for a whole recording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregateLabel {
    Good,
    Bad,
}

/// A label stamped with the start time of what it describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledPoint<L> {
    pub timestamp: Timestamp,
    pub label: L,
}

impl<L> LabeledPoint<L> {
    pub fn new(timestamp: Timestamp, label: L) -> Self {
        Self { timestamp, label }
    }
}

impl QualityLabel {
    pub fn is_good(&self) -> bool {
        matches!(self, QualityLabel::Good)
    }
}

impl fmt::Display for SegmentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentClass::Good => write!(f, "GOOD"),
            SegmentClass::Bad => write!(f, "BAD"),
        }
    }
}

impl fmt::Display for QualityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityLabel::Good => write!(f, "GOOD"),
            QualityLabel::BandLoose => write!(f, "BAND_LOOSE"),
            QualityLabel::BandOff => write!(f, "BAND_OFF"),
        }
    }
}

impl fmt::Display for AggregateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateLabel::Good => write!(f, "GOOD"),
            AggregateLabel::Bad => write!(f, "BAD"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_display() {
        assert_eq!(QualityLabel::BandLoose.to_string(), "BAND_LOOSE");
        assert_eq!(QualityLabel::BandOff.to_string(), "BAND_OFF");
        assert_eq!(AggregateLabel::Bad.to_string(), "BAD");
        assert!(QualityLabel::Good.is_good());
        assert!(!QualityLabel::BandOff.is_good());
    }

    #[test]
    fn test_labeled_point_serialization() {
        let point = LabeledPoint::new(Timestamp::from_millis(42), QualityLabel::BandOff);
        let json = serde_json::to_string(&point).unwrap();
        assert_eq!(json, r#"{"timestamp":42,"label":"BandOff"}"#);
    }
}
