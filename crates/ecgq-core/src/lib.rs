//! ECGQ-Core: Foundation types for ECG signal quality assessment
//!
//! Samples, windows, labels and recordings shared by the processing,
//! simulation and command-line crates.

pub mod error;
pub mod labels;
pub mod recording;
pub mod sample;
pub mod timestamp;

pub use error::{QualityError, QualityResult};
pub use labels::{AggregateLabel, LabeledPoint, QualityLabel, SegmentClass};
pub use recording::{EcgRecording, RecordingMetadata};
pub use sample::{Sample, Window};
pub use timestamp::Timestamp;
pub use uuid::Uuid;
