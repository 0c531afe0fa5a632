//! ECGQ-Processing: Windowed quality classification for raw ECG
//!
//! Artifact detection, per-window labels, recording verdicts and the online
//! statistics used to normalize features downstream.

pub mod artifacts;
pub mod assessment;
pub mod classifier;
pub mod config;
pub mod history;
pub mod running_stats;
pub mod session;
pub mod windowing;

pub use artifacts::{classify_sample, scan_window, ArtifactCounts, SampleKind, WindowScan};
pub use assessment::{assess_recording, AmplitudeSummary, LabelCounts, RecordingAssessment};
pub use classifier::{aggregate_labels, RecordingQuality, WindowAssessment, WindowedQualityClassifier};
pub use config::{
    AssessmentConfig, QualityConfig, WindowConfig, DEFAULT_DISCONTINUITY_JUMP, DEFAULT_FLIP_JUMP,
};
pub use history::CircularHistory;
pub use running_stats::OnlineMeanVariance;
pub use session::{spawn_session, QualitySession, SessionCommand, SessionEvent, SessionHandle};
pub use windowing::window_by_duration;
