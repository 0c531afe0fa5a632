//! JSON report printed by the binary

use chrono::{DateTime, Utc};
use ecgq_processing::RecordingAssessment;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub source: &'a str,
    pub samples: usize,
    pub duration_ms: u64,
    /// Aggregate timestamp as RFC 3339, absent if out of range
    pub aggregate_time: Option<String>,
    #[serde(flatten)]
    pub assessment: &'a RecordingAssessment,
}

impl<'a> Report<'a> {
    pub fn new(source: &'a str, samples: usize, duration_ms: u64, assessment: &'a RecordingAssessment) -> Self {
        let millis = assessment.aggregate().timestamp.as_millis();
        let aggregate_time = i64::try_from(millis)
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|time| time.to_rfc3339());

        Report {
            source,
            samples,
            duration_ms,
            aggregate_time,
            assessment,
        }
    }
}
