//! `timestamp_ms,value` CSV input

use ecgq_core::{EcgRecording, QualityError, QualityResult, RecordingMetadata, Sample};
use std::io::Read;

/// Used when the file has too few samples to infer a rate
const FALLBACK_SAMPLING_RATE_HZ: f32 = 250.0;

/// Read samples from CSV rows
///
/// The first non-blank row is taken as a header when it does not parse.
/// Blank rows are skipped.
pub fn read_samples<R: Read>(reader: R) -> QualityResult<Vec<Sample>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut samples = Vec::new();
    let mut seen_row = false;

    for record in reader.records() {
        let record = record.map_err(|e| QualityError::InvalidRecording {
            reason: format!("CSV read failed: {}", e),
        })?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let first_row = !seen_row;
        seen_row = true;

        match parse_row(&record) {
            Some(sample) => samples.push(sample),
            None if first_row => continue,
            None => {
                let line = record.position().map_or(0, |p| p.line());
                return Err(QualityError::InvalidRecording {
                    reason: format!("line {}: expected timestamp_ms,value but got {:?}", line, record),
                });
            }
        }
    }

    Ok(samples)
}

fn parse_row(record: &csv::StringRecord) -> Option<Sample> {
    if record.len() != 2 {
        return None;
    }
    let timestamp = record.get(0)?.parse().ok()?;
    let value = record.get(1)?.parse().ok()?;
    Some(Sample::new(timestamp, value))
}

/// Mean rate implied by the first and last timestamps
pub fn infer_sampling_rate(samples: &[Sample]) -> f32 {
    match (samples.first(), samples.last()) {
        (Some(first), Some(last)) if last.timestamp > first.timestamp => {
            let span_ms = last.timestamp.as_millis() - first.timestamp.as_millis();
            (samples.len() - 1) as f32 * 1_000.0 / span_ms as f32
        }
        _ => FALLBACK_SAMPLING_RATE_HZ,
    }
}

pub fn read_recording<R: Read>(reader: R, source: &str) -> QualityResult<EcgRecording> {
    let samples = read_samples(reader)?;
    let metadata = RecordingMetadata::new(infer_sampling_rate(&samples), source)?;
    Ok(EcgRecording::new(samples, metadata))
}
