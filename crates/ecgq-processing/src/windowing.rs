//! Slicing a sample stream into fixed-duration windows

use ecgq_core::{config_error, QualityResult, Sample, Window};

/// Split samples into non-overlapping windows of `window_duration_ms`
///
/// Window boundaries sit on multiples of the duration on the epoch time
/// axis, so the same sample always lands in the same window regardless of
/// where the recording started. Consecutive samples in the same bucket form
/// one window; gaps in the stream produce no empty windows.
pub fn window_by_duration(samples: &[Sample], window_duration_ms: u64) -> QualityResult<Vec<Window>> {
    if window_duration_ms == 0 {
        return Err(config_error!("window duration must be positive"));
    }

    let mut windows = Vec::new();
    let mut current: Vec<Sample> = Vec::new();
    let mut current_bucket = None;

    for sample in samples {
        let bucket = sample.timestamp.as_millis() / window_duration_ms;
        if current_bucket != Some(bucket) && !current.is_empty() {
            windows.push(Window::new(std::mem::take(&mut current)));
        }
        current_bucket = Some(bucket);
        current.push(*sample);
    }

    if !current.is_empty() {
        windows.push(Window::new(current));
    }

    Ok(windows)
}
