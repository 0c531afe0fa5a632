//! Synthetic ECG in raw sensor units
//!
//! Each beat is a sum of Gaussian bumps for the P, Q, R, S and T waves on
//! top of a fixed baseline, with white noise, then passed through the
//! configured contact pattern and clamped to the 12-bit ADC range.

use crate::contact_patterns::{ContactPattern, ADC_MAX};
use ecgq_core::{config_error, EcgRecording, QualityResult, RecordingMetadata, Sample, Window};
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// (relative amplitude, centre within the beat in seconds, width in seconds)
const WAVES: [(f64, f64, f64); 5] = [
    (0.12, 0.20, 0.025), // P
    (-0.10, 0.36, 0.010), // Q
    (1.00, 0.40, 0.012), // R
    (-0.20, 0.44, 0.010), // S
    (0.30, 0.65, 0.045), // T
];

/// Configuration for ECG simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcgSimConfig {
    pub sampling_rate_hz: f32,
    pub heart_rate_bpm: f32,
    /// Isoelectric level in sensor units
    pub baseline: i32,
    /// Height of the R wave above baseline
    pub r_amplitude: f32,
    /// Gaussian noise standard deviation in sensor units
    pub noise_std: f32,
    pub pattern: ContactPattern,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
    /// Timestamp of the first generated sample
    pub start_time_ms: u64,
}

impl Default for EcgSimConfig {
    fn default() -> Self {
        Self {
            sampling_rate_hz: 250.0,
            heart_rate_bpm: 72.0,
            baseline: 2_000,
            r_amplitude: 300.0,
            noise_std: 3.0,
            pattern: ContactPattern::Attached,
            seed: None,
            start_time_ms: 0,
        }
    }
}

/// ECG signal simulator
pub struct EcgSimulator {
    config: EcgSimConfig,
    rng: rand::rngs::StdRng,
    noise: Normal<f64>,
    sample_index: u64,
}

impl EcgSimulator {
    /// Create new ECG simulator with configuration
    pub fn new(config: EcgSimConfig) -> QualityResult<Self> {
        Self::validate(&config)?;

        let rng = match config.seed {
            Some(seed) => rand::rngs::StdRng::seed_from_u64(seed),
            None => rand::rngs::StdRng::from_entropy(),
        };
        let noise = Normal::new(0.0, f64::from(config.noise_std))
            .map_err(|e| config_error!("invalid noise level: {}", e))?;

        Ok(EcgSimulator {
            config,
            rng,
            noise,
            sample_index: 0,
        })
    }

    fn validate(config: &EcgSimConfig) -> QualityResult<()> {
        if !(config.sampling_rate_hz.is_finite() && config.sampling_rate_hz > 0.0) {
            return Err(config_error!("sampling rate must be positive"));
        }
        if !(config.heart_rate_bpm.is_finite() && config.heart_rate_bpm > 0.0) {
            return Err(config_error!("heart rate must be positive"));
        }
        Ok(())
    }

    /// Generate the next `duration_ms` of signal as a recording
    pub fn generate(&mut self, duration_ms: u64) -> QualityResult<EcgRecording> {
        let metadata = RecordingMetadata::new(self.config.sampling_rate_hz, self.config.pattern.description())?;
        Ok(EcgRecording::new(self.next_samples(duration_ms), metadata))
    }

    /// Generate the next `duration_ms` of signal as one window
    pub fn generate_window(&mut self, duration_ms: u64) -> Window {
        Window::new(self.next_samples(duration_ms))
    }

    fn next_samples(&mut self, duration_ms: u64) -> Vec<Sample> {
        let rate = f64::from(self.config.sampling_rate_hz);
        let count = (duration_ms as f64 * rate / 1_000.0).round() as u64;

        (0..count)
            .map(|_| {
                let index = self.sample_index;
                self.sample_index += 1;

                let time = index as f64 / rate;
                let timestamp = self.config.start_time_ms + (time * 1_000.0).round() as u64;
                Sample::new(timestamp, self.sample_at(time))
            })
            .collect()
    }

    fn sample_at(&mut self, time: f64) -> i32 {
        let baseline = f64::from(self.config.baseline);
        let deviation = self.waveform(time) + self.noise.sample(&mut self.rng);

        let value = match self.config.pattern {
            ContactPattern::Attached => baseline + deviation,
            ContactPattern::Loose { attenuation } => baseline + deviation * f64::from(attenuation),
            ContactPattern::Detached { rail } => f64::from(rail),
            ContactPattern::Clipping { ceiling } => (baseline + deviation).min(f64::from(ceiling)),
            ContactPattern::MotionBursts { probability, amplitude } => {
                let mut value = baseline + deviation;
                if self.rng.gen::<f32>() < probability {
                    let amplitude = f64::from(amplitude);
                    value += self.rng.gen_range(-amplitude..=amplitude);
                }
                value
            }
        };

        (value.round() as i32).clamp(0, ADC_MAX)
    }

    /// Clean PQRST deviation from baseline at `time` seconds
    fn waveform(&self, time: f64) -> f64 {
        let beat_period = 60.0 / f64::from(self.config.heart_rate_bpm);
        let phase = time % beat_period;
        let r_amplitude = f64::from(self.config.r_amplitude);

        WAVES
            .iter()
            .map(|&(amplitude, centre, width)| {
                let z = (phase - centre) / width;
                r_amplitude * amplitude * (-0.5 * z * z).exp()
            })
            .sum()
    }

    /// Restart timestamps from the configured start time
    pub fn reset_time(&mut self) {
        self.sample_index = 0;
    }

    /// Get current configuration
    pub fn config(&self) -> &EcgSimConfig {
        &self.config
    }

    /// Switch contact pattern without breaking timestamp continuity
    pub fn set_pattern(&mut self, pattern: ContactPattern) {
        self.config.pattern = pattern;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(pattern: ContactPattern) -> EcgSimulator {
        EcgSimulator::new(EcgSimConfig {
            pattern,
            seed: Some(7),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_simulator_basic() {
        let mut simulator = seeded(ContactPattern::Attached);
        let recording = simulator.generate(1_000).unwrap();

        assert_eq!(recording.len(), 250);
        assert_eq!(recording.metadata.sampling_rate_hz, 250.0);
        assert_eq!(recording.samples[1].timestamp.as_millis(), 4);

        let values: Vec<i32> = recording.samples.iter().map(|s| s.value).collect();
        let max = *values.iter().max().unwrap();
        let min = *values.iter().min().unwrap();
        assert!(max - min > 200, "R waves should dominate the range");
    }

    #[test]
    fn test_timestamps_continue_across_calls() {
        let mut simulator = seeded(ContactPattern::Attached);
        let first = simulator.generate_window(1_000);
        let second = simulator.generate_window(1_000);
        assert_eq!(first.end_time().unwrap().as_millis(), 996);
        assert_eq!(second.start_time().unwrap().as_millis(), 1_000);

        simulator.reset_time();
        assert_eq!(simulator.generate_window(100).start_time().unwrap().as_millis(), 0);
    }

    #[test]
    fn test_same_seed_is_reproducible() {
        let a = seeded(ContactPattern::Attached).generate_window(2_000);
        let b = seeded(ContactPattern::Attached).generate_window(2_000);
        assert_eq!(a, b);
    }

    #[test]
    fn test_detached_sits_on_rail() {
        let window = seeded(ContactPattern::Detached { rail: ADC_MAX }).generate_window(500);
        assert!(window.values().iter().all(|&v| v == ADC_MAX));
    }

    #[test]
    fn test_clipping_ceiling() {
        let window = seeded(ContactPattern::Clipping { ceiling: 2_100 }).generate_window(3_000);
        let values = window.values();
        assert!(values.iter().all(|&v| v <= 2_100));
        assert!(values.iter().filter(|&&v| v == 2_100).count() > 3);
    }

    #[test]
    fn test_loose_band_is_small() {
        let window = seeded(ContactPattern::Loose { attenuation: 0.05 }).generate_window(3_000);
        let values = window.values();
        let range = values.iter().max().unwrap() - values.iter().min().unwrap();
        assert!(range < 47, "range {} should be under the loose-band threshold", range);
    }

    #[test]
    fn test_invalid_config() {
        let config = EcgSimConfig {
            sampling_rate_hz: 0.0,
            ..Default::default()
        };
        assert!(EcgSimulator::new(config).is_err());

        let config = EcgSimConfig {
            noise_std: -1.0,
            ..Default::default()
        };
        assert!(EcgSimulator::new(config).is_err());
    }
}
