//! Configuration management for ECG quality assessment

use ecgq_core::{config_error, QualityError, QualityResult};
use serde::{Deserialize, Serialize};

/// Neighbour difference above which a sample counts as discontinuous
pub const DEFAULT_DISCONTINUITY_JUMP: i32 = 100;

/// Neighbour difference above which a sample counts as a flip
pub const DEFAULT_FLIP_JUMP: i32 = 4000;

/// Thresholds for the windowed quality classifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityConfig {
    /// Percentage of artifact samples a window may contain and still be GOOD
    pub acceptable_outlier_percent: u32,
    /// Values at or above this are stuck high
    pub outlier_threshold_high: i32,
    /// Values at or below this are stuck low
    pub outlier_threshold_low: i32,
    /// Peak-to-peak amplitude at or below this means a loose band
    pub band_loose_threshold: i32,
    /// Capacity of the amplitude and segment class histories
    pub buffer_length: usize,
    #[serde(default = "default_discontinuity_jump")]
    pub discontinuity_jump: i32,
    #[serde(default = "default_flip_jump")]
    pub flip_jump: i32,
}

fn default_discontinuity_jump() -> i32 {
    DEFAULT_DISCONTINUITY_JUMP
}

fn default_flip_jump() -> i32 {
    DEFAULT_FLIP_JUMP
}

impl QualityConfig {
    /// Create a configuration with the standard jump thresholds
    pub fn new(
        acceptable_outlier_percent: u32,
        outlier_threshold_high: i32,
        outlier_threshold_low: i32,
        band_loose_threshold: i32,
        buffer_length: usize,
    ) -> Self {
        Self {
            acceptable_outlier_percent,
            outlier_threshold_high,
            outlier_threshold_low,
            band_loose_threshold,
            buffer_length,
            discontinuity_jump: DEFAULT_DISCONTINUITY_JUMP,
            flip_jump: DEFAULT_FLIP_JUMP,
        }
    }

    /// Override the neighbour jump thresholds for sensors on another scale
    pub fn with_jump_thresholds(mut self, discontinuity_jump: i32, flip_jump: i32) -> Self {
        self.discontinuity_jump = discontinuity_jump;
        self.flip_jump = flip_jump;
        self
    }

    /// Check the classifier parameters
    ///
    /// A zero buffer length is the only value the classifier cannot run
    /// with. This also rejects settings it would accept but that make the
    /// artifact test meaningless: an outlier percent above 100 (no window
    /// can ever be BAD) and a negative jump threshold (every sample is
    /// discontinuous). Outlier and loose-band thresholds are not checked
    /// against each other.
    pub fn validate(&self) -> QualityResult<()> {
        if self.buffer_length == 0 {
            return Err(config_error!("buffer length must be at least 1"));
        }

        if self.acceptable_outlier_percent > 100 {
            return Err(config_error!(
                "acceptable outlier percent must be within 0-100, got {}",
                self.acceptable_outlier_percent
            ));
        }

        if self.discontinuity_jump < 0 || self.flip_jump < 0 {
            return Err(config_error!(
                "jump thresholds must be non-negative, got {} and {}",
                self.discontinuity_jump,
                self.flip_jump
            ));
        }

        Ok(())
    }
}

/// Windowing parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Duration of each non-overlapping window in milliseconds
    pub window_duration_ms: u64,
}

impl WindowConfig {
    pub fn validate(&self) -> QualityResult<()> {
        if self.window_duration_ms == 0 {
            return Err(config_error!("window duration must be positive"));
        }
        Ok(())
    }
}

/// Complete configuration for assessing a recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentConfig {
    /// Configuration name/profile
    pub name: String,
    pub quality: QualityConfig,
    pub window: WindowConfig,
    /// Fraction of GOOD windows a recording must exceed to pass
    pub quality_threshold: f64,
}

impl AssessmentConfig {
    /// AutoSense chest band deployment values
    pub fn autosense_chest_band() -> Self {
        AssessmentConfig {
            name: "AutoSense chest band".to_string(),
            quality: QualityConfig::new(50, 4000, 20, 47, 3),
            window: WindowConfig {
                window_duration_ms: 3000,
            },
            quality_threshold: 0.67,
        }
    }

    /// Validate entire configuration
    pub fn validate(&self) -> QualityResult<()> {
        self.quality.validate()?;
        self.window.validate()?;
        validate_quality_threshold(self.quality_threshold)
    }

    /// Export configuration to JSON
    pub fn to_json(&self) -> QualityResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| QualityError::Serialization {
            reason: format!("Failed to serialize configuration: {}", e),
        })
    }

    /// Import configuration from JSON and validate it
    pub fn from_json(json: &str) -> QualityResult<Self> {
        let config: AssessmentConfig =
            serde_json::from_str(json).map_err(|e| QualityError::Serialization {
                reason: format!("Failed to deserialize configuration: {}", e),
            })?;
        config.validate()?;
        Ok(config)
    }
}

/// The aggregate threshold is a fraction of windows
///
/// Values outside `[0, 1]` are rejected even though the comparison would
/// still be defined: above 1 every recording is BAD, below 0 every
/// recording with a classified window is GOOD.
pub fn validate_quality_threshold(threshold: f64) -> QualityResult<()> {
    if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
        return Err(config_error!(
            "quality threshold must be a fraction within 0-1, got {}",
            threshold
        ));
    }
    Ok(())
}
