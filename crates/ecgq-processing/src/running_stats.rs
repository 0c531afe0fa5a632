//! Online mean and variance over an unbounded stream
//!
//! Welford's one-pass update: no history is stored and the accumulator
//! stays numerically stable over long streams.

use ecgq_core::{QualityError, QualityResult};
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Running mean and sample variance accumulator
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OnlineMeanVariance {
    count: u64,
    mean: f64,
    /// Sum of squared deviations from the running mean
    m2: f64,
}

impl OnlineMeanVariance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one observation
    pub fn add(&mut self, x: f64) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
    }

    /// Observations added so far
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> QualityResult<f64> {
        self.require(1)?;
        Ok(self.mean)
    }

    /// Sample variance with the `n - 1` divisor
    pub fn variance(&self) -> QualityResult<f64> {
        self.require(2)?;
        Ok(self.m2 / (self.count - 1) as f64)
    }

    /// Sample standard deviation
    pub fn stdev(&self) -> QualityResult<f64> {
        self.variance().map(f64::sqrt)
    }

    fn require(&self, required: u64) -> QualityResult<()> {
        if self.count < required {
            return Err(QualityError::InsufficientSamples {
                required,
                available: self.count,
            });
        }
        Ok(())
    }
}

/// Values without an `f64` representation are skipped
impl<T: ToPrimitive> Extend<T> for OnlineMeanVariance {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            if let Some(x) = value.to_f64() {
                self.add(x);
            }
        }
    }
}

impl<T: ToPrimitive> FromIterator<T> for OnlineMeanVariance {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut stats = OnlineMeanVariance::new();
        stats.extend(iter);
        stats
    }
}
