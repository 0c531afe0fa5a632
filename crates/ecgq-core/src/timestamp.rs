//! Millisecond timestamps for raw sensor samples
//!
//! Sensor samples arrive stamped in milliseconds since the Unix epoch, which
//! is also the resolution window boundaries are computed at.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Point in time with millisecond resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Timestamp {
    /// Milliseconds since Unix epoch
    millis: u64,
}

impl Timestamp {
    /// Create a timestamp from milliseconds since Unix epoch
    #[inline]
    pub const fn from_millis(millis: u64) -> Self {
        Self { millis }
    }

    /// Milliseconds since Unix epoch
    #[inline]
    pub const fn as_millis(&self) -> u64 {
        self.millis
    }

    /// Current wall-clock time, or the epoch if the clock is before it
    pub fn now() -> Self {
        let millis = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self { millis }
    }

    /// Milliseconds elapsed since `earlier`, zero if `earlier` is later
    #[inline]
    pub const fn millis_since(&self, earlier: Timestamp) -> u64 {
        self.millis.saturating_sub(earlier.millis)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.millis)
    }
}
