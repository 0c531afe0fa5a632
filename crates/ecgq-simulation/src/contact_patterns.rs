//! Electrode contact conditions applied to simulated ECG

use serde::{Deserialize, Serialize};

/// Highest value a 12-bit front end reports
pub const ADC_MAX: i32 = 4095;

/// How well the electrodes touch the skin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ContactPattern {
    /// Good contact, waveform passes through unchanged
    Attached,
    /// Weak contact shrinks every deviation from baseline
    Loose { attenuation: f32 },
    /// Lead off, the front end sits on a rail
    Detached { rail: i32 },
    /// Amplifier saturates at `ceiling`
    Clipping { ceiling: i32 },
    /// Random spikes from body movement
    MotionBursts { probability: f32, amplitude: f32 },
}

impl ContactPattern {
    /// Preset for a name used on the command line
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "attached" => Some(ContactPattern::Attached),
            "loose" => Some(ContactPattern::Loose { attenuation: 0.05 }),
            "detached" => Some(ContactPattern::Detached { rail: ADC_MAX }),
            "clipping" => Some(ContactPattern::Clipping { ceiling: 2_100 }),
            "motion" => Some(ContactPattern::MotionBursts {
                probability: 0.5,
                amplitude: 2_000.0,
            }),
            _ => None,
        }
    }

    /// Get pattern description
    pub fn description(&self) -> String {
        match self {
            ContactPattern::Attached => "Attached electrodes".to_string(),
            ContactPattern::Loose { attenuation } => {
                format!("Loose band ({:.0}% amplitude)", attenuation * 100.0)
            }
            ContactPattern::Detached { rail } => format!("Detached, railed at {}", rail),
            ContactPattern::Clipping { ceiling } => format!("Clipping at {}", ceiling),
            ContactPattern::MotionBursts { probability, amplitude } => format!(
                "Motion bursts ({:.0}% of samples, +/-{:.0})",
                probability * 100.0,
                amplitude
            ),
        }
    }
}

impl Default for ContactPattern {
    fn default() -> Self {
        ContactPattern::Attached
    }
}
