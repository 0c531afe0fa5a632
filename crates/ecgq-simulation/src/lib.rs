//! ECGQ-Simulation: Synthetic ECG for exercising quality assessment
//!
//! Generates recordings and live window streams with controllable electrode
//! contact problems.

pub mod contact_patterns;
pub mod ecg_simulator;
pub mod real_time_stream;

pub use contact_patterns::*;
pub use ecg_simulator::*;
pub use real_time_stream::*;
