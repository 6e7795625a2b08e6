//! Telemetry sample type.

use crate::Parameter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One SWIS Level-2 measurement: all four parameters at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    pub timestamp: DateTime<Utc>,
    pub flux: f64,
    pub density: f64,
    pub temperature: f64,
    pub velocity: f64,
}

impl TelemetrySample {
    /// Read the value for a given parameter.
    pub fn get(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Flux => self.flux,
            Parameter::Density => self.density,
            Parameter::Temperature => self.temperature,
            Parameter::Velocity => self.velocity,
        }
    }
}
