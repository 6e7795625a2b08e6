//! Solar-wind parameter identifiers.
//!
//! The four SWIS Level-2 parameters the dashboard tracks. The identifier is
//! load-bearing (unique per configuration store); label and unit are display
//! metadata only.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four tracked solar-wind parameters.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Parameter {
    /// Particle flux (particles/cm²/s).
    Flux,
    /// Proton number density (cm⁻³).
    Density,
    /// Plasma temperature (K).
    Temperature,
    /// Solar wind bulk speed (km/s).
    Velocity,
}

impl Parameter {
    /// All parameters in display/evaluation priority order.
    pub const ALL: &'static [Parameter] = &[
        Parameter::Flux,
        Parameter::Density,
        Parameter::Temperature,
        Parameter::Velocity,
    ];

    /// Get the identifier as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Parameter::Flux => "flux",
            Parameter::Density => "density",
            Parameter::Temperature => "temperature",
            Parameter::Velocity => "velocity",
        }
    }

    /// Parse an identifier from a string.
    pub fn parse(s: &str) -> Option<Parameter> {
        match s.to_lowercase().as_str() {
            "flux" => Some(Parameter::Flux),
            "density" => Some(Parameter::Density),
            "temperature" | "temp" => Some(Parameter::Temperature),
            "velocity" | "speed" => Some(Parameter::Velocity),
            _ => None,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Parameter::Flux => "Particle Flux",
            Parameter::Density => "Number Density",
            Parameter::Temperature => "Temperature",
            Parameter::Velocity => "Solar Wind Speed",
        }
    }

    /// Measurement unit.
    pub fn unit(&self) -> &'static str {
        match self {
            Parameter::Flux => "particles/cm²/s",
            Parameter::Density => "cm⁻³",
            Parameter::Temperature => "K",
            Parameter::Velocity => "km/s",
        }
    }

    /// Format a raw value for display: flux in millions, temperature in
    /// thousands, everything else plain.
    pub fn format_value(&self, value: f64) -> String {
        match self {
            Parameter::Flux => format!("{:.1}M", value / 1_000_000.0),
            Parameter::Temperature => format!("{:.0}K", value / 1_000.0),
            Parameter::Density => format!("{:.1}", value),
            Parameter::Velocity => format!("{:.0}", value),
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Parameter {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Parameter::parse(s).ok_or_else(|| crate::Error::InvalidParameter(s.to_string()))
    }
}
