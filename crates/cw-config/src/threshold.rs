//! Threshold entry: one tunable detection parameter.

use cw_common::{Error, Parameter, Result};
use serde::{Deserialize, Serialize};

/// Sensitivity applied when an entry is reset to defaults.
pub const DEFAULT_SENSITIVITY: u8 = 75;

/// Fraction of the range used for the reset value.
pub const DEFAULT_VALUE_FRACTION: f64 = 0.6;

/// One tunable detection threshold.
///
/// Invariant: `range.0 <= value <= range.1` at all times, bounds inclusive.
/// Violating updates are rejected, never clamped. The range is fixed per
/// parameter at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdEntry {
    pub parameter: Parameter,

    /// Display label; not semantically load-bearing.
    pub label: String,

    /// Display unit; not semantically load-bearing.
    pub unit: String,

    /// Disabled entries are excluded from detection evaluation.
    pub enabled: bool,

    /// Current threshold value, always within `range`.
    pub value: f64,

    /// Valid value range (min, max), min < max.
    pub range: (f64, f64),

    /// Detection sensitivity percentage in [0, 100].
    pub sensitivity: u8,
}

impl ThresholdEntry {
    /// Initial entry for a parameter, with the dashboard's shipped tuning.
    pub fn initial(parameter: Parameter) -> Self {
        let (value, range, sensitivity) = match parameter {
            Parameter::Flux => (5_000_000.0, (1_000_000.0, 10_000_000.0), 75),
            Parameter::Density => (25.0, (5.0, 100.0), 80),
            Parameter::Temperature => (500_000.0, (100_000.0, 1_000_000.0), 70),
            Parameter::Velocity => (800.0, (300.0, 2_000.0), 85),
        };
        Self {
            parameter,
            label: parameter.label().to_string(),
            unit: parameter.unit().to_string(),
            enabled: true,
            value,
            range,
            sensitivity,
        }
    }

    /// The reset target: 60% of the way through the range.
    pub fn default_value(&self) -> f64 {
        self.range.0 + DEFAULT_VALUE_FRACTION * (self.range.1 - self.range.0)
    }

    /// Check a candidate value against the entry's range.
    pub fn check_value(&self, value: f64) -> Result<()> {
        if !value.is_finite() || value < self.range.0 || value > self.range.1 {
            return Err(Error::OutOfRange {
                parameter: self.parameter.as_str().to_string(),
                value,
                min: self.range.0,
                max: self.range.1,
            });
        }
        Ok(())
    }

    /// Where the current value sits in the range, in [0, 1].
    pub fn range_position(&self) -> f64 {
        (self.value - self.range.0) / (self.range.1 - self.range.0)
    }
}

/// Check a sensitivity percentage. Accepts a wide integer so callers can
/// validate raw user input before narrowing.
pub fn check_sensitivity(sensitivity: i64) -> Result<u8> {
    if !(0..=100).contains(&sensitivity) {
        return Err(Error::InvalidSensitivity(sensitivity));
    }
    Ok(sensitivity as u8)
}
