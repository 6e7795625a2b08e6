//! Configuration presets for common tuning profiles.
//!
//! - Conservative: higher trigger values, lower sensitivity, fewer alerts
//! - Balanced: the shipped defaults
//! - Aggressive: lower trigger values, higher sensitivity, more alerts

use crate::derived::DerivedParameters;
use crate::store::ConfigStore;
use crate::threshold::ThresholdEntry;
use cw_common::Parameter;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Available configuration presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetName {
    /// Fewer alerts: values at 70% of range, sensitivity 50.
    Conservative,
    /// The shipped defaults.
    Balanced,
    /// More alerts: values at 40% of range, sensitivity 90.
    Aggressive,
}

impl PresetName {
    /// All available preset names.
    pub const ALL: &'static [PresetName] = &[
        PresetName::Conservative,
        PresetName::Balanced,
        PresetName::Aggressive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PresetName::Conservative => "conservative",
            PresetName::Balanced => "balanced",
            PresetName::Aggressive => "aggressive",
        }
    }

    /// Parse a preset name from a string.
    pub fn parse(s: &str) -> Option<PresetName> {
        match s.to_lowercase().as_str() {
            "conservative" | "quiet" | "strict" => Some(PresetName::Conservative),
            "balanced" | "default" => Some(PresetName::Balanced),
            "aggressive" | "sensitive" => Some(PresetName::Aggressive),
            _ => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PresetName::Conservative => "Fewer alerts: high trigger values, low sensitivity",
            PresetName::Balanced => "The shipped default tuning",
            PresetName::Aggressive => "More alerts: low trigger values, high sensitivity",
        }
    }
}

impl fmt::Display for PresetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PresetName {
    type Err = cw_common::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PresetName::parse(s).ok_or_else(|| cw_common::Error::InvalidParameter(s.to_string()))
    }
}

/// Build a fully-formed store for a preset. Deterministic.
pub fn get_preset(name: PresetName) -> ConfigStore {
    let (fraction, sensitivity) = match name {
        PresetName::Conservative => (0.7, 50),
        PresetName::Balanced => return ConfigStore::default(),
        PresetName::Aggressive => (0.4, 90),
    };

    let thresholds = Parameter::ALL
        .iter()
        .map(|p| {
            let mut entry = ThresholdEntry::initial(*p);
            entry.value = entry.range.0 + fraction * (entry.range.1 - entry.range.0);
            entry.sensitivity = sensitivity;
            entry
        })
        .collect();

    ConfigStore::from_parts(thresholds, DerivedParameters::default())
}

/// List all presets with descriptions.
pub fn list_presets() -> Vec<(PresetName, &'static str)> {
    PresetName::ALL
        .iter()
        .map(|p| (*p, p.description()))
        .collect()
}
