//! CME event records.
//!
//! Events come from an external catalog (CACTUS, SWIS pipeline); the core
//! only filters and displays them, never mutates the catalog.

use crate::Parameter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Review status of a detected event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Confirmed,
    Pending,
    Rejected,
}

impl EventStatus {
    pub const ALL: &'static [EventStatus] = &[
        EventStatus::Confirmed,
        EventStatus::Pending,
        EventStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Confirmed => "confirmed",
            EventStatus::Pending => "pending",
            EventStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<EventStatus> {
        match s.to_lowercase().as_str() {
            "confirmed" => Some(EventStatus::Confirmed),
            "pending" => Some(EventStatus::Pending),
            "rejected" => Some(EventStatus::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EventStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventStatus::parse(s).ok_or_else(|| crate::Error::InvalidParameter(s.to_string()))
    }
}

/// Confidence band for display grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceBand {
    Low,
    Medium,
    High,
}

/// Peak parameter readings observed during an event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeakParameters {
    pub flux: f64,
    pub density: f64,
    pub temperature: f64,
    pub velocity: f64,
}

impl PeakParameters {
    /// Read the peak value for a given parameter.
    pub fn get(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Flux => self.flux,
            Parameter::Density => self.density,
            Parameter::Temperature => self.temperature,
            Parameter::Velocity => self.velocity,
        }
    }
}

/// One catalogued Halo CME event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CmeEvent {
    /// Catalog identifier, e.g. "001".
    pub id: String,

    pub timestamp: DateTime<Utc>,

    /// Event class, e.g. "Full Halo" or "Partial Halo".
    pub class: String,

    /// Flare magnitude designation, e.g. "X2.1".
    pub magnitude: String,

    /// Plane-of-sky speed in km/s.
    pub speed_km_s: f64,

    /// Detection confidence in [0, 1].
    pub confidence: f64,

    pub status: EventStatus,

    /// Originating catalog, e.g. "CACTUS" or "SWIS".
    pub source: String,

    /// Peak parameter readings during the event window.
    pub peaks: PeakParameters,
}

impl CmeEvent {
    /// Confidence band: High >= 0.9, Medium >= 0.7, else Low.
    pub fn confidence_band(&self) -> ConfidenceBand {
        if self.confidence >= 0.9 {
            ConfidenceBand::High
        } else if self.confidence >= 0.7 {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        }
    }

    /// Confidence as a rounded percentage.
    pub fn confidence_pct(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }
}
