//! Event catalog collaborator.
//!
//! The catalog supplies a finite sequence of CME events; the core only
//! filters and displays them, never mutates the catalog.

use chrono::TimeZone;
use chrono::Utc;
use cw_common::{CmeEvent, EventStatus, PeakParameters};
use serde::Serialize;

/// Supplies a finite, read-only sequence of catalogued events.
pub trait EventCatalog {
    fn events(&self) -> &[CmeEvent];

    /// Headline numbers for the detection summary cards.
    fn summary(&self) -> CatalogSummary {
        let events = self.events();
        let confirmed = events
            .iter()
            .filter(|e| e.status == EventStatus::Confirmed)
            .count();
        let mean_confidence_pct = if events.is_empty() {
            0
        } else {
            let total: f64 = events.iter().map(|e| e.confidence).sum();
            (total / events.len() as f64 * 100.0).round() as u32
        };
        CatalogSummary {
            total: events.len(),
            confirmed,
            mean_confidence_pct,
        }
    }
}

/// Headline catalog numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub total: usize,
    pub confirmed: usize,
    pub mean_confidence_pct: u32,
}

/// The built-in reference catalog: three Halo CME events with known peak
/// parameters, used for threshold validation and as display fixtures.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    events: Vec<CmeEvent>,
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self {
            events: reference_events(),
        }
    }
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog backed by a caller-provided event list.
    pub fn from_events(events: Vec<CmeEvent>) -> Self {
        Self { events }
    }
}

impl EventCatalog for StaticCatalog {
    fn events(&self) -> &[CmeEvent] {
        &self.events
    }
}

/// The three reference events shipped with the dashboard.
pub fn reference_events() -> Vec<CmeEvent> {
    vec![
        CmeEvent {
            id: "001".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 12, 25, 14, 30, 0).unwrap(),
            class: "Full Halo".to_string(),
            magnitude: "X2.1".to_string(),
            speed_km_s: 1200.0,
            confidence: 0.95,
            status: EventStatus::Confirmed,
            source: "CACTUS".to_string(),
            peaks: PeakParameters {
                flux: 8_500_000.0,
                density: 45.2,
                temperature: 850_000.0,
                velocity: 1200.0,
            },
        },
        CmeEvent {
            id: "002".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 12, 23, 9, 15, 0).unwrap(),
            class: "Partial Halo".to_string(),
            magnitude: "M8.4".to_string(),
            speed_km_s: 950.0,
            confidence: 0.87,
            status: EventStatus::Pending,
            source: "SWIS".to_string(),
            peaks: PeakParameters {
                flux: 6_200_000.0,
                density: 32.1,
                temperature: 620_000.0,
                velocity: 950.0,
            },
        },
        CmeEvent {
            id: "003".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 12, 20, 16, 45, 0).unwrap(),
            class: "Full Halo".to_string(),
            magnitude: "M5.2".to_string(),
            speed_km_s: 750.0,
            confidence: 0.92,
            status: EventStatus::Confirmed,
            source: "CACTUS".to_string(),
            peaks: PeakParameters {
                flux: 4_800_000.0,
                density: 28.7,
                temperature: 480_000.0,
                velocity: 750.0,
            },
        },
    ]
}
