//! Threshold validation: classify catalogued events against the configured
//! thresholds and aggregate detection statistics.
//!
//! The detection model is a pluggable collaborator so the threshold
//! classifier can be swapped for a real inference pipeline later.

use cw_common::{CmeEvent, EventStatus};
use cw_config::ConfigStore;
use serde::{Deserialize, Serialize};

/// Detection rate below which a tuning recommendation is emitted.
const RECOMMENDATION_FLOOR_PCT: f64 = 90.0;

/// Maximum fraction by which full sensitivity lowers a trigger level.
const SENSITIVITY_SPAN: f64 = 0.3;

/// Weighted firing fraction required to flag an event.
const FLAG_FRACTION: f64 = 0.5;

/// Classifies a single event against the configured thresholds.
///
/// Deterministic given identical inputs.
pub trait DetectionModel {
    fn classify(&self, store: &ConfigStore, event: &CmeEvent) -> bool;
}

/// The default model: per-entry peak comparison, weighted vote.
///
/// Each enabled entry fires when the event's peak reading reaches the
/// entry's effective trigger level `value * (1 - 0.3 * sensitivity/100)`:
/// sensitivity 0 triggers exactly at the configured value, sensitivity 100
/// triggers 30% below it. Entry votes are combined with the
/// combined-metric weights restricted to enabled entries, and the event is
/// flagged when the weighted firing fraction reaches 0.5. With no enabled
/// entries (or zero total weight) nothing is flagged.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThresholdClassifier;

impl ThresholdClassifier {
    /// Effective trigger level for one entry.
    pub fn effective_level(value: f64, sensitivity: u8) -> f64 {
        value * (1.0 - SENSITIVITY_SPAN * f64::from(sensitivity) / 100.0)
    }
}

impl DetectionModel for ThresholdClassifier {
    fn classify(&self, store: &ConfigStore, event: &CmeEvent) -> bool {
        let mut total_weight = 0.0;
        let mut fired_weight = 0.0;

        for entry in store.thresholds().iter().filter(|t| t.enabled) {
            let weight = store.derived().weight(entry.parameter);
            total_weight += weight;
            let level = Self::effective_level(entry.value, entry.sensitivity);
            if event.peaks.get(entry.parameter) >= level {
                fired_weight += weight;
            }
        }

        total_weight > 0.0 && fired_weight / total_weight >= FLAG_FRACTION
    }
}

/// Aggregated validation statistics for one configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Flagged confirmed events / total confirmed, as a percentage.
    /// 100.0 when the catalog has no confirmed events.
    pub detection_rate_pct: f64,

    /// Flagged rejected events / total flagged, as a percentage.
    /// 0.0 when nothing was flagged.
    pub false_positive_rate_pct: f64,

    /// Number of events evaluated.
    pub sample_count: usize,

    /// Tuning hint, present when the detection rate is below 90%.
    pub recommendation: Option<String>,
}

/// Run the model over a historical event set and aggregate counts.
///
/// Deterministic given identical inputs.
pub fn evaluate(
    model: &dyn DetectionModel,
    store: &ConfigStore,
    events: &[CmeEvent],
) -> ValidationResult {
    let mut confirmed = 0usize;
    let mut flagged_confirmed = 0usize;
    let mut flagged = 0usize;
    let mut flagged_rejected = 0usize;

    for event in events {
        let hit = model.classify(store, event);
        if event.status == EventStatus::Confirmed {
            confirmed += 1;
            if hit {
                flagged_confirmed += 1;
            }
        }
        if hit {
            flagged += 1;
            if event.status == EventStatus::Rejected {
                flagged_rejected += 1;
            }
        }
    }

    let detection_rate_pct = if confirmed == 0 {
        100.0
    } else {
        flagged_confirmed as f64 / confirmed as f64 * 100.0
    };
    let false_positive_rate_pct = if flagged == 0 {
        0.0
    } else {
        flagged_rejected as f64 / flagged as f64 * 100.0
    };

    let recommendation = if detection_rate_pct < RECOMMENDATION_FLOOR_PCT {
        recommend(store)
    } else {
        None
    };

    ValidationResult {
        detection_rate_pct,
        false_positive_rate_pct,
        sample_count: events.len(),
        recommendation,
    }
}

/// Suggest raising the sensitivity of the enabled entry whose configured
/// value sits highest in its range, i.e. the hardest one to trip.
fn recommend(store: &ConfigStore) -> Option<String> {
    store
        .thresholds()
        .iter()
        .filter(|t| t.enabled)
        .max_by(|a, b| {
            a.range_position()
                .partial_cmp(&b.range_position())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|t| format!("Increase {} sensitivity by 5%", t.parameter))
}
