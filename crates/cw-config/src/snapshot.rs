//! Configuration snapshots for telemetry and reproducibility.
//!
//! A snapshot captures the exact store state behind a validation run so the
//! reported rates can be audited against the thresholds that produced them.

use crate::store::ConfigStore;
use chrono::{DateTime, Utc};
use cw_common::{Error, Parameter, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// A frozen snapshot of configuration state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    /// When this snapshot was taken.
    pub timestamp: DateTime<Utc>,

    /// Schema version of the configuration.
    pub schema_version: String,

    /// SHA-256 hash of the canonical store JSON.
    pub config_hash: String,

    /// Key configuration values for quick reference.
    pub summary: ConfigSummary,
}

/// Summary of key configuration values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSummary {
    /// Number of enabled threshold entries.
    pub enabled_count: usize,

    /// Per-parameter (value, sensitivity) pairs.
    pub thresholds: BTreeMap<Parameter, ThresholdSummary>,

    pub gradient_threshold: f64,
    pub moving_average_window_minutes: u32,

    /// Advisory weight total as displayed to the user.
    pub total_weight: f64,
}

/// One entry's headline numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdSummary {
    pub enabled: bool,
    pub value: f64,
    pub sensitivity: u8,
}

impl ConfigSnapshot {
    /// Capture a snapshot of the given store.
    pub fn capture(store: &ConfigStore) -> Result<Self> {
        // Canonical form: compact JSON of the serializable state. Equal
        // stores therefore hash equal.
        let canonical =
            serde_json::to_string(store).map_err(|e| Error::Parse(e.to_string()))?;

        let mut thresholds = BTreeMap::new();
        for entry in store.thresholds() {
            thresholds.insert(
                entry.parameter,
                ThresholdSummary {
                    enabled: entry.enabled,
                    value: entry.value,
                    sensitivity: entry.sensitivity,
                },
            );
        }

        Ok(Self {
            timestamp: Utc::now(),
            schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            config_hash: hash_content(&canonical),
            summary: ConfigSummary {
                enabled_count: store.enabled_count(),
                thresholds,
                gradient_threshold: store.derived().gradient_threshold,
                moving_average_window_minutes: store.derived().moving_average_window_minutes,
                total_weight: store.derived().total_weight(),
            },
        })
    }
}

/// SHA-256 hash of a string, hex-encoded.
fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ThresholdField;

    #[test]
    fn equal_stores_hash_equal() {
        let a = ConfigStore::new();
        let b = ConfigStore::new();
        let sa = ConfigSnapshot::capture(&a).unwrap();
        let sb = ConfigSnapshot::capture(&b).unwrap();
        assert_eq!(sa.config_hash, sb.config_hash);
    }

    #[test]
    fn mutation_changes_hash() {
        let a = ConfigStore::new();
        let mut b = ConfigStore::new();
        b.update_threshold(Parameter::Flux, ThresholdField::Sensitivity(10))
            .unwrap();
        let sa = ConfigSnapshot::capture(&a).unwrap();
        let sb = ConfigSnapshot::capture(&b).unwrap();
        assert_ne!(sa.config_hash, sb.config_hash);
    }

    #[test]
    fn summary_reflects_store() {
        let mut store = ConfigStore::new();
        store
            .update_threshold(Parameter::Velocity, ThresholdField::Enabled(false))
            .unwrap();
        let snap = ConfigSnapshot::capture(&store).unwrap();
        assert_eq!(snap.summary.enabled_count, 3);
        assert!(!snap.summary.thresholds[&Parameter::Velocity].enabled);
        assert_eq!(snap.summary.moving_average_window_minutes, 30);
        assert_eq!(snap.schema_version, crate::CONFIG_SCHEMA_VERSION);
    }

    #[test]
    fn snapshot_serde_roundtrip() {
        let snap = ConfigSnapshot::capture(&ConfigStore::new()).unwrap();
        let json = serde_json::to_string(&snap).unwrap();
        let back: ConfigSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.config_hash, snap.config_hash);
        assert_eq!(back.summary.enabled_count, 4);
    }
}
