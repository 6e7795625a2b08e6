//! The configuration store: ordered threshold entries plus the derived
//! parameter set, with bounds-checked updates and change notification.
//!
//! All mutations are synchronous and atomic from the caller's perspective.
//! A rejected update leaves the store unchanged. Successful threshold
//! updates replace the entry copy-on-write: a modified clone is built,
//! checked, and swapped in.

use crate::derived::{DerivedField, DerivedParameters};
use crate::threshold::{check_sensitivity, ThresholdEntry, DEFAULT_SENSITIVITY};
use cw_common::{Error, Parameter, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{mpsc, Mutex};

/// A bounds-checked update to a single threshold field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdField {
    Enabled(bool),
    Value(f64),
    Sensitivity(u8),
}

/// Change notification emitted after a successful mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    ThresholdChanged(Parameter),
    DerivedChanged,
    WeightChanged(Parameter),
    Reset,
}

/// Owns the ordered threshold entries and the derived parameter set.
///
/// Entry order is display/evaluation priority and is fixed at construction:
/// flux, density, temperature, velocity. No entry is shared across stores.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigStore {
    thresholds: Vec<ThresholdEntry>,
    derived: DerivedParameters,

    #[serde(skip)]
    observers: Mutex<Vec<mpsc::Sender<StoreEvent>>>,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self {
            thresholds: Parameter::ALL
                .iter()
                .map(|p| ThresholdEntry::initial(*p))
                .collect(),
            derived: DerivedParameters::default(),
            observers: Mutex::new(Vec::new()),
        }
    }
}

impl Clone for ConfigStore {
    fn clone(&self) -> Self {
        // Observers are per-instance; a clone starts with none.
        Self {
            thresholds: self.thresholds.clone(),
            derived: self.derived.clone(),
            observers: Mutex::new(Vec::new()),
        }
    }
}

impl PartialEq for ConfigStore {
    fn eq(&self, other: &Self) -> bool {
        self.thresholds == other.thresholds && self.derived == other.derived
    }
}

impl ConfigStore {
    /// Store with built-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct from parts, without validation. Callers loading untrusted
    /// input should go through [`from_json`](Self::from_json) instead.
    pub fn from_parts(thresholds: Vec<ThresholdEntry>, derived: DerivedParameters) -> Self {
        Self {
            thresholds,
            derived,
            observers: Mutex::new(Vec::new()),
        }
    }

    /// Read-only view of the entries, in priority order.
    pub fn thresholds(&self) -> &[ThresholdEntry] {
        &self.thresholds
    }

    /// Look up one entry by parameter.
    pub fn threshold(&self, parameter: Parameter) -> Option<&ThresholdEntry> {
        self.thresholds.iter().find(|t| t.parameter == parameter)
    }

    /// Read-only view of the derived parameter set.
    pub fn derived(&self) -> &DerivedParameters {
        &self.derived
    }

    /// Number of enabled entries.
    pub fn enabled_count(&self) -> usize {
        self.thresholds.iter().filter(|t| t.enabled).count()
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> mpsc::Receiver<StoreEvent> {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut observers) = self.observers.lock() {
            observers.push(tx);
        }
        rx
    }

    fn notify(&self, event: StoreEvent) {
        if let Ok(mut observers) = self.observers.lock() {
            observers.retain(|tx| tx.send(event).is_ok());
        }
    }

    /// Update one field of one threshold entry.
    ///
    /// Fails with `InvalidParameter` if the parameter has no entry,
    /// `OutOfRange` for a value outside the entry's range (bounds
    /// inclusive), or `InvalidSensitivity` outside [0, 100]. On success the
    /// entry is replaced and observers are notified.
    pub fn update_threshold(&mut self, parameter: Parameter, field: ThresholdField) -> Result<()> {
        let idx = self
            .thresholds
            .iter()
            .position(|t| t.parameter == parameter)
            .ok_or_else(|| Error::InvalidParameter(parameter.as_str().to_string()))?;

        let mut updated = self.thresholds[idx].clone();
        match field {
            ThresholdField::Enabled(enabled) => updated.enabled = enabled,
            ThresholdField::Value(value) => {
                updated.check_value(value)?;
                updated.value = value;
            }
            ThresholdField::Sensitivity(sensitivity) => {
                updated.sensitivity = check_sensitivity(i64::from(sensitivity))?;
            }
        }

        self.thresholds[idx] = updated;
        self.notify(StoreEvent::ThresholdChanged(parameter));
        Ok(())
    }

    /// Restore every entry and the derived set to defaults.
    ///
    /// Entry values become 60% of their range, sensitivity 75, enabled.
    /// Idempotent.
    pub fn reset_to_defaults(&mut self) {
        for entry in &mut self.thresholds {
            entry.value = entry.default_value();
            entry.sensitivity = DEFAULT_SENSITIVITY;
            entry.enabled = true;
        }
        self.derived = DerivedParameters::default();
        self.notify(StoreEvent::Reset);
    }

    /// Update one derived field, bounds-checked.
    pub fn set_derived(&mut self, field: DerivedField) -> Result<()> {
        self.derived.apply(field)?;
        self.notify(StoreEvent::DerivedChanged);
        Ok(())
    }

    /// Set one combined-metric weight. The store never auto-normalizes
    /// siblings; the caller surfaces the resulting total.
    pub fn set_combined_weight(&mut self, parameter: Parameter, weight: f64) -> Result<()> {
        if self.threshold(parameter).is_none() {
            return Err(Error::InvalidParameter(parameter.as_str().to_string()));
        }
        self.derived.set_weight(parameter, weight)?;
        self.notify(StoreEvent::WeightChanged(parameter));
        Ok(())
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Parse(e.to_string()))
    }

    /// Parse and semantically validate a store from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let store: ConfigStore =
            serde_json::from_str(json).map_err(|e| Error::Parse(e.to_string()))?;
        crate::validate::validate_store(&store)?;
        Ok(store)
    }

    /// Load and validate a store from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Io(format!("failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_store_has_all_parameters_in_order() {
        let store = ConfigStore::new();
        let params: Vec<Parameter> = store.thresholds().iter().map(|t| t.parameter).collect();
        assert_eq!(params, Parameter::ALL);
        assert_eq!(store.enabled_count(), 4);
    }

    #[test]
    fn update_value_within_range_succeeds() {
        let mut store = ConfigStore::new();
        store
            .update_threshold(Parameter::Velocity, ThresholdField::Value(1000.0))
            .unwrap();
        assert_eq!(store.threshold(Parameter::Velocity).unwrap().value, 1000.0);
    }

    #[test]
    fn update_value_at_upper_bound_succeeds() {
        let mut store = ConfigStore::new();
        let max = store.threshold(Parameter::Flux).unwrap().range.1;
        store
            .update_threshold(Parameter::Flux, ThresholdField::Value(max))
            .unwrap();
        assert_eq!(store.threshold(Parameter::Flux).unwrap().value, max);
    }

    #[test]
    fn update_value_past_upper_bound_rejected_unchanged() {
        let mut store = ConfigStore::new();
        let before = store.threshold(Parameter::Flux).unwrap().value;
        let max = store.threshold(Parameter::Flux).unwrap().range.1;
        let err = store
            .update_threshold(Parameter::Flux, ThresholdField::Value(max + 1.0))
            .unwrap_err();
        assert!(matches!(err, Error::OutOfRange { .. }));
        assert_eq!(store.threshold(Parameter::Flux).unwrap().value, before);
    }

    #[test]
    fn update_sensitivity_bounds() {
        let mut store = ConfigStore::new();
        store
            .update_threshold(Parameter::Density, ThresholdField::Sensitivity(0))
            .unwrap();
        store
            .update_threshold(Parameter::Density, ThresholdField::Sensitivity(100))
            .unwrap();
        assert_eq!(store.threshold(Parameter::Density).unwrap().sensitivity, 100);
    }

    #[test]
    fn update_enabled_toggles() {
        let mut store = ConfigStore::new();
        store
            .update_threshold(Parameter::Temperature, ThresholdField::Enabled(false))
            .unwrap();
        assert!(!store.threshold(Parameter::Temperature).unwrap().enabled);
        assert_eq!(store.enabled_count(), 3);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut store = ConfigStore::new();
        store
            .update_threshold(Parameter::Flux, ThresholdField::Value(9_000_000.0))
            .unwrap();
        store
            .update_threshold(Parameter::Flux, ThresholdField::Enabled(false))
            .unwrap();
        store.reset_to_defaults();
        let once = store.clone();
        store.reset_to_defaults();
        assert_eq!(store, once);
    }

    #[test]
    fn reset_restores_sixty_percent_values() {
        let mut store = ConfigStore::new();
        store.reset_to_defaults();
        for entry in store.thresholds() {
            assert!((entry.value - entry.default_value()).abs() < 1e-9);
            assert_eq!(entry.sensitivity, DEFAULT_SENSITIVITY);
            assert!(entry.enabled);
        }
    }

    #[test]
    fn observers_see_changes() {
        let mut store = ConfigStore::new();
        let rx = store.subscribe();
        store
            .update_threshold(Parameter::Flux, ThresholdField::Enabled(false))
            .unwrap();
        store.set_combined_weight(Parameter::Density, 0.5).unwrap();
        store.reset_to_defaults();
        assert_eq!(rx.recv().unwrap(), StoreEvent::ThresholdChanged(Parameter::Flux));
        assert_eq!(rx.recv().unwrap(), StoreEvent::WeightChanged(Parameter::Density));
        assert_eq!(rx.recv().unwrap(), StoreEvent::Reset);
    }

    #[test]
    fn rejected_update_emits_nothing() {
        let mut store = ConfigStore::new();
        let rx = store.subscribe();
        let _ = store.update_threshold(Parameter::Flux, ThresholdField::Value(0.0));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn dropped_observer_is_pruned() {
        let mut store = ConfigStore::new();
        drop(store.subscribe());
        // must not error or leak a dead sender
        store.reset_to_defaults();
        store.reset_to_defaults();
    }

    #[test]
    fn serde_roundtrip_yields_equal_store() {
        let mut store = ConfigStore::new();
        store
            .update_threshold(Parameter::Velocity, ThresholdField::Value(1500.0))
            .unwrap();
        store.set_combined_weight(Parameter::Flux, 0.4).unwrap();
        let json = store.to_json().unwrap();
        let back = ConfigStore::from_json(&json).unwrap();
        assert_eq!(store, back);
    }

    #[test]
    fn from_json_rejects_out_of_range_value() {
        let mut store = ConfigStore::new();
        store
            .update_threshold(Parameter::Flux, ThresholdField::Value(2_000_000.0))
            .unwrap();
        let json = store.to_json().unwrap();
        // hand-edit the serialized value past the range
        let tampered = json.replace("2000000.0", "20000000.0");
        assert!(tampered.contains("20000000.0"));
        assert!(ConfigStore::from_json(&tampered).is_err());
    }

    #[test]
    fn set_derived_bounds() {
        let mut store = ConfigStore::new();
        store
            .set_derived(DerivedField::GradientThreshold(0.2))
            .unwrap();
        assert_eq!(store.derived().gradient_threshold, 0.2);
        assert!(store
            .set_derived(DerivedField::GradientThreshold(0.6))
            .is_err());
        assert_eq!(store.derived().gradient_threshold, 0.2);
    }

    #[test]
    fn weight_total_is_advisory() {
        let mut store = ConfigStore::new();
        store.set_combined_weight(Parameter::Flux, 1.0).unwrap();
        store.set_combined_weight(Parameter::Density, 1.0).unwrap();
        assert!(store.derived().total_weight() > 1.0);
    }
}
