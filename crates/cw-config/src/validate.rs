//! Semantic validation for loaded configuration.
//!
//! Deserialization alone cannot enforce the store invariants, so every
//! loaded store is re-checked here: a hand-edited config file must not be
//! able to smuggle an out-of-range value in.

use crate::derived::{GRADIENT_RANGE, WINDOW_RANGE};
use crate::store::ConfigStore;
use cw_common::{Error, Parameter, Result};

/// Validate a whole store semantically.
pub fn validate_store(store: &ConfigStore) -> Result<()> {
    // Every parameter must appear exactly once, in priority order.
    let params: Vec<Parameter> = store.thresholds().iter().map(|t| t.parameter).collect();
    if params != Parameter::ALL {
        return Err(Error::Parse(format!(
            "threshold entries must be exactly {:?} in order, got {:?}",
            Parameter::ALL,
            params
        )));
    }

    for entry in store.thresholds() {
        if entry.range.0 >= entry.range.1 {
            return Err(Error::InvalidDerived {
                field: format!("{}.range", entry.parameter),
                message: format!("min {} must be below max {}", entry.range.0, entry.range.1),
            });
        }
        entry.check_value(entry.value)?;
        if entry.sensitivity > 100 {
            return Err(Error::InvalidSensitivity(i64::from(entry.sensitivity)));
        }
    }

    let derived = store.derived();
    if derived.gradient_threshold < GRADIENT_RANGE.0
        || derived.gradient_threshold > GRADIENT_RANGE.1
        || !derived.gradient_threshold.is_finite()
    {
        return Err(Error::InvalidDerived {
            field: "gradient_threshold".to_string(),
            message: format!(
                "must be in [{}, {}], got {}",
                GRADIENT_RANGE.0, GRADIENT_RANGE.1, derived.gradient_threshold
            ),
        });
    }
    if !(WINDOW_RANGE.0..=WINDOW_RANGE.1).contains(&derived.moving_average_window_minutes) {
        return Err(Error::InvalidDerived {
            field: "moving_average_window_minutes".to_string(),
            message: format!(
                "must be in [{}, {}], got {}",
                WINDOW_RANGE.0, WINDOW_RANGE.1, derived.moving_average_window_minutes
            ),
        });
    }
    for (parameter, weight) in &derived.combined_metric_weight {
        if !weight.is_finite() || !(0.0..=1.0).contains(weight) {
            return Err(Error::InvalidWeight {
                parameter: parameter.as_str().to_string(),
                weight: *weight,
            });
        }
    }

    Ok(())
}
