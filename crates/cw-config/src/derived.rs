//! Derived detection parameters: gradient threshold, smoothing window, and
//! the combined-metric weight map.

use cw_common::{Error, Parameter, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bounds for the gradient threshold.
pub const GRADIENT_RANGE: (f64, f64) = (0.01, 0.5);

/// Bounds for the moving-average window, in minutes.
pub const WINDOW_RANGE: (u32, u32) = (5, 120);

/// A bounds-checked update to a single derived field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DerivedField {
    GradientThreshold(f64),
    MovingAverageWindow(u32),
}

/// Derived parameter set.
///
/// The weight map is advisory: it should sum to 1.0 but the store never
/// normalizes siblings. The caller/UI surfaces the resulting total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedParameters {
    /// Relative step-change threshold for gradient detection, in [0.01, 0.5].
    pub gradient_threshold: f64,

    /// Moving-average smoothing window in minutes, in [5, 120].
    pub moving_average_window_minutes: u32,

    /// Per-parameter weight in [0, 1] for the combined detection metric.
    pub combined_metric_weight: BTreeMap<Parameter, f64>,
}

impl Default for DerivedParameters {
    fn default() -> Self {
        let mut weights = BTreeMap::new();
        weights.insert(Parameter::Flux, 0.30);
        weights.insert(Parameter::Density, 0.25);
        weights.insert(Parameter::Temperature, 0.20);
        weights.insert(Parameter::Velocity, 0.25);
        Self {
            gradient_threshold: 0.15,
            moving_average_window_minutes: 30,
            combined_metric_weight: weights,
        }
    }
}

impl DerivedParameters {
    /// Weight for one parameter (0.0 if absent from the map).
    pub fn weight(&self, parameter: Parameter) -> f64 {
        self.combined_metric_weight
            .get(&parameter)
            .copied()
            .unwrap_or(0.0)
    }

    /// Advisory sum of all weights; may legitimately differ from 1.0.
    pub fn total_weight(&self) -> f64 {
        self.combined_metric_weight.values().sum()
    }

    /// Apply a bounds-checked update to one field.
    pub fn apply(&mut self, field: DerivedField) -> Result<()> {
        match field {
            DerivedField::GradientThreshold(v) => {
                if !v.is_finite() || v < GRADIENT_RANGE.0 || v > GRADIENT_RANGE.1 {
                    return Err(Error::InvalidDerived {
                        field: "gradient_threshold".to_string(),
                        message: format!(
                            "must be in [{}, {}], got {}",
                            GRADIENT_RANGE.0, GRADIENT_RANGE.1, v
                        ),
                    });
                }
                self.gradient_threshold = v;
            }
            DerivedField::MovingAverageWindow(v) => {
                if !(WINDOW_RANGE.0..=WINDOW_RANGE.1).contains(&v) {
                    return Err(Error::InvalidDerived {
                        field: "moving_average_window_minutes".to_string(),
                        message: format!(
                            "must be in [{}, {}], got {}",
                            WINDOW_RANGE.0, WINDOW_RANGE.1, v
                        ),
                    });
                }
                self.moving_average_window_minutes = v;
            }
        }
        Ok(())
    }

    /// Set one weight; [0, 1], no normalization of siblings.
    pub fn set_weight(&mut self, parameter: Parameter, weight: f64) -> Result<()> {
        if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
            return Err(Error::InvalidWeight {
                parameter: parameter.as_str().to_string(),
                weight,
            });
        }
        self.combined_metric_weight.insert(parameter, weight);
        Ok(())
    }
}
