//! CME Watch threshold configuration.
//!
//! This crate provides:
//! - Typed threshold entries and derived detection parameters
//! - The configuration store with bounds-checked updates and observers
//! - Config resolution (CLI → env → XDG → defaults)
//! - Semantic validation for loaded configs
//! - Config snapshots with content hashes for reproducibility
//! - Presets for common tuning profiles

pub mod derived;
pub mod preset;
pub mod resolve;
pub mod snapshot;
pub mod store;
pub mod threshold;
pub mod validate;

pub use derived::{DerivedField, DerivedParameters};
pub use preset::PresetName;
pub use resolve::{resolve_config, ConfigPaths, ConfigSource};
pub use snapshot::{ConfigSnapshot, ConfigSummary};
pub use store::{ConfigStore, StoreEvent, ThresholdField};
pub use threshold::ThresholdEntry;
pub use validate::validate_store;

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = cw_common::SCHEMA_VERSION;
