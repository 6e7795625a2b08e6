//! CME Watch common types and errors.
//!
//! This crate provides foundational types shared across cw-config and
//! cw-core:
//! - Solar-wind parameter identifiers with display metadata
//! - CME event records and statuses
//! - Telemetry sample type
//! - Common error types with stable codes

pub mod error;
pub mod event;
pub mod param;
pub mod telemetry;

pub use error::{Error, Result};
pub use event::{CmeEvent, ConfidenceBand, EventStatus, PeakParameters};
pub use param::Parameter;
pub use telemetry::TelemetrySample;

/// Schema version for configuration and snapshot files.
pub const SCHEMA_VERSION: &str = "1.0.0";
