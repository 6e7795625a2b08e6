//! CME Watch core: detection evaluation, event filtering, telemetry
//! collaborators, progress events, and logging.

pub mod analysis;
pub mod catalog;
pub mod detect;
pub mod events;
pub mod filter;
pub mod logging;
pub mod progress;
pub mod synth;

pub use catalog::{CatalogSummary, EventCatalog, StaticCatalog};
pub use detect::{evaluate, DetectionModel, ThresholdClassifier, ValidationResult};
pub use events::{EventBus, Phase, ProgressEmitter, ProgressEvent};
pub use filter::{filter_events, StatusFilter};
pub use progress::ProgressTask;
pub use synth::{SyntheticSource, TelemetrySource};
