//! `cw` — CME Watch command-line interface.

use clap::{Parser, Subcommand};
use cw_common::{Error, EventStatus, Parameter, Result};
use cw_config::preset::{get_preset, list_presets};
use cw_config::{resolve_config, ConfigSnapshot, ConfigStore, PresetName};
use cw_core::analysis::{exceeds_gradient, max_relative_gradient, moving_average};
use cw_core::events::{event_names, Phase, ProgressEvent};
use cw_core::logging::{init_logging, LogConfig, LogFormat};
use cw_core::{
    evaluate, filter_events, EventBus, EventCatalog, ProgressTask, StaticCatalog, StatusFilter,
    SyntheticSource, TelemetrySource, ThresholdClassifier,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "cw", version, about = "Halo CME detection dashboard tooling")]
struct Cli {
    /// Log output format.
    #[arg(long, global = true, default_value = "human")]
    log_format: LogFormat,

    /// Path to thresholds.json (overrides CW_CONFIG and XDG lookup).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List and filter catalogued CME events.
    Events {
        /// Case-insensitive substring match on id, class, or magnitude.
        #[arg(long, default_value = "")]
        search: String,

        /// Restrict to one status: confirmed, pending, or rejected.
        #[arg(long)]
        status: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Show or reset the threshold configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Validate the current thresholds against the historical catalog.
    Validate {
        #[arg(long)]
        json: bool,
    },

    /// Inspect a synthetic telemetry series.
    Telemetry {
        #[arg(long, default_value_t = 42)]
        seed: u64,

        #[arg(long, default_value_t = SyntheticSource::DEFAULT_SAMPLES)]
        samples: usize,

        /// Parameter to inspect: flux, density, temperature, or velocity.
        #[arg(long, default_value = "flux")]
        param: String,

        #[arg(long)]
        json: bool,
    },

    /// Run the simulated data import with progress events on stderr.
    Import {
        #[arg(long, default_value_t = 10)]
        ticks: u64,

        #[arg(long, default_value_t = 500)]
        interval_ms: u64,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the resolved configuration.
    Show {
        /// Show a preset instead of the resolved config.
        #[arg(long)]
        preset: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Print the default configuration (what reset would produce).
    Reset {
        #[arg(long)]
        json: bool,
    },

    /// List available presets.
    Presets,
}

fn main() {
    let cli = Cli::parse();
    init_logging(&LogConfig {
        format: cli.log_format,
        ..LogConfig::default()
    });

    if let Err(err) = run(cli) {
        error!(code = err.code(), "{err}");
        std::process::exit(1);
    }
}

fn load_store(cli_path: Option<&PathBuf>) -> Result<ConfigStore> {
    let paths = resolve_config(cli_path.map(|p| p.as_path()));
    match paths.thresholds {
        Some(path) => {
            info!(path = %path.display(), source = %paths.source, "loading thresholds");
            ConfigStore::from_file(&path)
        }
        None => Ok(ConfigStore::default()),
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Events {
            search,
            status,
            json,
        } => {
            let filter = match status.as_deref() {
                None => StatusFilter::All,
                Some(s) => StatusFilter::Only(
                    EventStatus::parse(s).ok_or_else(|| Error::InvalidParameter(s.to_string()))?,
                ),
            };
            let catalog = StaticCatalog::new();
            let matched = filter_events(catalog.events(), &search, filter);
            if json {
                for event in &matched {
                    println!("{}", serde_json::to_string(event).map_err(to_parse)?);
                }
            } else {
                let summary = catalog.summary();
                println!(
                    "{} events ({} confirmed, mean confidence {}%)",
                    summary.total, summary.confirmed, summary.mean_confidence_pct
                );
                for event in &matched {
                    println!(
                        "{}  {:12}  {:6}  {:4.0} km/s  {:3}%  {}",
                        event.id,
                        event.class,
                        event.magnitude,
                        event.speed_km_s,
                        event.confidence_pct(),
                        event.status
                    );
                }
            }
        }

        Command::Config { action } => match action {
            ConfigAction::Show { preset, json } => {
                let store = match preset.as_deref() {
                    Some(name) => get_preset(name.parse::<PresetName>()?),
                    None => load_store(cli.config.as_ref())?,
                };
                print_store(&store, json)?;
            }
            ConfigAction::Reset { json } => {
                let mut store = ConfigStore::default();
                store.reset_to_defaults();
                print_store(&store, json)?;
            }
            ConfigAction::Presets => {
                for (name, description) in list_presets() {
                    println!("{:14} {}", name.as_str(), description);
                }
            }
        },

        Command::Validate { json } => {
            let store = load_store(cli.config.as_ref())?;
            let catalog = StaticCatalog::new();
            let snapshot = ConfigSnapshot::capture(&store)?;
            eprintln!(
                "{}",
                ProgressEvent::new(event_names::VALIDATE_STARTED, Phase::Validate).to_jsonl()
            );
            let result = evaluate(&ThresholdClassifier, &store, catalog.events());
            eprintln!(
                "{}",
                ProgressEvent::new(event_names::VALIDATE_COMPLETE, Phase::Validate)
                    .with_progress(catalog.events().len() as u64, Some(catalog.events().len() as u64))
                    .with_detail("config_hash", &snapshot.config_hash)
                    .to_jsonl()
            );
            info!(hash = %snapshot.config_hash, "validated configuration");
            if json {
                println!("{}", serde_json::to_string_pretty(&result).map_err(to_parse)?);
            } else {
                println!("Detection rate:   {:.0}%", result.detection_rate_pct);
                println!("False positives:  {:.0}%", result.false_positive_rate_pct);
                println!("Test events:      {}", result.sample_count);
                if let Some(hint) = &result.recommendation {
                    println!("Recommendation:   {hint}");
                }
            }
        }

        Command::Telemetry {
            seed,
            samples,
            param,
            json,
        } => {
            let parameter: Parameter = param.parse()?;
            let store = load_store(cli.config.as_ref())?;
            let source = SyntheticSource::generate(seed, samples);
            let series = source.series(parameter);

            // window in samples at the 10-minute cadence
            let window =
                (store.derived().moving_average_window_minutes as usize / 10).max(1);
            let smoothed = moving_average(&series, window);
            let latest = series.last().copied().unwrap_or(0.0);
            let trailing_mean = smoothed.last().copied().unwrap_or(0.0);
            let max_gradient = max_relative_gradient(&series);
            let gradient_alarm =
                exceeds_gradient(&series, store.derived().gradient_threshold);

            if json {
                let out = serde_json::json!({
                    "parameter": parameter,
                    "samples": series.len(),
                    "latest": latest,
                    "trailing_mean": trailing_mean,
                    "max_relative_gradient": max_gradient,
                    "gradient_alarm": gradient_alarm,
                });
                println!("{}", serde_json::to_string_pretty(&out).map_err(to_parse)?);
            } else {
                println!("{} ({} samples)", parameter.label(), series.len());
                println!(
                    "Latest:        {} {}",
                    parameter.format_value(latest),
                    parameter.unit()
                );
                println!(
                    "Trailing mean: {} (window {} samples)",
                    parameter.format_value(trailing_mean),
                    window
                );
                println!("Max gradient:  {:.3}", max_gradient);
                println!(
                    "Gradient alarm: {}",
                    if gradient_alarm { "TRIGGERED" } else { "quiet" }
                );
            }
        }

        Command::Import { ticks, interval_ms } => {
            let bus = Arc::new(EventBus::new());
            let rx = bus.subscribe();
            let mut task = ProgressTask::spawn(
                bus,
                Phase::Import,
                ticks,
                Duration::from_millis(interval_ms),
            );
            for event in rx.iter() {
                eprintln!("{}", event.to_jsonl());
            }
            task.join();
            info!("import simulation finished");
        }
    }

    Ok(())
}

fn print_store(store: &ConfigStore, json: bool) -> Result<()> {
    if json {
        println!("{}", store.to_json()?);
        return Ok(());
    }
    println!("{} of 4 thresholds enabled", store.enabled_count());
    for entry in store.thresholds() {
        println!(
            "{:12} {:>10} {}  sensitivity {:3}%  [{}]",
            entry.parameter.to_string(),
            entry.parameter.format_value(entry.value),
            entry.unit,
            entry.sensitivity,
            if entry.enabled { "active" } else { "disabled" }
        );
    }
    let derived = store.derived();
    println!(
        "gradient {:.2}  window {} min  total weight {:.0}%",
        derived.gradient_threshold,
        derived.moving_average_window_minutes,
        derived.total_weight() * 100.0
    );
    Ok(())
}

fn to_parse(e: serde_json::Error) -> Error {
    Error::Parse(e.to_string())
}
