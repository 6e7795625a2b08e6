//! Store contract and resolution tests.
//!
//! Covers:
//! - Update/reset invariants under proptest
//! - File round-trip with validation
//! - Resolution order (CLI > env > env dir > defaults)

use cw_common::Parameter;
use cw_config::resolve::{resolve_config, ConfigSource};
use cw_config::store::{ConfigStore, ThresholdField};
use proptest::prelude::*;
use std::env;
use std::fs;
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use tempfile::TempDir;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn with_env_lock<T>(f: impl FnOnce() -> T) -> T {
    let _guard = ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .expect("env lock poisoned");
    f()
}

struct EnvGuard {
    keys: Vec<String>,
    saved: Vec<Option<String>>,
}

impl EnvGuard {
    fn new(keys: &[&str]) -> Self {
        let saved = keys.iter().map(|k| env::var(k).ok()).collect();
        Self {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            saved,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (idx, key) in self.keys.iter().enumerate() {
            match self.saved.get(idx).and_then(|v| v.as_ref()) {
                Some(val) => env::set_var(key, val),
                None => env::remove_var(key),
            }
        }
    }
}

fn write_store(dir: &Path, name: &str, store: &ConfigStore) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, store.to_json().expect("serialize store")).expect("write store");
    path
}

// ── File round-trip ────────────────────────────────────────────────

#[test]
fn file_roundtrip_yields_equal_store() {
    let tmp = TempDir::new().expect("tempdir");
    let mut store = ConfigStore::new();
    store
        .update_threshold(Parameter::Density, ThresholdField::Value(60.0))
        .unwrap();
    store
        .update_threshold(Parameter::Flux, ThresholdField::Enabled(false))
        .unwrap();
    let path = write_store(tmp.path(), "thresholds.json", &store);
    let back = ConfigStore::from_file(&path).expect("load store");
    assert_eq!(store, back);
}

#[test]
fn load_missing_file_errors() {
    let err = ConfigStore::from_file(Path::new("/nonexistent/thresholds.json")).unwrap_err();
    assert_eq!(err.code(), 20);
}

#[test]
fn load_garbage_errors() {
    let tmp = TempDir::new().expect("tempdir");
    let path = tmp.path().join("thresholds.json");
    fs::write(&path, "{not json").unwrap();
    let err = ConfigStore::from_file(&path).unwrap_err();
    assert_eq!(err.code(), 21);
}

// ── Resolution order ───────────────────────────────────────────────

#[test]
fn cli_path_wins_over_env() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&["CW_CONFIG", "CW_CONFIG_DIR"]);
        let tmp = TempDir::new().expect("tempdir");
        let cli = write_store(tmp.path(), "cli.json", &ConfigStore::new());
        let env_file = write_store(tmp.path(), "env.json", &ConfigStore::new());
        env::set_var("CW_CONFIG", &env_file);

        let paths = resolve_config(Some(&cli));
        assert_eq!(paths.source, ConfigSource::CliArgument);
        assert_eq!(paths.thresholds.as_deref(), Some(cli.as_path()));
    });
}

#[test]
fn env_path_wins_over_env_dir() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&["CW_CONFIG", "CW_CONFIG_DIR"]);
        let tmp = TempDir::new().expect("tempdir");
        let env_file = write_store(tmp.path(), "env.json", &ConfigStore::new());
        let dir = tmp.path().join("confdir");
        fs::create_dir_all(&dir).unwrap();
        write_store(&dir, "thresholds.json", &ConfigStore::new());
        env::set_var("CW_CONFIG", &env_file);
        env::set_var("CW_CONFIG_DIR", &dir);

        let paths = resolve_config(None);
        assert_eq!(paths.source, ConfigSource::Environment);
        assert_eq!(paths.thresholds.as_deref(), Some(env_file.as_path()));
    });
}

#[test]
fn env_dir_used_when_no_direct_path() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&["CW_CONFIG", "CW_CONFIG_DIR"]);
        env::remove_var("CW_CONFIG");
        let tmp = TempDir::new().expect("tempdir");
        let dir = tmp.path().join("confdir");
        fs::create_dir_all(&dir).unwrap();
        let expected = write_store(&dir, "thresholds.json", &ConfigStore::new());
        env::set_var("CW_CONFIG_DIR", &dir);

        let paths = resolve_config(None);
        assert_eq!(paths.source, ConfigSource::Environment);
        assert_eq!(paths.thresholds.as_deref(), Some(expected.as_path()));
    });
}

// ── Property tests ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn in_range_value_updates_always_succeed(
        frac in 0.0f64..=1.0,
        idx in 0usize..4,
    ) {
        let mut store = ConfigStore::new();
        let param = Parameter::ALL[idx];
        let (min, max) = store.threshold(param).unwrap().range;
        let value = min + frac * (max - min);
        store.update_threshold(param, ThresholdField::Value(value)).unwrap();
        prop_assert_eq!(store.threshold(param).unwrap().value, value);
    }

    #[test]
    fn out_of_range_value_updates_never_mutate(
        excess in 1e-6f64..1e9,
        idx in 0usize..4,
        above in proptest::bool::ANY,
    ) {
        let mut store = ConfigStore::new();
        let param = Parameter::ALL[idx];
        let entry = store.threshold(param).unwrap().clone();
        let value = if above { entry.range.1 + excess } else { entry.range.0 - excess };
        prop_assert!(store.update_threshold(param, ThresholdField::Value(value)).is_err());
        prop_assert_eq!(store.threshold(param).unwrap(), &entry);
    }

    #[test]
    fn reset_after_arbitrary_updates_is_canonical(
        frac in 0.0f64..=1.0,
        sens in 0u8..=100,
        enabled in proptest::bool::ANY,
        idx in 0usize..4,
    ) {
        let mut store = ConfigStore::new();
        let param = Parameter::ALL[idx];
        let (min, max) = store.threshold(param).unwrap().range;
        store.update_threshold(param, ThresholdField::Value(min + frac * (max - min))).unwrap();
        store.update_threshold(param, ThresholdField::Sensitivity(sens)).unwrap();
        store.update_threshold(param, ThresholdField::Enabled(enabled)).unwrap();

        store.reset_to_defaults();
        let mut canonical = ConfigStore::new();
        canonical.reset_to_defaults();
        prop_assert_eq!(store, canonical);
    }
}
