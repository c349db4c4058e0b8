//! Environment variable processing for runtime configuration overrides.
//!
//! Env var prefix: `RANGECHECK_`
//!
//! - `RANGECHECK_EXECUTABLE` — path to the target program
//! - `RANGECHECK_STRATEGY` — execution strategy (direct/wrapped)
//! - `RANGECHECK_LAUNCHER` — launcher token for the wrapped strategy
//! - `RANGECHECK_QUIET` — suppress status output (1/true/yes)
//! - `RANGECHECK_RESULTS_EXTENSION` — extension of derived results files
//! - `RANGECHECK_SHOW_OUTPUT` — always/never/on-failure

use super::{Config, ShowOutput, StrategyKind};
use std::path::PathBuf;

const PREFIX: &str = "RANGECHECK_";

const OVERRIDE_KEYS: [&str; 6] = [
    "EXECUTABLE",
    "STRATEGY",
    "LAUNCHER",
    "QUIET",
    "RESULTS_EXTENSION",
    "SHOW_OUTPUT",
];

/// Apply individual env var overrides to a config.
///
/// Each override is applied only if the env var is set and parses correctly.
/// Invalid values are silently ignored.
pub fn apply_env_overrides(config: &mut Config) {
    if let Some(val) = env_str("EXECUTABLE") {
        config.executable = PathBuf::from(val);
    }

    if let Some(val) = env_parse::<StrategyKind>("STRATEGY") {
        config.execution.strategy = val;
    }

    if let Some(val) = env_str("LAUNCHER") {
        config.execution.launcher = val;
    }

    if let Some(val) = env_bool("QUIET") {
        config.quiet = val;
    }

    if let Some(val) = env_str("RESULTS_EXTENSION") {
        config.results.extension = val;
    }

    if let Some(val) = env_parse::<ShowOutput>("SHOW_OUTPUT") {
        config.results.show_output = val;
    }
}

/// Summarize which env var overrides are currently active.
///
/// Returns a list of `(env_var_name, value)` pairs.
pub fn detect_active_overrides() -> Vec<(String, String)> {
    let mut active = Vec::new();
    for key in OVERRIDE_KEYS {
        let full = format!("{PREFIX}{key}");
        if let Ok(val) = std::env::var(&full) {
            if !val.is_empty() {
                active.push((full, val));
            }
        }
    }
    active
}

// --- helpers ---

fn env_str(suffix: &str) -> Option<String> {
    std::env::var(format!("{PREFIX}{suffix}"))
        .ok()
        .filter(|s| !s.is_empty())
}

fn env_parse<T: std::str::FromStr>(suffix: &str) -> Option<T> {
    env_str(suffix).and_then(|s| s.parse().ok())
}

fn env_bool(suffix: &str) -> Option<bool> {
    env_str(suffix).map(|s| matches!(s.to_lowercase().as_str(), "1" | "true" | "yes"))
}
