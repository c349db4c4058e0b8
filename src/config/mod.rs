//! Configuration types and loading from `rangecheck.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::error::{Error, Result};
use crate::runner::ExecutionStrategy;

pub mod env;
mod loader;
pub use loader::{ConfigLoader, DEFAULT_CONFIG_FILE};

/// Complete configuration for a harness run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the target program.
    #[serde(default = "default_executable")]
    pub executable: PathBuf,

    /// Suppress status output; alerts and errors are still printed.
    #[serde(default)]
    pub quiet: bool,

    /// How the target program is launched.
    #[serde(default)]
    pub execution: ExecutionConfig,

    /// Results file configuration.
    #[serde(default)]
    pub results: ResultsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            executable: default_executable(),
            quiet: false,
            execution: ExecutionConfig::default(),
            results: ResultsConfig::default(),
        }
    }
}

impl Config {
    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("failed to read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// The execution strategy described by this configuration.
    pub fn strategy(&self) -> ExecutionStrategy {
        match self.execution.strategy {
            StrategyKind::Direct => ExecutionStrategy::Direct,
            StrategyKind::Wrapped => ExecutionStrategy::wrapped(&self.execution.launcher),
        }
    }
}

fn default_executable() -> PathBuf {
    PathBuf::from("./count_primes")
}

/// Execution configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Strategy kind.
    #[serde(default)]
    pub strategy: StrategyKind,

    /// Launcher token prepended to every invocation under the wrapped strategy.
    #[serde(default = "default_launcher")]
    pub launcher: String,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            launcher: default_launcher(),
        }
    }
}

fn default_launcher() -> String {
    "lrun".to_string()
}

/// Strategy enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Run the program directly on this machine.
    #[default]
    Direct,
    /// Run the program through the launcher.
    Wrapped,
}

impl std::str::FromStr for StrategyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "direct" => Ok(StrategyKind::Direct),
            "wrapped" => Ok(StrategyKind::Wrapped),
            _ => Err(Error::InvalidConfig {
                field: "execution.strategy".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Results file configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsConfig {
    /// Extension of the results file derived from each table's path.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// When to echo a case's captured output to the terminal.
    #[serde(default, rename = "show-output")]
    pub show_output: ShowOutput,
}

impl Default for ResultsConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            show_output: ShowOutput::default(),
        }
    }
}

fn default_extension() -> String {
    "results".to_string()
}

/// Policy for showing captured output of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ShowOutput {
    Always,
    Never,
    /// Only for `BADCOUNT` and `ERROR` outcomes.
    #[default]
    OnFailure,
}

impl std::str::FromStr for ShowOutput {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "always" => Ok(ShowOutput::Always),
            "never" => Ok(ShowOutput::Never),
            "on-failure" => Ok(ShowOutput::OnFailure),
            _ => Err(Error::InvalidConfig {
                field: "results.show-output".to_string(),
                value: s.to_string(),
            }),
        }
    }
}
