use super::Config;
use crate::core::error::{Error, Result};
use std::path::{Path, PathBuf};

/// File name looked up in the search directory when no config file is given explicitly.
pub const DEFAULT_CONFIG_FILE: &str = "rangecheck.toml";

/// Configuration loader that supports multiple sources.
pub struct ConfigLoader {
    /// Explicit config file; must exist when set.
    config_file: Option<PathBuf>,
    /// Directory searched for [`DEFAULT_CONFIG_FILE`].
    search_dir: Option<PathBuf>,
    /// Whether to apply `RANGECHECK_*` overrides.
    use_env: bool,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self {
            config_file: None,
            search_dir: None,
            use_env: true,
        }
    }

    /// Set a standalone configuration file path.
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Look for `rangecheck.toml` in `dir` when no explicit file is set.
    pub fn search_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_dir = Some(dir.into());
        self
    }

    /// Disable environment variable overrides.
    pub fn no_env(mut self) -> Self {
        self.use_env = false;
        self
    }

    /// Load configuration from all enabled sources.
    ///
    /// Priority (later sources override earlier):
    /// 1. Default values
    /// 2. Explicit TOML file, or `rangecheck.toml` in the search directory
    /// 3. Individual env var overrides (`RANGECHECK_*`)
    pub fn load(self) -> Result<Config> {
        let mut config = match self.resolve_file()? {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config file");
                Config::from_toml_file(&path)?
            }
            None => Config::default(),
        };

        if self.use_env {
            for (key, value) in super::env::detect_active_overrides() {
                tracing::debug!(%key, %value, "environment override active");
            }
            super::env::apply_env_overrides(&mut config);
        }

        Ok(config)
    }

    fn resolve_file(&self) -> Result<Option<PathBuf>> {
        if let Some(ref path) = self.config_file {
            if !path.is_file() {
                return Err(Error::FileNotFound(path.clone()));
            }
            return Ok(Some(path.clone()));
        }

        let candidate = self
            .search_dir
            .as_deref()
            .unwrap_or(Path::new("."))
            .join(DEFAULT_CONFIG_FILE);
        Ok(candidate.is_file().then_some(candidate))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::env::tests::{with_env_vars, without_overrides};
    use crate::config::{ShowOutput, StrategyKind};

    #[test]
    fn test_load_standalone_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("custom.toml");
        std::fs::write(
            &config_path,
            r#"
executable = "./fast_primes"

[execution]
strategy = "wrapped"

[results]
show-output = "always"
"#,
        )
        .unwrap();

        without_overrides(|| {
            let config = ConfigLoader::new().config_file(&config_path).load().unwrap();
            assert_eq!(config.executable, PathBuf::from("./fast_primes"));
            assert_eq!(config.execution.strategy, StrategyKind::Wrapped);
            assert_eq!(config.execution.launcher, "lrun");
            assert_eq!(config.results.show_output, ShowOutput::Always);
        });
    }

    #[test]
    fn test_load_from_search_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "quiet = true\n").unwrap();

        without_overrides(|| {
            let config = ConfigLoader::new().search_dir(dir.path()).load().unwrap();
            assert!(config.quiet);
        });
    }

    #[test]
    fn test_load_defaults_when_no_file() {
        let dir = tempfile::tempdir().unwrap();
        without_overrides(|| {
            let config = ConfigLoader::new().search_dir(dir.path()).load().unwrap();
            assert_eq!(config.executable, PathBuf::from("./count_primes"));
        });
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ConfigLoader::new()
            .config_file(dir.path().join("nope.toml"))
            .load();
        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("bad.toml");
        std::fs::write(&config_path, "quiet = maybe\n").unwrap();
        let result = ConfigLoader::new().config_file(&config_path).no_env().load();
        assert!(result.is_err());
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "[execution]\nlauncher = \"srun\"\n",
        )
        .unwrap();

        with_env_vars(&[("RANGECHECK_LAUNCHER", "qsub")], || {
            let config = ConfigLoader::new().search_dir(dir.path()).load().unwrap();
            assert_eq!(config.execution.launcher, "qsub");

            let config = ConfigLoader::new()
                .search_dir(dir.path())
                .no_env()
                .load()
                .unwrap();
            assert_eq!(config.execution.launcher, "srun");
        });
    }
}
