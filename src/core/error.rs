use std::path::PathBuf;

/// Result type alias for rangecheck operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for rangecheck.
///
/// Per-case outcomes (`BADTEST`, `BADCOUNT`, `ERROR`) are never represented here; they are
/// recorded as [`Outcome`](crate::harness::Outcome)s. This type only covers conditions that stop
/// a table or the whole run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The target program could not be launched or waited on.
    #[error("Executor error: {0}")]
    Executor(String),

    /// A table or results file could not be opened, read or written.
    #[error("Failed to {action} \"{}\": {source}", .path.display())]
    Resource {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File not found.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Invalid configuration value.
    #[error("Invalid configuration value for {field}: {value}")]
    InvalidConfig { field: String, value: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML deserialization error.
    #[error("TOML parsing error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create an executor error.
    pub fn executor(msg: impl Into<String>) -> Self {
        Error::Executor(msg.into())
    }

    /// Create a resource error for the file at `path`.
    pub fn resource(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Resource {
            action,
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        assert_eq!(
            Error::config("bad value").to_string(),
            "Configuration error: bad value"
        );
        assert_eq!(
            Error::executor("lrun not found").to_string(),
            "Executor error: lrun not found"
        );
    }

    #[test]
    fn test_error_resource() {
        let err = Error::resource(
            "open",
            "tables/small.csv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        assert_eq!(
            err.to_string(),
            "Failed to open \"tables/small.csv\": no such file"
        );
        assert!(matches!(err, Error::Resource { action: "open", .. }));
    }

    #[test]
    fn test_error_file_not_found() {
        let err = Error::FileNotFound(PathBuf::from("./count_primes"));
        assert_eq!(err.to_string(), "File not found: ./count_primes");
    }

    #[test]
    fn test_error_invalid_config() {
        let err = Error::InvalidConfig {
            field: "execution.strategy".to_string(),
            value: "cluster".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid configuration value for execution.strategy: cluster"
        );
    }
}
