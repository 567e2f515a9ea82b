use std::path::PathBuf;

use thiserror::Error;

/// Failure taxonomy for a scan run.
///
/// Every variant aborts the whole run: no error is skipped, retried, or
/// accumulated, and no partial report is written.
#[derive(Debug, Error)]
pub enum ScanError {
    /// One of the three required settings (scan root, output directory,
    /// report base name) was not provided by any source.
    #[error("missing configuration value `{0}` (pass it on the command line or set it in config.toml)")]
    ConfigurationMissing(&'static str),

    /// A config file was found but could not be read or parsed.
    #[error("invalid configuration file `{path}`: {reason}")]
    ConfigurationInvalid { path: PathBuf, reason: String },

    /// A discovered manifest could not be read or parsed.
    #[error("failed to read manifest `{path}`: {reason}")]
    ManifestRead { path: PathBuf, reason: String },

    /// Directory creation, backup rename, or report write failed.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Wrap an I/O error with a short description of the failed operation.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        ScanError::Io {
            context: context.into(),
            source,
        }
    }
}
