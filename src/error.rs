use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Problems with the settings file or its values.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse settings file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Engine configurations that cannot host a round.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum EngineError {
    #[error("grid {width}x{height} is smaller than the {min}x{min} minimum")]
    GridTooSmall { width: u16, height: u16, min: u16 },
}

/// Top-level application error.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("failed to open log file {}: {source}", .path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to initialise logging: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}
