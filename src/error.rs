//! error types for the station library.
//!
//! absent data is not an error: the reader returns `Ok(None)` for it.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StationError {
    /// rejected before any i/o happens
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// unparseable row in the readings file
    #[error("malformed readings data: {0}")]
    Csv(#[from] csv::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("plot error: {0}")]
    Plot(String),
}

impl StationError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, StationError>;
