use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading dictionaries, reading configuration or
/// pulling characters from an input source.
#[derive(Error, Debug)]
pub enum Error {
    /// A required dictionary file could not be read
    #[error("failed to load dictionary {path}: {source}")]
    Dictionary {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading the character source failed during a window refill
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),

    /// A byte source produced malformed UTF-8
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to read config file {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("the global dictionary is already initialized")]
    AlreadyInitialized,
}

/// Result type alias for segmentation operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether the error came from the input source rather than from setup.
    ///
    /// A session that returned such an error is left in an undefined state
    /// and should be discarded.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Error::Io(_) | Error::InvalidInput(_))
    }
}
