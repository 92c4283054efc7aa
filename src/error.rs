use miette::Diagnostic;
use thiserror::Error;

/// Main error type for hexaflock operations
#[derive(Error, Diagnostic, Debug)]
pub enum FlockError {
    #[error("Invalid seed: {value}")]
    #[diagnostic(
        code(hexaflock::seed),
        help("Seeds must be positive integers (1 or greater)")
    )]
    InvalidSeed { value: String },

    #[error("Invalid txid: {value}")]
    #[diagnostic(
        code(hexaflock::txid),
        help("A txid is exactly 64 hexadecimal characters")
    )]
    InvalidTxid { value: String },

    #[error("Colour {colour} is not in the palette ({location})")]
    #[diagnostic(
        code(hexaflock::palette),
        help("Add the colour to palette.json or change the style masks")
    )]
    PaletteMismatch { colour: String, location: String },

    #[error("Config error: {message}")]
    #[diagnostic(code(hexaflock::config))]
    ConfigLoad {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(hexaflock::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Encode error: {message}")]
    #[diagnostic(code(hexaflock::encode))]
    Encode { message: String },

    #[error("Stamp error: {message}")]
    #[diagnostic(code(hexaflock::stamp))]
    Stamp {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("{failed} of {total} seeds failed")]
    #[diagnostic(
        code(hexaflock::batch),
        help("Failed seeds are listed above; the rest were written")
    )]
    BatchFailed { failed: usize, total: usize },
}

impl FlockError {
    /// Shorthand for a config error without help text.
    pub fn config(message: impl Into<String>) -> Self {
        FlockError::ConfigLoad {
            message: message.into(),
            help: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FlockError>;
