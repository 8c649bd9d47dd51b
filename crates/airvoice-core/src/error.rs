//! Error types for airvoice-core

use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// Device directory failure that a handler chose not to absorb
    #[error("device directory error: {0}")]
    Directory(#[from] airvoice_devices::Error),

    /// An intent arrived without a slot value the handler needs
    #[error("missing slot value: {0}")]
    MissingSlot(String),

    /// Session record could not be read or written
    #[error("storage error: {0}")]
    Storage(String),

    /// Invalid settings
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A handler panicked while processing a turn
    #[error("handler panicked: {0}")]
    HandlerPanic(String),

    /// Internal error (serialization, etc.)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
