//! Error types for h3cp-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.

use thiserror::Error;

/// Result type alias for h3cp-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for h3cp operations
#[derive(Error, Debug)]
pub enum Error {
    /// Wrong argument count or missing required flag value
    #[error("{0}")]
    Usage(String),

    /// Endpoint arguments that cannot form a single-object transfer
    #[error("{0}")]
    InvalidPath(String),

    /// The store could not produce a handle for the target
    #[error("Failed to initialize store: {0}")]
    StoreInit(String),

    /// The store's read or write call failed
    #[error("Transfer failed: {0}")]
    Transfer(String),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::Usage(_) | Error::InvalidPath(_) => 2, // UsageError
            Error::StoreInit(_) => 3,                     // StoreInitError
            Error::Transfer(_) => 4,                      // TransferError
        }
    }

    /// Whether the error was raised before any store interaction
    pub const fn is_usage(&self) -> bool {
        matches!(self, Error::Usage(_) | Error::InvalidPath(_))
    }
}
