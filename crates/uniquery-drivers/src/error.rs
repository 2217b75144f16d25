//! Error types for the driver contract (spec §7).

use thiserror::Error;

/// Raised when `Driver::open` or `Driver::close` fails.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConnectionError {
    #[error("{field} is required for a {profile_type} connection profile")]
    MissingField { profile_type: &'static str, field: &'static str },

    #[error("failed to connect: {0}")]
    OpenFailed(String),

    #[error("failed to close connection cleanly: {0}")]
    CloseFailed(String),
}

/// Raised when `Driver::run` fails. Wraps whatever the native driver
/// reported; this crate does not interpret it further.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExecutionError {
    #[error("native query execution failed: {0}")]
    Failed(String),

    #[error("query does not match this driver's expected native form")]
    WrongQueryKind,
}
