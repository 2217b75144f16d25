//! The REPL-facing error type: every failure in the pipeline bubbles up
//! to one place that prints it and restarts the prompt (spec §7
//! "Propagation").

use thiserror::Error;

use uniquery_core::ParseError;
use uniquery_drivers::{ConnectionError, ExecutionError};
use uniquery_export::TranslationError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Translation(#[from] TranslationError),

    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error("invalid JSON for native-mode input: {0}")]
    NativeJson(serde_json::Error),

    #[error("no active connection — run `alias use <name>` first")]
    NoActiveConnection,

    #[error("unknown alias: {0}")]
    UnknownAlias(String),

    #[error("{0}")]
    Usage(String),
}
