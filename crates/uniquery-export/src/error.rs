//! Error types for the export crate.

use thiserror::Error;

/// Errors raised while turning an [`uniquery_core::Lqr`] into a target
/// query. Unlike [`uniquery_core::ParseError`] these are always tied to the
/// *generator*, not the SQL surface — the input LQR was well-formed, but the
/// requested target can't express it.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TranslationError {
    #[error("{statement} is not representable in {target}: {reason}")]
    Unsupported { target: &'static str, statement: &'static str, reason: String },

    #[error("join alias could not be resolved: {0}")]
    AmbiguousJoinAlias(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl TranslationError {
    pub fn unsupported(target: &'static str, statement: &'static str, reason: impl Into<String>) -> Self {
        Self::Unsupported { target, statement, reason: reason.into() }
    }
}
