//! Scalar literal values carried by conditions, inserts, and defaults.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A decoded SQL literal.
///
/// Literals are decoded to their underlying primitive where possible (spec
/// §4.1.1 step 3); anything the parser can't classify falls back to `Str`
/// verbatim so translation can still proceed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Str(s) => write!(f, "'{s}'"),
        }
    }
}

impl Value {
    /// Best-effort decode of a SQL literal token's textual form.
    pub fn from_sql_literal(text: &str) -> Value {
        if let Ok(i) = text.parse::<i64>() {
            return Value::Int(i);
        }
        if let Ok(f) = text.parse::<f64>() {
            return Value::Float(f);
        }
        Value::Str(text.to_string())
    }
}
