//! The `Condition` tree shared by WHERE filters and HAVING clauses.

use serde::{Deserialize, Serialize};

use super::value::Value;

/// Comparison operators usable inside a [`Condition::Compare`] leaf or a
/// [`crate::lqr::select::HavingClause`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

/// A structural WHERE/ON condition.
///
/// `And`/`Or` are n-ary (operand arrays never empty, per spec §3) so that
/// flattened `a AND b AND c` chains don't need synthetic binary nesting;
/// `Not` wraps exactly one operand. Nesting is arbitrary and is preserved
/// exactly as parsed — generators must never reorder or flatten across an
/// `And`/`Or` boundary (spec §8).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    And(Vec<Condition>),
    Or(Vec<Condition>),
    Not(Box<Condition>),
    IsNull { column: String },
    Compare { column: String, op: Operator, value: Value },
    In { column: String, values: Vec<Value> },
    Between { column: String, low: Value, high: Value },
    Like { column: String, pattern: String },
}

impl Condition {
    /// The column name this leaf condition concerns, if it's a leaf at all.
    /// `And`/`Or`/`Not` have no single column and return `None`.
    pub fn leaf_column(&self) -> Option<&str> {
        match self {
            Condition::IsNull { column }
            | Condition::Compare { column, .. }
            | Condition::In { column, .. }
            | Condition::Between { column, .. }
            | Condition::Like { column, .. } => Some(column),
            Condition::And(_) | Condition::Or(_) | Condition::Not(_) => None,
        }
    }
}
