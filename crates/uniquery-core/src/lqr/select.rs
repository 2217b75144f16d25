//! Shared sub-structures for the `SELECT` LQR variant (spec §3).

use serde::{Deserialize, Serialize};

use super::condition::{Condition, Operator};
use super::value::Value;

/// A table reference in a FROM clause. `alias` always has a value — it
/// defaults to `name` when the query doesn't provide one (spec §3
/// invariant: "alias defaults to name").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRef {
    pub name: String,
    pub alias: String,
}

impl TableRef {
    pub fn new(name: impl Into<String>, alias: Option<String>) -> Self {
        let name = name.into();
        let alias = alias.unwrap_or_else(|| name.clone());
        Self { name, alias }
    }
}

/// Aggregate functions usable in a projection item or a HAVING clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AggregateFunction {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl AggregateFunction {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "COUNT" => Some(Self::Count),
            "SUM" => Some(Self::Sum),
            "AVG" => Some(Self::Avg),
            "MIN" => Some(Self::Min),
            "MAX" => Some(Self::Max),
            _ => None,
        }
    }

    pub fn lowercase(self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Sum => "sum",
            Self::Avg => "avg",
            Self::Min => "min",
            Self::Max => "max",
        }
    }
}

/// One item of a SELECT projection list.
///
/// - plain column -> `{name, alias: None, aggregation_function: None}`
/// - aliased expression -> `{name, alias: Some(_), ..}`
/// - aggregation call -> `{aggregation_function: Some(_), name: <argument>, alias}`
/// - `*` -> `{name: "*", alias: None, aggregation_function: None}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionItem {
    pub name: String,
    pub alias: Option<String>,
    pub aggregation_function: Option<AggregateFunction>,
}

impl ProjectionItem {
    pub fn is_wildcard(&self) -> bool {
        self.name == "*" && self.aggregation_function.is_none()
    }

    /// The key a downstream generator should use to label this item's
    /// output field: the explicit alias, or else the raw name.
    pub fn output_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// Synthesizes the alias HAVING/GROUP BY generators fall back to when
    /// none was given: `<func>_<column>` (spec §4.2.2 step 4).
    pub fn synthesized_alias(&self) -> String {
        match (self.aggregation_function, self.alias.as_deref()) {
            (_, Some(alias)) => alias.to_string(),
            (Some(func), None) => format!("{}_{}", func.lowercase(), self.name),
            (None, None) => self.name.clone(),
        }
    }
}

/// A single column reference, optionally qualified by a table alias
/// (`alias.column`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRef {
    pub table_alias: Option<String>,
    pub column: String,
}

impl ColumnRef {
    /// Parses a possibly-qualified column reference like `e.department_id`.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once('.') {
            Some((alias, column)) => Self {
                table_alias: Some(alias.to_string()),
                column: column.to_string(),
            },
            None => Self {
                table_alias: None,
                column: raw.to_string(),
            },
        }
    }

    pub fn qualified(&self) -> String {
        match &self.table_alias {
            Some(alias) => format!("{alias}.{}", self.column),
            None => self.column.clone(),
        }
    }
}

/// JOIN direction. `FULL` is accepted structurally but both generators in
/// this workspace treat it like `INNER`/`LEFT` for their respective
/// mapping rules — no engine-level semantic for full outer joins is
/// specified beyond "accepted" (spec §3, §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
}

/// The two shapes an ON clause can take: a plain equality between two
/// qualified columns (the relational join surface), or a `RELATION(type,
/// var)` pseudo-call (the Cypher-only graph-join extension, spec §4.3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JoinOn {
    Equality {
        left: ColumnRef,
        operator: Operator,
        right: ColumnRef,
    },
    Relation {
        /// Relationship label pattern, e.g. `FRIEND`, `FRIEND OR ENEMY`, or
        /// `FRIEND*3..3`. Kept verbatim; the Cypher generator rewrites `OR`
        /// to `|` at emit time.
        relationship: String,
        /// The relationship variable bound in the MATCH path (e.g. `w`).
        var: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Join {
    pub join_type: JoinType,
    pub table: TableRef,
    pub on: JoinOn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    pub fn as_mongo_sort(self) -> i32 {
        match self {
            Self::Asc => 1,
            Self::Desc => -1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub column: String,
    pub order: OrderDirection,
}

/// HAVING supports exactly one aggregate leaf (spec §4.1.1 step 5, §9 open
/// question: compound HAVING is `UnsupportedHaving`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HavingClause {
    pub aggregation_function: AggregateFunction,
    pub column: String,
    pub operator: Operator,
    pub value: Value,
}

/// The `SELECT` LQR variant, assembled from six independently-parsed
/// sub-trees (spec §4.1.1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectLqr {
    pub table: TableRef,
    pub distinct: bool,
    pub columns: Vec<ProjectionItem>,
    pub filter: Option<Condition>,
    /// GROUP BY key columns; empty means no grouping.
    pub aggregate: Vec<String>,
    pub having: Option<HavingClause>,
    pub order_by: Vec<OrderItem>,
    pub limit: Option<u64>,
    pub joins: Vec<Join>,
}
