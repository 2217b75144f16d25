//! DDL sub-structures: column definitions, foreign keys, and ALTER actions.

use serde::{Deserialize, Serialize};

use super::value::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    pub type_name: String,
    pub constraints: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKeyRef {
    pub table: String,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKey {
    pub columns: Vec<String>,
    pub references: ForeignKeyRef,
}

/// A table-level constraint added via `ADD CONSTRAINT`/`ADD PRIMARY KEY`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConstraintDef {
    PrimaryKey { columns: Vec<String> },
    ForeignKey(ForeignKey),
}

/// One step of an `ALTER TABLE` statement (spec §3, §6).
///
/// A `RENAME TO` action is *not* represented here: the parser lifts it to
/// its own top-level `RENAME_TABLE` LQR variant (spec §4.1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AlterAction {
    AddColumn(ColumnDef),
    DropColumn { name: String },
    RenameColumn { old_name: String, new_name: String },
    SetDefault { column: String, value: Value },
    DropDefault { column: String },
    AddConstraint(ConstraintDef),
    DropConstraint { name: String },
}
