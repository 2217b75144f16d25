//! `Lqr`: the Logical Query Representation, a discriminated value over
//! every statement family the parser supports (spec §3).
//!
//! An `Lqr` value is constructed by the parser from one input string, is
//! immutable thereafter, is consumed exactly once by one generator, and is
//! then discarded — value-like semantics, no sharing, no identity.

use serde::{Deserialize, Serialize};

use super::condition::Condition;
use super::ddl::{AlterAction, ColumnDef, ForeignKey};
use super::select::SelectLqr;
use super::value::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Lqr {
    CreateDatabase { database_name: String },
    UseDatabase { database_name: String },
    DropDatabase { database_name: String },
    ShowDatabases,

    CreateTable {
        table_name: String,
        columns: Vec<ColumnDef>,
        constraints: Vec<ForeignKey>,
    },
    DropTable { table_name: String },
    RenameTable { old_name: String, new_name: String },
    ShowTables,
    ShowTable { table_name: String },
    AlterTable {
        table_name: String,
        actions: Vec<AlterAction>,
    },

    CreateIndex {
        index_name: String,
        table: String,
        columns: Vec<String>,
    },
    DropIndex { index_name: String, table: String },

    InsertData {
        table_name: String,
        columns: Vec<String>,
        /// Row-major matrix: each inner vector is one row, in source order.
        values: Vec<Vec<Value>>,
    },
    UpdateData {
        table_name: String,
        columns: Vec<String>,
        values: Vec<Value>,
        filter: Option<Condition>,
    },
    DeleteData {
        table_name: String,
        filter: Option<Condition>,
    },

    Select(SelectLqr),
}

impl Lqr {
    /// The `operation` tag this variant carries, matching the string tags
    /// named in spec §3 (used for logging and for native-mode JSON echo).
    pub fn operation(&self) -> &'static str {
        match self {
            Lqr::CreateDatabase { .. } => "CREATE_DATABASE",
            Lqr::UseDatabase { .. } => "USE_DATABASE",
            Lqr::DropDatabase { .. } => "DROP_DATABASE",
            Lqr::ShowDatabases => "SHOW_DATABASES",
            Lqr::CreateTable { .. } => "CREATE_TABLE",
            Lqr::DropTable { .. } => "DROP_TABLE",
            Lqr::RenameTable { .. } => "RENAME_TABLE",
            Lqr::ShowTables => "SHOW_TABLES",
            Lqr::ShowTable { .. } => "SHOW_TABLE",
            Lqr::AlterTable { .. } => "ALTER_TABLE",
            Lqr::CreateIndex { .. } => "CREATE_INDEX",
            Lqr::DropIndex { .. } => "DROP_INDEX",
            Lqr::InsertData { .. } => "INSERT_DATA",
            Lqr::UpdateData { .. } => "UPDATE_DATA",
            Lqr::DeleteData { .. } => "DELETE_DATA",
            Lqr::Select(_) => "SELECT",
        }
    }
}
