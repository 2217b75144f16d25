//! The structured MongoDB operation descriptor the MQL generator produces.
//!
//! A driver consumes this directly (spec §6: "MQL output is a structured
//! operation descriptor, not a query string") — there is no intermediate
//! text format to parse back.

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

/// One MongoDB operation, fully parameterized and ready for a driver to run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum MongoOp {
    Find {
        collection: String,
        filter: Json,
        #[serde(skip_serializing_if = "Option::is_none")]
        projection: Option<Json>,
        #[serde(skip_serializing_if = "Option::is_none")]
        sort: Option<Json>,
        #[serde(skip_serializing_if = "Option::is_none")]
        limit: Option<u64>,
    },
    Aggregate {
        collection: String,
        pipeline: Vec<Json>,
    },
    InsertMany {
        collection: String,
        documents: Vec<Json>,
    },
    UpdateMany {
        collection: String,
        filter: Json,
        update: Json,
    },
    DeleteMany {
        collection: String,
        filter: Json,
    },
    CreateCollection {
        name: String,
    },
    DropCollection {
        name: String,
    },
    RenameCollection {
        old_name: String,
        new_name: String,
    },
    CreateIndex {
        collection: String,
        keys: Json,
        index_name: String,
    },
    DropIndex {
        collection: String,
        index_name: String,
    },
    /// Mongo has no `CREATE DATABASE`/`DROP DATABASE` — databases are
    /// created implicitly on first write and dropped via `db.dropDatabase()`
    /// scoped to a connection, not a collection operation. Both variants
    /// are emitted anyway so a driver can log/audit the request.
    CreateDatabaseNoop {
        name: String,
    },
    DropDatabase {
        name: String,
    },
    UseDatabase {
        name: String,
    },
    ListDatabases,
    ListCollections,
    DescribeCollection {
        name: String,
    },
}
