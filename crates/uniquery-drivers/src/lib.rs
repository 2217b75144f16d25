//! The driver contract (spec §1, §7): `open`/`run`/`close`, the common
//! shape every one of the three external database backends (MongoDB,
//! relational, Neo4j) must satisfy. Real backend wiring is out of scope —
//! this crate specifies the trait boundary and an in-memory [`MockDriver`]
//! used by the façade's own tests and the CLI's `--dry-run` mode.

mod error;
mod mock;
mod profile;

pub use error::{ConnectionError, ExecutionError};
pub use mock::MockDriver;
pub use profile::{ConnectionProfile, ProfileType};

use serde_json::Value as Json;
use uniquery_export::MongoOp;

/// The query form handed to `Driver::run`, already translated by the
/// core: a structured Mongo operation, or a query string (SQL passthrough
/// or generated Cypher).
#[derive(Debug, Clone, PartialEq)]
pub enum NativeQuery {
    Mql(MongoOp),
    Text(String),
}

/// A live connection to one of the three backend databases.
///
/// `open` is a free-standing constructor rather than a trait method with
/// `Self: Sized` elsewhere in the signature, so implementors stay
/// object-safe everywhere except construction — the façade only ever
/// holds a `Box<dyn Driver>` after opening one.
pub trait Driver {
    fn run(&mut self, query: &NativeQuery) -> Result<Vec<Json>, ExecutionError>;
    fn close(&mut self) -> Result<(), ConnectionError>;
}
