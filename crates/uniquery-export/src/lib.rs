//! Target-specific code generators for the UniQuery translation core.
//!
//! Each generator is a pure function `&Lqr -> Result<T, TranslationError>`,
//! one module per target dialect: [`mql`] emits a structured [`MongoOp`]
//! descriptor, [`cypher`] emits a Cypher query string.

mod cypher;
mod error;
mod mongo_op;
mod mql;

pub use error::TranslationError;
pub use mongo_op::MongoOp;

use uniquery_core::Lqr;

/// Translates an LQR value into a MongoDB operation descriptor.
pub fn to_mql(lqr: &Lqr) -> Result<MongoOp, TranslationError> {
    mql::translate(lqr)
}

/// Translates an LQR value into a Cypher query string.
pub fn to_cypher(lqr: &Lqr) -> Result<String, TranslationError> {
    cypher::translate(lqr)
}
