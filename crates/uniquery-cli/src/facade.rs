//! The Target Dispatcher + Query Engine façade: composes the parser, a
//! generator, and a driver behind one `run` call, with a "native mode"
//! bypass that skips translation entirely.

use serde_json::Value as Json;
use tracing::{info_span, trace};

use uniquery_core::{parse, Lqr};
use uniquery_drivers::{Driver, MockDriver, NativeQuery, ProfileType};
use uniquery_export::{to_cypher, to_mql};

use crate::cli::OutputMode;
use crate::error::CliError;

/// Which native dialect the active connection speaks. Derived from the
/// alias's `ProfileType` — the façade never asks the user for this
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Mql,
    Cypher,
    Sql,
}

impl From<ProfileType> for Dialect {
    fn from(profile_type: ProfileType) -> Self {
        match profile_type {
            ProfileType::Mongodb => Dialect::Mql,
            ProfileType::Neo4j => Dialect::Cypher,
            ProfileType::Mysql => Dialect::Sql,
        }
    }
}

pub struct Facade {
    dialect: Dialect,
    driver: Box<dyn Driver>,
    native: bool,
    output: OutputMode,
}

impl Facade {
    pub fn new(dialect: Dialect, driver: Box<dyn Driver>) -> Self {
        Self { dialect, driver, native: false, output: OutputMode::Table }
    }

    pub fn set_native(&mut self, native: bool) {
        self.native = native;
    }

    pub fn set_output(&mut self, output: OutputMode) {
        self.output = output;
    }

    pub fn output(&self) -> OutputMode {
        self.output
    }

    pub fn native(&self) -> bool {
        self.native
    }

    pub fn close(&mut self) -> Result<(), CliError> {
        self.driver.close().map_err(CliError::from)
    }

    /// Runs one query through the pipeline: native bypass, or
    /// parse → translate → execute.
    pub fn run(&mut self, input: &str) -> Result<Vec<Json>, CliError> {
        let span = info_span!("query", dialect = ?self.dialect, native = self.native);
        let _guard = span.enter();

        let native_query = if self.native {
            self.native_query(input)?
        } else {
            self.translated_query(input)?
        };

        let execute_span = info_span!("execute");
        let _execute_guard = execute_span.enter();
        self.driver.run(&native_query).map_err(CliError::from)
    }

    fn native_query(&self, input: &str) -> Result<NativeQuery, CliError> {
        trace!("native mode bypass");
        match self.dialect {
            Dialect::Mql => {
                let op = serde_json::from_str(input).map_err(CliError::NativeJson)?;
                Ok(NativeQuery::Mql(op))
            }
            Dialect::Cypher | Dialect::Sql => Ok(NativeQuery::Text(input.to_string())),
        }
    }

    fn translated_query(&self, input: &str) -> Result<NativeQuery, CliError> {
        let parse_span = info_span!("parse");
        let lqr: Lqr = {
            let _guard = parse_span.enter();
            parse(input)?
        };

        let translate_span = info_span!("translate");
        let _guard = translate_span.enter();
        match self.dialect {
            Dialect::Mql => Ok(NativeQuery::Mql(to_mql(&lqr)?)),
            Dialect::Cypher => Ok(NativeQuery::Text(to_cypher(&lqr)?)),
            Dialect::Sql => Ok(NativeQuery::Text(input.to_string())),
        }
    }
}
