//! The SQL front end (spec §4.1): turns SQL text into an [`Lqr`] value.
//!
//! Dispatch is a single match over the root [`sqlparser::ast::Statement`],
//! with one submodule per statement family: [`ddl`] for schema statements,
//! [`dml`] for INSERT/UPDATE/DELETE, and [`select`] for the SELECT
//! construction algorithm. [`condition`] holds the WHERE/ON/HAVING
//! expression-to-[`crate::lqr::Condition`] translation shared by `dml` and
//! `select`.

pub(crate) mod condition;
mod ddl;
mod dml;
mod select;

use sqlparser::ast::{SetExpr, Statement};
use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;

use crate::error::{ParseError, ParseErrorKind};
use crate::lqr::Lqr;

/// Parses one SQL statement into its logical query representation.
///
/// SQL text containing more than one statement is rejected: a call to
/// `parse` always represents exactly one client query (spec §4.4).
#[cfg_attr(feature = "tracing", tracing::instrument(skip(sql)))]
pub fn parse(sql: &str) -> Result<Lqr, ParseError> {
    if let Some(lqr) = try_show(sql) {
        return Ok(lqr);
    }

    let statements = Parser::parse_sql(&GenericDialect {}, sql)?;
    let statement = match statements.as_slice() {
        [] => return Err(ParseError::new("empty SQL input")),
        [single] => single,
        _ => return Err(ParseError::new("only a single SQL statement is supported")),
    };

    dispatch(statement)
}

fn dispatch(statement: &Statement) -> Result<Lqr, ParseError> {
    match statement {
        Statement::Query(query) => match query.body.as_ref() {
            SetExpr::Select(sel) => Ok(Lqr::Select(select::build_select(query, sel)?)),
            _ => Err(ParseError::unsupported_statement(
                "only a plain SELECT is supported (no UNION, CTE, or subquery set operations)",
            )),
        },
        Statement::Insert(insert) => dml::build_insert(insert),
        Statement::Update { table, assignments, from: _, selection, .. } => {
            dml::build_update(table, assignments, selection)
        }
        Statement::Delete(delete) => dml::build_delete(delete),
        Statement::CreateTable(create) => ddl::build_create_table(create),
        Statement::CreateIndex(create) => ddl::build_create_index(create),
        Statement::CreateDatabase { db_name, .. } => Ok(ddl::build_create_database(db_name)),
        Statement::AlterTable { name, operations, .. } => ddl::build_alter_table(name, operations),
        Statement::Drop { object_type, names, .. } => ddl::build_drop(object_type, names),
        Statement::Use(use_stmt) => ddl::build_use(use_stmt),
        other => Err(ParseError::unsupported_statement(format!(
            "unsupported statement: {other}"
        ))),
    }
}

/// SHOW DATABASES / SHOW TABLES / SHOW TABLE &lt;name&gt; are a small fixed
/// grammar (spec §6) that doesn't match any dialect's native SHOW syntax
/// (`SHOW TABLE <name>` singular isn't standard SQL), so they're recognized
/// directly against the trimmed input rather than routed through
/// `sqlparser`.
fn try_show(sql: &str) -> Option<Lqr> {
    let trimmed = sql.trim().trim_end_matches(';').trim();
    let mut parts = trimmed.split_whitespace();
    if !parts.next()?.eq_ignore_ascii_case("show") {
        return None;
    }
    let rest: Vec<&str> = parts.collect();
    match rest.as_slice() {
        [kw] if kw.eq_ignore_ascii_case("databases") => Some(Lqr::ShowDatabases),
        [kw] if kw.eq_ignore_ascii_case("tables") => Some(Lqr::ShowTables),
        [kw, name] if kw.eq_ignore_ascii_case("table") => {
            Some(Lqr::ShowTable { table_name: (*name).to_string() })
        }
        _ => None,
    }
}
