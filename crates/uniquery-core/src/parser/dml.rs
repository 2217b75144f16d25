//! INSERT/UPDATE/DELETE dispatch (spec §4.1, §6).

use sqlparser::ast::{self, Expr, FromTable, SetExpr, TableFactor};

use super::condition::{build_condition, literal_value};
use crate::error::ParseError;
use crate::lqr::Lqr;

pub(crate) fn build_insert(insert: &ast::Insert) -> Result<Lqr, ParseError> {
    let table_name = insert.table.to_string();
    let columns = insert.columns.iter().map(|c| c.value.clone()).collect();

    let source = insert
        .source
        .as_ref()
        .ok_or_else(|| ParseError::unsupported_statement("INSERT requires a VALUES clause"))?;
    let SetExpr::Values(values) = source.body.as_ref() else {
        return Err(ParseError::unsupported_statement(
            "only INSERT ... VALUES is supported",
        ));
    };
    let values = values
        .rows
        .iter()
        .map(|row| row.iter().map(literal_value).collect::<Result<Vec<_>, _>>())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Lqr::InsertData { table_name, columns, values })
}

pub(crate) fn build_update(
    table: &ast::TableWithJoins,
    assignments: &[ast::Assignment],
    selection: &Option<Expr>,
) -> Result<Lqr, ParseError> {
    let table_name = table_name_of(&table.relation)?;

    let mut columns = Vec::with_capacity(assignments.len());
    let mut values = Vec::with_capacity(assignments.len());
    for assignment in assignments {
        columns.push(assignment_target_name(&assignment.target)?);
        values.push(literal_value(&assignment.value)?);
    }

    let filter = selection.as_ref().map(build_condition).transpose()?;
    Ok(Lqr::UpdateData { table_name, columns, values, filter })
}

fn assignment_target_name(target: &ast::AssignmentTarget) -> Result<String, ParseError> {
    match target {
        ast::AssignmentTarget::ColumnName(object_name) => Ok(object_name.to_string()),
        ast::AssignmentTarget::Tuple(_) => Err(ParseError::unsupported_statement(
            "tuple assignment targets are not supported",
        )),
    }
}

pub(crate) fn build_delete(delete: &ast::Delete) -> Result<Lqr, ParseError> {
    let table_name = if let Some(obj) = delete.tables.first() {
        obj.to_string()
    } else {
        let tables = match &delete.from {
            FromTable::WithFromKeyword(tables) | FromTable::WithoutKeyword(tables) => tables,
        };
        let first = tables
            .first()
            .ok_or_else(|| ParseError::unsupported_statement("DELETE requires a FROM table"))?;
        table_name_of(&first.relation)?
    };

    let filter = delete.selection.as_ref().map(build_condition).transpose()?;
    Ok(Lqr::DeleteData { table_name, filter })
}

fn table_name_of(factor: &TableFactor) -> Result<String, ParseError> {
    match factor {
        TableFactor::Table { name, .. } => Ok(name.to_string()),
        other => Err(ParseError::unsupported_statement(format!(
            "unsupported table reference: {other}"
        ))),
    }
}
