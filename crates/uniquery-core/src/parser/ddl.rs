//! CREATE/ALTER/DROP/USE dispatch (spec §4.1, §6).

use sqlparser::ast::{
    self, AlterColumnOperation, AlterTableOperation, ColumnOption, ObjectType, TableConstraint,
};

use crate::error::ParseError;
use crate::lqr::{
    AlterAction, ColumnDef as LqrColumnDef, ConstraintDef, ForeignKey, ForeignKeyRef, Lqr,
};

pub(crate) fn build_create_table(create: &ast::CreateTable) -> Result<Lqr, ParseError> {
    if create.query.is_some() {
        return Err(ParseError::unsupported_statement(
            "CREATE TABLE ... AS SELECT is not supported",
        ));
    }
    let table_name = create.name.to_string();
    let columns = create.columns.iter().map(column_def).collect();
    let constraints = create
        .constraints
        .iter()
        .filter_map(|c| match c {
            TableConstraint::ForeignKey {
                columns,
                foreign_table,
                referred_columns,
                ..
            } => Some(ForeignKey {
                columns: columns.iter().map(|c| c.value.clone()).collect(),
                references: ForeignKeyRef {
                    table: foreign_table.to_string(),
                    columns: referred_columns.iter().map(|c| c.value.clone()).collect(),
                },
            }),
            _ => None,
        })
        .collect();
    Ok(Lqr::CreateTable { table_name, columns, constraints })
}

fn column_def(col: &ast::ColumnDef) -> LqrColumnDef {
    let constraints = col
        .options
        .iter()
        .map(|opt| match &opt.option {
            ColumnOption::NotNull => "NOT NULL".to_string(),
            ColumnOption::Null => "NULL".to_string(),
            ColumnOption::Unique { is_primary: true, .. } => "PRIMARY KEY".to_string(),
            ColumnOption::Unique { is_primary: false, .. } => "UNIQUE".to_string(),
            ColumnOption::Default(expr) => format!("DEFAULT {expr}"),
            ColumnOption::ForeignKey { foreign_table, .. } => {
                format!("REFERENCES {foreign_table}")
            }
            other => other.to_string(),
        })
        .collect();
    LqrColumnDef {
        name: col.name.value.clone(),
        type_name: col.data_type.to_string(),
        constraints,
    }
}

pub(crate) fn build_create_index(create: &ast::CreateIndex) -> Result<Lqr, ParseError> {
    let index_name = create
        .name
        .as_ref()
        .map(|n| n.to_string())
        .ok_or_else(|| ParseError::unsupported_statement("CREATE INDEX requires a name"))?;
    let table = create.table_name.to_string();
    let columns = create
        .columns
        .iter()
        .map(|col| col.column.expr.to_string())
        .collect();
    Ok(Lqr::CreateIndex { index_name, table, columns })
}

pub(crate) fn build_drop(object_type: &ObjectType, names: &[ast::ObjectName]) -> Result<Lqr, ParseError> {
    let name = names
        .first()
        .ok_or_else(|| ParseError::unsupported_statement("DROP requires a name"))?
        .to_string();
    match object_type {
        ObjectType::Schema => Ok(Lqr::DropDatabase { database_name: name }),
        ObjectType::Table => Ok(Lqr::DropTable { table_name: name }),
        ObjectType::Index => Err(ParseError::unsupported_statement(
            "DROP INDEX must be written as DROP INDEX <name> ON <table>",
        )),
        other => Err(ParseError::unsupported_statement(format!(
            "unsupported DROP target: {other:?}"
        ))),
    }
}

pub(crate) fn build_use(use_stmt: &ast::Use) -> Result<Lqr, ParseError> {
    let name = match use_stmt {
        ast::Use::Object(name) => name.to_string(),
        ast::Use::Database(name) => name.to_string(),
        ast::Use::Schema(name) => name.to_string(),
        other => {
            return Err(ParseError::unsupported_statement(format!(
                "unsupported USE form: {other:?}"
            )))
        }
    };
    Ok(Lqr::UseDatabase { database_name: name })
}

pub(crate) fn build_create_database(db_name: &ast::ObjectName) -> Lqr {
    Lqr::CreateDatabase { database_name: db_name.to_string() }
}

pub(crate) fn build_alter_table(
    table_name: &ast::ObjectName,
    operations: &[AlterTableOperation],
) -> Result<Lqr, ParseError> {
    for op in operations {
        if let AlterTableOperation::RenameTable { table_name: new_name } = op {
            return Ok(Lqr::RenameTable {
                old_name: table_name.to_string(),
                new_name: new_name.to_string(),
            });
        }
    }

    let actions = operations
        .iter()
        .map(alter_action)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Lqr::AlterTable { table_name: table_name.to_string(), actions })
}

fn alter_action(op: &AlterTableOperation) -> Result<AlterAction, ParseError> {
    match op {
        AlterTableOperation::AddColumn { column_def, .. } => {
            Ok(AlterAction::AddColumn(column_def_ref(column_def)))
        }
        AlterTableOperation::DropColumn { column_names, .. } => {
            let name = column_names
                .first()
                .ok_or_else(|| ParseError::unsupported_statement("DROP COLUMN requires a name"))?
                .value
                .clone();
            Ok(AlterAction::DropColumn { name })
        }
        AlterTableOperation::RenameColumn { old_column_name, new_column_name } => {
            Ok(AlterAction::RenameColumn {
                old_name: old_column_name.value.clone(),
                new_name: new_column_name.value.clone(),
            })
        }
        AlterTableOperation::AlterColumn { column_name, op } => match op {
            AlterColumnOperation::SetDefault { value } => Ok(AlterAction::SetDefault {
                column: column_name.value.clone(),
                value: crate::parser::condition::literal_value(value)?,
            }),
            AlterColumnOperation::DropDefault => {
                Ok(AlterAction::DropDefault { column: column_name.value.clone() })
            }
            other => Err(ParseError::unsupported_statement(format!(
                "unsupported ALTER COLUMN operation: {other:?}"
            ))),
        },
        AlterTableOperation::AddConstraint { constraint, .. } => {
            Ok(AlterAction::AddConstraint(constraint_def(constraint)?))
        }
        AlterTableOperation::DropConstraint { name, .. } => {
            Ok(AlterAction::DropConstraint { name: name.value.clone() })
        }
        other => Err(ParseError::unsupported_statement(format!(
            "unsupported ALTER TABLE action: {other:?}"
        ))),
    }
}

fn constraint_def(constraint: &TableConstraint) -> Result<ConstraintDef, ParseError> {
    match constraint {
        TableConstraint::PrimaryKey { columns, .. } => Ok(ConstraintDef::PrimaryKey {
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }),
        TableConstraint::ForeignKey { columns, foreign_table, referred_columns, .. } => {
            Ok(ConstraintDef::ForeignKey(ForeignKey {
                columns: columns.iter().map(|c| c.value.clone()).collect(),
                references: ForeignKeyRef {
                    table: foreign_table.to_string(),
                    columns: referred_columns.iter().map(|c| c.value.clone()).collect(),
                },
            }))
        }
        other => Err(ParseError::unsupported_statement(format!(
            "unsupported table constraint: {other:?}"
        ))),
    }
}

fn column_def_ref(col: &ast::ColumnDef) -> LqrColumnDef {
    column_def(col)
}
