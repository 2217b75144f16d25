//! Recursive-descent translation of a `sqlparser` expression tree into the
//! [`Condition`] tree (spec §4.1.1 step 3).

use sqlparser::ast::{BinaryOperator, Expr, UnaryOperator};

use crate::error::ParseError;
use crate::lqr::{AggregateFunction, Condition, HavingClause, Operator, Value};

/// Converts a WHERE/ON expression into a [`Condition`] tree.
///
/// `AND`/`OR` flatten into n-ary operand lists *only* across a run of the
/// same operator — a differently-typed child is built recursively and kept
/// as its own nested node, which is what preserves the "no flattening
/// across boundaries" invariant (spec §8).
pub(crate) fn build_condition(expr: &Expr) -> Result<Condition, ParseError> {
    match expr {
        Expr::BinaryOp { op: BinaryOperator::And, .. } => {
            let mut operands = Vec::new();
            flatten(expr, &BinaryOperator::And, &mut operands)?;
            Ok(Condition::And(operands))
        }
        Expr::BinaryOp { op: BinaryOperator::Or, .. } => {
            let mut operands = Vec::new();
            flatten(expr, &BinaryOperator::Or, &mut operands)?;
            Ok(Condition::Or(operands))
        }
        Expr::UnaryOp { op: UnaryOperator::Not, expr } => {
            Ok(Condition::Not(Box::new(build_condition(expr)?)))
        }
        Expr::Nested(inner) => build_condition(inner),
        Expr::IsNull(inner) => Ok(Condition::IsNull { column: column_name(inner)? }),
        Expr::IsNotNull(inner) => {
            Ok(Condition::Not(Box::new(Condition::IsNull { column: column_name(inner)? })))
        }
        Expr::InList { expr, list, negated } => {
            let column = column_name(expr)?;
            let values = list.iter().map(literal_value).collect::<Result<Vec<_>, _>>()?;
            let leaf = Condition::In { column, values };
            Ok(if *negated { Condition::Not(Box::new(leaf)) } else { leaf })
        }
        Expr::Between { expr, negated, low, high } => {
            let column = column_name(expr)?;
            let low = literal_value(low)?;
            let high = literal_value(high)?;
            let leaf = Condition::Between { column, low, high };
            Ok(if *negated { Condition::Not(Box::new(leaf)) } else { leaf })
        }
        Expr::Like { negated, expr, pattern, .. } => {
            let column = column_name(expr)?;
            let pattern = match pattern.as_ref() {
                Expr::Value(v) => v.value.to_string().trim_matches('\'').to_string(),
                other => column_name(other)?,
            };
            let leaf = Condition::Like { column, pattern };
            Ok(if *negated { Condition::Not(Box::new(leaf)) } else { leaf })
        }
        Expr::BinaryOp { left, op, right } => {
            let column = column_name(left)?;
            let op = map_comparison(op)?;
            let value = literal_value(right)?;
            Ok(Condition::Compare { column, op, value })
        }
        other => Err(ParseError::new(format!(
            "unsupported WHERE expression: {other}"
        ))),
    }
}

fn flatten(expr: &Expr, wanted: &BinaryOperator, out: &mut Vec<Condition>) -> Result<(), ParseError> {
    match expr {
        Expr::BinaryOp { left, op, right } if op == wanted => {
            flatten(left, wanted, out)?;
            flatten(right, wanted, out)?;
            Ok(())
        }
        _ => {
            out.push(build_condition(expr)?);
            Ok(())
        }
    }
}

/// Resolves the single HAVING leaf (spec §4.1.1 step 5). Compound HAVING
/// (AND/OR) or a comparison against a non-aggregate raises `UnsupportedHaving`.
pub(crate) fn build_having(expr: &Expr) -> Result<HavingClause, ParseError> {
    let expr = unwrap_nested(expr);
    match expr {
        Expr::BinaryOp { left, op, right } => {
            let (func, column) = aggregate_call(left)
                .ok_or_else(|| ParseError::unsupported_having(
                    "HAVING must compare an aggregate function to a literal",
                ))?;
            let operator = map_comparison(op)
                .map_err(|_| ParseError::unsupported_having("HAVING operator must be a comparison"))?;
            let value = literal_value(right)?;
            Ok(HavingClause { aggregation_function: func, column, operator, value })
        }
        _ => Err(ParseError::unsupported_having(
            "compound HAVING (AND/OR) is not supported",
        )),
    }
}

fn unwrap_nested(expr: &Expr) -> &Expr {
    match expr {
        Expr::Nested(inner) => unwrap_nested(inner),
        other => other,
    }
}

/// Recognizes an aggregate function call, returning `(function, argument)`.
/// The argument is `"*"` for `COUNT(*)`.
pub(crate) fn aggregate_call(expr: &Expr) -> Option<(AggregateFunction, String)> {
    let Expr::Function(function) = expr else { return None };
    let name = function.name.to_string();
    let func = AggregateFunction::from_name(&name)?;
    let sqlparser::ast::FunctionArguments::List(list) = &function.args else { return None };
    let arg = list.args.first()?;
    let column = match arg {
        sqlparser::ast::FunctionArg::Unnamed(sqlparser::ast::FunctionArgExpr::Wildcard) => {
            "*".to_string()
        }
        sqlparser::ast::FunctionArg::Unnamed(sqlparser::ast::FunctionArgExpr::Expr(e)) => {
            column_name(e).ok()?
        }
        sqlparser::ast::FunctionArg::Named { arg: sqlparser::ast::FunctionArgExpr::Expr(e), .. } => {
            column_name(e).ok()?
        }
        _ => return None,
    };
    Some((func, column))
}

pub(crate) fn column_name(expr: &Expr) -> Result<String, ParseError> {
    match expr {
        Expr::Identifier(ident) => Ok(ident.value.clone()),
        Expr::CompoundIdentifier(parts) => {
            Ok(parts.iter().map(|p| p.value.clone()).collect::<Vec<_>>().join("."))
        }
        Expr::Nested(inner) => column_name(inner),
        other => Err(ParseError::new(format!(
            "expected a column reference, found {other}"
        ))),
    }
}

pub(crate) fn map_comparison(op: &BinaryOperator) -> Result<Operator, ParseError> {
    match op {
        BinaryOperator::Eq => Ok(Operator::Eq),
        BinaryOperator::NotEq => Ok(Operator::Ne),
        BinaryOperator::Gt => Ok(Operator::Gt),
        BinaryOperator::GtEq => Ok(Operator::Ge),
        BinaryOperator::Lt => Ok(Operator::Lt),
        BinaryOperator::LtEq => Ok(Operator::Le),
        other => Err(ParseError::new(format!("unsupported comparison operator: {other}"))),
    }
}

pub(crate) fn literal_value(expr: &Expr) -> Result<Value, ParseError> {
    match expr {
        Expr::Value(v) => Ok(sql_value_to_lqr(&v.value)),
        Expr::UnaryOp { op: UnaryOperator::Minus, expr } => match literal_value(expr)? {
            Value::Int(i) => Ok(Value::Int(-i)),
            Value::Float(f) => Ok(Value::Float(-f)),
            other => Ok(other),
        },
        Expr::Identifier(ident) => Ok(Value::from_sql_literal(&ident.value)),
        other => Err(ParseError::new(format!("expected a literal value, found {other}"))),
    }
}

fn sql_value_to_lqr(value: &sqlparser::ast::Value) -> Value {
    use sqlparser::ast::Value as SqlValue;
    match value {
        SqlValue::Number(n, _) => Value::from_sql_literal(n),
        SqlValue::SingleQuotedString(s)
        | SqlValue::DoubleQuotedString(s)
        | SqlValue::EscapedStringLiteral(s)
        | SqlValue::DollarQuotedString(sqlparser::ast::DollarQuotedString { value: s, .. }) => {
            Value::Str(s.clone())
        }
        SqlValue::Boolean(b) => Value::Bool(*b),
        SqlValue::Null => Value::Null,
        other => Value::Str(other.to_string()),
    }
}
