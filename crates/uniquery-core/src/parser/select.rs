//! SELECT construction (spec §4.1.1): assembles a [`SelectLqr`] from the six
//! independently-parsed sub-trees sqlparser exposes on [`ast::Select`] and
//! [`ast::Query`].

use sqlparser::ast::{
    self, Distinct, Expr, FunctionArguments, GroupByExpr, Join as AstJoin, JoinConstraint,
    JoinOperator, LimitClause, OrderByKind, Query, Select, SelectItem, TableFactor, Value as SqlValue,
};

use super::condition::{aggregate_call, build_condition, build_having, column_name, map_comparison};
use crate::error::ParseError;
use crate::lqr::{
    ColumnRef, Join, JoinOn, JoinType, OrderDirection, OrderItem, ProjectionItem, SelectLqr,
    TableRef,
};

pub(crate) fn build_select(query: &Query, select: &Select) -> Result<SelectLqr, ParseError> {
    let from = select
        .from
        .first()
        .ok_or_else(|| ParseError::unsupported_statement("SELECT requires a FROM clause"))?;
    let table = table_ref(&from.relation)?;

    let distinct = match &select.distinct {
        None => false,
        Some(Distinct::Distinct) => true,
        Some(Distinct::On(_)) => {
            return Err(ParseError::unsupported_statement("DISTINCT ON is not supported"))
        }
    };

    let columns = select
        .projection
        .iter()
        .map(projection_item)
        .collect::<Result<Vec<_>, _>>()?;

    let filter = select.selection.as_ref().map(build_condition).transpose()?;

    let aggregate = match &select.group_by {
        GroupByExpr::Expressions(exprs, _) => {
            exprs.iter().map(column_name).collect::<Result<Vec<_>, _>>()?
        }
        GroupByExpr::All(_) => {
            return Err(ParseError::unsupported_statement("GROUP BY ALL is not supported"))
        }
    };

    let having = select.having.as_ref().map(build_having).transpose()?;

    let order_by = order_items(query)?;
    let limit = limit_value(query)?;
    let joins = from.joins.iter().map(join).collect::<Result<Vec<_>, _>>()?;

    Ok(SelectLqr {
        table,
        distinct,
        columns,
        filter,
        aggregate,
        having,
        order_by,
        limit,
        joins,
    })
}

fn table_ref(factor: &TableFactor) -> Result<TableRef, ParseError> {
    match factor {
        TableFactor::Table { name, alias, .. } => {
            Ok(TableRef::new(name.to_string(), alias.as_ref().map(|a| a.name.value.clone())))
        }
        other => Err(ParseError::unsupported_statement(format!(
            "unsupported FROM source: {other}"
        ))),
    }
}

fn projection_item(item: &SelectItem) -> Result<ProjectionItem, ParseError> {
    match item {
        SelectItem::Wildcard(_) | SelectItem::QualifiedWildcard(..) => Ok(ProjectionItem {
            name: "*".to_string(),
            alias: None,
            aggregation_function: None,
        }),
        SelectItem::UnnamedExpr(expr) => expr_to_projection(expr, None),
        SelectItem::ExprWithAlias { expr, alias } => expr_to_projection(expr, Some(alias.value.clone())),
    }
}

fn expr_to_projection(expr: &Expr, alias: Option<String>) -> Result<ProjectionItem, ParseError> {
    if let Some((func, column)) = aggregate_call(expr) {
        return Ok(ProjectionItem { name: column, alias, aggregation_function: Some(func) });
    }
    let name = column_name(expr)?;
    Ok(ProjectionItem { name, alias, aggregation_function: None })
}

fn order_items(query: &Query) -> Result<Vec<OrderItem>, ParseError> {
    let Some(order_by) = &query.order_by else { return Ok(Vec::new()) };
    let OrderByKind::Expressions(items) = &order_by.kind else {
        return Err(ParseError::unsupported_statement("ORDER BY ALL is not supported"));
    };
    items
        .iter()
        .map(|item| {
            let column = column_name(&item.expr)?;
            let order = match item.options.asc {
                Some(false) => OrderDirection::Desc,
                _ => OrderDirection::Asc,
            };
            Ok(OrderItem { column, order })
        })
        .collect()
}

fn limit_value(query: &Query) -> Result<Option<u64>, ParseError> {
    let Some(clause) = &query.limit_clause else { return Ok(None) };
    let limit_expr = match clause {
        LimitClause::LimitOffset { limit, .. } => limit.as_ref(),
        LimitClause::OffsetCommaLimit { limit, .. } => Some(limit),
    };
    let Some(expr) = limit_expr else { return Ok(None) };
    match expr {
        Expr::Value(v) => match &v.value {
            SqlValue::Number(n, _) => n
                .parse::<u64>()
                .map(Some)
                .map_err(|_| ParseError::new(format!("invalid LIMIT value: {n}"))),
            other => Err(ParseError::new(format!("invalid LIMIT value: {other}"))),
        },
        other => Err(ParseError::new(format!("invalid LIMIT expression: {other}"))),
    }
}

fn join(ast_join: &AstJoin) -> Result<Join, ParseError> {
    let (join_type, constraint) = join_kind(&ast_join.join_operator)?;
    let table = table_ref(&ast_join.relation)?;
    let on = match constraint {
        JoinConstraint::On(expr) => join_on(expr)?,
        JoinConstraint::Using(_) | JoinConstraint::Natural | JoinConstraint::None => {
            return Err(ParseError::unsupported_join_on(
                "JOIN must have an explicit ON clause",
            ))
        }
    };
    Ok(Join { join_type, table, on })
}

fn join_kind(op: &JoinOperator) -> Result<(JoinType, &JoinConstraint), ParseError> {
    match op {
        JoinOperator::Join(c) | JoinOperator::Inner(c) => Ok((JoinType::Inner, c)),
        JoinOperator::Left(c) | JoinOperator::LeftOuter(c) => Ok((JoinType::Left, c)),
        JoinOperator::Right(c) | JoinOperator::RightOuter(c) => Ok((JoinType::Right, c)),
        JoinOperator::FullOuter(c) => Ok((JoinType::Full, c)),
        other => Err(ParseError::unsupported_statement(format!(
            "unsupported join type: {other:?}"
        ))),
    }
}

/// Distinguishes a plain equality ON clause from the Cypher-only
/// `RELATION(type, var)` pseudo-call (spec §4.1, §4.3).
fn join_on(expr: &Expr) -> Result<JoinOn, ParseError> {
    if let Expr::Function(function) = expr {
        if function.name.to_string().eq_ignore_ascii_case("relation") {
            let FunctionArguments::List(list) = &function.args else {
                return Err(ParseError::unsupported_join_on("RELATION() requires two arguments"));
            };
            let mut args = list.args.iter();
            let relationship = args
                .next()
                .and_then(arg_expr)
                .map(relation_arg_text)
                .ok_or_else(|| ParseError::unsupported_join_on("RELATION() requires a relationship type"))?;
            let var = args
                .next()
                .and_then(arg_expr)
                .map(relation_arg_text)
                .ok_or_else(|| ParseError::unsupported_join_on("RELATION() requires a variable name"))?;
            return Ok(JoinOn::Relation { relationship, var });
        }
    }

    match expr {
        Expr::BinaryOp { left, op, right } => {
            let operator = map_comparison(op)
                .map_err(|_| ParseError::unsupported_join_on("JOIN ON must be an equality"))?;
            Ok(JoinOn::Equality {
                left: ColumnRef::parse(&column_name(left)?),
                operator,
                right: ColumnRef::parse(&column_name(right)?),
            })
        }
        _ => Err(ParseError::unsupported_join_on(
            "JOIN ON must be a column equality or a RELATION(...) call",
        )),
    }
}

fn arg_expr(arg: &ast::FunctionArg) -> Option<&Expr> {
    match arg {
        ast::FunctionArg::Unnamed(ast::FunctionArgExpr::Expr(e)) => Some(e),
        ast::FunctionArg::Named { arg: ast::FunctionArgExpr::Expr(e), .. } => Some(e),
        _ => None,
    }
}

fn relation_arg_text(expr: &Expr) -> String {
    match expr {
        Expr::Value(v) => match &v.value {
            SqlValue::SingleQuotedString(s) | SqlValue::DoubleQuotedString(s) => s.clone(),
            other => other.to_string(),
        },
        Expr::Identifier(ident) => ident.value.clone(),
        other => other.to_string(),
    }
}
