//! Cypher generator (spec §4.3): `&Lqr -> Result<String, TranslationError>`.
//!
//! Only `SELECT` is in scope. Joins must use the `RELATION(type, var)`
//! pseudo-function ON clause (the graph-path extension) — an equality ON
//! clause has no native Cypher join analog and is rejected. GROUP BY,
//! HAVING, and projection aggregation functions are likewise rejected:
//! the Cypher target has no aggregation pipeline to lower them into.

use regex::Regex;

use uniquery_core::{Condition, JoinOn, Lqr, Operator, OrderItem, ProjectionItem, SelectLqr, Value};

use crate::error::TranslationError;

pub fn translate(lqr: &Lqr) -> Result<String, TranslationError> {
    match lqr {
        Lqr::Select(select) => translate_select(select),
        other => Err(TranslationError::unsupported(
            "Cypher",
            other.operation(),
            "only SELECT is supported by the Cypher generator",
        )),
    }
}

fn translate_select(select: &SelectLqr) -> Result<String, TranslationError> {
    if !select.aggregate.is_empty() {
        return Err(TranslationError::unsupported(
            "Cypher",
            "GROUP BY",
            "GROUP BY has no Cypher aggregation pipeline to lower into",
        ));
    }
    if select.having.is_some() {
        return Err(TranslationError::unsupported(
            "Cypher",
            "HAVING",
            "HAVING has no Cypher aggregation pipeline to lower into",
        ));
    }
    if select.columns.iter().any(|c| c.aggregation_function.is_some()) {
        return Err(TranslationError::unsupported(
            "Cypher",
            "SELECT",
            "aggregation functions in the projection list are not supported on the Cypher target",
        ));
    }

    let mut clauses = vec![format!("MATCH {}", match_path(select)?)];

    if let Some(filter) = &select.filter {
        clauses.push(format!("WHERE {}", print_condition(filter)));
    }

    clauses.push(return_clause(select));

    if !select.order_by.is_empty() {
        clauses.push(format!("ORDER BY {}", order_by_clause(&select.order_by)));
    }

    if let Some(limit) = select.limit {
        clauses.push(format!("LIMIT {limit}"));
    }

    let mut text = clauses.join("\n");
    text.push(';');
    Ok(text)
}

/// Builds `(a0:L0)-[r1:REL1]->(a1:L1)-[r2:REL2]->(…)` from the base table
/// and each join's `RELATION(...)` record, in path order.
fn match_path(select: &SelectLqr) -> Result<String, TranslationError> {
    let mut path = format!("({}:{})", select.table.alias, select.table.name);
    for join in &select.joins {
        match &join.on {
            JoinOn::Relation { relationship, var } => {
                path.push_str(&format!(
                    "-[{var}:{}]->({}:{})",
                    rewrite_label(relationship),
                    join.table.alias,
                    join.table.name
                ));
            }
            JoinOn::Equality { .. } => {
                return Err(TranslationError::unsupported(
                    "Cypher",
                    "JOIN",
                    "an equality ON clause has no Cypher join analog; use RELATION(type, var)",
                ));
            }
        }
    }
    Ok(path)
}

/// Rewrites `OR`/`or` in a relationship label pattern to Cypher's `|`
/// label-alternation syntax; a variable-length suffix (`*m..n`) passes
/// through untouched (spec §4.3).
fn rewrite_label(relationship: &str) -> String {
    let or_token = Regex::new(r"(?i)\s+or\s+").expect("static regex");
    or_token.replace_all(relationship, "|").into_owned()
}

fn return_clause(select: &SelectLqr) -> String {
    let distinct = if select.distinct { "DISTINCT " } else { "" };
    let items = if select.columns.iter().all(ProjectionItem::is_wildcard) || select.columns.is_empty() {
        default_return_items(select)
    } else {
        select
            .columns
            .iter()
            .map(|item| match &item.alias {
                Some(alias) => format!("{} AS {alias}", item.name),
                None => item.name.clone(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!("RETURN {distinct}{items}")
}

/// Base alias, then each join's relationship alias and target alias, in
/// path order — used when the projection list is empty (spec §4.3 step 3).
fn default_return_items(select: &SelectLqr) -> String {
    let mut items = vec![select.table.alias.clone()];
    for join in &select.joins {
        if let JoinOn::Relation { var, .. } = &join.on {
            items.push(var.clone());
        }
        items.push(join.table.alias.clone());
    }
    items.join(", ")
}

fn order_by_clause(order_by: &[OrderItem]) -> String {
    order_by
        .iter()
        .map(|item| format!("{} {}", item.column, item.order.as_sql()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Walks a [`Condition`] tree into Cypher's infix condition surface —
/// the same surface SQL uses, except `!=` renders as `<>` (spec §4.3 step
/// 2). Parentheses are inserted only where needed to preserve the parsed
/// AND/OR nesting (an `OR` nested inside an `AND`, or vice versa).
fn print_condition(condition: &Condition) -> String {
    match condition {
        Condition::And(operands) => operands
            .iter()
            .map(|c| print_operand(c, true))
            .collect::<Vec<_>>()
            .join(" AND "),
        Condition::Or(operands) => operands
            .iter()
            .map(|c| print_operand(c, false))
            .collect::<Vec<_>>()
            .join(" OR "),
        Condition::Not(inner) => match inner.as_ref() {
            Condition::IsNull { column } => format!("{column} IS NOT NULL"),
            other => format!("NOT ({})", print_condition(other)),
        },
        Condition::IsNull { column } => format!("{column} IS NULL"),
        Condition::Compare { column, op, value } => {
            format!("{column} {} {}", cypher_operator(*op), print_value(value))
        }
        Condition::In { column, values } => {
            let list = values.iter().map(print_value).collect::<Vec<_>>().join(", ");
            format!("{column} IN ({list})")
        }
        Condition::Between { column, low, high } => {
            format!("{column} BETWEEN {} AND {}", print_value(low), print_value(high))
        }
        Condition::Like { column, pattern } => format!("{column} LIKE '{pattern}'"),
    }
}

fn print_operand(condition: &Condition, parent_is_and: bool) -> String {
    match condition {
        Condition::Or(_) if parent_is_and => format!("({})", print_condition(condition)),
        Condition::And(_) if !parent_is_and => format!("({})", print_condition(condition)),
        _ => print_condition(condition),
    }
}

fn cypher_operator(op: Operator) -> &'static str {
    match op {
        Operator::Eq => "=",
        Operator::Ne => "<>",
        Operator::Gt => ">",
        Operator::Ge => ">=",
        Operator::Lt => "<",
        Operator::Le => "<=",
    }
}

fn print_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Str(s) => format!("'{s}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uniquery_core::parse;

    #[test]
    fn complex_relation_join_matches_the_reference_scenario() {
        let lqr = parse(
            "SELECT DISTINCT p.name as person_name, f.name as friend_name, c.name AS company_name \
             FROM Person p \
             RIGHT JOIN Person f ON RELATION('FRIEND*3..3', _f) \
             RIGHT JOIN Company c ON RELATION('WORKS_AT', w) \
             WHERE c.name = 'ACME Corp' AND p.name != f.name \
             ORDER BY p.name \
             LIMIT 5",
        )
        .unwrap();
        let cypher = translate(&lqr).unwrap();
        assert_eq!(
            cypher,
            "MATCH (p:Person)-[_f:FRIEND*3..3]->(f:Person)-[w:WORKS_AT]->(c:Company)\n\
             WHERE c.name = 'ACME Corp' AND p.name <> f.name\n\
             RETURN DISTINCT p.name AS person_name, f.name AS friend_name, c.name AS company_name\n\
             ORDER BY p.name ASC\n\
             LIMIT 5;"
        );
    }

    #[test]
    fn label_alternation_rewrites_or_to_pipe() {
        assert_eq!(rewrite_label("FRIEND OR ENEMY"), "FRIEND|ENEMY");
        assert_eq!(rewrite_label("FRIEND*3..3"), "FRIEND*3..3");
    }

    #[test]
    fn no_joins_emits_single_node_pattern() {
        let lqr = parse("SELECT name FROM Person p").unwrap();
        let cypher = translate(&lqr).unwrap();
        assert!(cypher.starts_with("MATCH (p:Person)\n"));
    }

    #[test]
    fn empty_projection_returns_all_known_aliases_in_path_order() {
        let lqr = parse(
            "SELECT * FROM Person p RIGHT JOIN Company c ON RELATION('WORKS_AT', w)",
        )
        .unwrap();
        let cypher = translate(&lqr).unwrap();
        assert!(cypher.contains("RETURN p, w, c"));
    }

    #[test]
    fn group_by_is_rejected() {
        let lqr = parse("SELECT department, COUNT(*) FROM employees GROUP BY department").unwrap();
        let err = translate(&lqr).unwrap_err();
        assert!(matches!(err, TranslationError::Unsupported { statement: "GROUP BY", .. }));
    }

    #[test]
    fn equality_join_is_rejected() {
        let lqr = parse(
            "SELECT * FROM employees e JOIN departments d ON e.department_id = d.id",
        )
        .unwrap();
        let err = translate(&lqr).unwrap_err();
        assert!(matches!(err, TranslationError::Unsupported { statement: "JOIN", .. }));
    }

    #[test]
    fn nested_and_or_gets_parenthesized_where_needed() {
        let lqr = parse(
            "SELECT * FROM Person p WHERE (p.name = 'A' OR p.name = 'B') AND p.age > 30",
        )
        .unwrap();
        let cypher = translate(&lqr).unwrap();
        assert!(cypher.contains("WHERE (p.name = 'A' OR p.name = 'B') AND p.age > 30"));
    }
}
