//! MQL generator (spec §4.2): `&Lqr -> Result<MongoOp, TranslationError>`.
//!
//! A plain `SELECT` with no join/aggregate/having becomes a `find()`
//! descriptor; anything that needs relational joining, grouping, or a
//! post-group filter becomes an `aggregate()` pipeline. Every other LQR
//! variant maps to its nearest MongoDB collection-level equivalent per the
//! DDL/DML mapping table.

use serde_json::{json, Map, Value as Json};

use uniquery_core::{
    AggregateFunction, Condition, HavingClause, Join, JoinOn, JoinType, Lqr, Operator, OrderItem,
    ProjectionItem, SelectLqr, Value,
};

use crate::error::TranslationError;
use crate::mongo_op::MongoOp;

pub fn translate(lqr: &Lqr) -> Result<MongoOp, TranslationError> {
    match lqr {
        Lqr::CreateDatabase { database_name } => {
            Ok(MongoOp::CreateDatabaseNoop { name: database_name.clone() })
        }
        Lqr::UseDatabase { database_name } => Ok(MongoOp::UseDatabase { name: database_name.clone() }),
        Lqr::DropDatabase { database_name } => Ok(MongoOp::DropDatabase { name: database_name.clone() }),
        Lqr::ShowDatabases => Ok(MongoOp::ListDatabases),
        Lqr::CreateTable { table_name, .. } => Ok(MongoOp::CreateCollection { name: table_name.clone() }),
        Lqr::DropTable { table_name } => Ok(MongoOp::DropCollection { name: table_name.clone() }),
        Lqr::RenameTable { old_name, new_name } => {
            Ok(MongoOp::RenameCollection { old_name: old_name.clone(), new_name: new_name.clone() })
        }
        Lqr::ShowTables => Ok(MongoOp::ListCollections),
        Lqr::ShowTable { table_name } => Ok(MongoOp::DescribeCollection { name: table_name.clone() }),
        Lqr::AlterTable { .. } => Err(TranslationError::unsupported(
            "MQL",
            "ALTER_TABLE",
            "MongoDB collections are schemaless",
        )),
        Lqr::CreateIndex { index_name, table, columns } => Ok(MongoOp::CreateIndex {
            collection: table.clone(),
            index_name: index_name.clone(),
            keys: index_keys(columns),
        }),
        Lqr::DropIndex { index_name, table } => {
            Ok(MongoOp::DropIndex { collection: table.clone(), index_name: index_name.clone() })
        }
        Lqr::InsertData { table_name, columns, values } => Ok(MongoOp::InsertMany {
            collection: table_name.clone(),
            documents: values.iter().map(|row| document(columns, row)).collect(),
        }),
        Lqr::UpdateData { table_name, columns, values, filter } => Ok(MongoOp::UpdateMany {
            collection: table_name.clone(),
            filter: filter_json(table_name, filter)?,
            update: json!({ "$set": document(columns, values) }),
        }),
        Lqr::DeleteData { table_name, filter } => Ok(MongoOp::DeleteMany {
            collection: table_name.clone(),
            filter: filter_json(table_name, filter)?,
        }),
        Lqr::Select(select) => translate_select(select),
    }
}

fn filter_json(base_alias: &str, filter: &Option<Condition>) -> Result<Json, TranslationError> {
    match filter {
        Some(cond) => condition_to_match(base_alias, cond),
        None => Ok(json!({})),
    }
}

fn document(columns: &[String], values: &[Value]) -> Json {
    let mut map = Map::new();
    for (column, value) in columns.iter().zip(values) {
        map.insert(column.clone(), value_json(value));
    }
    Json::Object(map)
}

fn index_keys(columns: &[String]) -> Json {
    let mut map = Map::new();
    for column in columns {
        map.insert(column.clone(), json!(1));
    }
    Json::Object(map)
}

fn translate_select(select: &SelectLqr) -> Result<MongoOp, TranslationError> {
    let needs_pipeline = !select.joins.is_empty()
        || !select.aggregate.is_empty()
        || select.having.is_some()
        || select.columns.iter().any(|c| c.aggregation_function.is_some());

    if needs_pipeline {
        translate_aggregate(select)
    } else {
        translate_find(select)
    }
}

fn translate_find(select: &SelectLqr) -> Result<MongoOp, TranslationError> {
    Ok(MongoOp::Find {
        collection: select.table.name.clone(),
        filter: filter_json(&select.table.alias, &select.filter)?,
        projection: projection(&select.columns),
        sort: sort(&select.order_by),
        limit: select.limit,
    })
}

fn translate_aggregate(select: &SelectLqr) -> Result<MongoOp, TranslationError> {
    let mut pipeline = Vec::new();
    let is_grouped = !select.aggregate.is_empty()
        || select.columns.iter().any(|c| c.aggregation_function.is_some());

    for join in &select.joins {
        let (local_field, foreign_field) = join_fields(&select.table.alias, join)?;
        pipeline.push(json!({
            "$lookup": {
                "from": join.table.name,
                "localField": local_field,
                "foreignField": foreign_field,
                "as": join.table.alias,
            }
        }));
        let unwind = if matches!(join.join_type, JoinType::Left | JoinType::Full) {
            json!({ "$unwind": { "path": format!("${}", join.table.alias), "preserveNullAndEmptyArrays": true } })
        } else {
            json!({ "$unwind": format!("${}", join.table.alias) })
        };
        pipeline.push(unwind);
    }

    if !select.joins.is_empty() {
        if let Some(proj) = aggregate_projection(&select.table.alias, &select.columns) {
            pipeline.push(json!({ "$project": proj }));
        }
    }

    if is_grouped {
        pipeline.push(group_stage(select));
    }

    if let Some(having) = &select.having {
        pipeline.push(having_stage(having, matching_projection(select, having)));
    }

    if let Some(filter) = &select.filter {
        pipeline.push(json!({ "$match": condition_to_match(&select.table.alias, filter)? }));
    }

    if let Some(sort) = sort(&select.order_by) {
        pipeline.push(json!({ "$sort": sort }));
    }

    if let Some(limit) = select.limit {
        pipeline.push(json!({ "$limit": limit }));
    }

    Ok(MongoOp::Aggregate { collection: select.table.name.clone(), pipeline })
}

/// Infers `$lookup`'s `localField`/`foreignField` from an equality ON
/// clause by matching each side's table-alias qualifier against the base
/// table's alias (spec §4.2.2 step "join alias inference").
fn join_fields(base_alias: &str, join: &Join) -> Result<(String, String), TranslationError> {
    match &join.on {
        JoinOn::Equality { left, right, .. } => {
            let (local, foreign) = if left.table_alias.as_deref() == Some(base_alias) {
                (left, right)
            } else {
                (right, left)
            };
            Ok((local.column.clone(), foreign.column.clone()))
        }
        JoinOn::Relation { .. } => Err(TranslationError::unsupported(
            "MQL",
            "JOIN",
            "RELATION(...) joins target the Cypher generator, not MongoDB",
        )),
    }
}

fn group_stage(select: &SelectLqr) -> Json {
    let id = if select.aggregate.is_empty() {
        Json::Null
    } else {
        let mut map = Map::new();
        for column in &select.aggregate {
            map.insert(column.clone(), Json::String(format!("${column}")));
        }
        Json::Object(map)
    };

    let mut group = Map::new();
    group.insert("_id".to_string(), id);
    for item in &select.columns {
        match item.aggregation_function {
            Some(func) => {
                group.insert(item.synthesized_alias(), accumulator(func, &item.name));
            }
            None if select.aggregate.contains(&item.name) => {
                group.insert(item.output_key().to_string(), json!({ "$first": format!("${}", item.name) }));
            }
            None => {}
        }
    }
    json!({ "$group": group })
}

fn accumulator(func: AggregateFunction, column: &str) -> Json {
    match func {
        AggregateFunction::Count if column == "*" => json!({ "$sum": 1 }),
        AggregateFunction::Count => {
            json!({ "$sum": { "$cond": [{ "$ne": [format!("${column}"), Json::Null] }, 1, 0] } })
        }
        AggregateFunction::Sum => json!({ "$sum": format!("${column}") }),
        AggregateFunction::Avg => json!({ "$avg": format!("${column}") }),
        AggregateFunction::Min => json!({ "$min": format!("${column}") }),
        AggregateFunction::Max => json!({ "$max": format!("${column}") }),
    }
}

/// Finds the projection item that produced a HAVING clause's aggregate, so
/// the `$match` stage can key off the same field `$group` wrote it under
/// (spec §4.2.2 step 4).
fn matching_projection<'a>(select: &'a SelectLqr, having: &HavingClause) -> Option<&'a ProjectionItem> {
    select
        .columns
        .iter()
        .find(|item| item.aggregation_function == Some(having.aggregation_function) && item.name == having.column)
}

fn having_stage(having: &HavingClause, item: Option<&ProjectionItem>) -> Json {
    let alias = item.map_or_else(
        || format!("{}_{}", having.aggregation_function.lowercase(), having.column),
        ProjectionItem::synthesized_alias,
    );
    json!({ "$match": { alias: scalar_operator(having.operator, &having.value) } })
}

/// `find()`'s projection document: a plain inclusion list keyed by each
/// item's output name (spec §8 scenario 1). `find()` can't rename fields,
/// so an aliased column is still emitted under its alias key — a known
/// compatibility quirk the fixtures pin (spec §9 "Double-key projection").
fn projection(columns: &[ProjectionItem]) -> Option<Json> {
    if columns.iter().any(ProjectionItem::is_wildcard) {
        return None;
    }
    let mut map = Map::new();
    for item in columns {
        map.insert(item.output_key().to_string(), json!(1));
    }
    if map.is_empty() { None } else { Some(Json::Object(map)) }
}

/// `$project`'s reshaping document for a joined pipeline, fired whenever
/// joins are present regardless of grouping: each item maps to a
/// `$`-prefixed source path, resolving a table-alias prefix that matches
/// the base table to an unqualified local field and leaving a join-alias
/// prefix as-is (the `$unwind`'d subdocument lives under that name; spec §9
/// "Join alias inference").
fn aggregate_projection(base_alias: &str, columns: &[ProjectionItem]) -> Option<Json> {
    if columns.iter().any(ProjectionItem::is_wildcard) {
        return None;
    }
    let mut map = Map::new();
    for item in columns {
        let path = mongo_field_path(base_alias, &item.name);
        map.insert(item.output_key().to_string(), Json::String(format!("${path}")));
    }
    if map.is_empty() { None } else { Some(Json::Object(map)) }
}

fn mongo_field_path(base_alias: &str, raw_name: &str) -> String {
    match raw_name.split_once('.') {
        Some((prefix, rest)) if prefix == base_alias => rest.to_string(),
        _ => raw_name.to_string(),
    }
}

fn sort(order_by: &[OrderItem]) -> Option<Json> {
    if order_by.is_empty() {
        return None;
    }
    let mut map = Map::new();
    for item in order_by {
        map.insert(item.column.clone(), json!(item.order.as_mongo_sort()));
    }
    Some(Json::Object(map))
}

/// Translates a [`Condition`] tree into a MongoDB query filter document
/// (spec §4.2.3's condition translation table). `base_alias` strips the
/// base-table alias prefix from leaf column names when joins are present
/// (spec §4.2.2 step 5), reusing the same rule `aggregate_projection` uses.
fn condition_to_match(base_alias: &str, condition: &Condition) -> Result<Json, TranslationError> {
    match condition {
        Condition::And(operands) => {
            let parts =
                operands.iter().map(|c| condition_to_match(base_alias, c)).collect::<Result<Vec<_>, _>>()?;
            Ok(json!({ "$and": parts }))
        }
        Condition::Or(operands) => {
            let parts =
                operands.iter().map(|c| condition_to_match(base_alias, c)).collect::<Result<Vec<_>, _>>()?;
            Ok(json!({ "$or": parts }))
        }
        Condition::Not(inner) => match inner.as_ref() {
            compound @ (Condition::And(_) | Condition::Or(_) | Condition::Not(_)) => {
                Ok(json!({ "$nor": [condition_to_match(base_alias, compound)?] }))
            }
            leaf => {
                let (column, operator) = leaf_operator_object(base_alias, leaf)?;
                Ok(json!({ column: { "$not": operator } }))
            }
        },
        leaf => {
            let (column, value) = leaf_value(base_alias, leaf)?;
            Ok(json!({ column: value }))
        }
    }
}

/// A leaf condition's `(column, value)` pair for direct filter emission.
/// `Eq` and `IS NULL` flatten to a bare value — `{"dept": "Sales"}`, not
/// `{"dept": {"$eq": "Sales"}}` — matching the fixtures in spec §8.
fn leaf_value(base_alias: &str, condition: &Condition) -> Result<(String, Json), TranslationError> {
    match condition {
        Condition::IsNull { column } => Ok((mongo_field_path(base_alias, column), Json::Null)),
        Condition::Compare { column, op: Operator::Eq, value } => {
            Ok((mongo_field_path(base_alias, column), value_json(value)))
        }
        _ => leaf_operator_object(base_alias, condition),
    }
}

/// The same leaf, but always as an operator-expression object — the form
/// required everywhere a bare value isn't syntactically valid, such as
/// inside `$not`.
fn leaf_operator_object(base_alias: &str, condition: &Condition) -> Result<(String, Json), TranslationError> {
    match condition {
        Condition::IsNull { column } => Ok((mongo_field_path(base_alias, column), json!({ "$eq": Json::Null }))),
        Condition::Compare { column, op, value } => {
            Ok((mongo_field_path(base_alias, column), scalar_operator(*op, value)))
        }
        Condition::In { column, values } => Ok((
            mongo_field_path(base_alias, column),
            json!({ "$in": values.iter().map(value_json).collect::<Vec<_>>() }),
        )),
        Condition::Between { column, low, high } => Ok((
            mongo_field_path(base_alias, column),
            json!({ "$gte": value_json(low), "$lte": value_json(high) }),
        )),
        Condition::Like { column, pattern } => {
            Ok((mongo_field_path(base_alias, column), json!({ "$regex": like_to_regex(pattern) })))
        }
        Condition::And(_) | Condition::Or(_) | Condition::Not(_) => Err(TranslationError::unsupported(
            "MQL",
            "WHERE",
            "expected a leaf condition",
        )),
    }
}

fn scalar_operator(op: Operator, value: &Value) -> Json {
    let v = value_json(value);
    match op {
        Operator::Eq => json!({ "$eq": v }),
        Operator::Ne => json!({ "$ne": v }),
        Operator::Gt => json!({ "$gt": v }),
        Operator::Ge => json!({ "$gte": v }),
        Operator::Lt => json!({ "$lt": v }),
        Operator::Le => json!({ "$lte": v }),
    }
}

fn value_json(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Int(i) => json!(i),
        Value::Float(f) => serde_json::Number::from_f64(*f).map(Json::Number).unwrap_or(Json::Null),
        Value::Str(s) => Json::String(s.clone()),
    }
}

/// Escapes regex metacharacters, then rewrites SQL `LIKE` wildcards: `%` to
/// `.*`, `_` to `.` (spec §4.2.3).
fn like_to_regex(pattern: &str) -> String {
    let mut out = String::from("^");
    for ch in pattern.chars() {
        match ch {
            '%' => out.push_str(".*"),
            '_' => out.push('.'),
            '.' | '^' | '$' | '|' | '(' | ')' | '[' | ']' | '{' | '}' | '+' | '?' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            other => out.push(other),
        }
    }
    out.push('$');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use uniquery_core::parse;

    fn select(sql: &str) -> SelectLqr {
        match parse(sql).unwrap() {
            Lqr::Select(s) => s,
            other => panic!("expected Select, got {other:?}"),
        }
    }

    #[test]
    fn basic_select_uses_find() {
        let lqr = Lqr::Select(select("SELECT id, name FROM users WHERE age > 30"));
        let op = translate(&lqr).unwrap();
        match op {
            MongoOp::Find { collection, filter, .. } => {
                assert_eq!(collection, "users");
                assert_eq!(filter, json!({ "age": { "$gt": 30 } }));
            }
            other => panic!("expected Find, got {other:?}"),
        }
    }

    #[test]
    fn like_pattern_becomes_anchored_regex() {
        let lqr = Lqr::Select(select("SELECT * FROM users WHERE name LIKE 'A%_s'"));
        let op = translate(&lqr).unwrap();
        let MongoOp::Find { filter, .. } = op else { panic!("expected Find") };
        assert_eq!(filter, json!({ "name": { "$regex": "^A.*.s$" } }));
    }

    #[test]
    fn nested_and_or_preserved_as_mongo_boolean_tree() {
        let lqr =
            Lqr::Select(select("SELECT * FROM t WHERE (a = 1 OR a = 2) AND b != 3"));
        let op = translate(&lqr).unwrap();
        let MongoOp::Find { filter, .. } = op else { panic!("expected Find") };
        assert_eq!(
            filter,
            json!({
                "$and": [
                    { "$or": [{ "a": 1 }, { "a": 2 }] },
                    { "b": { "$ne": 3 } },
                ]
            })
        );
    }

    #[test]
    fn group_by_with_having_builds_aggregate_pipeline() {
        let lqr = Lqr::Select(select(
            "SELECT department, SUM(salary) FROM employees GROUP BY department HAVING SUM(salary) > 1000",
        ));
        let op = translate(&lqr).unwrap();
        match op {
            MongoOp::Aggregate { collection, pipeline } => {
                assert_eq!(collection, "employees");
                assert_eq!(
                    pipeline,
                    vec![
                        json!({ "$group": { "_id": { "department": "$department" }, "sum_salary": { "$sum": "$salary" } } }),
                        json!({ "$match": { "sum_salary": { "$gt": 1000 } } }),
                    ]
                );
            }
            other => panic!("expected Aggregate, got {other:?}"),
        }
    }

    #[test]
    fn insert_data_zips_columns_and_values_into_a_document() {
        let lqr = parse("INSERT INTO users (id, name) VALUES (1, 'Ada')").unwrap();
        let op = translate(&lqr).unwrap();
        match op {
            MongoOp::InsertMany { collection, documents } => {
                assert_eq!(collection, "users");
                assert_eq!(documents, vec![json!({ "id": 1, "name": "Ada" })]);
            }
            other => panic!("expected InsertMany, got {other:?}"),
        }
    }

    #[test]
    fn inner_join_with_aliases_builds_lookup_unwind_project() {
        let lqr = Lqr::Select(select(
            "SELECT e.id AS employee_id, d.name AS department_name FROM employees e \
             JOIN departments d ON e.department_id = d.id",
        ));
        let op = translate(&lqr).unwrap();
        match op {
            MongoOp::Aggregate { collection, pipeline } => {
                assert_eq!(collection, "employees");
                assert_eq!(
                    pipeline,
                    vec![
                        json!({ "$lookup": { "from": "departments", "localField": "department_id", "foreignField": "id", "as": "d" } }),
                        json!({ "$unwind": "$d" }),
                        json!({ "$project": { "employee_id": "$id", "department_name": "$d.name" } }),
                    ]
                );
            }
            other => panic!("expected Aggregate, got {other:?}"),
        }
    }

    #[test]
    fn join_with_where_strips_base_table_alias_from_filter() {
        let lqr = Lqr::Select(select(
            "SELECT * FROM employees e JOIN departments d ON e.department_id = d.id \
             WHERE e.salary > 5000",
        ));
        let op = translate(&lqr).unwrap();
        match op {
            MongoOp::Aggregate { pipeline, .. } => {
                assert_eq!(pipeline.last().unwrap(), &json!({ "$match": { "salary": { "$gt": 5000 } } }));
            }
            other => panic!("expected Aggregate, got {other:?}"),
        }
    }

    #[test]
    fn having_uses_the_aggregate_items_explicit_alias() {
        let lqr = Lqr::Select(select(
            "SELECT department, SUM(salary) AS total FROM employees \
             GROUP BY department HAVING SUM(salary) > 1000",
        ));
        let op = translate(&lqr).unwrap();
        match op {
            MongoOp::Aggregate { pipeline, .. } => {
                assert_eq!(
                    pipeline,
                    vec![
                        json!({ "$group": { "_id": { "department": "$department" }, "total": { "$sum": "$salary" } } }),
                        json!({ "$match": { "total": { "$gt": 1000 } } }),
                    ]
                );
            }
            other => panic!("expected Aggregate, got {other:?}"),
        }
    }

    #[test]
    fn alter_table_is_unsupported_on_mongo() {
        let lqr = uniquery_core::parse("ALTER TABLE employees ADD COLUMN bonus INT").unwrap();
        let err = translate(&lqr).unwrap_err();
        assert!(matches!(err, TranslationError::Unsupported { statement: "ALTER_TABLE", .. }));
    }
}
