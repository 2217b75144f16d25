//! Regression coverage for the AGGREGATE pipeline's fixed stage order
//! (spec §4.2.2): `$lookup`/`$unwind` per join, joins-`$project`, `$group`,
//! HAVING-`$match`, WHERE-`$match`, `$sort`, `$limit`.

use insta::assert_debug_snapshot;
use uniquery_core::{parse, Lqr};
use uniquery_export::{to_mql, MongoOp};

fn stage_names(sql: &str) -> Vec<&'static str> {
    let lqr = parse(sql).unwrap();
    let MongoOp::Aggregate { pipeline, .. } = to_mql(&lqr).unwrap() else {
        panic!("expected an aggregate pipeline for: {sql}")
    };
    pipeline
        .iter()
        .map(|stage| {
            let key = stage.as_object().unwrap().keys().next().unwrap().as_str();
            match key {
                "$lookup" => "lookup",
                "$unwind" => "unwind",
                "$project" => "project",
                "$group" => "group",
                "$match" => "match",
                "$sort" => "sort",
                "$limit" => "limit",
                other => panic!("unexpected stage key: {other}"),
            }
        })
        .collect()
}

#[test]
fn join_group_having_and_where_together_keep_the_spec_order() {
    let stages = stage_names(
        "SELECT d.name, SUM(e.salary) AS total FROM employees e \
         JOIN departments d ON e.department_id = d.id \
         WHERE e.active = true \
         GROUP BY d.name \
         HAVING SUM(e.salary) > 1000 \
         ORDER BY d.name \
         LIMIT 10",
    );
    assert_debug_snapshot!(stages, @r#"
    [
        "lookup",
        "unwind",
        "project",
        "group",
        "match",
        "match",
        "sort",
        "limit",
    ]
    "#);
}

#[test]
fn join_with_group_by_still_emits_the_joins_project_stage() {
    let stages = stage_names(
        "SELECT d.name, SUM(e.salary) FROM employees e \
         JOIN departments d ON e.department_id = d.id \
         GROUP BY d.name",
    );
    assert_debug_snapshot!(stages, @r#"
    [
        "lookup",
        "unwind",
        "project",
        "group",
    ]
    "#);
}
