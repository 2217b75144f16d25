//! Parameterized coverage of every aggregate function's `$group` accumulator
//! shape (spec §4.2.2 step 3).

use rstest::rstest;
use serde_json::json;
use uniquery_core::{parse, Lqr};
use uniquery_export::{to_mql, MongoOp};

fn group_stage(sql: &str) -> serde_json::Value {
    let lqr = parse(sql).unwrap();
    let MongoOp::Aggregate { pipeline, .. } = to_mql(&lqr).unwrap() else {
        panic!("expected an aggregate pipeline for: {sql}")
    };
    pipeline.into_iter().find(|stage| stage.get("$group").is_some()).expect("missing $group stage")
}

#[rstest]
#[case("COUNT(id)", "count_id", json!({ "$sum": { "$cond": [{ "$ne": ["$id", null] }, 1, 0] } }))]
#[case("SUM(salary)", "sum_salary", json!({ "$sum": "$salary" }))]
#[case("AVG(salary)", "avg_salary", json!({ "$avg": "$salary" }))]
#[case("MIN(salary)", "min_salary", json!({ "$min": "$salary" }))]
#[case("MAX(salary)", "max_salary", json!({ "$max": "$salary" }))]
fn each_aggregate_function_gets_its_mongo_accumulator(
    #[case] call: &str,
    #[case] alias: &str,
    #[case] expected: serde_json::Value,
) {
    let stage = group_stage(&format!("SELECT department, {call} FROM employees GROUP BY department"));
    assert_eq!(stage["$group"][alias], expected);
}

#[test]
fn count_star_sums_to_a_flat_one() {
    let stage = group_stage("SELECT department, COUNT(*) FROM employees GROUP BY department");
    assert_eq!(stage["$group"]["count_*"], json!({ "$sum": 1 }));
}
