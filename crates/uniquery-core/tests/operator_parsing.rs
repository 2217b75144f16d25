//! Parameterized coverage of every comparison operator the WHERE-clause
//! parser accepts (spec §4.2.3's operator table).

use rstest::rstest;
use uniquery_core::{Condition, Lqr, Operator};

fn where_condition(sql: &str) -> Condition {
    match uniquery_core::parse(sql).unwrap() {
        Lqr::Select(select) => select.filter.expect("expected a WHERE clause"),
        other => panic!("expected Select, got {other:?}"),
    }
}

#[rstest]
#[case("=", Operator::Eq)]
#[case("!=", Operator::Ne)]
#[case("<>", Operator::Ne)]
#[case(">", Operator::Gt)]
#[case(">=", Operator::Ge)]
#[case("<", Operator::Lt)]
#[case("<=", Operator::Le)]
fn each_sql_operator_maps_to_its_lqr_variant(#[case] sql_op: &str, #[case] expected: Operator) {
    let condition = where_condition(&format!("SELECT * FROM t WHERE age {sql_op} 30"));
    match condition {
        Condition::Compare { column, op, .. } => {
            assert_eq!(column, "age");
            assert_eq!(op, expected);
        }
        other => panic!("expected Compare, got {other:?}"),
    }
}
