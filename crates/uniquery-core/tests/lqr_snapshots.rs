//! Snapshot coverage of the LQR shape produced for a representative query
//! (spec §3/§4.1.1), pinning the projection list and filter tree structure.

use insta::assert_debug_snapshot;
use uniquery_core::{parse, Lqr};

fn select(sql: &str) -> uniquery_core::SelectLqr {
    match parse(sql).unwrap() {
        Lqr::Select(s) => s,
        other => panic!("expected Select, got {other:?}"),
    }
}

#[test]
fn projection_list_for_a_grouped_aggregate_query() {
    let lqr = select(
        "SELECT department, COUNT(*) AS headcount, AVG(salary) \
         FROM employees GROUP BY department",
    );
    assert_debug_snapshot!(lqr.columns, @r#"
    [
        ProjectionItem {
            name: "department",
            alias: None,
            aggregation_function: None,
        },
        ProjectionItem {
            name: "*",
            alias: Some(
                "headcount",
            ),
            aggregation_function: Some(
                Count,
            ),
        },
        ProjectionItem {
            name: "salary",
            alias: None,
            aggregation_function: Some(
                Avg,
            ),
        },
    ]
    "#);
}

#[test]
fn or_filter_tree_shape() {
    let lqr = select("SELECT * FROM employees WHERE department = 'Sales' OR department = 'Marketing'");
    assert_debug_snapshot!(lqr.filter, @r#"
    Some(
        Or(
            [
                Compare {
                    column: "department",
                    op: Eq,
                    value: Str(
                        "Sales",
                    ),
                },
                Compare {
                    column: "department",
                    op: Eq,
                    value: Str(
                        "Marketing",
                    ),
                },
            ],
        ),
    )
    "#);
}
