//! Property tests over the `Condition` tree's structural invariants.

use proptest::prelude::*;
use uniquery_core::{Condition, Operator, Value};

fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        "[a-z]{1,8}".prop_map(Value::Str),
    ]
}

fn arb_operator() -> impl Strategy<Value = Operator> {
    prop_oneof![
        Just(Operator::Eq),
        Just(Operator::Ne),
        Just(Operator::Gt),
        Just(Operator::Ge),
        Just(Operator::Lt),
        Just(Operator::Le),
    ]
}

fn arb_condition() -> impl Strategy<Value = Condition> {
    let leaf = prop_oneof![
        ("[a-z]{1,6}", arb_operator(), arb_value())
            .prop_map(|(column, op, value)| Condition::Compare { column, op, value }),
        "[a-z]{1,6}".prop_map(|column| Condition::IsNull { column }),
        ("[a-z]{1,6}", proptest::collection::vec(arb_value(), 1..4))
            .prop_map(|(column, values)| Condition::In { column, values }),
    ];

    leaf.prop_recursive(4, 16, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 1..4).prop_map(Condition::And),
            proptest::collection::vec(inner.clone(), 1..4).prop_map(Condition::Or),
            inner.prop_map(|c| Condition::Not(Box::new(c))),
        ]
    })
}

proptest! {
    /// Nesting is preserved exactly as parsed (spec §3) — a JSON round trip
    /// through serde must not reorder, flatten, or otherwise reshape the
    /// tree.
    #[test]
    fn condition_survives_a_json_round_trip(condition in arb_condition()) {
        let json = serde_json::to_string(&condition).unwrap();
        let decoded: Condition = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(condition, decoded);
    }

    #[test]
    fn leaf_column_is_populated_for_every_compare_leaf(
        column in "[a-z]{1,6}", op in arb_operator(), value in arb_value(),
    ) {
        let condition = Condition::Compare { column: column.clone(), op, value };
        prop_assert_eq!(condition.leaf_column(), Some(column.as_str()));
    }

    #[test]
    fn compound_conditions_have_no_leaf_column(condition in arb_condition()) {
        if matches!(condition, Condition::And(_) | Condition::Or(_) | Condition::Not(_)) {
            prop_assert_eq!(condition.leaf_column(), None);
        }
    }
}
