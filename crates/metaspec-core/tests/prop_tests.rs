//! Property-based tests for binding and checking
//!
//! These tests verify that the binder and the constraint engine behave
//! consistently across a wide range of generated documents.

use metaspec_core::{bind, check, evaluate, Constraint, Path, Segment, TreeValue};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

/// Strategy for generating random JSON values with controlled complexity
///
/// Keys carry a prefix so they never collide with reserved spec keys.
fn json_value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "(/)?[a-zA-Z0-9 ]{0,20}".prop_map(Value::String),
    ];

    leaf.prop_recursive(
        4,  // max depth
        24, // max size
        5,  // items per collection
        |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
                proptest::collection::hash_map("k_[a-z0-9]{0,6}", inner, 0..5)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        },
    )
}

/// Strategy for generating paths with both keys and indices
fn path_strategy() -> impl Strategy<Value = Vec<Segment>> {
    proptest::collection::vec(
        prop_oneof![
            "[a-z]{1,8}".prop_map(Segment::Key),
            (0usize..1000).prop_map(Segment::Index),
        ],
        0..8,
    )
}

fn constraint_strategy() -> impl Strategy<Value = Vec<Constraint>> {
    proptest::sample::subsequence(Constraint::ALL.to_vec(), 0..=Constraint::ALL.len())
        .prop_shuffle()
}

/// Build a spec describing every node of `value` with the same constraints
///
/// Sequences are described through a `content` wrapper holding the
/// description of their first element.
fn describe(value: &Value, constraints: &[&str]) -> Value {
    let mut node = Map::new();
    node.insert("constraints".to_string(), json!(constraints));

    match value {
        Value::Object(map) => {
            for (key, child) in map {
                node.insert(key.clone(), describe(child, constraints));
            }
        }
        Value::Array(items) => {
            if let Some(first) = items.first() {
                node.insert("content".to_string(), json!([describe(first, constraints)]));
            }
        }
        _ => {}
    }

    Value::Object(node)
}

proptest! {
    #[test]
    fn prop_signature_ignores_indices(
        segments in path_strategy(),
        replacement in 0usize..1000,
    ) {
        let original = Path::new(segments.clone());
        let moved: Path = segments
            .into_iter()
            .map(|segment| match segment {
                Segment::Index(_) => Segment::Index(replacement),
                key => key,
            })
            .collect();

        prop_assert_eq!(original.signature(), moved.signature());
        prop_assert!(!original.signature().contains(|c: char| c.is_ascii_digit() && c != '0'));
    }

    #[test]
    fn prop_binding_is_symmetric(data in json_value_strategy(), spec_source in json_value_strategy()) {
        let data = TreeValue::from(data);
        let spec = TreeValue::from(describe(&spec_source, &[]));

        let bindings = bind(&data, &spec).unwrap();
        for (data_path, spec_path) in bindings.bound() {
            prop_assert!(bindings.data_for(spec_path).contains(data_path));
            prop_assert_eq!(bindings.spec_for(data_path), Some(spec_path));
        }
        for spec_path in bindings.signatures().values() {
            for data_path in bindings.data_for(spec_path) {
                prop_assert_eq!(bindings.spec_for(data_path), Some(spec_path));
            }
        }
    }

    #[test]
    fn prop_binding_is_exhaustive(data in json_value_strategy(), spec_source in json_value_strategy()) {
        let data = TreeValue::from(data);
        let spec = TreeValue::from(describe(&spec_source, &[]));
        let bindings = bind(&data, &spec).unwrap();

        for data_path in data.enumerate() {
            let bound = bindings.spec_for(&data_path).is_some();
            let unbound = bindings.unbound_data().contains(&data_path);
            prop_assert!(bound != unbound, "{} classified twice or not at all", data_path);
        }

        for spec_path in bindings.signatures().values() {
            let bound = !bindings.data_for(spec_path).is_empty();
            let unbound = bindings.unbound_spec().contains(spec_path);
            prop_assert!(bound != unbound, "{} classified twice or not at all", spec_path);
        }
    }

    #[test]
    fn prop_self_described_data_binds_completely(data in json_value_strategy()) {
        let spec = TreeValue::from(describe(&data, &[]));
        let data = TreeValue::from(data);
        let bindings = bind(&data, &spec).unwrap();

        prop_assert!(bindings.unbound_spec().is_empty());
        prop_assert!(check(&data, &spec).unwrap().issues.iter().all(|issue| issue.is_warning()));
    }

    #[test]
    fn prop_check_is_idempotent(data in json_value_strategy(), constraints in constraint_strategy()) {
        let names: Vec<&str> = constraints.iter().map(Constraint::name).collect();
        let spec = TreeValue::from(describe(&data, &names));
        let data = TreeValue::from(data);

        let first = check(&data, &spec);
        let second = check(&data, &spec);
        prop_assert!(first.is_ok());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_constraints_evaluated_independently(
        value in json_value_strategy(),
        constraints in constraint_strategy(),
    ) {
        let value = TreeValue::from(value);
        let violations = evaluate(&value, &constraints);

        let expected: Vec<Constraint> = constraints
            .iter()
            .copied()
            .filter(|constraint| !constraint.is_satisfied_by(&value))
            .collect();
        let failed: Vec<Constraint> = violations.iter().map(|v| v.constraint).collect();
        prop_assert_eq!(failed, expected);

        for constraint in &constraints {
            let alone = evaluate(&value, std::slice::from_ref(constraint));
            prop_assert_eq!(alone.len(), usize::from(!constraint.is_satisfied_by(&value)));
        }
    }
}
