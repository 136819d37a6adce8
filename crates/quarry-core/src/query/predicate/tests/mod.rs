
use super::*;
use crate::{
    error::{ErrorClass, QueryError},
    query::builder::{Branch, PredicateBuilder},
    test_fixtures::{ADDRESS, AGE, AVATAR, Address, JOINED, NAME, Person, SCORE},
    types::{Blob, Timestamp},
    value::{Value, ValueKind},
};

fn age(operator: ComparisonOperator, value: u32) -> Parameter<Person> {
    Parameter::of(&AGE, operator, value)
}

fn age_is(value: u32) -> Parameter<Person> {
    age(ComparisonOperator::Equals, value)
}

fn clause(values: &[u32]) -> Predicate<Person> {
    Predicate::and(values.iter().map(|v| age_is(*v)).collect(), Vec::new())
}

// ------------------------------------------------------------------
// Comparison operator
// ------------------------------------------------------------------

#[test]
fn null_operands_follow_null_rules() {
    for operator in ComparisonOperator::ALL {
        let both = operator.eval(&Value::Null, &Value::Null).expect("null eval");
        assert_eq!(both, operator == ComparisonOperator::Equals, "{operator}");

        assert!(!operator.eval(&Value::Null, &Value::Int(1)).expect("null eval"));
        assert!(!operator.eval(&Value::Int(1), &Value::Null).expect("null eval"));
    }
}

#[test]
fn mismatched_kinds_are_invalid_arguments() {
    let err = ComparisonOperator::LessThan
        .eval(&Value::Timestamp(Timestamp::from_seconds(5)), &Value::Int(3))
        .expect_err("timestamp vs int");

    assert_eq!(
        err,
        QueryError::OperandTypeMismatch {
            left: ValueKind::Timestamp,
            right: ValueKind::Int,
        }
    );
    assert_eq!(err.class(), ErrorClass::InvalidArgument);
}

#[test]
fn ordering_unordered_kinds_is_unsupported() {
    let person = Person::new(1, "ada", 36);
    let parameter = Parameter::of(&ADDRESS, ComparisonOperator::LessThan, Address::default());

    let err = parameter.matches(&person).expect_err("records are unordered");
    assert_eq!(
        err,
        QueryError::UnorderedOperand {
            operator: ComparisonOperator::LessThan,
            kind: ValueKind::Record,
        }
    );
    assert_eq!(err.class(), ErrorClass::Unsupported);

    let blob = Parameter::of(&AVATAR, ComparisonOperator::GreaterOrEquals, Blob::default());
    assert_eq!(
        blob.matches(&person).expect_err("blobs are unordered").class(),
        ErrorClass::Unsupported
    );
}

#[test]
fn equality_is_structural_for_unordered_kinds() {
    let person = Person::new(1, "ada", 36);

    let same = Parameter::of(&ADDRESS, ComparisonOperator::Equals, Address::default());
    assert!(same.matches(&person).expect("record equality"));

    let other = Address {
        city: "Oslo".to_string(),
        zip: "0150".to_string(),
    };
    let different = Parameter::of(&ADDRESS, ComparisonOperator::Equals, other);
    assert!(!different.matches(&person).expect("record equality"));
}

#[test]
fn timestamps_order_by_linear_time() {
    let person = Person::new(1, "ada", 36).with_joined(Timestamp::new(10, 500_000_000));

    let before = Parameter::of(
        &JOINED,
        ComparisonOperator::LessThan,
        Timestamp::from_seconds(11),
    );
    let after = Parameter::of(
        &JOINED,
        ComparisonOperator::GreaterThan,
        Timestamp::from_millis(10_499),
    );

    assert!(before.matches(&person).expect("timestamp eval"));
    assert!(after.matches(&person).expect("timestamp eval"));
}

#[test]
fn natural_orderings_accept_boundaries() {
    let person = Person::new(1, "ada", 36);

    assert!(age(ComparisonOperator::LessOrEquals, 36).matches(&person).unwrap());
    assert!(age(ComparisonOperator::GreaterOrEquals, 36).matches(&person).unwrap());
    assert!(!age(ComparisonOperator::LessThan, 36).matches(&person).unwrap());
    assert!(!age(ComparisonOperator::GreaterThan, 36).matches(&person).unwrap());

    let score = Parameter::of(&SCORE, ComparisonOperator::LessThan, 0.5f64);
    assert!(score.matches(&person).unwrap());
}

// ------------------------------------------------------------------
// Structure and evaluation
// ------------------------------------------------------------------

#[test]
fn identity_predicate_matches_everything() {
    let identity = Predicate::<Person>::and(Vec::new(), Vec::new());

    assert!(identity.is_identity());
    assert!(identity.matches(&Person::new(1, "ada", 36)).unwrap());
    assert_eq!(identity.to_string(), "TRUE");
}

#[test]
fn evaluation_short_circuits_before_failing_leaves() {
    let person = Person::new(1, "ada", 36);
    let failing = Parameter::of(&ADDRESS, ComparisonOperator::LessThan, Address::default());

    let and = Predicate::and(vec![age_is(1), failing.clone()], Vec::new());
    assert!(!and.matches(&person).expect("short-circuit on false"));

    let or = Predicate::or(vec![age_is(36), failing.clone()], Vec::new());
    assert!(or.matches(&person).expect("short-circuit on true"));

    let reached = Predicate::and(vec![age_is(36), failing], Vec::new());
    assert!(reached.matches(&person).is_err());
}

#[test]
fn merge_wraps_predicates_as_children() {
    let merged = Predicate::merge([clause(&[1]), clause(&[2])], LogicalOperator::Or);

    assert_eq!(merged.operator(), LogicalOperator::Or);
    assert!(merged.parameters().is_empty());
    assert_eq!(merged.children(), &[clause(&[1]), clause(&[2])]);
    assert_eq!(merged.depth(), 2);
    assert_eq!(merged.parameter_count(), 2);
}

// ------------------------------------------------------------------
// DNF
// ------------------------------------------------------------------

// A ∧ ((B ∧ C) ∨ (D ∧ E ∧ (F ∨ (G ∧ (H ∨ J)))))
fn nested_example() -> Predicate<Person> {
    let h_or_j = Predicate::or(vec![age_is(7), age_is(8)], Vec::new());
    let g_branch = Predicate::and(vec![age_is(6)], vec![h_or_j]);
    let f_or_g = Predicate::or(vec![age_is(5)], vec![g_branch]);
    let d_branch = Predicate::and(vec![age_is(3), age_is(4)], vec![f_or_g]);
    let b_or_d = Predicate::or(Vec::new(), vec![clause(&[1, 2]), d_branch]);

    Predicate::and(vec![age_is(0)], vec![b_or_d])
}

fn nested_example_dnf() -> Predicate<Person> {
    Predicate::or(
        Vec::new(),
        vec![
            clause(&[0, 1, 2]),
            clause(&[0, 3, 4, 5]),
            clause(&[0, 3, 4, 6, 7]),
            clause(&[0, 3, 4, 6, 8]),
        ],
    )
}

#[test]
fn dnf_distributes_in_declaration_order() {
    let normalized = nested_example().to_dnf();

    assert_eq!(normalized, nested_example_dnf());
    assert!(normalized.is_dnf());
    assert!(!nested_example().is_dnf());
}

#[test]
fn dnf_of_builder_output_matches_hand_built_tree() {
    let built = PredicateBuilder::new()
        .where_(&AGE)
        .is(0u32)
        .either([
            Branch::new(|b| b.where_(&AGE).is(1u32).where_(&AGE).is(2u32)),
            Branch::new(|b| {
                b.where_(&AGE).is(3u32).where_(&AGE).is(4u32).either([
                    Branch::new(|b| b.where_(&AGE).is(5u32)),
                    Branch::new(|b| {
                        b.where_(&AGE).is(6u32).either([
                            Branch::new(|b| b.where_(&AGE).is(7u32)),
                            Branch::new(|b| b.where_(&AGE).is(8u32)),
                        ])
                    }),
                ])
            }),
        ])
        .build();

    assert_eq!(built.to_dnf(), nested_example_dnf());
}

#[test]
fn dnf_is_idempotent_on_canonical_shapes() {
    let normalized = nested_example_dnf();
    assert_eq!(normalized.to_dnf(), normalized);

    let single = clause(&[1, 2]);
    assert!(single.is_dnf());
    assert_eq!(single.to_dnf(), single);
}

#[test]
fn dnf_or_emits_own_parameters_first() {
    let predicate = Predicate::or(vec![age_is(1)], vec![clause(&[2, 3])]);

    assert_eq!(
        predicate.to_dnf(),
        Predicate::or(Vec::new(), vec![clause(&[1]), clause(&[2, 3])])
    );
}

#[test]
fn dnf_single_clause_collapses_to_and() {
    let predicate = Predicate::and(vec![age_is(1)], vec![clause(&[2]), clause(&[3])]);

    assert_eq!(predicate.to_dnf(), clause(&[1, 2, 3]));
}

#[test]
fn dnf_of_identity_is_identity() {
    let identity = Predicate::<Person>::or(Vec::new(), Vec::new());

    assert!(identity.to_dnf().is_identity());
}

// ------------------------------------------------------------------
// Rendering
// ------------------------------------------------------------------

#[test]
fn display_renders_nested_groups() {
    let predicate = PredicateBuilder::new()
        .where_(&AGE)
        .is_greater_than(18u32)
        .either([
            Branch::new(|b| b.where_(&NAME).is("a")),
            Branch::new(|b| b.where_(&NAME).is("b")),
        ])
        .build();

    assert_eq!(
        predicate.to_string(),
        r#"(age > 18 AND (name = "a" OR name = "b"))"#
    );
}

#[test]
fn serialize_describes_columns_by_name() {
    let predicate = Predicate::and(vec![age(ComparisonOperator::GreaterThan, 18)], Vec::new());
    let json = serde_json::to_value(&predicate).expect("serialize predicate");

    assert_eq!(
        json,
        serde_json::json!({
            "operator": "AND",
            "parameters": [
                { "column": "age", "operator": "GREATER_THAN", "value": { "Uint": 18 } }
            ],
            "children": []
        })
    );
}

#[test]
fn operators_are_identified_by_name() {
    let names = serde_json::to_value(ComparisonOperator::ALL).expect("serialize operators");
    assert_eq!(
        names,
        serde_json::json!([
            "EQUALS",
            "LESS_THAN",
            "LESS_OR_EQUALS",
            "GREATER_THAN",
            "GREATER_OR_EQUALS"
        ])
    );

    let ordering: Vec<_> = ComparisonOperator::ALL
        .into_iter()
        .filter(|op| op.is_ordering())
        .collect();
    assert_eq!(ordering.len(), 4);
    assert!(!ComparisonOperator::Equals.is_ordering());
}
