use super::*;
use crate::{
    error::QueryError,
    query::{
        Query,
        mask::FieldMask,
        order::OrderDirection,
        predicate::{ComparisonOperator, LogicalOperator, Parameter, Predicate},
    },
    test_fixtures::{AGE, ID, NAME, Person},
};

fn name_is(name: &str) -> Predicate<Person> {
    Predicate::and(
        vec![Parameter::of(&NAME, ComparisonOperator::Equals, name)],
        Vec::new(),
    )
}

#[test]
fn where_clauses_append_in_call_order() {
    let predicate = PredicateBuilder::new()
        .where_(&AGE)
        .is_greater_or_equal_to(18u32)
        .where_(&AGE)
        .is_less_than(65u32)
        .where_(&NAME)
        .is("ada")
        .build();

    assert_eq!(
        predicate,
        Predicate::and(
            vec![
                Parameter::of(&AGE, ComparisonOperator::GreaterOrEquals, 18u32),
                Parameter::of(&AGE, ComparisonOperator::LessThan, 65u32),
                Parameter::of(&NAME, ComparisonOperator::Equals, "ada"),
            ],
            Vec::new(),
        )
    );
}

#[test]
fn single_child_level_collapses_into_that_child() {
    let included = PredicateBuilder::new().include(name_is("a")).build();
    assert_eq!(included, name_is("a"));

    let branched = PredicateBuilder::new()
        .either([
            Branch::new(|b| b.where_(&NAME).is("a")),
            Branch::new(|b| b.where_(&NAME).is("b")),
        ])
        .build();
    assert_eq!(
        branched,
        Predicate::or(Vec::new(), vec![name_is("a"), name_is("b")])
    );

    let guarded = PredicateBuilder::new()
        .where_(&AGE)
        .is_greater_than(18u32)
        .either([
            Branch::new(|b| b.where_(&NAME).is("a")),
            Branch::new(|b| b.where_(&NAME).is("b")),
        ])
        .build();
    assert_eq!(guarded.operator(), LogicalOperator::And);
    assert_eq!(guarded.parameters().len(), 1);
    assert_eq!(guarded.children(), [branched]);
}

#[test]
fn repeated_either_extends_one_or_group() {
    let predicate = PredicateBuilder::new()
        .where_(&AGE)
        .is_greater_than(18u32)
        .either([Branch::new(|b| b.where_(&NAME).is("a"))])
        .include(name_is("x"))
        .either([
            Branch::new(|b| b.where_(&NAME).is("b")),
            Branch::new(|b| b.where_(&NAME).is("c")),
        ])
        .build();

    assert_eq!(predicate.children().len(), 2);
    assert_eq!(
        predicate.children()[0],
        Predicate::or(
            Vec::new(),
            vec![name_is("a"), name_is("b"), name_is("c")]
        )
    );
    assert_eq!(predicate.children()[1], name_is("x"));
}

#[test]
fn empty_either_is_a_no_op() {
    let predicate = PredicateBuilder::<Person>::new()
        .either(Vec::<Branch<'_, Person>>::new())
        .build();

    assert!(predicate.is_identity());
}

#[test]
fn limit_requires_sorting() {
    let err = Query::<Person>::builder()
        .where_(&NAME)
        .is("ada")
        .limit(100)
        .build()
        .expect_err("unsorted limit");
    assert_eq!(err, QueryError::LimitWithoutOrder { limit: 100 });

    let query = Query::<Person>::builder()
        .sort_ascending_by(&AGE)
        .limit(100)
        .build()
        .expect("sorted limit");
    assert_eq!(query.limit(), Some(100));
}

#[test]
fn zero_limit_is_rejected_first() {
    let err = Query::<Person>::builder()
        .limit(0)
        .build()
        .expect_err("zero limit");
    assert_eq!(err, QueryError::ZeroLimit);

    let err = Query::<Person>::builder()
        .sort_descending_by(&AGE)
        .limit(0)
        .build()
        .expect_err("zero limit");
    assert_eq!(err, QueryError::ZeroLimit);
}

#[test]
fn id_clause_last_call_wins_and_dedupes() {
    let query = QueryBuilder::<Person>::new()
        .id()
        .is(1)
        .id()
        .in_([3, 2, 3, 2])
        .build()
        .expect("id query");

    assert_eq!(query.id_constraint().ids(), &[3, 2]);
    assert!(query.predicate().is_identity());
}

#[test]
fn mask_paths_keep_first_occurrence() {
    let query = Query::<Person>::builder()
        .with_mask_paths(["name", "address.city", "name"])
        .build()
        .expect("masked query");
    let mask = query.mask().expect("mask set");

    assert_eq!(mask.paths(), ["name", "address.city"]);
    assert!(mask.includes("address.city"));
    assert!(!mask.includes("address"));
    assert_eq!(mask.to_string(), "name, address.city");

    let replaced = query
        .and(|b| b.with_mask(FieldMask::new(["age"])))
        .expect("replaced mask");
    assert_eq!(replaced.mask(), Some(&FieldMask::new(["age"])));
}

#[test]
fn sorting_appends_directives() {
    let query = Query::<Person>::builder()
        .sort_ascending_by(&AGE)
        .sort_descending_by(&NAME)
        .sort_ascending_by(&ID)
        .build()
        .expect("sorted query");

    let directions: Vec<_> = query
        .sorting()
        .iter()
        .map(|d| (d.column().name(), d.direction()))
        .collect();
    assert_eq!(
        directions,
        [
            ("age", OrderDirection::Asc),
            ("name", OrderDirection::Desc),
            ("id", OrderDirection::Asc),
        ]
    );
    assert_eq!(query.sorting()[1].to_string(), "name DESC");
}

#[test]
fn build_with_transforms_the_snapshot() {
    let limit = Query::<Person>::builder()
        .sort_ascending_by(&AGE)
        .limit(7)
        .build_with(|query| query.limit())
        .expect("transformed");
    assert_eq!(limit, Some(7));

    let rejected = Query::<Person>::builder()
        .limit(7)
        .build_with(|query| query.limit());
    assert_eq!(rejected, Err(QueryError::LimitWithoutOrder { limit: 7 }));
}
