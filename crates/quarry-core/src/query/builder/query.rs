use crate::{
    error::QueryError,
    model::Column,
    obs::sink::{self, MetricsEvent},
    query::{
        Query, SortDirective, Subject,
        builder::{
            field::{ParameterSink, WhereClause},
            predicate::{Branch, PredicateBuilder},
        },
        mask::FieldMask,
        predicate::{Parameter, Predicate},
        subject::IdConstraint,
    },
    traits::{EntityKind, FieldValue},
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Builder state shared by a query snapshot and every builder reopened from it.
pub(crate) type SharedState<E> = Arc<Mutex<QueryState<E>>>;

/// Lock shared builder state. Edits are applied under the lock without
/// running caller code, so a poisoned lock still holds consistent state.
fn lock<E: EntityKind>(state: &SharedState<E>) -> MutexGuard<'_, QueryState<E>> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

///
/// QueryState
///
/// Mutable accumulator behind `QueryBuilder`.
///

pub(crate) struct QueryState<E: EntityKind> {
    ids: IdConstraint<E::Id>,
    predicate: PredicateBuilder<E>,
    mask: Option<FieldMask>,
    sorting: Vec<SortDirective<E>>,
    limit: Option<u32>,
}

impl<E: EntityKind> QueryState<E> {
    const fn new() -> Self {
        Self {
            ids: IdConstraint::unconstrained(),
            predicate: PredicateBuilder::new(),
            mask: None,
            sorting: Vec::new(),
            limit: None,
        }
    }

    // Validate limits, then finalize the predicate into a subject.
    fn finalize(&self) -> Result<Snapshot<E>, QueryError> {
        if let Some(limit) = self.limit {
            if limit == 0 {
                return Err(QueryError::ZeroLimit);
            }
            if self.sorting.is_empty() {
                return Err(QueryError::LimitWithoutOrder { limit });
            }
        }

        Ok(Snapshot {
            subject: Subject::new(self.ids.clone(), self.predicate.snapshot()),
            mask: self.mask.clone(),
            sorting: self.sorting.clone(),
            limit: self.limit,
        })
    }
}

impl<E: EntityKind> Clone for QueryState<E> {
    fn clone(&self) -> Self {
        Self {
            ids: self.ids.clone(),
            predicate: self.predicate.clone(),
            mask: self.mask.clone(),
            sorting: self.sorting.clone(),
            limit: self.limit,
        }
    }
}

// Finalized query parts before they are bound to shared state.
pub(crate) struct Snapshot<E: EntityKind> {
    pub(crate) subject: Subject<E>,
    pub(crate) mask: Option<FieldMask>,
    pub(crate) sorting: Vec<SortDirective<E>>,
    pub(crate) limit: Option<u32>,
}

///
/// QueryBuilder
///
/// Fluent accumulator for a `Query`.
///
/// The builder is a handle to state shared with every query built from it.
/// Each fluent call edits that state in place, so builders reopened from a
/// query (`Query::and`, `Query::to_builder`) all extend the same builder,
/// and their edits land whether or not they are built. Snapshots taken
/// earlier keep their own values.
///

pub struct QueryBuilder<E: EntityKind> {
    state: SharedState<E>,
}

impl<E: EntityKind> QueryBuilder<E> {
    /// Create a new empty query builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(QueryState::new())),
        }
    }

    pub(crate) fn reopen(state: &SharedState<E>) -> Self {
        Self {
            state: Arc::clone(state),
        }
    }

    // Apply one edit under the lock.
    fn edit(self, f: impl FnOnce(&mut QueryState<E>)) -> Self {
        f(&mut lock(&self.state));
        self
    }

    /// Constrain the query by record id.
    pub const fn id(self) -> IdClause<E> {
        IdClause { builder: self }
    }

    /// Open a condition on `column` at the root level.
    pub fn where_<V>(self, column: &Column<E, V>) -> WhereClause<Self, E, V>
    where
        V: FieldValue + 'static,
    {
        WhereClause::new(self, *column)
    }

    /// Append alternatives to the root OR group.
    ///
    /// Branch closures run before the shared state is touched, so they may
    /// themselves reopen queries built from this builder.
    #[must_use]
    pub fn either<'a, I>(self, branches: I) -> Self
    where
        I: IntoIterator<Item = Branch<'a, E>>,
    {
        let resolved: Vec<_> = branches.into_iter().map(Branch::resolve).collect();

        self.edit(|state| state.predicate.add_branches(resolved))
    }

    /// Append a prebuilt predicate at the root level.
    #[must_use]
    pub fn include(self, predicate: Predicate<E>) -> Self {
        self.edit(|state| state.predicate.add_child(predicate))
    }

    /// Set or replace the projection mask.
    #[must_use]
    pub fn with_mask(self, mask: FieldMask) -> Self {
        self.edit(|state| state.mask = Some(mask))
    }

    /// Set or replace the projection mask from field paths.
    #[must_use]
    pub fn with_mask_paths<I, S>(self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_mask(FieldMask::new(paths))
    }

    /// Append an ascending sort key.
    #[must_use]
    pub fn sort_ascending_by<V: FieldValue + 'static>(self, column: &Column<E, V>) -> Self {
        let directive = SortDirective::ascending(column);

        self.edit(|state| state.sorting.push(directive))
    }

    /// Append a descending sort key.
    #[must_use]
    pub fn sort_descending_by<V: FieldValue + 'static>(self, column: &Column<E, V>) -> Self {
        let directive = SortDirective::descending(column);

        self.edit(|state| state.sorting.push(directive))
    }

    /// Set or replace the result limit. Checked when the query is built.
    #[must_use]
    pub fn limit(self, n: u32) -> Self {
        self.edit(|state| state.limit = Some(n))
    }

    /// Validate the shared state and take an immutable snapshot of it.
    pub fn build(self) -> Result<Query<E>, QueryError> {
        // finalize a copy so metric sinks never run under the lock
        let state = lock(&self.state).clone();
        let finalized = state.finalize();

        match finalized {
            Ok(snapshot) => {
                tracing::debug!(
                    entity = E::ENTITY_NAME,
                    parameters = snapshot.subject.predicate().parameter_count(),
                    sort_keys = snapshot.sorting.len(),
                    limit = snapshot.limit,
                    "built query"
                );
                sink::record(MetricsEvent::QueryBuilt {
                    entity_path: E::ENTITY_NAME,
                });

                Ok(Query::from_snapshot(snapshot, self.state))
            }
            Err(err) => {
                tracing::debug!(
                    entity = E::ENTITY_NAME,
                    error = %err,
                    "rejected query"
                );
                sink::record(MetricsEvent::QueryRejected {
                    entity_path: E::ENTITY_NAME,
                });

                Err(err)
            }
        }
    }

    /// Finalize and hand the snapshot to `transform`.
    pub fn build_with<T, F>(self, transform: F) -> Result<T, QueryError>
    where
        F: FnOnce(Query<E>) -> T,
    {
        self.build().map(transform)
    }
}

impl<E: EntityKind> ParameterSink<E> for QueryBuilder<E> {
    fn push_parameter(self, parameter: Parameter<E>) -> Self {
        self.edit(|state| state.predicate.add_parameter(parameter))
    }
}

impl<E: EntityKind> Default for QueryBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}

///
/// IdClause
///
/// Pending id constraint. The last `is`/`in_` call on a builder wins.
///

#[must_use = "an id clause does nothing until `is` or `in_` is applied"]
pub struct IdClause<E: EntityKind> {
    builder: QueryBuilder<E>,
}

impl<E: EntityKind> IdClause<E> {
    /// Match exactly one id.
    pub fn is(self, id: E::Id) -> QueryBuilder<E> {
        self.in_([id])
    }

    /// Match any of `ids`; duplicates keep their first position.
    pub fn in_(self, ids: impl IntoIterator<Item = E::Id>) -> QueryBuilder<E> {
        let ids = IdConstraint::of(ids);

        self.builder.edit(|state| state.ids = ids)
    }
}
