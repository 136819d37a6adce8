use crate::{
    error::QueryError,
    query::{
        SortDirective, Subject,
        builder::{Branch, QueryBuilder, SharedState, Snapshot},
        mask::FieldMask,
        predicate::Predicate,
        subject::IdConstraint,
    },
    traits::EntityKind,
};
use std::{cmp::Ordering, fmt, sync::Arc};

///
/// Query
///
/// Immutable snapshot of a finalized builder: subject, optional projection
/// mask, sort keys, and limit.
///
/// A query remembers the builder state it was taken from. `and` and
/// `either` reopen that state, extend it, and take a new snapshot; the
/// receiver keeps its own values.
///

pub struct Query<E: EntityKind> {
    subject: Subject<E>,
    mask: Option<FieldMask>,
    sorting: Vec<SortDirective<E>>,
    limit: Option<u32>,
    origin: SharedState<E>,
}

impl<E: EntityKind> Query<E> {
    /// Start a new empty builder.
    #[must_use]
    pub fn builder() -> QueryBuilder<E> {
        QueryBuilder::new()
    }

    pub(crate) fn from_snapshot(snapshot: Snapshot<E>, origin: SharedState<E>) -> Self {
        let Snapshot {
            subject,
            mask,
            sorting,
            limit,
        } = snapshot;

        Self {
            subject,
            mask,
            sorting,
            limit,
            origin,
        }
    }

    #[must_use]
    pub const fn subject(&self) -> &Subject<E> {
        &self.subject
    }

    #[must_use]
    pub const fn predicate(&self) -> &Predicate<E> {
        self.subject.predicate()
    }

    #[must_use]
    pub const fn id_constraint(&self) -> &IdConstraint<E::Id> {
        self.subject.id_constraint()
    }

    #[must_use]
    pub const fn mask(&self) -> Option<&FieldMask> {
        self.mask.as_ref()
    }

    #[must_use]
    pub fn sorting(&self) -> &[SortDirective<E>] {
        &self.sorting
    }

    #[must_use]
    pub const fn limit(&self) -> Option<u32> {
        self.limit
    }

    /// Reopen the originating builder, apply `extend`, and build again.
    ///
    /// Edits land in the shared builder even when the build is rejected, so
    /// a rejected extension (such as a limit without sorting) keeps failing
    /// every later reopening until it is corrected.
    pub fn and<F>(&self, extend: F) -> Result<Self, QueryError>
    where
        F: FnOnce(QueryBuilder<E>) -> QueryBuilder<E>,
    {
        extend(self.to_builder()).build()
    }

    /// Add alternatives to the root OR group of the originating builder.
    pub fn either<'a, I>(&self, branches: I) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = Branch<'a, E>>,
    {
        self.and(|builder| builder.either(branches))
    }

    /// Reopen the originating builder.
    ///
    /// Every reopened builder edits the same shared state as this query's
    /// origin; this snapshot itself never changes.
    #[must_use]
    pub fn to_builder(&self) -> QueryBuilder<E> {
        QueryBuilder::reopen(&self.origin)
    }

    /// Whether `record` is selected by this query's subject.
    pub fn matches(&self, record: &E) -> Result<bool, QueryError> {
        self.subject.matches(record)
    }

    /// Order two records by the sort keys, first key most significant.
    pub fn compare(&self, left: &E, right: &E) -> Result<Ordering, QueryError> {
        for directive in &self.sorting {
            let ordering = directive.compare(left, right)?;
            if ordering != Ordering::Equal {
                return Ok(ordering);
            }
        }

        Ok(Ordering::Equal)
    }
}

impl<E: EntityKind> Clone for Query<E> {
    fn clone(&self) -> Self {
        Self {
            subject: self.subject.clone(),
            mask: self.mask.clone(),
            sorting: self.sorting.clone(),
            limit: self.limit,
            origin: Arc::clone(&self.origin),
        }
    }
}

// Snapshots compare by value; builder identity is not part of equality.
impl<E: EntityKind> PartialEq for Query<E> {
    fn eq(&self, other: &Self) -> bool {
        self.subject == other.subject
            && self.mask == other.mask
            && self.sorting == other.sorting
            && self.limit == other.limit
    }
}

impl<E: EntityKind> Eq for Query<E> {}

impl<E: EntityKind> fmt::Debug for Query<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("subject", &self.subject)
            .field("mask", &self.mask)
            .field("sorting", &self.sorting)
            .field("limit", &self.limit)
            .finish()
    }
}
