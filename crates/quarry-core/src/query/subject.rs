use crate::{error::QueryError, query::predicate::Predicate, traits::EntityKind};
use std::{any::type_name, fmt};

///
/// IdConstraint
///
/// Ordered, de-duplicated set of record ids. Empty means unconstrained.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IdConstraint<I> {
    ids: Vec<I>,
}

impl<I> IdConstraint<I> {
    #[must_use]
    pub const fn unconstrained() -> Self {
        Self { ids: Vec::new() }
    }

    #[must_use]
    pub fn ids(&self) -> &[I] {
        &self.ids
    }

    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<I: Eq> IdConstraint<I> {
    /// Build a constraint; repeated ids keep their first position.
    #[must_use]
    pub fn of(ids: impl IntoIterator<Item = I>) -> Self {
        let mut unique = Vec::new();
        for id in ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }

        Self { ids: unique }
    }

    /// Whether `id` passes this constraint.
    #[must_use]
    pub fn admits(&self, id: &I) -> bool {
        self.is_unconstrained() || self.ids.contains(id)
    }
}

impl<I> Default for IdConstraint<I> {
    fn default() -> Self {
        Self::unconstrained()
    }
}

///
/// Subject
///
/// What a query selects: an id constraint and a predicate over `E`.
///

pub struct Subject<E: EntityKind> {
    id_constraint: IdConstraint<E::Id>,
    predicate: Predicate<E>,
}

impl<E: EntityKind> Subject<E> {
    #[must_use]
    pub const fn new(id_constraint: IdConstraint<E::Id>, predicate: Predicate<E>) -> Self {
        Self {
            id_constraint,
            predicate,
        }
    }

    #[must_use]
    pub const fn id_constraint(&self) -> &IdConstraint<E::Id> {
        &self.id_constraint
    }

    #[must_use]
    pub const fn predicate(&self) -> &Predicate<E> {
        &self.predicate
    }

    /// Rust type name of the selected record type.
    #[must_use]
    pub fn record_type(&self) -> &'static str {
        type_name::<E>()
    }

    /// Rust type name of the record id.
    #[must_use]
    pub fn id_type(&self) -> &'static str {
        type_name::<E::Id>()
    }

    #[must_use]
    pub const fn entity_name(&self) -> &'static str {
        E::ENTITY_NAME
    }

    /// Evaluate id membership, then the predicate.
    pub fn matches(&self, record: &E) -> Result<bool, QueryError> {
        if !self.id_constraint.admits(record.id()) {
            return Ok(false);
        }

        self.predicate.matches(record)
    }
}

impl<E: EntityKind> Clone for Subject<E> {
    fn clone(&self) -> Self {
        Self {
            id_constraint: self.id_constraint.clone(),
            predicate: self.predicate.clone(),
        }
    }
}

impl<E: EntityKind> PartialEq for Subject<E> {
    fn eq(&self, other: &Self) -> bool {
        self.id_constraint == other.id_constraint && self.predicate == other.predicate
    }
}

impl<E: EntityKind> Eq for Subject<E> {}

impl<E: EntityKind> fmt::Debug for Subject<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subject")
            .field("entity", &E::ENTITY_NAME)
            .field("ids", &self.id_constraint.ids)
            .field("predicate", &self.predicate)
            .finish()
    }
}
