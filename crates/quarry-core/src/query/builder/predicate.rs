use crate::{
    model::Column,
    obs::sink::{self, MetricsEvent},
    query::{
        builder::field::{ParameterSink, WhereClause},
        predicate::{Parameter, Predicate},
    },
    traits::FieldValue,
};
use std::fmt;

///
/// Branch
///
/// One alternative of an `either` group: a closure that fills a fresh child
/// builder. The child is finalized with the same collapse rule as any other
/// builder.
///

pub struct Branch<'a, R> {
    fill: Box<dyn FnOnce(PredicateBuilder<R>) -> PredicateBuilder<R> + 'a>,
}

impl<'a, R> Branch<'a, R> {
    #[must_use]
    pub fn new<F>(fill: F) -> Self
    where
        F: FnOnce(PredicateBuilder<R>) -> PredicateBuilder<R> + 'a,
    {
        Self {
            fill: Box::new(fill),
        }
    }

    /// Run the closure on an empty builder and finalize the result.
    pub(crate) fn resolve(self) -> Predicate<R> {
        (self.fill)(PredicateBuilder::new()).build()
    }
}

impl<R> fmt::Debug for Branch<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Branch")
    }
}

///
/// Slot
/// Child position at one nesting level; the branch group is materialized
/// as a single OR child where it was first opened.
///

enum Slot<R> {
    Included(Predicate<R>),
    Branches,
}

impl<R> Clone for Slot<R> {
    fn clone(&self) -> Self {
        match self {
            Self::Included(predicate) => Self::Included(predicate.clone()),
            Self::Branches => Self::Branches,
        }
    }
}

///
/// PredicateBuilder
///
/// Accumulates one nesting level of a predicate: own parameters, prebuilt
/// children added with `include`, and at most one OR group fed by `either`.
///

pub struct PredicateBuilder<R> {
    parameters: Vec<Parameter<R>>,
    slots: Vec<Slot<R>>,
    branches: Vec<Predicate<R>>,
}

impl<R> PredicateBuilder<R> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            parameters: Vec::new(),
            slots: Vec::new(),
            branches: Vec::new(),
        }
    }

    /// Open a condition on `column` at this level.
    pub fn where_<V>(self, column: &Column<R, V>) -> WhereClause<Self, R, V>
    where
        R: 'static,
        V: FieldValue + 'static,
    {
        WhereClause::new(self, *column)
    }

    /// Append alternatives to this level's OR group.
    ///
    /// The first call opens the group; later calls extend it, so a builder
    /// never carries more than one OR child. An empty iterator is a no-op.
    #[must_use]
    pub fn either<'a, I>(mut self, branches: I) -> Self
    where
        I: IntoIterator<Item = Branch<'a, R>>,
        R: 'a,
    {
        self.add_branches(branches.into_iter().map(Branch::resolve).collect());
        self
    }

    /// Append a prebuilt predicate as a child of this level.
    #[must_use]
    pub fn include(mut self, predicate: Predicate<R>) -> Self {
        self.add_child(predicate);
        self
    }

    pub(crate) fn add_parameter(&mut self, parameter: Parameter<R>) {
        self.parameters.push(parameter);
    }

    pub(crate) fn add_child(&mut self, predicate: Predicate<R>) {
        self.slots.push(Slot::Included(predicate));
    }

    // Branches arrive already resolved so no user closure runs while the
    // caller holds shared query state.
    pub(crate) fn add_branches(&mut self, resolved: Vec<Predicate<R>>) {
        if resolved.is_empty() {
            return;
        }

        if self.branches.is_empty() {
            self.slots.push(Slot::Branches);
        }
        self.branches.extend(resolved);
    }

    /// Finalize into an immutable predicate.
    #[must_use]
    pub fn build(self) -> Predicate<R> {
        let Self {
            parameters,
            slots,
            branches,
        } = self;

        assemble(parameters, slots, branches)
    }

    // Finalize without consuming; the shared query state stays reusable.
    pub(crate) fn snapshot(&self) -> Predicate<R> {
        self.clone().build()
    }
}

impl<R> ParameterSink<R> for PredicateBuilder<R> {
    fn push_parameter(mut self, parameter: Parameter<R>) -> Self {
        self.add_parameter(parameter);
        self
    }
}

impl<R> Default for PredicateBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for PredicateBuilder<R> {
    fn clone(&self) -> Self {
        Self {
            parameters: self.parameters.clone(),
            slots: self.slots.clone(),
            branches: self.branches.clone(),
        }
    }
}

impl<R> fmt::Debug for PredicateBuilder<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateBuilder")
            .field("parameters", &self.parameters)
            .field("children", &self.slots.len())
            .field("branches", &self.branches)
            .finish()
    }
}

// Collapse rule: no own parameters and a single child yields that child.
fn assemble<R>(
    parameters: Vec<Parameter<R>>,
    slots: Vec<Slot<R>>,
    branches: Vec<Predicate<R>>,
) -> Predicate<R> {
    let mut branches = Some(branches);
    let mut children: Vec<_> = slots
        .into_iter()
        .map(|slot| match slot {
            Slot::Included(predicate) => predicate,
            Slot::Branches => Predicate::or(Vec::new(), branches.take().unwrap_or_default()),
        })
        .collect();

    let predicate = if parameters.is_empty()
        && children.len() == 1
        && let Some(only) = children.pop()
    {
        tracing::trace!("collapsed single-child predicate level");
        only
    } else {
        Predicate::and(parameters, children)
    };

    sink::record(MetricsEvent::PredicateBuilt {
        parameters: u64::try_from(predicate.parameter_count()).unwrap_or(u64::MAX),
        depth: u64::try_from(predicate.depth()).unwrap_or(u64::MAX),
    });

    predicate
}
