use crate::{
    error::QueryError,
    query::predicate::{LogicalOperator, Parameter},
};
use serde::Serialize;
use std::fmt;

///
/// Predicate
///
/// Tree node combining its own parameters and child predicates under one
/// logical operator. The node denotes
///
///   p0 <op> p1 <op> ... <op> c0 <op> c1 <op> ...
///
/// Parameter order is significant: it drives DNF clause order.
/// A node without parameters and children is the identity predicate and
/// matches every record.
///
/// Predicates are frozen once returned by a builder; extension always goes
/// through the builder, never through in-place edits.
///

#[derive(Serialize)]
#[serde(bound = "")]
pub struct Predicate<R> {
    operator: LogicalOperator,
    parameters: Vec<Parameter<R>>,
    children: Vec<Self>,
}

impl<R> Predicate<R> {
    #[must_use]
    pub const fn new(
        operator: LogicalOperator,
        parameters: Vec<Parameter<R>>,
        children: Vec<Self>,
    ) -> Self {
        Self {
            operator,
            parameters,
            children,
        }
    }

    #[must_use]
    pub const fn and(parameters: Vec<Parameter<R>>, children: Vec<Self>) -> Self {
        Self::new(LogicalOperator::And, parameters, children)
    }

    #[must_use]
    pub const fn or(parameters: Vec<Parameter<R>>, children: Vec<Self>) -> Self {
        Self::new(LogicalOperator::Or, parameters, children)
    }

    /// Join independently built predicates under one new node.
    ///
    /// The given predicates become the children of the new node, in order;
    /// no further flattening is performed.
    #[must_use]
    pub fn merge(predicates: impl IntoIterator<Item = Self>, operator: LogicalOperator) -> Self {
        Self::new(operator, Vec::new(), predicates.into_iter().collect())
    }

    #[must_use]
    pub const fn operator(&self) -> LogicalOperator {
        self.operator
    }

    #[must_use]
    pub fn parameters(&self) -> &[Parameter<R>] {
        &self.parameters
    }

    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// True when the node has no parameters and no children.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.parameters.is_empty() && self.children.is_empty()
    }

    /// True when the predicate already has canonical DNF shape: a single
    /// leaf-only AND, or an OR of two or more leaf-only ANDs.
    #[must_use]
    pub fn is_dnf(&self) -> bool {
        match self.operator {
            LogicalOperator::And => self.children.is_empty(),
            LogicalOperator::Or => {
                self.parameters.is_empty()
                    && self.children.len() > 1
                    && self.children.iter().all(|child| {
                        child.operator == LogicalOperator::And && child.children.is_empty()
                    })
            }
        }
    }

    /// Number of parameters in the whole tree.
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
            + self
                .children
                .iter()
                .map(Self::parameter_count)
                .sum::<usize>()
    }

    /// Nesting depth; a node without children has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(Self::depth).max().unwrap_or(0)
    }

    /// Evaluate this predicate against one record.
    ///
    /// Evaluation short-circuits in declaration order, parameters first;
    /// comparison errors from visited leaves propagate.
    pub fn matches(&self, record: &R) -> Result<bool, QueryError> {
        if self.is_identity() {
            return Ok(true);
        }

        match self.operator {
            LogicalOperator::And => {
                for parameter in &self.parameters {
                    if !parameter.matches(record)? {
                        return Ok(false);
                    }
                }
                for child in &self.children {
                    if !child.matches(record)? {
                        return Ok(false);
                    }
                }

                Ok(true)
            }
            LogicalOperator::Or => {
                for parameter in &self.parameters {
                    if parameter.matches(record)? {
                        return Ok(true);
                    }
                }
                for child in &self.children {
                    if child.matches(record)? {
                        return Ok(true);
                    }
                }

                Ok(false)
            }
        }
    }
}

impl<R> Clone for Predicate<R> {
    fn clone(&self) -> Self {
        Self {
            operator: self.operator,
            parameters: self.parameters.clone(),
            children: self.children.clone(),
        }
    }
}

impl<R> PartialEq for Predicate<R> {
    fn eq(&self, other: &Self) -> bool {
        self.operator == other.operator
            && self.parameters == other.parameters
            && self.children == other.children
    }
}

impl<R> Eq for Predicate<R> {}

impl<R> fmt::Debug for Predicate<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("operator", &self.operator)
            .field("parameters", &self.parameters)
            .field("children", &self.children)
            .finish()
    }
}

impl<R> fmt::Display for Predicate<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identity() {
            return f.write_str("TRUE");
        }

        let terms = self.parameters.len() + self.children.len();
        let separator = match self.operator {
            LogicalOperator::And => " AND ",
            LogicalOperator::Or => " OR ",
        };

        if terms > 1 {
            f.write_str("(")?;
        }

        let mut first = true;
        for parameter in &self.parameters {
            if !first {
                f.write_str(separator)?;
            }
            first = false;
            write!(f, "{parameter}")?;
        }
        for child in &self.children {
            if !first {
                f.write_str(separator)?;
            }
            first = false;
            write!(f, "{child}")?;
        }

        if terms > 1 {
            f.write_str(")")?;
        }

        Ok(())
    }
}
