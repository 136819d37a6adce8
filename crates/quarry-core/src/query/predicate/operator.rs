use crate::{
    error::QueryError,
    value::{Value, strict_order_cmp},
};
use derive_more::Display;
use serde::Serialize;
use std::cmp::Ordering;

///
/// ComparisonOperator
///
/// Binary comparison between a column value (left) and a parameter value
/// (right). Stateless; evaluation is total over same-kind values that are
/// naturally ordered or timestamps.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComparisonOperator {
    #[display("=")]
    Equals,
    #[display("<")]
    LessThan,
    #[display("<=")]
    LessOrEquals,
    #[display(">")]
    GreaterThan,
    #[display(">=")]
    GreaterOrEquals,
}

impl ComparisonOperator {
    pub const ALL: [Self; 5] = [
        Self::Equals,
        Self::LessThan,
        Self::LessOrEquals,
        Self::GreaterThan,
        Self::GreaterOrEquals,
    ];

    #[must_use]
    pub const fn is_ordering(self) -> bool {
        !matches!(self, Self::Equals)
    }

    /// Evaluate `left <op> right`.
    ///
    /// Rules, in order:
    /// - null = null is true; null never orders against anything
    /// - exactly one null operand is false for every operator
    /// - operands of different kinds are rejected
    /// - equality is structural
    /// - ordering requires a naturally ordered kind or a timestamp
    pub fn eval(self, left: &Value, right: &Value) -> Result<bool, QueryError> {
        match (left.is_null(), right.is_null()) {
            (true, true) => return Ok(matches!(self, Self::Equals)),
            (true, false) | (false, true) => return Ok(false),
            (false, false) => {}
        }

        let (left_kind, right_kind) = (left.kind(), right.kind());
        if left_kind != right_kind {
            return Err(QueryError::OperandTypeMismatch {
                left: left_kind,
                right: right_kind,
            });
        }

        if !self.is_ordering() {
            return Ok(left == right);
        }

        let ordering = strict_order_cmp(left, right).ok_or(QueryError::UnorderedOperand {
            operator: self,
            kind: left_kind,
        })?;

        Ok(self.accepts(ordering))
    }

    const fn accepts(self, ordering: Ordering) -> bool {
        match self {
            Self::Equals => matches!(ordering, Ordering::Equal),
            Self::LessThan => matches!(ordering, Ordering::Less),
            Self::LessOrEquals => !matches!(ordering, Ordering::Greater),
            Self::GreaterThan => matches!(ordering, Ordering::Greater),
            Self::GreaterOrEquals => !matches!(ordering, Ordering::Less),
        }
    }
}

///
/// LogicalOperator
///
/// Operator joining the parameters and children of one predicate node.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogicalOperator {
    #[display("AND")]
    And,
    #[display("OR")]
    Or,
}
