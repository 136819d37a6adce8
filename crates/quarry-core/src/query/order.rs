use crate::{
    error::QueryError,
    model::{Column, ColumnRef},
    traits::FieldValue,
    value::strict_order_cmp,
};
use derive_more::Display;
use serde::{Serialize, Serializer, ser::SerializeStruct};
use std::{cmp::Ordering, fmt};

///
/// OrderDirection
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderDirection {
    #[display("ASC")]
    Asc,
    #[display("DESC")]
    Desc,
}

///
/// SortDirective
///
/// One `(column, direction)` ordering key of a query.
///

pub struct SortDirective<R> {
    column: ColumnRef<R>,
    direction: OrderDirection,
}

impl<R> SortDirective<R> {
    #[must_use]
    pub const fn new(column: ColumnRef<R>, direction: OrderDirection) -> Self {
        Self { column, direction }
    }

    #[must_use]
    pub const fn column(&self) -> &ColumnRef<R> {
        &self.column
    }

    #[must_use]
    pub const fn direction(&self) -> OrderDirection {
        self.direction
    }

    /// Order two records by this directive.
    ///
    /// Nulls sort before every other value in ascending order. Values must
    /// share a kind that supports ordering.
    pub fn compare(&self, left: &R, right: &R) -> Result<Ordering, QueryError> {
        let (left, right) = (self.column.read(left), self.column.read(right));

        let ordering = match (left.is_null(), right.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => {
                if left.kind() != right.kind() {
                    return Err(QueryError::OperandTypeMismatch {
                        left: left.kind(),
                        right: right.kind(),
                    });
                }

                strict_order_cmp(&left, &right).ok_or(QueryError::UnsortableColumn {
                    column: self.column.name(),
                    kind: left.kind(),
                })?
            }
        };

        Ok(match self.direction {
            OrderDirection::Asc => ordering,
            OrderDirection::Desc => ordering.reverse(),
        })
    }
}

impl<R: 'static> SortDirective<R> {
    #[must_use]
    pub fn ascending<V: FieldValue + 'static>(column: &Column<R, V>) -> Self {
        Self::new(column.to_ref(), OrderDirection::Asc)
    }

    #[must_use]
    pub fn descending<V: FieldValue + 'static>(column: &Column<R, V>) -> Self {
        Self::new(column.to_ref(), OrderDirection::Desc)
    }
}

impl<R> Clone for SortDirective<R> {
    fn clone(&self) -> Self {
        Self {
            column: self.column.clone(),
            direction: self.direction,
        }
    }
}

impl<R> PartialEq for SortDirective<R> {
    fn eq(&self, other: &Self) -> bool {
        self.column == other.column && self.direction == other.direction
    }
}

impl<R> Eq for SortDirective<R> {}

impl<R> fmt::Debug for SortDirective<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortDirective")
            .field("column", &self.column.name())
            .field("direction", &self.direction)
            .finish()
    }
}

impl<R> fmt::Display for SortDirective<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.column, self.direction)
    }
}

impl<R> Serialize for SortDirective<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SortDirective", 2)?;
        state.serialize_field("column", self.column.name())?;
        state.serialize_field("direction", &self.direction)?;
        state.end()
    }
}
