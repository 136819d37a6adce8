use crate::{
    error::QueryError,
    model::{Column, ColumnRef},
    query::predicate::ComparisonOperator,
    traits::FieldValue,
    value::Value,
};
use serde::{Serialize, Serializer, ser::SerializeStruct};
use std::fmt;

///
/// Parameter
///
/// Leaf condition `column <operator> value` over records of type `R`.
/// Immutable once constructed.
///

pub struct Parameter<R> {
    column: ColumnRef<R>,
    operator: ComparisonOperator,
    value: Value,
}

impl<R> Parameter<R> {
    #[must_use]
    pub const fn new(column: ColumnRef<R>, operator: ComparisonOperator, value: Value) -> Self {
        Self {
            column,
            operator,
            value,
        }
    }

    #[must_use]
    pub const fn column(&self) -> &ColumnRef<R> {
        &self.column
    }

    #[must_use]
    pub const fn operator(&self) -> ComparisonOperator {
        self.operator
    }

    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    /// Evaluate this condition against one record.
    pub fn matches(&self, record: &R) -> Result<bool, QueryError> {
        let actual = self.column.read(record);

        self.operator.eval(&actual, &self.value)
    }
}

impl<R: 'static> Parameter<R> {
    /// Build a parameter from a typed column and a value of its type.
    #[must_use]
    pub fn of<V: FieldValue + 'static>(
        column: &Column<R, V>,
        operator: ComparisonOperator,
        value: impl Into<V>,
    ) -> Self {
        Self::new(column.to_ref(), operator, value.into().to_value())
    }
}

impl<R> Clone for Parameter<R> {
    fn clone(&self) -> Self {
        Self {
            column: self.column.clone(),
            operator: self.operator,
            value: self.value.clone(),
        }
    }
}

impl<R> PartialEq for Parameter<R> {
    fn eq(&self, other: &Self) -> bool {
        self.column == other.column && self.operator == other.operator && self.value == other.value
    }
}

impl<R> Eq for Parameter<R> {}

impl<R> fmt::Debug for Parameter<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("column", &self.column.name())
            .field("operator", &self.operator)
            .field("value", &self.value)
            .finish()
    }
}

impl<R> fmt::Display for Parameter<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.column, self.operator, self.value)
    }
}

impl<R> Serialize for Parameter<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Parameter", 3)?;
        state.serialize_field("column", self.column.name())?;
        state.serialize_field("operator", &self.operator)?;
        state.serialize_field("value", &self.value)?;
        state.end()
    }
}
