use crate::{
    model::Column,
    query::predicate::{ComparisonOperator, Parameter},
    traits::FieldValue,
};

///
/// ParameterSink
///
/// Builder that accepts leaf parameters at its current nesting level.
///

pub trait ParameterSink<R>: Sized {
    #[must_use]
    fn push_parameter(self, parameter: Parameter<R>) -> Self;
}

///
/// WhereClause
///
/// Pending condition on one column. Each comparison appends one parameter
/// to the originating builder and hands the builder back.
///

#[must_use = "a where clause does nothing until a comparison is applied"]
pub struct WhereClause<B, R, V> {
    builder: B,
    column: Column<R, V>,
}

impl<B, R, V> WhereClause<B, R, V> {
    pub(crate) const fn new(builder: B, column: Column<R, V>) -> Self {
        Self { builder, column }
    }
}

impl<B, R, V> WhereClause<B, R, V>
where
    B: ParameterSink<R>,
    R: 'static,
    V: FieldValue + 'static,
{
    pub fn is(self, value: impl Into<V>) -> B {
        self.compare(ComparisonOperator::Equals, value)
    }

    pub fn is_less_than(self, value: impl Into<V>) -> B {
        self.compare(ComparisonOperator::LessThan, value)
    }

    pub fn is_less_or_equal_to(self, value: impl Into<V>) -> B {
        self.compare(ComparisonOperator::LessOrEquals, value)
    }

    pub fn is_greater_than(self, value: impl Into<V>) -> B {
        self.compare(ComparisonOperator::GreaterThan, value)
    }

    pub fn is_greater_or_equal_to(self, value: impl Into<V>) -> B {
        self.compare(ComparisonOperator::GreaterOrEquals, value)
    }

    fn compare(self, operator: ComparisonOperator, value: impl Into<V>) -> B {
        let parameter = Parameter::of(&self.column, operator, value);

        self.builder.push_parameter(parameter)
    }
}
