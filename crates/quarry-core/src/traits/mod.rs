use crate::value::{Value, ValueKind};
use std::fmt::Debug;

///
/// EntityKind
///
/// Record type addressable by queries.
/// Supplies the id type and the id accessor used by id constraints.
///

pub trait EntityKind: 'static {
    type Id: Clone + Debug + Eq + Send + Sync + 'static;

    /// Stable record-type name used in logs and metrics.
    const ENTITY_NAME: &'static str;

    fn id(&self) -> &Self::Id;
}

///
/// FieldValue
///
/// Conversion from a typed column value into the dynamic `Value` carried by
/// predicate parameters. `KIND` is the declared value type of a column.
///

pub trait FieldValue {
    const KIND: ValueKind;

    fn to_value(&self) -> Value;
}

impl FieldValue for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl FieldValue for String {
    const KIND: ValueKind = ValueKind::Text;

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl FieldValue for &str {
    const KIND: ValueKind = ValueKind::Text;

    fn to_value(&self) -> Value {
        Value::Text((*self).to_string())
    }
}

impl FieldValue for f32 {
    const KIND: ValueKind = ValueKind::Float64;

    fn to_value(&self) -> Value {
        Value::Float64((*self).into())
    }
}

impl FieldValue for f64 {
    const KIND: ValueKind = ValueKind::Float64;

    fn to_value(&self) -> Value {
        Value::Float64((*self).into())
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    const KIND: ValueKind = T::KIND;

    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    const KIND: ValueKind = ValueKind::List;

    fn to_value(&self) -> Value {
        Value::List(self.iter().map(FieldValue::to_value).collect())
    }
}

impl<T: FieldValue + ?Sized> FieldValue for Box<T> {
    const KIND: ValueKind = T::KIND;

    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

// Integer widening into the signed/unsigned value families.
macro_rules! impl_field_value {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl FieldValue for $type {
                const KIND: ValueKind = ValueKind::$variant;

                fn to_value(&self) -> Value {
                    Value::$variant((*self).into())
                }
            }
        )*
    };
}

impl_field_value!(
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u8 => Uint,
    u16 => Uint,
    u32 => Uint,
    u64 => Uint,
);

///
/// TESTS
///
