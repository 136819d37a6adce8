use crate::{
    error::QueryError,
    traits::FieldValue,
    value::{Value, ValueKind},
};
use std::{fmt, sync::Arc};

///
/// Column
///
/// Typed, named accessor over a record type `R` yielding values of type `V`.
/// Columns are immutable and `Copy`; they are created once per record type,
/// usually as constants. Equality is by name only.
///

pub struct Column<R, V> {
    name: &'static str,
    getter: fn(&R) -> V,
}

impl<R, V: FieldValue> Column<R, V> {
    /// Create a column, rejecting blank names.
    pub fn new(name: &'static str, getter: fn(&R) -> V) -> Result<Self, QueryError> {
        if is_blank(name) {
            return Err(QueryError::BlankColumnName);
        }

        Ok(Self { name, getter })
    }

    /// Create a column in a constant context.
    ///
    /// A blank name fails constant evaluation, so column tables declared as
    /// `const` items are checked at compile time.
    #[must_use]
    pub const fn define(name: &'static str, getter: fn(&R) -> V) -> Self {
        assert!(!is_blank(name), "column name must not be blank");

        Self { name, getter }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Declared value type of this column.
    #[must_use]
    pub const fn value_kind(&self) -> ValueKind {
        V::KIND
    }

    /// Read the typed value from a record.
    pub fn get(&self, record: &R) -> V {
        (self.getter)(record)
    }

    /// Read the value from a record as a dynamic `Value`.
    pub fn read(&self, record: &R) -> Value {
        self.get(record).to_value()
    }
}

impl<R: 'static, V: FieldValue + 'static> Column<R, V> {
    /// Erase the value type, keeping name, kind, and accessor.
    #[must_use]
    pub fn to_ref(&self) -> ColumnRef<R> {
        let getter = self.getter;

        ColumnRef {
            name: self.name,
            kind: V::KIND,
            reader: Arc::new(move |record: &R| getter(record).to_value()),
        }
    }
}

impl<R, V> Clone for Column<R, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R, V> Copy for Column<R, V> {}

impl<R, V> PartialEq for Column<R, V> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<R, V> Eq for Column<R, V> {}

impl<R, V> fmt::Debug for Column<R, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column").field("name", &self.name).finish()
    }
}

impl<R: 'static, V: FieldValue + 'static> From<&Column<R, V>> for ColumnRef<R> {
    fn from(column: &Column<R, V>) -> Self {
        column.to_ref()
    }
}

///
/// ColumnRef
///
/// Type-erased column stored inside parameters and sort directives.
/// Carries the column name, declared kind, and a shared accessor that
/// yields dynamic values. Equality is by name only.
///

pub struct ColumnRef<R> {
    name: &'static str,
    kind: ValueKind,
    reader: Arc<dyn Fn(&R) -> Value + Send + Sync>,
}

impl<R> ColumnRef<R> {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn value_kind(&self) -> ValueKind {
        self.kind
    }

    pub fn read(&self, record: &R) -> Value {
        (self.reader)(record)
    }
}

impl<R> Clone for ColumnRef<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            kind: self.kind,
            reader: Arc::clone(&self.reader),
        }
    }
}

impl<R> PartialEq for ColumnRef<R> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<R> Eq for ColumnRef<R> {}

impl<R> fmt::Debug for ColumnRef<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnRef")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl<R> fmt::Display for ColumnRef<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

// Const-evaluable blank check shared by `new` and `define`.
const fn is_blank(name: &str) -> bool {
    let bytes = name.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_whitespace() {
            return false;
        }
        i += 1;
    }

    true
}
