//! Column model: typed accessors over record types and their type-erased form.

mod column;


pub use column::{Column, ColumnRef};
