use crate::{
    traits::FieldValue,
    value::{Value, ValueKind},
};
use derive_more::Display;
use serde::{Serialize, Serializer};
use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};

///
/// Float64
///
/// -0.0 canonically stored as 0.0 and every NaN payload collapsed to one
/// canonical NaN, so Eq/Hash/Ord agree bit-for-bit.
///

#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, Display)]
pub struct Float64(f64);

impl Float64 {
    #[must_use]
    pub fn new(v: f64) -> Self {
        if v.is_nan() {
            Self(f64::NAN)
        } else if v == 0.0 {
            Self(0.0)
        } else {
            Self(v)
        }
    }

    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }

    #[must_use]
    pub const fn to_be_bytes(&self) -> [u8; 8] {
        self.0.to_bits().to_be_bytes()
    }
}

impl Eq for Float64 {}

impl PartialEq for Float64 {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Hash for Float64 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.to_bits()); // stable 8-byte IEEE-754
    }
}

impl Ord for Float64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for Float64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for Float64 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

impl FieldValue for Float64 {
    const KIND: ValueKind = ValueKind::Float64;

    fn to_value(&self) -> Value {
        Value::Float64(*self)
    }
}

impl From<f64> for Float64 {
    fn from(v: f64) -> Self {
        Self::new(v)
    }
}

impl From<f32> for Float64 {
    fn from(v: f32) -> Self {
        Self::new(f64::from(v))
    }
}

impl From<i32> for Float64 {
    fn from(n: i32) -> Self {
        Self::new(f64::from(n))
    }
}

impl From<Float64> for f64 {
    fn from(x: Float64) -> Self {
        x.0
    }
}

///
/// TESTS
///
