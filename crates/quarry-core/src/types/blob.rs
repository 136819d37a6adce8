use crate::{
    traits::FieldValue,
    value::{Value, ValueKind},
};
use serde::Serialize;
use serde_bytes::ByteBuf;
use std::fmt::{self, Display};

///
/// Blob
///
/// Opaque binary value; raw byte access is explicit via accessors (no `Deref`).
/// Blobs support equality but carry no ordering.
/// Display prints a size summary; it does not print content.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize)]
pub struct Blob(ByteBuf);

impl Blob {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Clone the blob into a new byte vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    /// Length of the blob in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the blob is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[blob ({} bytes)]", self.0.len())
    }
}

impl FieldValue for Blob {
    const KIND: ValueKind = ValueKind::Blob;

    fn to_value(&self) -> Value {
        Value::Blob(self.clone())
    }
}

impl From<Vec<u8>> for Blob {
    fn from(bytes: Vec<u8>) -> Self {
        Self(ByteBuf::from(bytes))
    }
}

impl From<&[u8]> for Blob {
    fn from(bytes: &[u8]) -> Self {
        Self(ByteBuf::from(bytes))
    }
}
