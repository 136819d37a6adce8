use derive_more::Deref;
use serde::Serialize;
use std::fmt;

///
/// FieldMask
///
/// Ordered, de-duplicated set of field paths to project. Nested fields are
/// dot-qualified (`address.city`). A query without a mask projects every
/// field.
///

#[derive(Clone, Debug, Default, Deref, Eq, PartialEq, Serialize)]
pub struct FieldMask {
    paths: Vec<String>,
}

impl FieldMask {
    /// Build a mask; repeated paths keep their first position.
    #[must_use]
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut mask = Self::default();
        for path in paths {
            mask.push(path.into());
        }

        mask
    }

    #[must_use]
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    #[must_use]
    pub fn includes(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    fn push(&mut self, path: String) {
        if !self.includes(&path) {
            self.paths.push(path);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for FieldMask {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl fmt::Display for FieldMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.paths.join(", "))
    }
}
