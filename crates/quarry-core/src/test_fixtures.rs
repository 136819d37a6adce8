//! Shared record type and column table for unit tests.

use crate::{
    model::Column,
    traits::{EntityKind, FieldValue},
    types::{Blob, Timestamp},
    value::{Value, ValueKind},
};

///
/// Address
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Address {
    pub(crate) city: String,
    pub(crate) zip: String,
}

impl FieldValue for Address {
    const KIND: ValueKind = ValueKind::Record;

    fn to_value(&self) -> Value {
        Value::Record(vec![
            ("city".to_string(), Value::Text(self.city.clone())),
            ("zip".to_string(), Value::Text(self.zip.clone())),
        ])
    }
}

///
/// Person
///

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Person {
    pub(crate) id: u64,
    pub(crate) name: String,
    pub(crate) age: u32,
    pub(crate) email: Option<String>,
    pub(crate) score: f64,
    pub(crate) active: bool,
    pub(crate) joined: Timestamp,
    pub(crate) avatar: Blob,
    pub(crate) address: Address,
}

impl Person {
    pub(crate) fn new(id: u64, name: &str, age: u32) -> Self {
        Self {
            id,
            name: name.to_string(),
            age,
            ..Self::default()
        }
    }

    pub(crate) fn with_email(mut self, email: &str) -> Self {
        self.email = Some(email.to_string());
        self
    }

    pub(crate) const fn with_joined(mut self, joined: Timestamp) -> Self {
        self.joined = joined;
        self
    }
}

impl EntityKind for Person {
    type Id = u64;

    const ENTITY_NAME: &'static str = "person";

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

pub(crate) const ID: Column<Person, u64> = Column::define("id", |p| p.id);
pub(crate) const NAME: Column<Person, String> = Column::define("name", |p| p.name.clone());
pub(crate) const AGE: Column<Person, u32> = Column::define("age", |p| p.age);
pub(crate) const EMAIL: Column<Person, Option<String>> =
    Column::define("email", |p| p.email.clone());
pub(crate) const SCORE: Column<Person, f64> = Column::define("score", |p| p.score);
pub(crate) const ACTIVE: Column<Person, bool> = Column::define("active", |p| p.active);
pub(crate) const JOINED: Column<Person, Timestamp> = Column::define("joined", |p| p.joined);
pub(crate) const AVATAR: Column<Person, Blob> = Column::define("avatar", |p| p.avatar.clone());
pub(crate) const ADDRESS: Column<Person, Address> =
    Column::define("address", |p| p.address.clone());
