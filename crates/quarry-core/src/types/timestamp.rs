use crate::{
    traits::FieldValue,
    value::{Value, ValueKind},
};
use chrono::{DateTime, SecondsFormat};
use serde::Serialize;
use std::{cmp::Ordering, fmt};
use thiserror::Error as ThisError;

const NANOS_PER_SECOND: i64 = 1_000_000_000;

///
/// Timestamp
///
/// Point on the UTC time line as whole seconds since the Unix epoch plus a
/// nanosecond adjustment in `0..1_000_000_000`. Timestamps are ordered by
/// their linear time value, not field by field.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize)]
pub struct Timestamp {
    seconds: i64,
    nanos: u32,
}

impl Timestamp {
    pub const EPOCH: Self = Self {
        seconds: 0,
        nanos: 0,
    };

    /// Construct from seconds and a nanosecond adjustment.
    /// Out-of-range nanoseconds carry into the seconds field.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn new(seconds: i64, nanos: i64) -> Self {
        let carry = nanos.div_euclid(NANOS_PER_SECOND);
        let nanos = nanos.rem_euclid(NANOS_PER_SECOND);

        Self {
            seconds: seconds.saturating_add(carry),
            nanos: nanos as u32,
        }
    }

    /// Construct from whole seconds.
    #[must_use]
    pub const fn from_seconds(seconds: i64) -> Self {
        Self { seconds, nanos: 0 }
    }

    /// Construct from milliseconds since the epoch.
    #[must_use]
    pub const fn from_millis(ms: i64) -> Self {
        Self::new(ms.div_euclid(1_000), ms.rem_euclid(1_000) * 1_000_000)
    }

    pub fn parse_rfc3339(s: &str) -> Result<Self, TimestampParseError> {
        let dt = DateTime::parse_from_rfc3339(s).map_err(|err| TimestampParseError {
            input: s.to_string(),
            reason: err.to_string(),
        })?;

        Ok(Self::new(dt.timestamp(), i64::from(dt.timestamp_subsec_nanos())))
    }

    #[must_use]
    pub const fn seconds(self) -> i64 {
        self.seconds
    }

    #[must_use]
    pub const fn nanos(self) -> u32 {
        self.nanos
    }

    /// Linear time value in nanoseconds since the epoch.
    #[must_use]
    pub const fn as_nanos(self) -> i128 {
        self.seconds as i128 * NANOS_PER_SECOND as i128 + self.nanos as i128
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_nanos().cmp(&other.as_nanos())
    }
}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match DateTime::from_timestamp(self.seconds, self.nanos) {
            Some(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            None => write!(f, "{}.{:09}s", self.seconds, self.nanos),
        }
    }
}

impl FieldValue for Timestamp {
    const KIND: ValueKind = ValueKind::Timestamp;

    fn to_value(&self) -> Value {
        Value::Timestamp(*self)
    }
}

///
/// TimestampParseError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("timestamp parse error for '{input}': {reason}")]
pub struct TimestampParseError {
    pub input: String,
    pub reason: String,
}

///
/// TESTS
///
