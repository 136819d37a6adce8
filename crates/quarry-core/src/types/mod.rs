mod blob;
mod float64;
mod timestamp;

pub use blob::Blob;
pub use float64::Float64;
pub use timestamp::{Timestamp, TimestampParseError};
