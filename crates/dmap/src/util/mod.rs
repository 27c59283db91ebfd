//! Utility modules for DMAP.

pub mod datetime;

pub use datetime::{DateTimeParseError, format_timestamp_rfc3339, parse_timestamp_rfc3339};
