//! Validation rules for builder inputs
//!
//! Every rule runs synchronously inside the setter that uses it, so a bad
//! value is reported at the call site and never reaches the network.

use std::fmt::{Debug, Display};
use std::ops::RangeInclusive;

use crate::error::InvalidArgument;

/// Allowed result limit
pub const LIMIT_RANGE: RangeInclusive<u32> = 1..=100;

/// Allowed match score threshold
pub const THRESHOLD_RANGE: RangeInclusive<f32> = 0.01..=1.0;

/// Allowed relative coordinate for region feedback
pub const RELATIVE_COORDINATE_RANGE: RangeInclusive<f64> = 0.0..=1.0;

/// Validate that a value is within an inclusive range
///
/// Values that do not compare (NaN) are rejected.
pub fn in_range<T>(
    field: &'static str,
    value: T,
    range: RangeInclusive<T>,
) -> Result<T, InvalidArgument>
where
    T: PartialOrd + Display + Debug,
{
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(InvalidArgument::new(
            field,
            value,
            format!("[{}, {}]", range.start(), range.end()),
        ))
    }
}

pub fn limit(value: u32) -> Result<u32, InvalidArgument> {
    in_range("limit", value, LIMIT_RANGE)
}

pub fn threshold(value: f32) -> Result<f32, InvalidArgument> {
    in_range("threshold", value, THRESHOLD_RANGE)
}

pub fn relative_coordinate(field: &'static str, value: f64) -> Result<f64, InvalidArgument> {
    in_range(field, value, RELATIVE_COORDINATE_RANGE)
}
