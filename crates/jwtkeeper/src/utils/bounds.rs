//! Bounds validation utilities
//!
//! This module provides utilities for validating bounds on timestamps
//! and header field sizes.

use crate::error::{Error, Result};
use crate::limits::{MAX_TIMESTAMP, MIN_TIMESTAMP};

/// Check if timestamp is within acceptable bounds
pub(crate) fn validate_timestamp_bounds(claim: &str, value: i64) -> Result<()> {
    if !(MIN_TIMESTAMP..=MAX_TIMESTAMP).contains(&value) {
        return Err(Error::MalformedToken(format!(
            "claim '{claim}' out of bounds: {value} (valid range: {MIN_TIMESTAMP} to {MAX_TIMESTAMP})"
        )));
    }
    Ok(())
}

/// Apply clock leeway to a timestamp, saturating at the i64 range
pub(crate) fn apply_leeway(timestamp: i64, leeway_seconds: u64, add: bool) -> i64 {
    let leeway = i64::try_from(leeway_seconds).unwrap_or(i64::MAX);
    if add {
        timestamp.saturating_add(leeway)
    } else {
        timestamp.saturating_sub(leeway)
    }
}

/// Validate string field size
pub(crate) fn validate_field_size(field: &str, value: &str, max: usize) -> Result<()> {
    if value.len() > max {
        return Err(Error::MalformedToken(format!(
            "header field '{field}' too long: {} bytes (maximum: {max} bytes)",
            value.len()
        )));
    }
    Ok(())
}
