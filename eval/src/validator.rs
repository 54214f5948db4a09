//! Computed-result validation.

use crate::error::{Error, ErrorKind};

/// Bound on the magnitude of operands and computed results. Mirroring the
/// input bound on the output side prevents unbounded magnitude growth from
/// chained operations.
pub const MAGNITUDE_LIMIT: f64 = 1e100;

/// Validates a computed value before it is handed back to the caller.
///
/// On success the value is returned unchanged; no rounding or truncation is
/// applied (display formatting is a UI concern).
///
/// # Errors
///
/// Returns [`ErrorKind::NonFiniteResult`] if the value is NaN or infinite,
/// and [`ErrorKind::ResultOutOfRange`] if its magnitude is at least
/// [`MAGNITUDE_LIMIT`].
pub fn check_result(value: f64) -> Result<f64, Error> {
    if !value.is_finite() {
        Err(Error::new(ErrorKind::NonFiniteResult))
    } else if value.abs() >= MAGNITUDE_LIMIT {
        Err(Error::new(ErrorKind::ResultOutOfRange))
    } else {
        Ok(value)
    }
}
