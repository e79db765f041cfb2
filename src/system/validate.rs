//! Parameter validation.

use crate::error::{DampError, Result};

/// Reject NaN and infinite values.
pub(crate) fn require_finite(param: &str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(DampError::invalid_argument(
            param,
            format!("must be finite, got {value}"),
        ));
    }
    Ok(value)
}

/// Reject values that are not finite and strictly positive.
pub(crate) fn require_positive(param: &str, value: f64) -> Result<f64> {
    require_finite(param, value)?;
    if value <= 0.0 {
        return Err(DampError::invalid_argument(
            param,
            format!("must be positive, got {value}"),
        ));
    }
    Ok(value)
}
