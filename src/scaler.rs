//! # Scaler
//!
//! Pure numeric scaling with factor validation. Factor bounds are a UI
//! concern handled by the controller's clamping; this layer only rejects
//! factors that are not usable at all, so it stays independently testable
//! with any positive factor.

use tracing::trace;

use crate::errors::{AppError, AppResult};

/// Multiply a quantity value by a factor.
///
/// Fails for non-positive or non-finite factors; the controller never
/// produces such a factor after clamping, so an error here indicates a
/// programming mistake in the caller rather than bad user input.
pub fn scale(value: f64, factor: f64) -> AppResult<f64> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(AppError::Scale(format!(
            "factor must be a positive finite number, got {}",
            factor
        )));
    }
    let scaled = value * factor;
    trace!("Scaled {} by {} -> {}", value, factor, scaled);
    Ok(scaled)
}
