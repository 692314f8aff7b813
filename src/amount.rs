//! # Transaction Amount Formatting
//!
//! Renders a transaction amount into the tag-54 field convention: at most
//! two decimal places, with unnecessary fractional precision omitted
//! (`50000` → `"50000"`, `50000.5` → `"50000.5"`). Validation is
//! defensive: callers are expected to hand over positive amounts already,
//! but the codec re-checks rather than assumes.

use thiserror::Error;

use crate::MAX_AMOUNT;

/// Errors raised for amounts the protocol cannot carry.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AmountError {
    /// NaN or infinite input.
    #[error("amount must be a finite number")]
    NonFinite,

    /// Zero or negative input.
    #[error("amount must be greater than zero, got {0}")]
    NotPositive(f64),

    /// Input above the protocol/business transaction ceiling.
    #[error("amount {amount} exceeds the maximum of {max}")]
    ExceedsMaximum { amount: f64, max: f64 },
}

/// Render `amount` as a tag-54 field value.
///
/// Fixes the amount to two decimal places, then strips trailing zeros and
/// an orphan decimal point.
///
/// # Errors
/// [`AmountError`] for non-finite, non-positive, or above-ceiling input.
/// Exactly [`MAX_AMOUNT`] is accepted.
pub fn format_amount(amount: f64) -> Result<String, AmountError> {
    if !amount.is_finite() {
        return Err(AmountError::NonFinite);
    }
    if amount <= 0.0 {
        return Err(AmountError::NotPositive(amount));
    }
    if amount > MAX_AMOUNT {
        return Err(AmountError::ExceedsMaximum {
            amount,
            max: MAX_AMOUNT,
        });
    }

    let fixed = format!("{amount:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        // Sub-cent amounts round down to the field's zero form.
        Ok("0".to_string())
    } else {
        Ok(trimmed.to_string())
    }
}
