//! Work detail model: the output of the shift calculator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Pay-relevant metrics for a single interval of work.
///
/// Hours are rounded to two decimal places; the expense amount is exact.
///
/// # Example
///
/// ```
/// use shift_engine::models::WorkDetails;
/// use rust_decimal::Decimal;
///
/// let zero = WorkDetails::zero();
/// assert_eq!(zero.duration_hours, Decimal::ZERO);
/// assert_eq!(zero.night_hours, Decimal::ZERO);
/// assert_eq!(zero.expense_euro, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorkDetails {
    /// Total worked hours.
    pub duration_hours: Decimal,
    /// Hours falling inside the night window.
    pub night_hours: Decimal,
    /// Flat expense allowance in euro.
    pub expense_euro: Decimal,
}

impl WorkDetails {
    /// All-zero details, used for rejected intervals.
    pub fn zero() -> Self {
        Self::default()
    }
}
