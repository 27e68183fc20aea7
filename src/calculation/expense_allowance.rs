//! Expense allowance calculation.
//!
//! A single-tier rule: one flat amount per shift once the shift runs
//! strictly longer than the threshold. No proration, no per-day stacking.

use rust_decimal::Decimal;

use crate::config::ExpenseRule;

/// Returns the expense allowance for a shift of `duration_hours`.
///
/// The comparison uses unrounded hours, so a shift of exactly the threshold
/// earns nothing.
///
/// # Example
///
/// ```
/// use shift_engine::calculation::calculate_expense_allowance;
/// use shift_engine::config::ExpenseRule;
/// use rust_decimal::Decimal;
///
/// let rule = ExpenseRule::default();
/// assert_eq!(calculate_expense_allowance(Decimal::new(8, 0), &rule), Decimal::ZERO);
/// assert_eq!(calculate_expense_allowance(Decimal::new(9, 0), &rule), Decimal::new(1300, 2));
/// ```
pub fn calculate_expense_allowance(duration_hours: Decimal, rule: &ExpenseRule) -> Decimal {
    if duration_hours > rule.threshold_hours {
        rule.amount_euro
    } else {
        Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_just_over_threshold_qualifies() {
        let rule = ExpenseRule::default();
        assert_eq!(calculate_expense_allowance(dec("8.0001"), &rule), dec("13.00"));
    }

    #[test]
    fn test_short_shift_earns_nothing() {
        let rule = ExpenseRule::default();
        assert_eq!(calculate_expense_allowance(dec("0"), &rule), Decimal::ZERO);
        assert_eq!(calculate_expense_allowance(dec("7.99"), &rule), Decimal::ZERO);
    }

    #[test]
    fn test_very_long_shift_still_single_amount() {
        let rule = ExpenseRule::default();
        assert_eq!(calculate_expense_allowance(dec("30"), &rule), dec("13.00"));
    }

    #[test]
    fn test_configured_rule() {
        let rule = ExpenseRule {
            threshold_hours: dec("10"),
            amount_euro: dec("20.50"),
        };
        assert_eq!(calculate_expense_allowance(dec("9"), &rule), Decimal::ZERO);
        assert_eq!(calculate_expense_allowance(dec("10.5"), &rule), dec("20.50"));
    }
}
