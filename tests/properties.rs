//! Property tests for the work detail calculator.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use rust_decimal::Decimal;

use shift_engine::calculation::{WorkDetailCalculator, hours_between, round_hours};
use shift_engine::config::{ExpenseRule, NightWindow, WorkRules};
use shift_engine::error::EngineError;

fn base() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

prop_compose! {
    /// A shift start within one year and a length of up to three days.
    fn arb_interval()(
        start_secs in 0i64..31_536_000,
        length_secs in 0i64..259_200,
    ) -> (NaiveDateTime, NaiveDateTime) {
        let start = base() + Duration::seconds(start_secs);
        (start, start + Duration::seconds(length_secs))
    }
}

prop_compose! {
    fn arb_rules()(
        start_hour in 0u32..24,
        end_hour in 0u32..24,
        threshold in 0i64..24,
    ) -> WorkRules {
        WorkRules {
            night_window: NightWindow { start_hour, end_hour },
            expense: ExpenseRule {
                threshold_hours: Decimal::new(threshold, 0),
                ..ExpenseRule::default()
            },
        }
    }
}

proptest! {
    #[test]
    fn test_duration_is_rounded_elapsed_time((start, end) in arb_interval()) {
        let details = WorkDetailCalculator::default().compute(start, end).unwrap();
        prop_assert_eq!(details.duration_hours, round_hours(hours_between(start, end)));
    }

    #[test]
    fn test_night_hours_never_exceed_duration(
        (start, end) in arb_interval(),
        rules in arb_rules(),
    ) {
        let details = WorkDetailCalculator::new(rules).compute(start, end).unwrap();
        prop_assert!(details.night_hours >= Decimal::ZERO);
        prop_assert!(details.night_hours <= details.duration_hours);
    }

    #[test]
    fn test_compute_is_idempotent((start, end) in arb_interval()) {
        let calculator = WorkDetailCalculator::default();
        prop_assert_eq!(calculator.compute(start, end).unwrap(), calculator.compute(start, end).unwrap());
    }

    #[test]
    fn test_expense_is_all_or_nothing((start, end) in arb_interval()) {
        let details = WorkDetailCalculator::default().compute(start, end).unwrap();
        prop_assert!(
            details.expense_euro == Decimal::ZERO || details.expense_euro == Decimal::new(1300, 2)
        );
    }

    #[test]
    fn test_reversed_interval_is_rejected((start, end) in arb_interval()) {
        prop_assume!(end > start);
        let calculator = WorkDetailCalculator::default();
        let reversed = calculator.compute(end, start);
        prop_assert!(matches!(reversed, Err(EngineError::InvalidInterval { .. })), "expected InvalidInterval error");
        prop_assert_eq!(calculator.compute_or_zero(end, start), Default::default());
    }
}
