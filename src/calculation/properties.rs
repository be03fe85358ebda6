//! Property tests for the calculation layer.
//!
//! These cover the engine-wide guarantees: determinism of the calculator,
//! non-negative counters, breakdown reconciliation, and order-independent
//! ledger folds.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{
    ApprovalStatus, AttendanceRecord, CompensationConfig, HalfDayCredit, LedgerKind, PayBasis,
    PayPeriod, SalaryLedgerEntry, SalaryRecord, SalaryStatus, StatutoryRates,
};

use super::breakdown::verify_breakdown;
use super::ledger::reconcile;
use super::salary::calculate_salary;

fn test_config() -> CompensationConfig {
    CompensationConfig {
        basis: PayBasis::Daily {
            daily_rate: Decimal::from(1000),
        },
        contracted_days: 26,
        standard_hours_per_day: Decimal::from(8),
        day_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        half_day_threshold: Decimal::from(4),
        half_day_credit: HalfDayCredit::Half,
        overtime_multiplier: Decimal::new(15, 1),
        late_penalty_per_minute: Some(Decimal::from(2)),
        absence_penalty_per_day: Some(Decimal::from(100)),
        statutory: StatutoryRates {
            eligible: true,
            pf_percent: Decimal::from(12),
            esi_percent: Decimal::new(75, 2),
            esi_wage_ceiling: Decimal::from(21000),
        },
    }
}

fn period() -> PayPeriod {
    PayPeriod {
        month: 1,
        year: 2026,
    }
}

/// Per-day attendance: `None` for no record, otherwise (late minutes,
/// worked minutes).
fn day_strategy() -> impl Strategy<Value = Option<(i64, i64)>> {
    prop_oneof![
        2 => Just(None::<(i64, i64)>),
        5 => ((0i64..=120, 60i64..=720)).prop_map(Some),
    ]
}

fn records_from(days: Vec<Option<(i64, i64)>>) -> Vec<AttendanceRecord> {
    days.into_iter()
        .enumerate()
        .filter_map(|(index, day)| {
            let (late_minutes, worked_minutes) = day?;
            let date = NaiveDate::from_ymd_opt(2026, 1, index as u32 + 1).unwrap();
            let punch_in = date.and_time(NaiveTime::from_hms_opt(9, 0, 0).unwrap())
                + Duration::minutes(late_minutes);
            Some(AttendanceRecord {
                staff_id: "emp_001".to_string(),
                date,
                punch_in: Some(punch_in),
                punch_out: Some(punch_in + Duration::minutes(worked_minutes)),
                working_hours: None,
                status: ApprovalStatus::Approved,
            })
        })
        .collect()
}

fn entry_strategy() -> impl Strategy<Value = SalaryLedgerEntry> {
    (0u8..3, -2_000_000i64..=2_000_000, 0u64..u64::MAX).prop_map(|(kind, cents, id)| {
        let kind = match kind {
            0 => LedgerKind::Payment,
            1 => LedgerKind::Deduction,
            _ => LedgerKind::Recovery,
        };
        SalaryLedgerEntry {
            id: Uuid::from_u64_pair(1, id),
            salary_id: Uuid::from_u128(1),
            staff_id: "emp_001".to_string(),
            kind,
            amount: Decimal::new(cents, 2),
            reason: "property posting".to_string(),
            posted_by: "admin_01".to_string(),
            posted_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    })
}

fn salary_with_net(net: Decimal) -> SalaryRecord {
    SalaryRecord {
        id: Uuid::from_u128(1),
        staff_id: "emp_001".to_string(),
        period: period(),
        total_working_days: 26,
        half_day_count: 0,
        absent_day_count: 0,
        total_working_hours: Decimal::from(208),
        overtime_hours: Decimal::ZERO,
        late_minutes: 0,
        base_amount: net,
        overtime_amount: Decimal::ZERO,
        penalty_amount: Decimal::ZERO,
        deduction_amount: Decimal::ZERO,
        gross_amount: net,
        net_amount: net,
        status: SalaryStatus::Approved,
        paid_at: None,
    }
}

proptest! {
    /// Calculating twice over identical inputs yields identical output.
    #[test]
    fn calculation_is_deterministic(days in proptest::collection::vec(day_strategy(), 28)) {
        let config = test_config();
        let records = records_from(days);

        let first = calculate_salary(Uuid::nil(), "emp_001", period(), &config, &records).unwrap();
        let second = calculate_salary(Uuid::nil(), "emp_001", period(), &config, &records).unwrap();

        prop_assert_eq!(first.record, second.record);
        prop_assert_eq!(first.breakdown, second.breakdown);
        prop_assert_eq!(first.audit_trace, second.audit_trace);
    }

    /// Attendance counters never go negative, whatever the month looks like.
    #[test]
    fn counters_are_non_negative(days in proptest::collection::vec(day_strategy(), 28)) {
        let config = test_config();
        let records = records_from(days);

        let record = calculate_salary(Uuid::nil(), "emp_001", period(), &config, &records)
            .unwrap()
            .record;

        prop_assert!(record.overtime_hours >= Decimal::ZERO);
        prop_assert!(record.late_minutes >= 0);
        prop_assert!(record.total_working_hours >= Decimal::ZERO);
        prop_assert!(record.total_working_days + record.absent_day_count >= config.contracted_days);
    }

    /// Breakdown entries reconcile to the net amount for every computed salary.
    #[test]
    fn breakdown_always_reconciles(days in proptest::collection::vec(day_strategy(), 28)) {
        let config = test_config();
        let records = records_from(days);

        let computation =
            calculate_salary(Uuid::nil(), "emp_001", period(), &config, &records).unwrap();
        prop_assert!(verify_breakdown(&computation.record, &computation.breakdown).is_ok());
    }

    /// Reconciliation is invariant under permutation of the ledger history.
    #[test]
    fn reconciliation_is_permutation_invariant(
        (entries, shuffled) in proptest::collection::vec(entry_strategy(), 0..16)
            .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
    ) {
        let record = salary_with_net(Decimal::from(20000));

        let original = reconcile(&record, &entries).unwrap();
        let permuted = reconcile(&record, &shuffled).unwrap();

        prop_assert_eq!(original, permuted);
    }
}
