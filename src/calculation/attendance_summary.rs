//! Attendance aggregation over a salary period.
//!
//! This module folds a month of classified attendance records into the
//! working-day, overtime, and lateness totals the salary calculator
//! consumes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    ApprovalStatus, AttendanceRecord, AuditStep, AuditWarning, CompensationConfig, PayPeriod,
};

use super::classifier::{DayClass, classify_day};

/// Aggregated attendance for one staff member over one salary period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// Days attended (present or half-day).
    pub working_days: u32,
    /// Of the working days, how many were half-days.
    pub half_days: u32,
    /// Contracted days not attended; never negative.
    pub absent_days: u32,
    /// Days credited toward payout after applying the half-day policy.
    pub payable_days: Decimal,
    /// Total hours attended.
    pub total_hours: Decimal,
    /// Hours worked beyond the standard day length, summed per day.
    pub overtime_hours: Decimal,
    /// Minutes of lateness past the scheduled day start, summed per day.
    pub late_minutes: i64,
    /// The audit step recording this aggregation.
    pub audit_step: AuditStep,
    /// Warnings raised while aggregating (e.g. unapproved records counted).
    pub warnings: Vec<AuditWarning>,
}

/// Aggregates one period's attendance records for a staff member.
///
/// Every record is validated before classification: records belonging to a
/// different staff member, dated outside the period, or duplicated on a
/// single date are rejected with a [`EngineError::Validation`].
///
/// Aggregation rules:
/// - `working_days` counts days classified present or half-day.
/// - `payable_days` applies the configured half-day credit.
/// - `absent_days` is contracted days minus working days, floored at zero.
/// - Overtime is the per-day excess over the standard day length.
/// - Late minutes are punch-in minutes past the scheduled day start,
///   counted only for days that classify as attendance.
///
/// Records that are still pending approval count as attendance but raise a
/// warning so the caller can hold the salary back from approval.
pub fn summarize_attendance(
    staff_id: &str,
    period: PayPeriod,
    config: &CompensationConfig,
    records: &[AttendanceRecord],
    step_number: u32,
) -> EngineResult<AttendanceSummary> {
    let mut seen_dates: Vec<chrono::NaiveDate> = Vec::with_capacity(records.len());
    let mut present_days: u32 = 0;
    let mut half_days: u32 = 0;
    let mut total_hours = Decimal::ZERO;
    let mut overtime_hours = Decimal::ZERO;
    let mut late_minutes: i64 = 0;
    let mut pending_count: u32 = 0;

    for record in records {
        record.validate()?;

        if record.staff_id != staff_id {
            return Err(EngineError::Validation {
                staff_id: staff_id.to_string(),
                field: "staff_id".to_string(),
                message: format!(
                    "record on {} belongs to staff '{}'",
                    record.date, record.staff_id
                ),
            });
        }

        if !period.contains(record.date) {
            return Err(EngineError::Validation {
                staff_id: staff_id.to_string(),
                field: "date".to_string(),
                message: format!("record on {} is outside period {}", record.date, period),
            });
        }

        if seen_dates.contains(&record.date) {
            return Err(EngineError::Validation {
                staff_id: staff_id.to_string(),
                field: "date".to_string(),
                message: format!("duplicate record on {}", record.date),
            });
        }
        seen_dates.push(record.date);

        match classify_day(record, config.half_day_threshold) {
            DayClass::Present => present_days += 1,
            DayClass::HalfDay => half_days += 1,
            DayClass::Absent => continue,
        }

        if record.status == ApprovalStatus::Pending {
            pending_count += 1;
        }

        if let Some(hours) = record.worked_hours() {
            total_hours += hours;
            let excess = hours - config.standard_hours_per_day;
            if excess > Decimal::ZERO {
                overtime_hours += excess;
            }
        }

        if let Some(punch_in) = record.punch_in {
            let minutes = (punch_in.time() - config.day_start).num_minutes();
            if minutes > 0 {
                late_minutes += minutes;
            }
        }
    }

    let working_days = present_days + half_days;
    let absent_days = config.contracted_days.saturating_sub(working_days);
    let payable_days =
        Decimal::from(present_days) + Decimal::from(half_days) * config.half_day_credit.credit();

    let mut warnings = Vec::new();
    if pending_count > 0 {
        warnings.push(AuditWarning {
            code: "unapproved_attendance".to_string(),
            message: format!(
                "{} attendance record(s) counted while still pending approval",
                pending_count
            ),
            severity: "medium".to_string(),
        });
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "attendance_summary".to_string(),
        rule_name: "Attendance Summary".to_string(),
        input: serde_json::json!({
            "staff_id": staff_id,
            "period": period.to_string(),
            "records": records.len(),
            "contracted_days": config.contracted_days,
            "half_day_threshold": config.half_day_threshold.normalize().to_string(),
        }),
        output: serde_json::json!({
            "working_days": working_days,
            "half_days": half_days,
            "absent_days": absent_days,
            "payable_days": payable_days.normalize().to_string(),
            "overtime_hours": overtime_hours.normalize().to_string(),
            "late_minutes": late_minutes,
        }),
        reasoning: format!(
            "{} of {} contracted days attended ({} half), {} absent",
            working_days, config.contracted_days, half_days, absent_days
        ),
    };

    Ok(AttendanceSummary {
        working_days,
        half_days,
        absent_days,
        payable_days,
        total_hours,
        overtime_hours,
        late_minutes,
        audit_step,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HalfDayCredit, PayBasis, StatutoryRates};
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn test_config() -> CompensationConfig {
        CompensationConfig {
            basis: PayBasis::Monthly {
                base_salary: dec("30000"),
            },
            contracted_days: 26,
            standard_hours_per_day: dec("8"),
            day_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            half_day_threshold: dec("4"),
            half_day_credit: HalfDayCredit::Full,
            overtime_multiplier: dec("1.5"),
            late_penalty_per_minute: None,
            absence_penalty_per_day: None,
            statutory: StatutoryRates {
                eligible: false,
                pf_percent: dec("12"),
                esi_percent: dec("0.75"),
                esi_wage_ceiling: dec("21000"),
            },
        }
    }

    fn period() -> PayPeriod {
        PayPeriod {
            month: 1,
            year: 2026,
        }
    }

    fn make_datetime(date: NaiveDate, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(
            &format!("{} {}", date, time_str),
            "%Y-%m-%d %H:%M:%S",
        )
        .unwrap()
    }

    fn day_record(day: u32, start: &str, end: &str) -> AttendanceRecord {
        let date = NaiveDate::from_ymd_opt(2026, 1, day).unwrap();
        AttendanceRecord {
            staff_id: "emp_001".to_string(),
            date,
            punch_in: Some(make_datetime(date, start)),
            punch_out: Some(make_datetime(date, end)),
            working_hours: None,
            status: ApprovalStatus::Approved,
        }
    }

    fn summarize(records: &[AttendanceRecord]) -> EngineResult<AttendanceSummary> {
        summarize_attendance("emp_001", period(), &test_config(), records, 1)
    }

    /// AS-001: full month of 8-hour days
    #[test]
    fn test_full_days_counted() {
        let records: Vec<_> = (1..=24)
            .map(|day| day_record(day, "09:00:00", "17:00:00"))
            .collect();

        let summary = summarize(&records).unwrap();
        assert_eq!(summary.working_days, 24);
        assert_eq!(summary.half_days, 0);
        assert_eq!(summary.absent_days, 2);
        assert_eq!(summary.payable_days, dec("24"));
        assert_eq!(summary.total_hours, dec("192"));
        assert_eq!(summary.overtime_hours, Decimal::ZERO);
        assert_eq!(summary.late_minutes, 0);
    }

    /// AS-002: half-days counted and credited per policy
    #[test]
    fn test_half_day_credit_policies() {
        let records = vec![
            day_record(5, "09:00:00", "17:00:00"),
            day_record(6, "09:00:00", "12:00:00"), // 3 hours, half-day
        ];

        let summary = summarize(&records).unwrap();
        assert_eq!(summary.working_days, 2);
        assert_eq!(summary.half_days, 1);
        assert_eq!(summary.payable_days, dec("2")); // Full credit

        let mut config = test_config();
        config.half_day_credit = HalfDayCredit::Half;
        let summary = summarize_attendance("emp_001", period(), &config, &records, 1).unwrap();
        assert_eq!(summary.payable_days, dec("1.5"));
    }

    /// AS-003: absent days floor at zero
    #[test]
    fn test_absent_days_floor_at_zero() {
        let mut config = test_config();
        config.contracted_days = 2;
        let records: Vec<_> = (1..=5)
            .map(|day| day_record(day, "09:00:00", "17:00:00"))
            .collect();

        let summary = summarize_attendance("emp_001", period(), &config, &records, 1).unwrap();
        assert_eq!(summary.working_days, 5);
        assert_eq!(summary.absent_days, 0);
    }

    /// AS-004: overtime summed per day
    #[test]
    fn test_overtime_summed_per_day() {
        let records = vec![
            day_record(5, "09:00:00", "19:00:00"), // 10 hours, 2 OT
            day_record(6, "09:00:00", "17:30:00"), // 8.5 hours, 0.5 OT
            day_record(7, "09:00:00", "16:00:00"), // 7 hours, no OT
        ];

        let summary = summarize(&records).unwrap();
        assert_eq!(summary.overtime_hours, dec("2.5"));
    }

    /// AS-005: late minutes summed past day start
    #[test]
    fn test_late_minutes_summed() {
        let records = vec![
            day_record(5, "09:30:00", "17:30:00"),
            day_record(6, "09:30:00", "17:30:00"),
            day_record(7, "08:45:00", "17:00:00"), // early, not late
        ];

        let summary = summarize(&records).unwrap();
        assert_eq!(summary.late_minutes, 60);
    }

    /// AS-006: absences and leave contribute nothing
    #[test]
    fn test_absences_contribute_nothing() {
        let mut leave = day_record(5, "09:00:00", "17:00:00");
        leave.status = ApprovalStatus::Leave;
        let absent = AttendanceRecord {
            staff_id: "emp_001".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 6).unwrap(),
            punch_in: None,
            punch_out: None,
            working_hours: None,
            status: ApprovalStatus::Absent,
        };

        let summary = summarize(&[leave, absent]).unwrap();
        assert_eq!(summary.working_days, 0);
        assert_eq!(summary.absent_days, 26);
        assert_eq!(summary.total_hours, Decimal::ZERO);
    }

    /// AS-007: record outside period rejected
    #[test]
    fn test_out_of_period_rejected() {
        let mut record = day_record(5, "09:00:00", "17:00:00");
        record.date = NaiveDate::from_ymd_opt(2026, 2, 5).unwrap();
        record.punch_in = Some(make_datetime(record.date, "09:00:00"));
        record.punch_out = Some(make_datetime(record.date, "17:00:00"));

        match summarize(&[record]).unwrap_err() {
            EngineError::Validation { field, .. } => assert_eq!(field, "date"),
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    /// AS-008: duplicate date rejected
    #[test]
    fn test_duplicate_date_rejected() {
        let records = vec![
            day_record(5, "09:00:00", "17:00:00"),
            day_record(5, "09:00:00", "13:00:00"),
        ];

        match summarize(&records).unwrap_err() {
            EngineError::Validation { field, message, .. } => {
                assert_eq!(field, "date");
                assert!(message.contains("duplicate"));
            }
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    /// AS-009: foreign staff record rejected
    #[test]
    fn test_foreign_staff_rejected() {
        let mut record = day_record(5, "09:00:00", "17:00:00");
        record.staff_id = "emp_999".to_string();

        match summarize(&[record]).unwrap_err() {
            EngineError::Validation { field, .. } => assert_eq!(field, "staff_id"),
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    /// AS-010: pending records counted with a warning
    #[test]
    fn test_pending_records_warn() {
        let mut record = day_record(5, "09:00:00", "17:00:00");
        record.status = ApprovalStatus::Pending;

        let summary = summarize(&[record]).unwrap();
        assert_eq!(summary.working_days, 1);
        assert_eq!(summary.warnings.len(), 1);
        assert_eq!(summary.warnings[0].code, "unapproved_attendance");
    }

    /// AS-011: open session counts as a day with no hours
    #[test]
    fn test_open_session_counts_without_hours() {
        let mut record = day_record(5, "09:00:00", "17:00:00");
        record.punch_out = None;

        let summary = summarize(&[record]).unwrap();
        assert_eq!(summary.working_days, 1);
        assert_eq!(summary.total_hours, Decimal::ZERO);
        assert_eq!(summary.overtime_hours, Decimal::ZERO);
    }

    #[test]
    fn test_audit_step_records_outcome() {
        let records = vec![day_record(5, "09:00:00", "17:00:00")];
        let summary = summarize(&records).unwrap();

        assert_eq!(summary.audit_step.rule_id, "attendance_summary");
        assert_eq!(summary.audit_step.output["working_days"], 1);
        assert!(summary.audit_step.reasoning.contains("1 of 26"));
    }
}
