//! Day classification against the half-day threshold.
//!
//! This module labels a single day's attendance record as present, half-day,
//! or absent for pay purposes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{ApprovalStatus, AttendanceRecord};

/// The pay classification of a single attendance day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayClass {
    /// A full working day.
    Present,
    /// Attended, but for fewer hours than the half-day threshold.
    HalfDay,
    /// Did not count as attendance.
    Absent,
}

/// Classifies a day's attendance record against the half-day threshold.
///
/// The rules, in order:
/// 1. Records marked absent, on leave, or rejected classify as absent.
/// 2. A record with no punch-in classifies as absent.
/// 3. A record whose worked hours are known and below the threshold
///    classifies as a half-day.
/// 4. Everything else classifies as present. In particular, an open
///    session (punch-in without punch-out or stored hours) counts as
///    present — attendance is honoured even when the hours are unknown.
///    This is a deliberately lenient policy.
///
/// Classification itself never fails; malformed records are rejected by
/// [`AttendanceRecord::validate`] before classification is attempted.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{DayClass, classify_day};
/// use payroll_engine::models::{ApprovalStatus, AttendanceRecord};
/// use chrono::{NaiveDate, NaiveDateTime};
/// use rust_decimal::Decimal;
///
/// let record = AttendanceRecord {
///     staff_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     punch_in: NaiveDateTime::parse_from_str("2026-01-15 09:00:00", "%Y-%m-%d %H:%M:%S").ok(),
///     punch_out: NaiveDateTime::parse_from_str("2026-01-15 12:00:00", "%Y-%m-%d %H:%M:%S").ok(),
///     working_hours: None,
///     status: ApprovalStatus::Approved,
/// };
/// // 3 hours worked against a 4-hour threshold
/// assert_eq!(classify_day(&record, Decimal::from(4)), DayClass::HalfDay);
/// ```
pub fn classify_day(record: &AttendanceRecord, half_day_threshold: Decimal) -> DayClass {
    match record.status {
        ApprovalStatus::Absent | ApprovalStatus::Leave | ApprovalStatus::Rejected => {
            return DayClass::Absent;
        }
        ApprovalStatus::Pending | ApprovalStatus::Approved => {}
    }

    if record.punch_in.is_none() {
        return DayClass::Absent;
    }

    match record.worked_hours() {
        Some(hours) if hours < half_day_threshold => DayClass::HalfDay,
        _ => DayClass::Present,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn record_with_hours(hours: Option<&str>) -> AttendanceRecord {
        AttendanceRecord {
            staff_id: "emp_001".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            punch_in: Some(make_datetime("2026-01-15", "09:00:00")),
            punch_out: None,
            working_hours: hours.map(dec),
            status: ApprovalStatus::Approved,
        }
    }

    /// DC-001: full day classifies as present
    #[test]
    fn test_full_day_is_present() {
        let record = record_with_hours(Some("8"));
        assert_eq!(classify_day(&record, dec("4")), DayClass::Present);
    }

    /// DC-002: hours below threshold classify as half-day
    #[test]
    fn test_short_day_is_half_day() {
        let record = record_with_hours(Some("3.5"));
        assert_eq!(classify_day(&record, dec("4")), DayClass::HalfDay);
    }

    /// DC-003: hours exactly at threshold classify as present
    #[test]
    fn test_threshold_exact_is_present() {
        let record = record_with_hours(Some("4"));
        assert_eq!(classify_day(&record, dec("4")), DayClass::Present);
    }

    /// DC-004: no punch-in classifies as absent
    #[test]
    fn test_no_punch_in_is_absent() {
        let mut record = record_with_hours(None);
        record.punch_in = None;
        record.status = ApprovalStatus::Pending;
        assert_eq!(classify_day(&record, dec("4")), DayClass::Absent);
    }

    /// DC-005: open session classifies as present
    #[test]
    fn test_open_session_is_present() {
        let record = record_with_hours(None);
        assert_eq!(classify_day(&record, dec("4")), DayClass::Present);
    }

    /// DC-006: leave and rejection classify as absent regardless of punches
    #[test]
    fn test_leave_and_rejected_are_absent() {
        let mut leave = record_with_hours(Some("8"));
        leave.status = ApprovalStatus::Leave;
        assert_eq!(classify_day(&leave, dec("4")), DayClass::Absent);

        let mut rejected = record_with_hours(Some("8"));
        rejected.status = ApprovalStatus::Rejected;
        assert_eq!(classify_day(&rejected, dec("4")), DayClass::Absent);
    }

    /// DC-007: hours derived from punch pair are classified
    #[test]
    fn test_derived_hours_classified() {
        let mut record = record_with_hours(None);
        record.punch_out = Some(make_datetime("2026-01-15", "12:00:00")); // 3 hours
        assert_eq!(classify_day(&record, dec("4")), DayClass::HalfDay);
    }

    #[test]
    fn test_zero_threshold_never_half_day() {
        let record = record_with_hours(Some("0.5"));
        assert_eq!(classify_day(&record, Decimal::ZERO), DayClass::Present);
    }
}
