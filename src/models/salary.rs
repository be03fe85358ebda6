//! Salary record, pay period, and status models.
//!
//! This module contains the [`SalaryRecord`] produced by the calculator,
//! the [`PayPeriod`] it covers, and the [`SalaryStatus`] lifecycle.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// A calendar-month salary period.
///
/// A salary record is unique per staff member and period.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod { month: 1, year: 2026 };
/// assert_eq!(period.days().unwrap(), 31);
/// assert!(period.contains(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayPeriod {
    /// Calendar month, 1 through 12.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
}

impl PayPeriod {
    /// Returns the first day of the period.
    ///
    /// Fails with a validation error when the month is outside 1..=12.
    pub fn first_day(&self) -> EngineResult<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).ok_or_else(|| EngineError::Validation {
            staff_id: String::new(),
            field: "period".to_string(),
            message: format!("{}-{:02} is not a valid month", self.year, self.month),
        })
    }

    /// Returns the last day of the period.
    pub fn last_day(&self) -> EngineResult<NaiveDate> {
        let first = self.first_day()?;
        let next_first = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        };
        // first_day() already validated the month, so the successor exists
        next_first
            .map(|d| d.pred_opt().unwrap_or(first))
            .ok_or_else(|| EngineError::Validation {
                staff_id: String::new(),
                field: "period".to_string(),
                message: format!("{}-{:02} is not a valid month", self.year, self.month),
            })
    }

    /// Returns the number of calendar days in the period.
    pub fn days(&self) -> EngineResult<u32> {
        Ok(self.last_day()?.day())
    }

    /// Checks whether a date falls within this period.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// The lifecycle status of a salary record.
///
/// Transitions are monotonic: pending → approved → paid, or
/// pending → rejected (terminal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryStatus {
    /// Computed but awaiting approval; recalculation is still permitted.
    Pending,
    /// Approved for payment; mutable only via ledger entries.
    Approved,
    /// Fully disbursed.
    Paid,
    /// Rejected; terminal.
    Rejected,
}

impl SalaryStatus {
    /// Checks whether a transition to `next` is permitted.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::SalaryStatus;
    ///
    /// assert!(SalaryStatus::Pending.can_transition_to(SalaryStatus::Approved));
    /// assert!(SalaryStatus::Approved.can_transition_to(SalaryStatus::Paid));
    /// assert!(!SalaryStatus::Paid.can_transition_to(SalaryStatus::Pending));
    /// assert!(!SalaryStatus::Rejected.can_transition_to(SalaryStatus::Approved));
    /// ```
    pub fn can_transition_to(self, next: SalaryStatus) -> bool {
        matches!(
            (self, next),
            (SalaryStatus::Pending, SalaryStatus::Approved)
                | (SalaryStatus::Pending, SalaryStatus::Rejected)
                | (SalaryStatus::Approved, SalaryStatus::Paid)
        )
    }

    /// Whether ledger entries may be posted against a salary in this status.
    pub fn accepts_ledger_posts(self) -> bool {
        matches!(self, SalaryStatus::Approved | SalaryStatus::Paid)
    }
}

impl fmt::Display for SalaryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SalaryStatus::Pending => "pending",
            SalaryStatus::Approved => "approved",
            SalaryStatus::Paid => "paid",
            SalaryStatus::Rejected => "rejected",
        };
        f.write_str(text)
    }
}

/// A computed salary for one staff member and period.
///
/// All amounts are produced by the calculator and never hand-edited:
/// `gross_amount = base_amount + overtime_amount` and
/// `net_amount = gross_amount − penalty_amount − deduction_amount` hold by
/// construction. Once approved or paid, the record changes only through
/// ledger entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRecord {
    /// Identifier under which the record is persisted.
    pub id: Uuid,
    /// The staff member the salary belongs to.
    pub staff_id: String,
    /// The period the salary covers.
    pub period: PayPeriod,
    /// Days attended (present or half-day).
    pub total_working_days: u32,
    /// Of the working days, how many were half-days.
    pub half_day_count: u32,
    /// Contracted days not attended.
    pub absent_day_count: u32,
    /// Total hours attended across the period.
    pub total_working_hours: Decimal,
    /// Hours worked beyond the standard day length.
    pub overtime_hours: Decimal,
    /// Minutes of lateness accumulated across the period.
    pub late_minutes: i64,
    /// Pay for attendance on the configured basis.
    pub base_amount: Decimal,
    /// Pay for overtime hours.
    pub overtime_amount: Decimal,
    /// Late and absence penalties combined.
    pub penalty_amount: Decimal,
    /// Statutory deductions (provident fund and state insurance).
    pub deduction_amount: Decimal,
    /// Base plus overtime.
    pub gross_amount: Decimal,
    /// Gross minus penalties and deductions.
    pub net_amount: Decimal,
    /// Lifecycle status.
    pub status: SalaryStatus,
    /// When the salary was disbursed, once paid.
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// PP-001: January has 31 days
    #[test]
    fn test_january_days() {
        let period = PayPeriod {
            month: 1,
            year: 2026,
        };
        assert_eq!(period.days().unwrap(), 31);
    }

    /// PP-002: February length respects leap years
    #[test]
    fn test_february_leap_year() {
        let leap = PayPeriod {
            month: 2,
            year: 2024,
        };
        let common = PayPeriod {
            month: 2,
            year: 2026,
        };
        assert_eq!(leap.days().unwrap(), 29);
        assert_eq!(common.days().unwrap(), 28);
    }

    /// PP-003: December rolls into the next year
    #[test]
    fn test_december_last_day() {
        let period = PayPeriod {
            month: 12,
            year: 2026,
        };
        assert_eq!(
            period.last_day().unwrap(),
            NaiveDate::from_ymd_opt(2026, 12, 31).unwrap()
        );
    }

    /// PP-004: invalid month is a validation error
    #[test]
    fn test_invalid_month_rejected() {
        let period = PayPeriod {
            month: 13,
            year: 2026,
        };
        assert!(period.first_day().is_err());
    }

    #[test]
    fn test_contains_boundaries() {
        let period = PayPeriod {
            month: 1,
            year: 2026,
        };
        assert!(period.contains(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()));
        assert!(period.contains(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()));
        assert!(!period.contains(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()));
        assert!(!period.contains(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()));
    }

    #[test]
    fn test_period_display() {
        let period = PayPeriod {
            month: 3,
            year: 2026,
        };
        assert_eq!(period.to_string(), "2026-03");
    }

    /// SS-001: permitted transitions
    #[test]
    fn test_permitted_transitions() {
        assert!(SalaryStatus::Pending.can_transition_to(SalaryStatus::Approved));
        assert!(SalaryStatus::Pending.can_transition_to(SalaryStatus::Rejected));
        assert!(SalaryStatus::Approved.can_transition_to(SalaryStatus::Paid));
    }

    /// SS-002: forbidden transitions
    #[test]
    fn test_forbidden_transitions() {
        assert!(!SalaryStatus::Approved.can_transition_to(SalaryStatus::Pending));
        assert!(!SalaryStatus::Paid.can_transition_to(SalaryStatus::Approved));
        assert!(!SalaryStatus::Rejected.can_transition_to(SalaryStatus::Pending));
        assert!(!SalaryStatus::Rejected.can_transition_to(SalaryStatus::Approved));
        assert!(!SalaryStatus::Pending.can_transition_to(SalaryStatus::Paid));
    }

    /// SS-003: ledger posting accepted only once finalized
    #[test]
    fn test_accepts_ledger_posts() {
        assert!(!SalaryStatus::Pending.accepts_ledger_posts());
        assert!(SalaryStatus::Approved.accepts_ledger_posts());
        assert!(SalaryStatus::Paid.accepts_ledger_posts());
        assert!(!SalaryStatus::Rejected.accepts_ledger_posts());
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&SalaryStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&SalaryStatus::Paid).unwrap(),
            "\"paid\""
        );
    }

    #[test]
    fn test_status_display() {
        assert_eq!(SalaryStatus::Approved.to_string(), "approved");
        assert_eq!(SalaryStatus::Rejected.to_string(), "rejected");
    }
}
