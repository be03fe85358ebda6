//! Attendance record model and related types.
//!
//! This module defines the [`AttendanceRecord`] struct and its approval
//! status for representing a single day's attendance in the payroll system.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The supervisor-facing lifecycle status of an attendance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    /// Recorded but not yet reviewed by a supervisor.
    Pending,
    /// Reviewed and approved as a valid attendance.
    Approved,
    /// Reviewed and rejected; does not count as attendance.
    Rejected,
    /// Marked absent for the day.
    Absent,
    /// On approved leave for the day.
    Leave,
}

/// A single day's attendance for a staff member.
///
/// Records are created when staff punch in and completed when they punch
/// out; once a salary period closes they are immutable inputs to the
/// calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Identifier of the staff member that owns the record.
    pub staff_id: String,
    /// Calendar day the record tracks.
    pub date: NaiveDate,
    /// Timestamp when the staff member punched in, if any.
    pub punch_in: Option<NaiveDateTime>,
    /// Timestamp when the staff member punched out, if any.
    pub punch_out: Option<NaiveDateTime>,
    /// Hours worked for the day, computed at punch-out when available.
    #[serde(default)]
    pub working_hours: Option<Decimal>,
    /// Approval status of the record.
    pub status: ApprovalStatus,
}

impl AttendanceRecord {
    /// Validates the internal consistency of the record.
    ///
    /// Returns a [`EngineError::Validation`] when:
    /// - working hours are negative or exceed 24,
    /// - the record is approved but has no punch-in,
    /// - the punch-out precedes the punch-in.
    pub fn validate(&self) -> EngineResult<()> {
        if let Some(hours) = self.working_hours {
            if hours < Decimal::ZERO {
                return Err(EngineError::Validation {
                    staff_id: self.staff_id.clone(),
                    field: "working_hours".to_string(),
                    message: format!("must not be negative on {}", self.date),
                });
            }
            if hours > Decimal::from(24) {
                return Err(EngineError::Validation {
                    staff_id: self.staff_id.clone(),
                    field: "working_hours".to_string(),
                    message: format!("must not exceed 24 on {}", self.date),
                });
            }
        }

        if self.status == ApprovalStatus::Approved && self.punch_in.is_none() {
            return Err(EngineError::Validation {
                staff_id: self.staff_id.clone(),
                field: "punch_in".to_string(),
                message: format!("approved record on {} has no punch-in", self.date),
            });
        }

        if let (Some(start), Some(end)) = (self.punch_in, self.punch_out) {
            if end < start {
                return Err(EngineError::Validation {
                    staff_id: self.staff_id.clone(),
                    field: "punch_out".to_string(),
                    message: format!("precedes punch-in on {}", self.date),
                });
            }
        }

        Ok(())
    }

    /// Returns the hours worked for the day, if they can be determined.
    ///
    /// Prefers the stored `working_hours`; otherwise derives the duration
    /// from the punch pair. A record with an open session (punch-in but no
    /// punch-out) has no determinable hours.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{ApprovalStatus, AttendanceRecord};
    /// use chrono::{NaiveDate, NaiveDateTime};
    /// use rust_decimal::Decimal;
    ///
    /// let record = AttendanceRecord {
    ///     staff_id: "emp_001".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
    ///     punch_in: NaiveDateTime::parse_from_str("2026-01-15 09:00:00", "%Y-%m-%d %H:%M:%S").ok(),
    ///     punch_out: NaiveDateTime::parse_from_str("2026-01-15 17:00:00", "%Y-%m-%d %H:%M:%S").ok(),
    ///     working_hours: None,
    ///     status: ApprovalStatus::Approved,
    /// };
    /// assert_eq!(record.worked_hours(), Some(Decimal::new(80, 1))); // 8.0 hours
    /// ```
    pub fn worked_hours(&self) -> Option<Decimal> {
        if let Some(hours) = self.working_hours {
            return Some(hours);
        }

        match (self.punch_in, self.punch_out) {
            (Some(start), Some(end)) => {
                let minutes = (end - start).num_minutes();
                Some(Decimal::new(minutes, 0) / Decimal::new(60, 0))
            }
            _ => None,
        }
    }
}
