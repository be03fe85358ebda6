//! Request types for the payroll engine API.
//!
//! This module defines the JSON request structures for the `/calculate`,
//! `/reconcile`, and `/ledger/reversal` endpoints.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    ApprovalStatus, AttendanceRecord, CompensationOverrides, PayBasis, PayPeriod,
    SalaryLedgerEntry, SalaryRecord, SalaryStatus,
};

/// Request body for the `/calculate` endpoint.
///
/// Contains the staff member's pay basis, the period, per-staff overrides,
/// and the period's attendance records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Identifier under which the salary will be persisted; generated when
    /// omitted. A recalculation passes the existing record's id.
    #[serde(default)]
    pub salary_id: Option<Uuid>,
    /// The staff member the calculation is for.
    pub staff: StaffRequest,
    /// The salary period to calculate.
    pub period: PeriodRequest,
    /// Per-staff overrides applied on top of company policy defaults.
    #[serde(default)]
    pub overrides: CompensationOverrides,
    /// Status of the existing salary record for this staff and period, if
    /// one exists; recalculation is gated on it being pending.
    #[serde(default)]
    pub existing_status: Option<SalaryStatus>,
    /// The period's attendance records.
    pub attendance: Vec<AttendanceRecordRequest>,
}

/// Staff member information in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffRequest {
    /// Unique identifier for the staff member.
    pub id: String,
    /// The pay basis and its rate.
    pub pay_basis: PayBasis,
    /// Whether the staff member is enrolled for statutory deductions.
    #[serde(default)]
    pub statutory_eligible: bool,
}

/// Salary period information in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodRequest {
    /// Calendar month, 1 through 12.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
}

/// A single attendance record in a calculation request.
///
/// The staff identifier is taken from the request's `staff` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecordRequest {
    /// Calendar day the record tracks.
    pub date: NaiveDate,
    /// Timestamp when the staff member punched in, if any.
    #[serde(default)]
    pub punch_in: Option<NaiveDateTime>,
    /// Timestamp when the staff member punched out, if any.
    #[serde(default)]
    pub punch_out: Option<NaiveDateTime>,
    /// Hours worked for the day, if already computed.
    #[serde(default)]
    pub working_hours: Option<Decimal>,
    /// Approval status of the record.
    pub status: ApprovalStatus,
}

impl AttendanceRecordRequest {
    /// Converts the request record into a domain record for `staff_id`.
    pub fn into_record(self, staff_id: &str) -> AttendanceRecord {
        AttendanceRecord {
            staff_id: staff_id.to_string(),
            date: self.date,
            punch_in: self.punch_in,
            punch_out: self.punch_out,
            working_hours: self.working_hours,
            status: self.status,
        }
    }
}

impl From<PeriodRequest> for PayPeriod {
    fn from(req: PeriodRequest) -> Self {
        PayPeriod {
            month: req.month,
            year: req.year,
        }
    }
}

/// Request body for the `/reconcile` endpoint.
///
/// Carries the salary record and its full ledger history; the engine
/// folds the history into the outstanding balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileRequest {
    /// The salary record to reconcile.
    pub salary: SalaryRecord,
    /// The salary's ledger history.
    #[serde(default)]
    pub entries: Vec<SalaryLedgerEntry>,
}

/// Request body for the `/ledger/reversal` endpoint.
///
/// Carries the entry to reverse and the current status of its salary; the
/// engine validates the status and returns the reversal entry to append.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReversalRequest {
    /// The previously posted entry to reverse.
    pub entry: SalaryLedgerEntry,
    /// The current status of the salary the entry was posted against.
    pub salary_status: SalaryStatus,
    /// Why the entry is being reversed.
    pub reason: String,
    /// Identifier of the actor requesting the reversal.
    pub actor: String,
}
