//! Ledger reconciliation and posting preconditions.
//!
//! This module folds a salary's append-only ledger history into its
//! outstanding balance, gates new postings on the salary status, and
//! builds reversal entries. Persisting entries is the caller's job; the
//! engine only computes and validates.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{LedgerKind, SalaryLedgerEntry, SalaryRecord, SalaryStatus};

/// The reconciled position of a salary against its ledger history.
///
/// All totals are positive magnitudes; `balance_due` is what the company
/// still owes the staff member (negative when overpaid).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// The salary record that was reconciled.
    pub salary_id: Uuid,
    /// Sum of payment settlements, net of payment reversals.
    pub total_paid: Decimal,
    /// Sum of deduction settlements, net of deduction reversals.
    pub total_deducted: Decimal,
    /// Magnitude of recovered (clawed-back) amounts.
    pub total_recovered: Decimal,
    /// Net amount minus all settlements: what remains payable.
    pub balance_due: Decimal,
}

/// Folds a salary's ledger history into its outstanding balance.
///
/// Under the settlement sign convention (see [`SalaryLedgerEntry`]),
/// `balance_due = net_amount − Σ(amounts)`. Addition is commutative, so
/// the fold is independent of entry order; any permutation of the same
/// history reconciles to the same balance.
///
/// Entries posted against a different salary are rejected with a
/// [`EngineError::Validation`] — the caller supplied the wrong history.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::reconcile;
/// use payroll_engine::models::{
///     LedgerKind, PayPeriod, SalaryLedgerEntry, SalaryRecord, SalaryStatus,
/// };
/// use chrono::Utc;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let record = SalaryRecord {
///     id: Uuid::nil(),
///     staff_id: "emp_001".to_string(),
///     period: PayPeriod { month: 1, year: 2026 },
///     total_working_days: 26,
///     half_day_count: 0,
///     absent_day_count: 0,
///     total_working_hours: Decimal::from(208),
///     overtime_hours: Decimal::ZERO,
///     late_minutes: 0,
///     base_amount: Decimal::from(20000),
///     overtime_amount: Decimal::ZERO,
///     penalty_amount: Decimal::ZERO,
///     deduction_amount: Decimal::ZERO,
///     gross_amount: Decimal::from(20000),
///     net_amount: Decimal::from(20000),
///     status: SalaryStatus::Approved,
///     paid_at: None,
/// };
///
/// let reconciliation = reconcile(&record, &[]).unwrap();
/// assert_eq!(reconciliation.balance_due, Decimal::from(20000));
/// ```
pub fn reconcile(
    record: &SalaryRecord,
    entries: &[SalaryLedgerEntry],
) -> EngineResult<Reconciliation> {
    let mut total_paid = Decimal::ZERO;
    let mut total_deducted = Decimal::ZERO;
    let mut total_recovered = Decimal::ZERO;
    let mut settled = Decimal::ZERO;

    for entry in entries {
        if entry.salary_id != record.id {
            return Err(EngineError::Validation {
                staff_id: record.staff_id.clone(),
                field: "salary_id".to_string(),
                message: format!(
                    "ledger entry {} belongs to salary {}",
                    entry.id, entry.salary_id
                ),
            });
        }

        settled += entry.amount;
        match entry.kind {
            LedgerKind::Payment => total_paid += entry.amount,
            LedgerKind::Deduction => total_deducted += entry.amount,
            LedgerKind::Recovery => total_recovered -= entry.amount,
        }
    }

    Ok(Reconciliation {
        salary_id: record.id,
        total_paid,
        total_deducted,
        total_recovered,
        balance_due: record.net_amount - settled,
    })
}

/// Checks that a posting of `kind` is permitted against the given status.
///
/// Ledger entries may only be posted against approved or paid salaries;
/// anything else fails with a [`EngineError::State`] naming the posting
/// operation.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::authorize_post;
/// use payroll_engine::models::{LedgerKind, SalaryStatus};
///
/// assert!(authorize_post(SalaryStatus::Approved, LedgerKind::Payment).is_ok());
/// assert!(authorize_post(SalaryStatus::Pending, LedgerKind::Payment).is_err());
/// ```
pub fn authorize_post(status: SalaryStatus, kind: LedgerKind) -> EngineResult<()> {
    if status.accepts_ledger_posts() {
        Ok(())
    } else {
        Err(EngineError::State {
            operation: kind.operation().to_string(),
            status,
        })
    }
}

/// Builds the reversal of a previously posted ledger entry.
///
/// The reversal is a new entry of the same kind with the inverted amount
/// and a reason referencing the original; the original is never edited or
/// deleted. The caller supplies the new entry's identifier and timestamp,
/// keeping this function pure.
pub fn build_reversal(
    original: &SalaryLedgerEntry,
    reason: &str,
    actor: &str,
    id: Uuid,
    posted_at: DateTime<Utc>,
) -> SalaryLedgerEntry {
    SalaryLedgerEntry {
        id,
        salary_id: original.salary_id,
        staff_id: original.staff_id.clone(),
        kind: original.kind,
        amount: -original.amount,
        reason: format!("Reversal of {}: {}", original.id, reason),
        posted_by: actor.to_string(),
        posted_at,
    }
}
