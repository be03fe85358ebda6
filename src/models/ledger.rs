//! Salary ledger entries.
//!
//! This module contains the [`SalaryLedgerEntry`] type: append-only
//! postings of payments, deductions, and recoveries against a finalized
//! salary record.
//!
//! # Sign convention
//!
//! An entry's `amount` is a signed settlement against the outstanding net
//! salary. Payments and deductions carry positive amounts (they discharge
//! the company's liability — a deduction is money settled on the staff
//! member's behalf); recoveries carry negative amounts (a clawback re-opens
//! the liability). The outstanding balance is therefore
//! `net_amount − Σ(amounts)`. Reversals are new entries with the inverted
//! amount; the log is never edited or deleted.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of a ledger posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerKind {
    /// A disbursement to the staff member.
    Payment,
    /// A deduction settled on the staff member's behalf.
    Deduction,
    /// A clawback of a prior disbursement.
    Recovery,
}

impl LedgerKind {
    /// Returns the name of the posting operation, for state-gate errors.
    pub fn operation(&self) -> &'static str {
        match self {
            LedgerKind::Payment => "post_payment",
            LedgerKind::Deduction => "post_deduction",
            LedgerKind::Recovery => "post_recovery",
        }
    }
}

/// An append-only ledger posting against a salary record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryLedgerEntry {
    /// Unique identifier of the posting.
    pub id: Uuid,
    /// The salary record the posting settles against.
    pub salary_id: Uuid,
    /// The staff member the salary belongs to.
    pub staff_id: String,
    /// The kind of posting.
    pub kind: LedgerKind,
    /// Signed settlement amount (see the module-level sign convention).
    pub amount: Decimal,
    /// Why the posting was made; reversals reference the original entry here.
    pub reason: String,
    /// Identifier of the actor who posted the entry.
    pub posted_by: String,
    /// When the entry was posted.
    pub posted_at: DateTime<Utc>,
}
