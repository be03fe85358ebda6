//! Salary breakdown line items.
//!
//! This module contains the [`SalaryBreakdownEntry`] type: the itemized
//! earnings and deductions that accompany a computed salary record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of a breakdown line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownKind {
    /// Attendance-prorated base pay.
    BaseSalary,
    /// Pay for hours beyond the standard day length.
    Overtime,
    /// Penalty for accumulated lateness.
    LatePenalty,
    /// Penalty for unattended contracted days.
    AbsenceDeduction,
    /// Provident fund contribution.
    PfDeduction,
    /// Employee state insurance contribution.
    EsiDeduction,
}

impl BreakdownKind {
    /// Returns whether entries of this kind add to or subtract from pay.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{BreakdownKind, EntryClass};
    ///
    /// assert_eq!(BreakdownKind::BaseSalary.class(), EntryClass::Earning);
    /// assert_eq!(BreakdownKind::PfDeduction.class(), EntryClass::Deduction);
    /// ```
    pub fn class(&self) -> EntryClass {
        match self {
            BreakdownKind::BaseSalary | BreakdownKind::Overtime => EntryClass::Earning,
            BreakdownKind::LatePenalty
            | BreakdownKind::AbsenceDeduction
            | BreakdownKind::PfDeduction
            | BreakdownKind::EsiDeduction => EntryClass::Deduction,
        }
    }
}

/// Whether a breakdown entry counts toward or against pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryClass {
    /// Adds to pay.
    Earning,
    /// Subtracts from pay.
    Deduction,
}

/// A single line item in a salary breakdown.
///
/// Amounts are positive magnitudes; the entry's class determines its sign
/// in reconciliation. Entries are created atomically alongside their parent
/// salary record and regenerated wholesale on recalculation, never mutated
/// individually.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryBreakdownEntry {
    /// The salary record this entry belongs to.
    pub salary_id: Uuid,
    /// The kind of line item.
    pub kind: BreakdownKind,
    /// Human-readable description for display on payslips.
    pub description: String,
    /// Positive magnitude of the entry.
    pub amount: Decimal,
}

impl SalaryBreakdownEntry {
    /// Returns the entry's signed contribution to net pay.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind.class() {
            EntryClass::Earning => self.amount,
            EntryClass::Deduction => -self.amount,
        }
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
    fn test_kind_classes() {
        assert_eq!(BreakdownKind::BaseSalary.class(), EntryClass::Earning);
        assert_eq!(BreakdownKind::Overtime.class(), EntryClass::Earning);
        assert_eq!(BreakdownKind::LatePenalty.class(), EntryClass::Deduction);
        assert_eq!(
            BreakdownKind::AbsenceDeduction.class(),
            EntryClass::Deduction
        );
        assert_eq!(BreakdownKind::PfDeduction.class(), EntryClass::Deduction);
        assert_eq!(BreakdownKind::EsiDeduction.class(), EntryClass::Deduction);
    }

    #[test]
    fn test_signed_amount() {
        let earning = SalaryBreakdownEntry {
            salary_id: Uuid::nil(),
            kind: BreakdownKind::BaseSalary,
            description: "Base salary".to_string(),
            amount: dec("27692.31"),
        };
        let deduction = SalaryBreakdownEntry {
            salary_id: Uuid::nil(),
            kind: BreakdownKind::PfDeduction,
            description: "Provident fund".to_string(),
            amount: dec("3323.08"),
        };

        assert_eq!(earning.signed_amount(), dec("27692.31"));
        assert_eq!(deduction.signed_amount(), dec("-3323.08"));
    }

    #[test]
    fn test_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&BreakdownKind::BaseSalary).unwrap(),
            "\"base_salary\""
        );
        assert_eq!(
            serde_json::to_string(&BreakdownKind::EsiDeduction).unwrap(),
            "\"esi_deduction\""
        );
    }

    #[test]
    fn test_entry_serde_round_trip() {
        let entry = SalaryBreakdownEntry {
            salary_id: Uuid::nil(),
            kind: BreakdownKind::Overtime,
            description: "Overtime pay".to_string(),
            amount: dec("450.00"),
        };
        let json = serde_json::to_string(&entry).unwrap();
        let parsed: SalaryBreakdownEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, entry);
    }
}
