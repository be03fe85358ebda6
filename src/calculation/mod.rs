//! Calculation logic for the payroll engine.
//!
//! This module contains the pure calculation functions: day classification
//! against the half-day threshold, attendance aggregation over a salary
//! period, salary computation by pay basis, breakdown generation and
//! verification, and ledger reconciliation.

mod attendance_summary;
mod breakdown;
mod classifier;
mod ledger;
mod salary;

#[cfg(test)]
mod properties;

pub use attendance_summary::{AttendanceSummary, summarize_attendance};
pub use breakdown::{build_breakdown, verify_breakdown};
pub use classifier::{DayClass, classify_day};
pub use ledger::{Reconciliation, authorize_post, build_reversal, reconcile};
pub use salary::{SalaryComputation, calculate_salary, ensure_recalculable, recalculate};
