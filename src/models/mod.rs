//! Data models for the payroll engine.

mod attendance;
mod audit;
mod breakdown;
mod compensation;
mod ledger;
mod salary;

pub use attendance::{ApprovalStatus, AttendanceRecord};
pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use breakdown::{BreakdownKind, EntryClass, SalaryBreakdownEntry};
pub use compensation::{
    CompensationConfig, CompensationOverrides, HalfDayCredit, PayBasis, StatutoryRates,
};
pub use ledger::{LedgerKind, SalaryLedgerEntry};
pub use salary::{PayPeriod, SalaryRecord, SalaryStatus};
