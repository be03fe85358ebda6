//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all failure conditions that can occur during payroll calculation
//! and ledger reconciliation.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::models::SalaryStatus;

/// The main error type for the payroll engine.
///
/// All operations in the engine return this error type. Every variant
/// carries enough context (staff id, field, status) for the caller to act
/// on the failure; the engine itself never logs, retries, or swallows
/// errors.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::Validation {
///     staff_id: "emp_001".to_string(),
///     field: "working_hours".to_string(),
///     message: "must not exceed 24".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid working_hours for staff 'emp_001': must not exceed 24"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Input data was malformed or missing a required value.
    #[error("Invalid {field} for staff '{staff_id}': {message}")]
    Validation {
        /// The staff member the offending input belongs to.
        staff_id: String,
        /// The field that failed validation.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// Compensation or policy configuration is internally inconsistent.
    #[error("Invalid payroll configuration '{field}': {message}")]
    Configuration {
        /// The configuration field or file that is inconsistent.
        field: String,
        /// A description of the inconsistency.
        message: String,
    },

    /// An operation was attempted against a salary whose status forbids it.
    #[error("Operation '{operation}' is not permitted while the salary is {status}")]
    State {
        /// The operation that was attempted (e.g. "recalculate").
        operation: String,
        /// The status the salary record was in.
        status: SalaryStatus,
    },

    /// Breakdown entries failed to reconcile with the parent salary record.
    ///
    /// This indicates an internal integrity failure, not bad user input:
    /// a correctly built breakdown always sums to the record's net amount.
    #[error(
        "Breakdown for salary {salary_id} does not reconcile: net amount is {expected}, entries sum to {actual}"
    )]
    ReconciliationMismatch {
        /// The salary record whose breakdown failed to reconcile.
        salary_id: Uuid,
        /// The net amount recorded on the salary.
        expected: Decimal,
        /// The signed sum of the breakdown entries.
        actual: Decimal,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_validation_displays_staff_and_field() {
        let error = EngineError::Validation {
            staff_id: "emp_002".to_string(),
            field: "punch_in".to_string(),
            message: "approved record has no punch-in".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid punch_in for staff 'emp_002': approved record has no punch-in"
        );
    }

    #[test]
    fn test_configuration_displays_field_and_message() {
        let error = EngineError::Configuration {
            field: "contracted_days".to_string(),
            message: "must be greater than zero".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid payroll configuration 'contracted_days': must be greater than zero"
        );
    }

    #[test]
    fn test_state_displays_operation_and_status() {
        let error = EngineError::State {
            operation: "recalculate".to_string(),
            status: SalaryStatus::Approved,
        };
        assert_eq!(
            error.to_string(),
            "Operation 'recalculate' is not permitted while the salary is approved"
        );
    }

    #[test]
    fn test_reconciliation_mismatch_displays_amounts() {
        let salary_id = Uuid::nil();
        let error = EngineError::ReconciliationMismatch {
            salary_id,
            expected: Decimal::from_str("24211.73").unwrap(),
            actual: Decimal::from_str("24211.00").unwrap(),
        };
        let text = error.to_string();
        assert!(text.contains("24211.73"));
        assert!(text.contains("24211.00"));
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_configuration_error() -> EngineResult<()> {
            Err(EngineError::Configuration {
                field: "standard_hours_per_day".to_string(),
                message: "must be greater than zero".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_configuration_error()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
