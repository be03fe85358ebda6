//! Salary computation.
//!
//! This module turns a staff member's compensation configuration and one
//! period of attendance records into a salary record with its breakdown
//! and audit trace.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, AuditStep, AuditTrace, CompensationConfig, PayBasis, PayPeriod,
    SalaryBreakdownEntry, SalaryRecord, SalaryStatus,
};

use super::attendance_summary::summarize_attendance;
use super::breakdown::{
    absence_penalty_component, build_breakdown, esi_component, late_penalty_component,
    pf_component, verify_breakdown,
};

/// The complete result of a salary calculation.
///
/// The record and its breakdown entries are created atomically; the audit
/// trace records every rule the calculator applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryComputation {
    /// The computed salary record, in pending status.
    pub record: SalaryRecord,
    /// Itemized breakdown entries reconciling to the record's net amount.
    pub breakdown: Vec<SalaryBreakdownEntry>,
    /// The audit trace of the calculation.
    pub audit_trace: AuditTrace,
}

/// Checks that a salary in the given status may be recalculated.
///
/// Recalculation is only permitted while a salary is pending; approved,
/// paid, and rejected records are immutable except via ledger entries.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::ensure_recalculable;
/// use payroll_engine::models::SalaryStatus;
///
/// assert!(ensure_recalculable(SalaryStatus::Pending).is_ok());
/// assert!(ensure_recalculable(SalaryStatus::Approved).is_err());
/// ```
pub fn ensure_recalculable(status: SalaryStatus) -> EngineResult<()> {
    if status == SalaryStatus::Pending {
        Ok(())
    } else {
        Err(EngineError::State {
            operation: "recalculate".to_string(),
            status,
        })
    }
}

/// Computes a salary for one staff member and period.
///
/// The calculation is a deterministic function of its inputs: identical
/// inputs produce identical output, including the audit steps. The
/// produced record is always in pending status; persisting, approval, and
/// payment are the caller's responsibility.
///
/// Steps, mirrored in the audit trace:
/// 1. Aggregate the period's attendance (validating every record).
/// 2. Base amount on the configured pay basis, prorated by payable days.
/// 3. Overtime at the derived hourly rate times the overtime multiplier.
/// 4. Late and absence penalties, each only when enabled.
/// 5. Statutory deductions for eligibility-flagged staff.
/// 6. Gross and net totals, followed by a breakdown integrity check.
///
/// `salary_id` is the identifier under which the result will be persisted;
/// an idempotent recalculation passes the existing record's id so the
/// regenerated breakdown keeps pointing at it.
pub fn calculate_salary(
    salary_id: Uuid,
    staff_id: &str,
    period: PayPeriod,
    config: &CompensationConfig,
    records: &[AttendanceRecord],
) -> EngineResult<SalaryComputation> {
    config.validate()?;
    period.first_day()?;

    let mut steps: Vec<AuditStep> = Vec::new();
    let mut step_number: u32 = 1;

    let summary = summarize_attendance(staff_id, period, config, records, step_number)?;
    steps.push(summary.audit_step.clone());
    step_number += 1;

    // Base amount on the configured pay basis
    let contracted = Decimal::from(config.contracted_days);
    let (base_amount, basis_reasoning) = match config.basis {
        PayBasis::Monthly { base_salary } => {
            let amount = base_salary * summary.payable_days / contracted;
            let reasoning = format!(
                "Monthly salary {} prorated by {}/{} payable days",
                base_salary.normalize(),
                summary.payable_days.normalize(),
                contracted.normalize()
            );
            (amount, reasoning)
        }
        PayBasis::Daily { daily_rate } => {
            let amount = daily_rate * summary.payable_days;
            let reasoning = format!(
                "Daily rate {} times {} payable days",
                daily_rate.normalize(),
                summary.payable_days.normalize()
            );
            (amount, reasoning)
        }
        PayBasis::Hourly { hourly_rate } => {
            let amount = hourly_rate * config.standard_hours_per_day * summary.payable_days;
            let reasoning = format!(
                "Hourly rate {} times {} standard hours times {} payable days",
                hourly_rate.normalize(),
                config.standard_hours_per_day.normalize(),
                summary.payable_days.normalize()
            );
            (amount, reasoning)
        }
    };
    steps.push(AuditStep {
        step_number,
        rule_id: "base_amount".to_string(),
        rule_name: "Base Amount".to_string(),
        input: serde_json::json!({
            "basis": config.basis,
            "payable_days": summary.payable_days.normalize().to_string(),
            "contracted_days": config.contracted_days,
        }),
        output: serde_json::json!({
            "base_amount": base_amount.normalize().to_string(),
        }),
        reasoning: basis_reasoning,
    });
    step_number += 1;

    // Overtime at the derived hourly rate
    let hourly_rate = derive_hourly_rate(config);
    let overtime_amount = summary.overtime_hours * hourly_rate * config.overtime_multiplier;
    steps.push(AuditStep {
        step_number,
        rule_id: "overtime_amount".to_string(),
        rule_name: "Overtime Amount".to_string(),
        input: serde_json::json!({
            "overtime_hours": summary.overtime_hours.normalize().to_string(),
            "hourly_rate": hourly_rate.normalize().to_string(),
            "multiplier": config.overtime_multiplier.normalize().to_string(),
        }),
        output: serde_json::json!({
            "overtime_amount": overtime_amount.normalize().to_string(),
        }),
        reasoning: if summary.overtime_hours > Decimal::ZERO {
            format!(
                "{} overtime hours at {} times {}",
                summary.overtime_hours.normalize(),
                hourly_rate.normalize(),
                config.overtime_multiplier.normalize()
            )
        } else {
            "No hours beyond the standard day length".to_string()
        },
    });
    step_number += 1;

    // Late and absence penalties
    let late_penalty = late_penalty_component(summary.late_minutes, config);
    let absence_penalty = absence_penalty_component(summary.absent_days, config);
    let penalty_amount = late_penalty + absence_penalty;
    steps.push(AuditStep {
        step_number,
        rule_id: "penalties".to_string(),
        rule_name: "Penalties".to_string(),
        input: serde_json::json!({
            "late_minutes": summary.late_minutes,
            "absent_days": summary.absent_days,
            "late_penalty_per_minute": config
                .late_penalty_per_minute
                .map(|r| r.normalize().to_string()),
            "absence_penalty_per_day": config
                .absence_penalty_per_day
                .map(|r| r.normalize().to_string()),
        }),
        output: serde_json::json!({
            "late_penalty": late_penalty.normalize().to_string(),
            "absence_penalty": absence_penalty.normalize().to_string(),
        }),
        reasoning: format!(
            "Late penalty {} plus absence penalty {}",
            late_penalty.normalize(),
            absence_penalty.normalize()
        ),
    });
    step_number += 1;

    // Statutory deductions
    let pf = pf_component(base_amount, config);
    let esi = esi_component(base_amount, config);
    let deduction_amount = pf + esi;
    steps.push(AuditStep {
        step_number,
        rule_id: "statutory_deductions".to_string(),
        rule_name: "Statutory Deductions".to_string(),
        input: serde_json::json!({
            "eligible": config.statutory.eligible,
            "base_amount": base_amount.normalize().to_string(),
            "pf_percent": config.statutory.pf_percent.normalize().to_string(),
            "esi_percent": config.statutory.esi_percent.normalize().to_string(),
            "esi_wage_ceiling": config.statutory.esi_wage_ceiling.normalize().to_string(),
        }),
        output: serde_json::json!({
            "pf": pf.normalize().to_string(),
            "esi": esi.normalize().to_string(),
        }),
        reasoning: if config.statutory.eligible {
            format!(
                "Provident fund {} plus state insurance {} on the capped wage",
                pf.normalize(),
                esi.normalize()
            )
        } else {
            "Staff member is not enrolled for statutory deductions".to_string()
        },
    });
    step_number += 1;

    // Totals
    let gross_amount = base_amount + overtime_amount;
    let net_amount = gross_amount - penalty_amount - deduction_amount;
    steps.push(AuditStep {
        step_number,
        rule_id: "totals".to_string(),
        rule_name: "Totals".to_string(),
        input: serde_json::json!({
            "base_amount": base_amount.normalize().to_string(),
            "overtime_amount": overtime_amount.normalize().to_string(),
            "penalty_amount": penalty_amount.normalize().to_string(),
            "deduction_amount": deduction_amount.normalize().to_string(),
        }),
        output: serde_json::json!({
            "gross_amount": gross_amount.normalize().to_string(),
            "net_amount": net_amount.normalize().to_string(),
        }),
        reasoning: format!(
            "Gross {} minus penalties {} and deductions {}",
            gross_amount.normalize(),
            penalty_amount.normalize(),
            deduction_amount.normalize()
        ),
    });

    let record = SalaryRecord {
        id: salary_id,
        staff_id: staff_id.to_string(),
        period,
        total_working_days: summary.working_days,
        half_day_count: summary.half_days,
        absent_day_count: summary.absent_days,
        total_working_hours: summary.total_hours,
        overtime_hours: summary.overtime_hours,
        late_minutes: summary.late_minutes,
        base_amount,
        overtime_amount,
        penalty_amount,
        deduction_amount,
        gross_amount,
        net_amount,
        status: SalaryStatus::Pending,
        paid_at: None,
    };

    let breakdown = build_breakdown(&record, config);
    verify_breakdown(&record, &breakdown)?;

    Ok(SalaryComputation {
        record,
        breakdown,
        audit_trace: AuditTrace {
            steps,
            warnings: summary.warnings,
            duration_us: 0,
        },
    })
}

/// Recomputes a pending salary record from fresh attendance.
///
/// The existing record's identifier, staff, and period are reused so the
/// regenerated breakdown replaces the old one wholesale. Fails with a
/// [`EngineError::State`] when the record is no longer pending.
pub fn recalculate(
    existing: &SalaryRecord,
    config: &CompensationConfig,
    records: &[AttendanceRecord],
) -> EngineResult<SalaryComputation> {
    ensure_recalculable(existing.status)?;
    calculate_salary(
        existing.id,
        &existing.staff_id,
        existing.period,
        config,
        records,
    )
}

/// Derives the hourly rate used for overtime pay from the pay basis.
fn derive_hourly_rate(config: &CompensationConfig) -> Decimal {
    match config.basis {
        PayBasis::Hourly { hourly_rate } => hourly_rate,
        PayBasis::Monthly { base_salary } => {
            base_salary / (Decimal::from(config.contracted_days) * config.standard_hours_per_day)
        }
        PayBasis::Daily { daily_rate } => daily_rate / config.standard_hours_per_day,
    }
}
