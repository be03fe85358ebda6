//! Breakdown generation and verification.
//!
//! This module expands a computed salary record into itemized breakdown
//! entries and verifies that the entries reconcile with the record's net
//! amount.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{BreakdownKind, CompensationConfig, SalaryBreakdownEntry, SalaryRecord};

/// Tolerance within which breakdown entries must reconcile to the net.
const RECONCILE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2); // 0.01

/// Late penalty owed for the accumulated late minutes, zero when disabled.
pub(crate) fn late_penalty_component(late_minutes: i64, config: &CompensationConfig) -> Decimal {
    match config.late_penalty_per_minute {
        Some(rate) => Decimal::from(late_minutes) * rate,
        None => Decimal::ZERO,
    }
}

/// Absence penalty owed for unattended contracted days, zero when disabled.
pub(crate) fn absence_penalty_component(absent_days: u32, config: &CompensationConfig) -> Decimal {
    match config.absence_penalty_per_day {
        Some(rate) => Decimal::from(absent_days) * rate,
        None => Decimal::ZERO,
    }
}

/// Provident fund contribution on the base amount, zero when not eligible.
pub(crate) fn pf_component(base_amount: Decimal, config: &CompensationConfig) -> Decimal {
    if !config.statutory.eligible {
        return Decimal::ZERO;
    }
    base_amount * config.statutory.pf_percent / Decimal::ONE_HUNDRED
}

/// State insurance contribution on the ceiling-capped wage, zero when not
/// eligible.
///
/// ESI is always computed on `min(base, ceiling)` for eligible staff: a
/// base amount above the ceiling caps the contribution wage, it does not
/// remove the contribution.
pub(crate) fn esi_component(base_amount: Decimal, config: &CompensationConfig) -> Decimal {
    if !config.statutory.eligible {
        return Decimal::ZERO;
    }
    let wage = base_amount.min(config.statutory.esi_wage_ceiling);
    wage * config.statutory.esi_percent / Decimal::ONE_HUNDRED
}

/// Expands a computed salary record into itemized breakdown entries.
///
/// Emitted entries, in order: base salary (always); overtime pay when
/// overtime was earned; late penalty and absence deduction when the
/// corresponding penalty applies; provident fund and state insurance when
/// the staff member is eligibility-flagged and the contribution is
/// non-zero. Penalty and deduction components are recomputed from the
/// record's own counters with the configuration that produced it, so the
/// entries always attribute the recorded totals exactly.
pub fn build_breakdown(
    record: &SalaryRecord,
    config: &CompensationConfig,
) -> Vec<SalaryBreakdownEntry> {
    let mut entries = Vec::with_capacity(6);

    entries.push(SalaryBreakdownEntry {
        salary_id: record.id,
        kind: BreakdownKind::BaseSalary,
        description: format!("Base salary for {}", record.period),
        amount: record.base_amount,
    });

    if record.overtime_amount > Decimal::ZERO {
        entries.push(SalaryBreakdownEntry {
            salary_id: record.id,
            kind: BreakdownKind::Overtime,
            description: format!("Overtime pay ({} h)", record.overtime_hours.normalize()),
            amount: record.overtime_amount,
        });
    }

    let late_penalty = late_penalty_component(record.late_minutes, config);
    if late_penalty > Decimal::ZERO {
        entries.push(SalaryBreakdownEntry {
            salary_id: record.id,
            kind: BreakdownKind::LatePenalty,
            description: format!("Late penalty ({} min)", record.late_minutes),
            amount: late_penalty,
        });
    }

    let absence_penalty = absence_penalty_component(record.absent_day_count, config);
    if absence_penalty > Decimal::ZERO {
        entries.push(SalaryBreakdownEntry {
            salary_id: record.id,
            kind: BreakdownKind::AbsenceDeduction,
            description: format!("Absence deduction ({} days)", record.absent_day_count),
            amount: absence_penalty,
        });
    }

    let pf = pf_component(record.base_amount, config);
    if pf > Decimal::ZERO {
        entries.push(SalaryBreakdownEntry {
            salary_id: record.id,
            kind: BreakdownKind::PfDeduction,
            description: format!(
                "Provident fund ({}%)",
                config.statutory.pf_percent.normalize()
            ),
            amount: pf,
        });
    }

    let esi = esi_component(record.base_amount, config);
    if esi > Decimal::ZERO {
        entries.push(SalaryBreakdownEntry {
            salary_id: record.id,
            kind: BreakdownKind::EsiDeduction,
            description: format!(
                "Employee state insurance ({}%)",
                config.statutory.esi_percent.normalize()
            ),
            amount: esi,
        });
    }

    entries
}

/// Verifies that breakdown entries reconcile with their parent record.
///
/// The signed sum of the entries (earnings positive, deductions negative)
/// must equal the record's net amount within a tolerance of 0.01. A
/// mismatch indicates an internal integrity failure and surfaces as
/// [`EngineError::ReconciliationMismatch`].
pub fn verify_breakdown(
    record: &SalaryRecord,
    entries: &[SalaryBreakdownEntry],
) -> EngineResult<()> {
    let actual: Decimal = entries.iter().map(|e| e.signed_amount()).sum();
    let difference = (actual - record.net_amount).abs();

    if difference > RECONCILE_TOLERANCE {
        return Err(EngineError::ReconciliationMismatch {
            salary_id: record.id,
            expected: record.net_amount,
            actual,
        });
    }

    Ok(())
}
