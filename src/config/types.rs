//! Configuration types for company payroll policy.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::HalfDayCredit;

/// Metadata about the company the policy belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyMetadata {
    /// Short code identifying the company (e.g., "default").
    pub code: String,
    /// The human-readable company name.
    pub name: String,
    /// ISO currency code salaries are denominated in.
    pub currency: String,
    /// The version or effective date of the policy.
    pub version: String,
}

/// Working-time and penalty policy from policy.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkPolicy {
    /// Contracted working days per salary period.
    pub contracted_days: u32,
    /// Standard length of a working day in hours.
    pub standard_hours_per_day: Decimal,
    /// Scheduled start of the working day.
    pub day_start: NaiveTime,
    /// Hours below which a present day is a half-day.
    pub half_day_threshold: Decimal,
    /// How half-days count toward the payout fraction.
    pub half_day_credit: HalfDayCredit,
    /// Multiplier applied to the hourly rate for overtime.
    pub overtime_multiplier: Decimal,
    /// Penalty per minute of lateness; omitted to disable.
    #[serde(default)]
    pub late_penalty_per_minute: Option<Decimal>,
    /// Penalty per absent day; omitted to disable.
    #[serde(default)]
    pub absence_penalty_per_day: Option<Decimal>,
}

/// Statutory deduction rates from statutory.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct StatutoryPolicy {
    /// Provident fund contribution as a percentage of base pay.
    pub pf_percent: Decimal,
    /// Employee state insurance contribution as a percentage of base pay.
    pub esi_percent: Decimal,
    /// Monthly wage ceiling above which ESI is computed on the ceiling.
    pub esi_wage_ceiling: Decimal,
}

/// The complete payroll policy loaded from a configuration directory.
#[derive(Debug, Clone)]
pub struct PayrollPolicy {
    /// Company metadata.
    company: CompanyMetadata,
    /// Working-time and penalty policy.
    work: WorkPolicy,
    /// Statutory deduction rates.
    statutory: StatutoryPolicy,
}

impl PayrollPolicy {
    /// Creates a policy from its component parts.
    pub fn new(company: CompanyMetadata, work: WorkPolicy, statutory: StatutoryPolicy) -> Self {
        Self {
            company,
            work,
            statutory,
        }
    }

    /// Returns the company metadata.
    pub fn company(&self) -> &CompanyMetadata {
        &self.company
    }

    /// Returns the working-time policy.
    pub fn work(&self) -> &WorkPolicy {
        &self.work
    }

    /// Returns the statutory deduction rates.
    pub fn statutory(&self) -> &StatutoryPolicy {
        &self.statutory
    }
}
