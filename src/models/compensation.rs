//! Compensation configuration model and related types.
//!
//! This module defines the [`CompensationConfig`] struct describing how a
//! staff member is paid: the pay basis, attendance thresholds, penalty
//! rates, and statutory deduction rates.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The basis on which a staff member's pay is computed.
///
/// Modelling the basis as a tagged union makes "exactly one rate populated"
/// unrepresentable rather than a runtime check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PayBasis {
    /// A fixed salary per calendar month, prorated by attendance.
    Monthly {
        /// The full monthly salary for a complete period.
        base_salary: Decimal,
    },
    /// A fixed rate per payable day attended.
    Daily {
        /// The rate paid per day.
        daily_rate: Decimal,
    },
    /// A fixed rate per hour of standard attendance.
    Hourly {
        /// The rate paid per hour.
        hourly_rate: Decimal,
    },
}

impl PayBasis {
    /// Returns the rate amount carried by the basis, whichever variant it is.
    pub fn rate(&self) -> Decimal {
        match *self {
            PayBasis::Monthly { base_salary } => base_salary,
            PayBasis::Daily { daily_rate } => daily_rate,
            PayBasis::Hourly { hourly_rate } => hourly_rate,
        }
    }
}

/// How much a half-day contributes to the payable-day fraction.
///
/// Whether a half-day counts fully or fractionally toward payout is a
/// company policy, so it is an explicit configuration value rather than a
/// hard-coded rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HalfDayCredit {
    /// A half-day counts as a whole day toward payout.
    Full,
    /// A half-day counts as half a day toward payout.
    Half,
}

impl HalfDayCredit {
    /// Returns the payable-day credit for one half-day.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::HalfDayCredit;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(HalfDayCredit::Full.credit(), Decimal::ONE);
    /// assert_eq!(HalfDayCredit::Half.credit(), Decimal::new(5, 1));
    /// ```
    pub fn credit(&self) -> Decimal {
        match self {
            HalfDayCredit::Full => Decimal::ONE,
            HalfDayCredit::Half => Decimal::new(5, 1),
        }
    }
}

/// Statutory deduction rates applied to eligible staff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatutoryRates {
    /// Whether the staff member is enrolled for statutory deductions.
    pub eligible: bool,
    /// Provident fund contribution as a percentage of base pay.
    pub pf_percent: Decimal,
    /// Employee state insurance contribution as a percentage of base pay.
    pub esi_percent: Decimal,
    /// Monthly wage ceiling above which ESI is computed on the ceiling.
    pub esi_wage_ceiling: Decimal,
}

/// The effective compensation configuration for one staff member.
///
/// Produced by merging company policy defaults with per-staff overrides;
/// the calculator treats it as immutable input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompensationConfig {
    /// The pay basis and its rate.
    pub basis: PayBasis,
    /// Contracted working days per salary period.
    pub contracted_days: u32,
    /// Standard length of a working day in hours.
    pub standard_hours_per_day: Decimal,
    /// Scheduled start of the working day, used to derive lateness.
    pub day_start: NaiveTime,
    /// Hours below which a present day is downgraded to a half-day.
    pub half_day_threshold: Decimal,
    /// How half-days count toward the payable-day fraction.
    pub half_day_credit: HalfDayCredit,
    /// Multiplier applied to the derived hourly rate for overtime hours.
    pub overtime_multiplier: Decimal,
    /// Penalty per minute of lateness; `None` disables the late penalty.
    #[serde(default)]
    pub late_penalty_per_minute: Option<Decimal>,
    /// Penalty per absent day; `None` disables the absence penalty.
    #[serde(default)]
    pub absence_penalty_per_day: Option<Decimal>,
    /// Statutory deduction rates.
    pub statutory: StatutoryRates,
}

impl CompensationConfig {
    /// Validates the internal consistency of the configuration.
    ///
    /// Returns a [`EngineError::Configuration`] when contracted days or
    /// standard hours are zero, thresholds fall outside a calendar day, the
    /// rate for the declared basis is negative, or a percentage falls
    /// outside `[0, 100]`.
    pub fn validate(&self) -> EngineResult<()> {
        if self.contracted_days == 0 {
            return Err(EngineError::Configuration {
                field: "contracted_days".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        if self.standard_hours_per_day <= Decimal::ZERO
            || self.standard_hours_per_day > Decimal::from(24)
        {
            return Err(EngineError::Configuration {
                field: "standard_hours_per_day".to_string(),
                message: "must be within (0, 24]".to_string(),
            });
        }

        if self.half_day_threshold < Decimal::ZERO || self.half_day_threshold > Decimal::from(24) {
            return Err(EngineError::Configuration {
                field: "half_day_threshold".to_string(),
                message: "must be within [0, 24]".to_string(),
            });
        }

        if self.basis.rate() < Decimal::ZERO {
            return Err(EngineError::Configuration {
                field: "basis".to_string(),
                message: "rate must not be negative".to_string(),
            });
        }

        if self.overtime_multiplier < Decimal::ZERO {
            return Err(EngineError::Configuration {
                field: "overtime_multiplier".to_string(),
                message: "must not be negative".to_string(),
            });
        }

        for (field, value) in [
            ("late_penalty_per_minute", self.late_penalty_per_minute),
            ("absence_penalty_per_day", self.absence_penalty_per_day),
        ] {
            if let Some(rate) = value {
                if rate < Decimal::ZERO {
                    return Err(EngineError::Configuration {
                        field: field.to_string(),
                        message: "must not be negative".to_string(),
                    });
                }
            }
        }

        for (field, percent) in [
            ("pf_percent", self.statutory.pf_percent),
            ("esi_percent", self.statutory.esi_percent),
        ] {
            if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
                return Err(EngineError::Configuration {
                    field: field.to_string(),
                    message: "must be within [0, 100]".to_string(),
                });
            }
        }

        if self.statutory.eligible && self.statutory.esi_wage_ceiling <= Decimal::ZERO {
            return Err(EngineError::Configuration {
                field: "esi_wage_ceiling".to_string(),
                message: "must be greater than zero for eligible staff".to_string(),
            });
        }

        Ok(())
    }
}

/// Per-staff overrides applied on top of company policy defaults.
///
/// Every field is optional; `None` keeps the company default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompensationOverrides {
    /// Overrides the contracted working days per period.
    #[serde(default)]
    pub contracted_days: Option<u32>,
    /// Overrides the standard working-day length.
    #[serde(default)]
    pub standard_hours_per_day: Option<Decimal>,
    /// Overrides the scheduled day start.
    #[serde(default)]
    pub day_start: Option<NaiveTime>,
    /// Overrides the half-day hour threshold.
    #[serde(default)]
    pub half_day_threshold: Option<Decimal>,
    /// Overrides the half-day payout credit policy.
    #[serde(default)]
    pub half_day_credit: Option<HalfDayCredit>,
    /// Overrides the overtime multiplier.
    #[serde(default)]
    pub overtime_multiplier: Option<Decimal>,
    /// Overrides the late penalty per minute.
    #[serde(default)]
    pub late_penalty_per_minute: Option<Decimal>,
    /// Overrides the absence penalty per day.
    #[serde(default)]
    pub absence_penalty_per_day: Option<Decimal>,
}
