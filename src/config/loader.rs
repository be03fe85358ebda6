//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading company
//! payroll policy from YAML files and merging it with per-staff overrides.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::{CompensationConfig, CompensationOverrides, PayBasis, StatutoryRates};

use super::types::{CompanyMetadata, PayrollPolicy, StatutoryPolicy, WorkPolicy};

/// Loads and provides access to company payroll policy.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// builds effective per-staff compensation configurations from the policy
/// defaults.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/default/
/// ├── company.yaml    # Company metadata
/// ├── policy.yaml     # Working-time and penalty policy
/// └── statutory.yaml  # Statutory deduction rates
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::{CompensationOverrides, PayBasis};
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let basis = PayBasis::Monthly { base_salary: Decimal::from(30000) };
/// let config = loader
///     .effective_compensation(basis, true, &CompensationOverrides::default())
///     .unwrap();
/// println!("Contracted days: {}", config.contracted_days);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    policy: PayrollPolicy,
}

impl ConfigLoader {
    /// Loads policy configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/default")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if any
    /// required file is missing, contains invalid YAML, or fails policy
    /// validation.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let company = Self::load_yaml::<CompanyMetadata>(&path.join("company.yaml"))?;
        let work = Self::load_yaml::<WorkPolicy>(&path.join("policy.yaml"))?;
        let statutory = Self::load_yaml::<StatutoryPolicy>(&path.join("statutory.yaml"))?;

        let loader = Self {
            policy: PayrollPolicy::new(company, work, statutory),
        };

        // Reject a policy that can never produce a valid configuration
        loader
            .effective_compensation(
                PayBasis::Monthly {
                    base_salary: rust_decimal::Decimal::ZERO,
                },
                true,
                &CompensationOverrides::default(),
            )?
            .validate()?;

        Ok(loader)
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::Configuration {
            field: path_str.clone(),
            message: "configuration file not found".to_string(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::Configuration {
            field: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying payroll policy.
    pub fn policy(&self) -> &PayrollPolicy {
        &self.policy
    }

    /// Builds the effective compensation configuration for one staff member.
    ///
    /// Company policy supplies every default; per-staff overrides replace
    /// individual fields. The result is validated before being returned so
    /// a contradictory override surfaces here rather than mid-calculation.
    pub fn effective_compensation(
        &self,
        basis: PayBasis,
        statutory_eligible: bool,
        overrides: &CompensationOverrides,
    ) -> EngineResult<CompensationConfig> {
        let work = self.policy.work();
        let statutory = self.policy.statutory();

        let config = CompensationConfig {
            basis,
            contracted_days: overrides.contracted_days.unwrap_or(work.contracted_days),
            standard_hours_per_day: overrides
                .standard_hours_per_day
                .unwrap_or(work.standard_hours_per_day),
            day_start: overrides.day_start.unwrap_or(work.day_start),
            half_day_threshold: overrides
                .half_day_threshold
                .unwrap_or(work.half_day_threshold),
            half_day_credit: overrides.half_day_credit.unwrap_or(work.half_day_credit),
            overtime_multiplier: overrides
                .overtime_multiplier
                .unwrap_or(work.overtime_multiplier),
            late_penalty_per_minute: overrides
                .late_penalty_per_minute
                .or(work.late_penalty_per_minute),
            absence_penalty_per_day: overrides
                .absence_penalty_per_day
                .or(work.absence_penalty_per_day),
            statutory: StatutoryRates {
                eligible: statutory_eligible,
                pf_percent: statutory.pf_percent,
                esi_percent: statutory.esi_percent,
                esi_wage_ceiling: statutory.esi_wage_ceiling,
            },
        };

        config.validate()?;
        Ok(config)
    }
}
