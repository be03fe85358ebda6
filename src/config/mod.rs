//! Company payroll policy configuration.
//!
//! Policy defaults are loaded from a YAML directory and merged with
//! per-staff overrides to produce the effective compensation configuration
//! the calculator consumes.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{CompanyMetadata, PayrollPolicy, StatutoryPolicy, WorkPolicy};
