//! Application state for the payroll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers,
/// such as the loaded payroll policy.
#[derive(Clone)]
pub struct AppState {
    /// The loaded payroll policy.
    policy: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(policy: ConfigLoader) -> Self {
        Self {
            policy: Arc::new(policy),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn policy(&self) -> &ConfigLoader {
        &self.policy
    }
}
