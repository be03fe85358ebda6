//! HTTP API module for the payroll engine.
//!
//! This module provides the REST API endpoints for salary calculation,
//! ledger reconciliation, and reversal preparation.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, ReconcileRequest, ReversalRequest, StaffRequest};
pub use response::ApiError;
pub use state::AppState;
