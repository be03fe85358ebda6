//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{authorize_post, build_reversal, calculate_salary, ensure_recalculable, reconcile};
use crate::models::AttendanceRecord;

use super::request::{CalculationRequest, ReconcileRequest, ReversalRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/reconcile", post(reconcile_handler))
        .route("/ledger/reversal", post(reversal_handler))
        .with_state(state)
}

/// Maps a JSON extraction rejection to an API error response.
fn rejection_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => ApiError::new(
            "MISSING_CONTENT_TYPE",
            "Content-Type must be application/json",
        ),
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a calculation request and returns the computed salary record,
/// its breakdown entries, and the audit trace.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = rejection_error(correlation_id, rejection);
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    // An existing record gates recalculation on its status
    if let Some(status) = request.existing_status {
        if let Err(err) = ensure_recalculable(status) {
            warn!(
                correlation_id = %correlation_id,
                staff_id = %request.staff.id,
                status = %status,
                "Recalculation rejected by salary status"
            );
            let api_error: ApiErrorResponse = err.into();
            return (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response();
        }
    }

    let config = match state.policy().effective_compensation(
        request.staff.pay_basis,
        request.staff.statutory_eligible,
        &request.overrides,
    ) {
        Ok(config) => config,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Effective compensation rejected"
            );
            let api_error: ApiErrorResponse = err.into();
            return (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response();
        }
    };

    let staff_id = request.staff.id.clone();
    let salary_id = request.salary_id.unwrap_or_else(Uuid::new_v4);
    let records: Vec<AttendanceRecord> = request
        .attendance
        .into_iter()
        .map(|r| r.into_record(&staff_id))
        .collect();

    let start_time = Instant::now();
    match calculate_salary(
        salary_id,
        &staff_id,
        request.period.into(),
        &config,
        &records,
    ) {
        Ok(mut computation) => {
            let duration = start_time.elapsed();
            computation.audit_trace.duration_us = duration.as_micros() as u64;
            info!(
                correlation_id = %correlation_id,
                staff_id = %staff_id,
                records_count = records.len(),
                net_amount = %computation.record.net_amount,
                duration_us = duration.as_micros(),
                "Calculation completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(computation),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

/// Handler for POST /reconcile endpoint.
///
/// Folds the supplied ledger history against the salary record and
/// returns the outstanding balance.
async fn reconcile_handler(
    payload: Result<Json<ReconcileRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing reconciliation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = rejection_error(correlation_id, rejection);
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    match reconcile(&request.salary, &request.entries) {
        Ok(reconciliation) => {
            info!(
                correlation_id = %correlation_id,
                salary_id = %reconciliation.salary_id,
                entries_count = request.entries.len(),
                balance_due = %reconciliation.balance_due,
                "Reconciliation completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(reconciliation),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Reconciliation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

/// Handler for POST /ledger/reversal endpoint.
///
/// Validates that the salary status permits posting and returns the
/// reversal entry to append; persisting it is the caller's job.
async fn reversal_handler(
    payload: Result<Json<ReversalRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing reversal request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = rejection_error(correlation_id, rejection);
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    if let Err(err) = authorize_post(request.salary_status, request.entry.kind) {
        warn!(
            correlation_id = %correlation_id,
            entry_id = %request.entry.id,
            status = %request.salary_status,
            "Reversal rejected by salary status"
        );
        let api_error: ApiErrorResponse = err.into();
        return (
            api_error.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(api_error.error),
        )
            .into_response();
    }

    let reversal = build_reversal(
        &request.entry,
        &request.reason,
        &request.actor,
        Uuid::new_v4(),
        Utc::now(),
    );
    info!(
        correlation_id = %correlation_id,
        original_id = %request.entry.id,
        reversal_id = %reversal.id,
        "Reversal prepared"
    );
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(reversal),
    )
        .into_response()
}
