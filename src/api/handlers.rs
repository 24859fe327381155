//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints. The
//! requesting identity is read from the [`USER_ID_HEADER`] header, which an
//! upstream authentication proxy is expected to set.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::{IdentityProvider, StoreIdentity};
use crate::calculation::{PayrollCalculation, calculate_payroll};
use crate::error::{PayrollError, PayrollResult};
use crate::models::{Identity, PayslipOutcome};
use crate::service::{self, Dashboard, parse_id};

use super::request::{
    AddEmployeeRequest, CalculateRequest, GeneratePayrollRequest, LoginRequest, RegisterRequest,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Header carrying the id of the signed-in user.
pub const USER_ID_HEADER: &str = "x-user-id";

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/calculate", post(calculate_handler))
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/dashboard", get(dashboard_handler))
        .route("/employees", post(add_employee_handler))
        .route("/employees/:id", delete(delete_employee_handler))
        .route("/payrolls", post(generate_payroll_handler))
        .route("/payrolls/:id", delete(delete_payroll_handler))
        .route("/payslips/:id", get(payslip_handler))
        .route("/payslips/:id/link", get(payslip_link_handler))
        .route("/payslips/:id/qr", get(payslip_qr_handler))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
struct LinkResponse {
    url: String,
}

/// Handler for GET /health.
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Handler for POST /calculate.
///
/// Previews the totals for a set of amounts without storing anything.
async fn calculate_handler(
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> ApiResult<Json<PayrollCalculation>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = read_json(correlation_id, payload)?;

    let start_time = Instant::now();
    let result = calculate_payroll(&request.coerce(), 1);
    info!(
        correlation_id = %correlation_id,
        gross_salary = %result.totals.gross_salary,
        net_salary = %result.totals.net_salary,
        duration_us = start_time.elapsed().as_micros(),
        "Calculation completed successfully"
    );
    Ok(Json(result))
}

/// Handler for POST /register.
async fn register_handler(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing registration");

    let request = read_json(correlation_id, payload)?;
    let store = state.shared_store();
    let user = run_blocking(correlation_id, move || {
        service::register_user(&*store, request.into())
    })
    .await?
    .map_err(|err| reject(correlation_id, err))?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Handler for POST /login.
///
/// Bad credentials answer 401 rather than 403: nobody is signed in yet.
async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing sign-in");

    let request = read_json(correlation_id, payload)?;
    let store = state.shared_store();
    let result = run_blocking(correlation_id, move || {
        service::authenticate(&*store, &request.email, &request.password)
    })
    .await?;

    match result {
        Ok(user) => Ok(Json(user.identity())),
        Err(PayrollError::Unauthorized { message }) => {
            warn!(correlation_id = %correlation_id, "Sign-in refused");
            Err(ApiErrorResponse::unauthenticated(message))
        }
        Err(err) => Err(reject(correlation_id, err)),
    }
}

/// Handler for GET /dashboard.
async fn dashboard_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<Dashboard>> {
    let correlation_id = Uuid::new_v4();
    let requester = require_identity(&state, &headers, correlation_id)?;

    let dashboard = service::load_dashboard(state.store(), &requester)
        .map_err(|err| reject(correlation_id, err))?;
    Ok(Json(dashboard))
}

/// Handler for POST /employees.
async fn add_employee_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<AddEmployeeRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let requester = require_identity(&state, &headers, correlation_id)?;
    let request = read_json(correlation_id, payload)?;

    let employee = service::add_employee(state.store(), &requester, request.into())
        .map_err(|err| reject(correlation_id, err))?;
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Handler for DELETE /employees/:id.
async fn delete_employee_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let correlation_id = Uuid::new_v4();
    let requester = require_identity(&state, &headers, correlation_id)?;

    parse_id("Employee", &id)
        .and_then(|employee_id| service::delete_employee(state.store(), &requester, employee_id))
        .map_err(|err| reject(correlation_id, err))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for POST /payrolls.
async fn generate_payroll_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<GeneratePayrollRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let requester = require_identity(&state, &headers, correlation_id)?;
    let request = read_json(correlation_id, payload)?;

    let payroll = service::generate_payroll(state.store(), &requester, request.into())
        .map_err(|err| reject(correlation_id, err))?;
    Ok((StatusCode::CREATED, Json(payroll)))
}

/// Handler for DELETE /payrolls/:id.
async fn delete_payroll_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let correlation_id = Uuid::new_v4();
    let requester = require_identity(&state, &headers, correlation_id)?;

    parse_id("Payroll", &id)
        .and_then(|payroll_id| service::delete_payroll(state.store(), &requester, payroll_id))
        .map_err(|err| reject(correlation_id, err))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /payslips/:id.
async fn payslip_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let requester = require_identity(&state, &headers, correlation_id)?;
    let payroll_id = parse_id("Payroll", &id).map_err(|err| reject(correlation_id, err))?;

    let outcome = service::view_payslip(
        state.store(),
        &requester,
        payroll_id,
        &state.config().payslip.currency_symbol,
    )
    .map_err(|err| reject(correlation_id, err))?;

    match outcome {
        PayslipOutcome::Authorized(payslip) => Ok(Json(*payslip)),
        PayslipOutcome::NotFound => Err(PayrollError::not_found("Payroll", payroll_id).into()),
        PayslipOutcome::Forbidden => Err(PayrollError::unauthorized(
            "this payslip belongs to another employee",
        )
        .into()),
    }
}

/// Handler for GET /payslips/:id/link.
async fn payslip_link_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let requester = require_identity(&state, &headers, correlation_id)?;

    let url = parse_id("Payroll", &id)
        .and_then(|payroll_id| {
            service::payslip_link_for(
                state.store(),
                &requester,
                payroll_id,
                &state.config().server.public_base_url,
            )
        })
        .map_err(|err| reject(correlation_id, err))?;
    Ok(Json(LinkResponse { url }))
}

/// Handler for GET /payslips/:id/qr.
///
/// Serves the payslip link as an SVG QR code, gated like the link itself.
async fn payslip_qr_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let requester = require_identity(&state, &headers, correlation_id)?;

    let svg = parse_id("Payroll", &id)
        .and_then(|payroll_id| {
            service::payslip_qr(
                state.store(),
                &requester,
                payroll_id,
                &state.config().server.public_base_url,
            )
        })
        .map_err(|err| reject(correlation_id, err))?;
    info!(
        correlation_id = %correlation_id,
        bytes = svg.len(),
        "Rendered payslip QR code"
    );
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}

fn require_identity(
    state: &AppState,
    headers: &HeaderMap,
    correlation_id: Uuid,
) -> ApiResult<Identity> {
    let claimed = headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| Uuid::parse_str(raw.trim()).ok());

    let provider = StoreIdentity::new(state.store(), claimed);
    provider.current_identity().ok_or_else(|| {
        warn!(correlation_id = %correlation_id, "Request without a known identity");
        ApiErrorResponse::unauthenticated("Sign in required")
    })
}

fn reject(correlation_id: Uuid, err: PayrollError) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    err.into()
}

/// Unwraps a JSON body, turning extractor rejections into API errors.
fn read_json<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> ApiResult<T> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the bad field.
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
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
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::bad_request(error))
}

/// Runs password-hashing work off the async executor.
async fn run_blocking<T, F>(correlation_id: Uuid, f: F) -> ApiResult<PayrollResult<T>>
where
    F: FnOnce() -> PayrollResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|err| {
        warn!(correlation_id = %correlation_id, error = %err, "Blocking task failed");
        ApiErrorResponse {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: ApiError::new("INTERNAL_ERROR", "Request could not be completed"),
        }
    })
}
