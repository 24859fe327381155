//! HTTP API module for the Payroll Engine.
//!
//! This module exposes the payroll actions as JSON endpoints, plus a
//! stateless `/calculate` preview.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{USER_ID_HEADER, create_router};
pub use request::{
    AddEmployeeRequest, CalculateRequest, GeneratePayrollRequest, LoginRequest, RegisterRequest,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
