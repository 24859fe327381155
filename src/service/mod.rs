//! Payroll actions.
//!
//! Each public function here is one user-triggered action. An action runs as
//! a single store transaction: validation and dependency checks happen before
//! anything is written, and a failed action leaves the store unchanged.
//! Admin-only actions take the requester's [`Identity`](crate::models::Identity)
//! explicitly.

mod dashboard;
mod employees;
mod payrolls;
mod payslips;
mod users;

use uuid::Uuid;

use crate::error::{PayrollError, PayrollResult};

pub use dashboard::{Dashboard, load_dashboard};
pub use employees::{NewEmployee, add_employee, delete_employee};
pub use payrolls::{GeneratePayroll, delete_payroll, generate_payroll};
pub use payslips::{payslip_link_for, payslip_qr, view_payslip};
pub use users::{RegisterUser, authenticate, register_user};

/// Canonical form of an email address for storage and comparison.
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Parses a record id; a malformed id cannot name an existing record.
pub fn parse_id(entity: &'static str, raw: &str) -> PayrollResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| PayrollError::not_found(entity, raw))
}
