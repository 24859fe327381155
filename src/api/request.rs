//! Request types for the payroll API.
//!
//! Amount fields accept either JSON numbers or strings, exactly as a form
//! would submit them; coercion happens in the calculation layer.

use serde::{Deserialize, Serialize};

use crate::calculation::{RawAmount, RawPayrollInputs};
use crate::models::Role;
use crate::service::{GeneratePayroll, NewEmployee, RegisterUser};

/// Request body for `POST /register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
    /// Must repeat `password`.
    pub confirm_password: String,
    /// Requested role; defaults to employee.
    #[serde(default = "default_role")]
    pub role: Role,
}

fn default_role() -> Role {
    Role::Employee
}

impl From<RegisterRequest> for RegisterUser {
    fn from(req: RegisterRequest) -> Self {
        RegisterUser {
            name: req.name,
            email: req.email,
            password: req.password,
            confirm_password: req.confirm_password,
            role: req.role,
        }
    }
}

/// Request body for `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

/// Request body for `POST /employees`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddEmployeeRequest {
    /// Full name.
    pub name: String,
    /// Job title.
    #[serde(default)]
    pub position: String,
    /// Department name.
    #[serde(default)]
    pub department: String,
    /// Contact email.
    pub email: String,
    /// Standing salary.
    pub salary: RawAmount,
}

impl From<AddEmployeeRequest> for NewEmployee {
    fn from(req: AddEmployeeRequest) -> Self {
        NewEmployee {
            name: req.name,
            position: req.position,
            department: req.department,
            email: req.email,
            salary: req.salary.0,
        }
    }
}

/// Request body for `POST /payrolls`.
///
/// The six amounts sit at the top level next to the payroll fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratePayrollRequest {
    /// The employee to pay.
    #[serde(default)]
    pub employee_id: String,
    /// Free-text period label, e.g. "March 2026".
    #[serde(default)]
    pub pay_period: String,
    /// Pay date, `YYYY-MM-DD`.
    #[serde(default)]
    pub pay_date: String,
    /// Itemized amounts.
    #[serde(flatten)]
    pub amounts: RawPayrollInputs,
}

impl From<GeneratePayrollRequest> for GeneratePayroll {
    fn from(req: GeneratePayrollRequest) -> Self {
        GeneratePayroll {
            employee_id: req.employee_id,
            pay_period: req.pay_period,
            pay_date: req.pay_date,
            amounts: req.amounts,
        }
    }
}

/// Request body for `POST /calculate`.
pub type CalculateRequest = RawPayrollInputs;
