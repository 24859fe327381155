//! Core data models for the Payroll Engine.
//!
//! This module contains all the domain records and view models used
//! throughout the engine.

mod audit;
mod employee;
mod payroll;
mod payslip;
mod user;

pub use audit::AuditStep;
pub use employee::{Employee, NOT_SET};
pub use payroll::{Payroll, PayrollInputs, PayrollTotals};
pub use payslip::{
    PAYSLIP_PATH, Payslip, PayslipEmployee, PayslipOutcome, QR_MARGIN, QR_SIZE_PX, payslip_link,
    payslip_qr_svg,
};
pub use user::{Identity, Role, User};
