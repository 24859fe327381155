//! Calculation logic for the Payroll Engine.
//!
//! This module contains the lenient parsing of submitted amounts and the
//! gross-to-net payroll calculation.

mod amount;
mod payroll_totals;

pub use amount::{RawAmount, parse_amount, parse_optional_amount};
pub use payroll_totals::{
    PayrollCalculation, RawPayrollInputs, calculate_payroll, calculate_totals,
};
