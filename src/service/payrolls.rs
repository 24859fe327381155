//! Payroll generation and deletion.

use chrono::{NaiveDate, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::authorization::require_admin;
use crate::calculation::{RawPayrollInputs, calculate_totals};
use crate::error::{PayrollError, PayrollResult};
use crate::models::{Identity, Payroll};
use crate::store::Datastore;

use super::parse_id;

const PAY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Input for [`generate_payroll`].
#[derive(Debug, Clone)]
pub struct GeneratePayroll {
    /// The employee to pay, as submitted.
    pub employee_id: String,
    /// Free-text period label.
    pub pay_period: String,
    /// Pay date in `YYYY-MM-DD` form.
    pub pay_date: String,
    /// Itemized amounts as typed.
    pub amounts: RawPayrollInputs,
}

/// Generates and stores a payroll for one employee.
///
/// The employee's name is copied onto the payroll. When basic salary is
/// omitted entirely it defaults to the employee's standing salary; every
/// other missing, blank or unparseable amount counts as zero.
///
/// # Errors
///
/// `Unauthorized` for non-admins; `ValidationFailure` for a missing employee
/// selection, blank period or malformed date; `NotFound` for an unknown
/// employee.
pub fn generate_payroll<S: Datastore>(
    store: &S,
    requester: &Identity,
    input: GeneratePayroll,
) -> PayrollResult<Payroll> {
    require_admin(requester, "generate payrolls")?;

    if input.employee_id.trim().is_empty() {
        return Err(PayrollError::validation(
            "employee_id",
            "Please select an employee",
        ));
    }
    let employee_id = parse_id("Employee", &input.employee_id)?;

    let pay_period = input.pay_period.trim().to_string();
    if pay_period.is_empty() {
        return Err(PayrollError::validation(
            "pay_period",
            "Pay period is required",
        ));
    }
    let pay_date = NaiveDate::parse_from_str(input.pay_date.trim(), PAY_DATE_FORMAT).map_err(
        |_| PayrollError::validation("pay_date", "Pay date must be a date like 2026-03-31"),
    )?;

    let payroll = store.transaction(|tx| {
        let employee = tx
            .employees()
            .get(employee_id)?
            .ok_or_else(|| PayrollError::not_found("Employee", employee_id))?;

        let mut inputs = input.amounts.coerce();
        if input.amounts.basic_salary.is_none() {
            debug!(employee_id = %employee_id, "Basic salary defaulted from employee salary");
            inputs.basic_salary = employee.salary;
        }
        let totals = calculate_totals(&inputs);

        let payroll = tx.payrolls().insert(Payroll {
            id: Uuid::new_v4(),
            employee_id,
            employee_name: employee.name,
            pay_period,
            pay_date,
            basic_salary: inputs.basic_salary,
            overtime: inputs.overtime,
            bonus: inputs.bonus,
            tax: inputs.tax,
            insurance: inputs.insurance,
            other_deductions: inputs.other_deductions,
            gross_salary: totals.gross_salary,
            total_deductions: totals.total_deductions,
            net_salary: totals.net_salary,
            created_at: Utc::now(),
        })?;
        Ok::<_, PayrollError>(payroll)
    })?;

    info!(
        payroll_id = %payroll.id,
        employee_id = %payroll.employee_id,
        net_salary = %payroll.net_salary,
        "Payroll generated"
    );
    Ok(payroll)
}

/// Deletes a payroll.
///
/// # Errors
///
/// `Unauthorized` for non-admins and `NotFound` for an unknown id.
pub fn delete_payroll<S: Datastore>(
    store: &S,
    requester: &Identity,
    payroll_id: Uuid,
) -> PayrollResult<Payroll> {
    require_admin(requester, "delete payrolls")?;

    let payroll = store.transaction(|tx| {
        let payroll = tx
            .payrolls()
            .get(payroll_id)?
            .ok_or_else(|| PayrollError::not_found("Payroll", payroll_id))?;
        tx.payrolls().delete(payroll_id)?;
        Ok::<_, PayrollError>(payroll)
    })?;

    info!(payroll_id = %payroll_id, "Payroll deleted");
    Ok(payroll)
}
