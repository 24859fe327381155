//! Employee records: creation and guarded deletion.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::authorization::require_admin;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{Employee, Identity, Role};
use crate::store::Datastore;

use super::normalize_email;

/// Input for [`add_employee`].
#[derive(Debug, Clone)]
pub struct NewEmployee {
    /// Full name.
    pub name: String,
    /// Job title.
    pub position: String,
    /// Department name.
    pub department: String,
    /// Contact email; must be unique ignoring case.
    pub email: String,
    /// Standing salary as typed; must be a non-negative number.
    pub salary: String,
}

/// Adds an employee without a linked login.
///
/// # Errors
///
/// `Unauthorized` for non-admins; `ValidationFailure` for a blank name or
/// email, a negative or non-numeric salary, or an email already used by
/// another employee. Nothing is written on failure.
pub fn add_employee<S: Datastore>(
    store: &S,
    requester: &Identity,
    input: NewEmployee,
) -> PayrollResult<Employee> {
    require_admin(requester, "add employees")?;

    let name = input.name.trim().to_string();
    let email = normalize_email(&input.email);
    if name.is_empty() {
        return Err(PayrollError::validation("name", "Name is required"));
    }
    if email.is_empty() {
        return Err(PayrollError::validation("email", "Email is required"));
    }
    let salary = Decimal::from_str(input.salary.trim())
        .map_err(|_| PayrollError::validation("salary", "Salary must be a number"))?;
    if salary.is_sign_negative() && !salary.is_zero() {
        return Err(PayrollError::validation(
            "salary",
            "Salary cannot be negative",
        ));
    }

    let employee = store.transaction(|tx| {
        let taken = tx
            .employees()
            .count_where(&|employee| normalize_email(&employee.email) == email)?;
        if taken > 0 {
            return Err(PayrollError::validation(
                "email",
                "An employee with this email already exists",
            ));
        }

        let employee = tx.employees().insert(Employee {
            id: Uuid::new_v4(),
            owner_id: None,
            name,
            position: input.position.trim().to_string(),
            department: input.department.trim().to_string(),
            email: email.clone(),
            salary,
        })?;
        Ok(employee)
    })?;

    info!(employee_id = %employee.id, "Employee added");
    Ok(employee)
}

/// Deletes an employee that no payroll references.
///
/// The reference count and the delete run in one transaction, so a payroll
/// generated concurrently either lands first and blocks the delete, or finds
/// the employee gone. A linked employee login is removed with the record.
///
/// # Errors
///
/// `Unauthorized` for non-admins, `NotFound` for an unknown id, and
/// `HasDependents` when payrolls still reference the employee.
pub fn delete_employee<S: Datastore>(
    store: &S,
    requester: &Identity,
    employee_id: Uuid,
) -> PayrollResult<Employee> {
    require_admin(requester, "delete employees")?;

    let result = store.transaction(|tx| {
        let employee = tx
            .employees()
            .get(employee_id)?
            .ok_or_else(|| PayrollError::not_found("Employee", employee_id))?;

        let payroll_count = tx
            .payrolls()
            .count_where(&|payroll| payroll.employee_id == employee_id)?;
        if payroll_count > 0 {
            return Err(PayrollError::HasDependents {
                employee_id,
                payroll_count,
            });
        }

        tx.employees().delete(employee_id)?;

        if let Some(owner_id) = employee.owner_id {
            let owner = tx.users().get(owner_id)?;
            if owner.is_some_and(|user| user.role == Role::Employee) {
                tx.users().delete(owner_id)?;
            }
        }

        Ok(employee)
    });

    match &result {
        Ok(_) => info!(employee_id = %employee_id, "Employee deleted"),
        Err(err) => warn!(employee_id = %employee_id, error = %err, "Employee not deleted"),
    }
    result
}
