//! Dashboard listing.

use serde::Serialize;
use tracing::debug;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{Employee, Identity, Payroll};
use crate::store::Datastore;

/// What a signed-in user sees on their dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    /// Employees visible to the viewer, by name.
    pub employees: Vec<Employee>,
    /// Payrolls visible to the viewer, newest first.
    pub payrolls: Vec<Payroll>,
}

/// Loads the dashboard for `requester`.
///
/// Admins see every employee and payroll. Anyone else sees only the employee
/// record they own and its payrolls; a user without a linked record sees an
/// empty dashboard.
pub fn load_dashboard<S: Datastore>(store: &S, requester: &Identity) -> PayrollResult<Dashboard> {
    let (mut employees, mut payrolls) = store.transaction(|tx| {
        if requester.is_admin() {
            let employees = tx.employees().find_where(&|_| true)?;
            let payrolls = tx.payrolls().find_where(&|_| true)?;
            return Ok((employees, payrolls));
        }

        let employees = tx
            .employees()
            .find_where(&|employee| employee.is_owned_by(requester.id))?;
        let mut payrolls = Vec::new();
        for employee in &employees {
            let employee_id = employee.id;
            payrolls.extend(
                tx.payrolls()
                    .find_where(&|payroll| payroll.employee_id == employee_id)?,
            );
        }
        Ok::<_, PayrollError>((employees, payrolls))
    })?;

    employees.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    payrolls.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

    debug!(
        requester_id = %requester.id,
        employees = employees.len(),
        payrolls = payrolls.len(),
        "Dashboard loaded"
    );
    Ok(Dashboard {
        employees,
        payrolls,
    })
}
