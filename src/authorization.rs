//! Authorization rules for payslips and admin-only actions.
//!
//! Every check takes the requesting [`Identity`] as an explicit argument.

use crate::error::{PayrollError, PayrollResult};
use crate::models::{Employee, Identity, Payroll, Payslip, PayslipEmployee, PayslipOutcome};

/// Returns true if `requester` may view payslips of `employee`.
///
/// Admins may view every payslip; anyone else only the payslips of the
/// employee record they own.
///
/// # Examples
///
/// ```
/// use payroll_engine::authorization::authorize_payslip;
/// use payroll_engine::models::{Employee, Identity, Role};
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let owner = Identity { id: Uuid::new_v4(), role: Role::Employee };
/// let employee = Employee {
///     id: Uuid::new_v4(),
///     owner_id: Some(owner.id),
///     name: "John Doe".to_string(),
///     position: "Engineer".to_string(),
///     department: "R&D".to_string(),
///     email: "john@example.com".to_string(),
///     salary: Decimal::new(5000, 0),
/// };
///
/// assert!(authorize_payslip(&owner, &employee));
/// let stranger = Identity { id: Uuid::new_v4(), role: Role::Employee };
/// assert!(!authorize_payslip(&stranger, &employee));
/// ```
pub fn authorize_payslip(requester: &Identity, employee: &Employee) -> bool {
    requester.is_admin() || employee.is_owned_by(requester.id)
}

/// Resolves a payslip view request once its records have been looked up.
///
/// A missing payroll or employee is `NotFound`, which takes precedence over
/// the authorization check.
pub fn resolve_payslip(
    requester: &Identity,
    payroll: Option<Payroll>,
    employee: Option<Employee>,
    currency_symbol: &str,
) -> PayslipOutcome {
    let (Some(payroll), Some(employee)) = (payroll, employee) else {
        return PayslipOutcome::NotFound;
    };

    if !authorize_payslip(requester, &employee) {
        return PayslipOutcome::Forbidden;
    }

    PayslipOutcome::Authorized(Box::new(Payslip {
        payroll,
        employee: PayslipEmployee::from(&employee),
        currency_symbol: currency_symbol.to_string(),
    }))
}

/// Fails with [`PayrollError::Unauthorized`] unless `requester` is an admin.
pub fn require_admin(requester: &Identity, action: &str) -> PayrollResult<()> {
    if requester.is_admin() {
        Ok(())
    } else {
        Err(PayrollError::unauthorized(format!(
            "only admins may {action}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn identity(role: Role) -> Identity {
        Identity {
            id: Uuid::new_v4(),
            role,
        }
    }

    fn create_test_employee(owner_id: Option<Uuid>) -> Employee {
        Employee {
            id: Uuid::new_v4(),
            owner_id,
            name: "John Doe".to_string(),
            position: "Engineer".to_string(),
            department: "R&D".to_string(),
            email: "john@example.com".to_string(),
            salary: Decimal::new(5000, 0),
        }
    }

    fn create_test_payroll(employee: &Employee) -> Payroll {
        Payroll {
            id: Uuid::new_v4(),
            employee_id: employee.id,
            employee_name: employee.name.clone(),
            pay_period: "March 2026".to_string(),
            pay_date: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
            basic_salary: Decimal::new(5000, 0),
            overtime: Decimal::ZERO,
            bonus: Decimal::ZERO,
            tax: Decimal::ZERO,
            insurance: Decimal::ZERO,
            other_deductions: Decimal::ZERO,
            gross_salary: Decimal::new(5000, 0),
            total_deductions: Decimal::ZERO,
            net_salary: Decimal::new(5000, 0),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_admin_may_view_any_payslip() {
        let admin = identity(Role::Admin);
        assert!(authorize_payslip(&admin, &create_test_employee(None)));
        assert!(authorize_payslip(
            &admin,
            &create_test_employee(Some(Uuid::new_v4()))
        ));
    }

    #[test]
    fn test_owner_may_view_own_payslip() {
        let owner = identity(Role::Employee);
        assert!(authorize_payslip(
            &owner,
            &create_test_employee(Some(owner.id))
        ));
    }

    #[test]
    fn test_other_employee_may_not_view() {
        let requester = identity(Role::Employee);
        assert!(!authorize_payslip(
            &requester,
            &create_test_employee(Some(Uuid::new_v4()))
        ));
    }

    #[test]
    fn test_unowned_employee_is_admin_only() {
        let requester = identity(Role::Employee);
        assert!(!authorize_payslip(&requester, &create_test_employee(None)));
    }

    #[test]
    fn test_resolve_missing_payroll_is_not_found() {
        let admin = identity(Role::Admin);
        let employee = create_test_employee(None);
        assert_eq!(
            resolve_payslip(&admin, None, Some(employee), "$"),
            PayslipOutcome::NotFound
        );
    }

    #[test]
    fn test_resolve_missing_employee_is_not_found_even_for_admin() {
        let admin = identity(Role::Admin);
        let employee = create_test_employee(None);
        let payroll = create_test_payroll(&employee);
        assert_eq!(
            resolve_payslip(&admin, Some(payroll), None, "$"),
            PayslipOutcome::NotFound
        );
    }

    #[test]
    fn test_resolve_stranger_is_forbidden() {
        let requester = identity(Role::Employee);
        let employee = create_test_employee(Some(Uuid::new_v4()));
        let payroll = create_test_payroll(&employee);
        assert_eq!(
            resolve_payslip(&requester, Some(payroll), Some(employee), "$"),
            PayslipOutcome::Forbidden
        );
    }

    #[test]
    fn test_resolve_owner_is_authorized() {
        let owner = identity(Role::Employee);
        let employee = create_test_employee(Some(owner.id));
        let payroll = create_test_payroll(&employee);

        match resolve_payslip(&owner, Some(payroll.clone()), Some(employee.clone()), "€") {
            PayslipOutcome::Authorized(payslip) => {
                assert_eq!(payslip.payroll, payroll);
                assert_eq!(payslip.employee.id, employee.id);
                assert_eq!(payslip.currency_symbol, "€");
            }
            other => panic!("expected authorized payslip, got {other:?}"),
        }
    }

    #[test]
    fn test_require_admin() {
        assert!(require_admin(&identity(Role::Admin), "delete payrolls").is_ok());

        let err = require_admin(&identity(Role::Employee), "delete payrolls").unwrap_err();
        assert_eq!(err.to_string(), "Not authorized: only admins may delete payrolls");
    }
}
