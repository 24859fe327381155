//! Payslip viewing and sharing.

use tracing::{info, warn};
use uuid::Uuid;

use crate::authorization::resolve_payslip;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{Identity, PayslipOutcome, payslip_link, payslip_qr_svg};
use crate::store::Datastore;

/// Loads a payroll and its employee, then decides whether `requester` may
/// see them.
///
/// Missing records yield [`PayslipOutcome::NotFound`] and a refused viewer
/// [`PayslipOutcome::Forbidden`]; only store failures are errors.
pub fn view_payslip<S: Datastore>(
    store: &S,
    requester: &Identity,
    payroll_id: Uuid,
    currency_symbol: &str,
) -> PayrollResult<PayslipOutcome> {
    let (payroll, employee) = store.transaction(|tx| {
        let Some(payroll) = tx.payrolls().get(payroll_id)? else {
            return Ok((None, None));
        };
        let employee = tx.employees().get(payroll.employee_id)?;
        Ok::<_, PayrollError>((Some(payroll), employee))
    })?;

    let outcome = resolve_payslip(requester, payroll, employee, currency_symbol);
    match &outcome {
        PayslipOutcome::NotFound => {
            info!(payroll_id = %payroll_id, "Payslip not found");
        }
        PayslipOutcome::Forbidden => {
            warn!(
                payroll_id = %payroll_id,
                requester_id = %requester.id,
                "Payslip view refused"
            );
        }
        PayslipOutcome::Authorized(_) => {
            info!(payroll_id = %payroll_id, requester_id = %requester.id, "Payslip viewed");
        }
    }
    Ok(outcome)
}

/// Returns the shareable link to a payslip the requester may view.
///
/// # Errors
///
/// `NotFound` when the payslip does not exist and `Unauthorized` when the
/// requester may not view it.
pub fn payslip_link_for<S: Datastore>(
    store: &S,
    requester: &Identity,
    payroll_id: Uuid,
    base_url: &str,
) -> PayrollResult<String> {
    match view_payslip(store, requester, payroll_id, "")? {
        PayslipOutcome::NotFound => Err(PayrollError::not_found("Payroll", payroll_id)),
        PayslipOutcome::Forbidden => Err(PayrollError::unauthorized(
            "this payslip belongs to another employee",
        )),
        PayslipOutcome::Authorized(_) => Ok(payslip_link(base_url, payroll_id)),
    }
}

/// Returns the payslip link rendered as an SVG QR code.
///
/// Refused exactly when [`payslip_link_for`] is.
pub fn payslip_qr<S: Datastore>(
    store: &S,
    requester: &Identity,
    payroll_id: Uuid,
    base_url: &str,
) -> PayrollResult<String> {
    let link = payslip_link_for(store, requester, payroll_id, base_url)?;
    payslip_qr_svg(&link)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{RawAmount, RawPayrollInputs};
    use crate::models::{Employee, Role};
    use crate::service::{GeneratePayroll, NewEmployee, add_employee, fixtures, generate_payroll};
    use crate::store::{MemoryStore, StoreResult};
    use rust_decimal::Decimal;

    struct Fixture {
        store: MemoryStore,
        admin: Identity,
        owner: Identity,
        payroll_id: Uuid,
        employee_id: Uuid,
    }

    fn setup() -> Fixture {
        let store = MemoryStore::new();
        let admin = fixtures::admin();
        let owner = fixtures::employee_identity();
        let employee = add_employee(
            &store,
            &admin,
            NewEmployee {
                name: "John Doe".to_string(),
                position: "Engineer".to_string(),
                department: "R&D".to_string(),
                email: "john@example.com".to_string(),
                salary: "5000".to_string(),
            },
        )
        .unwrap();

        store
            .transaction(|tx| -> StoreResult<Employee> {
                tx.employees().update(Employee {
                    owner_id: Some(owner.id),
                    ..employee.clone()
                })
            })
            .unwrap();

        let payroll = generate_payroll(
            &store,
            &admin,
            GeneratePayroll {
                employee_id: employee.id.to_string(),
                pay_period: "March 2026".to_string(),
                pay_date: "2026-03-31".to_string(),
                amounts: RawPayrollInputs {
                    basic_salary: Some(RawAmount::from("5000")),
                    tax: Some(RawAmount::from("500")),
                    ..RawPayrollInputs::default()
                },
            },
        )
        .unwrap();

        Fixture {
            store,
            admin,
            owner,
            payroll_id: payroll.id,
            employee_id: employee.id,
        }
    }

    #[test]
    fn test_owner_sees_payslip() {
        let f = setup();
        let outcome = view_payslip(&f.store, &f.owner, f.payroll_id, "$").unwrap();

        let PayslipOutcome::Authorized(payslip) = outcome else {
            panic!("expected authorized payslip, got {outcome:?}");
        };
        assert_eq!(payslip.payroll.net_salary, Decimal::new(4500, 0));
        assert_eq!(payslip.employee.name, "John Doe");
        assert_eq!(payslip.currency_symbol, "$");
    }

    #[test]
    fn test_admin_sees_payslip() {
        let f = setup();
        let outcome = view_payslip(&f.store, &f.admin, f.payroll_id, "$").unwrap();
        assert!(matches!(outcome, PayslipOutcome::Authorized(_)));
    }

    #[test]
    fn test_other_employee_is_forbidden() {
        let f = setup();
        let stranger = Identity {
            id: Uuid::new_v4(),
            role: Role::Employee,
        };
        let outcome = view_payslip(&f.store, &stranger, f.payroll_id, "$").unwrap();
        assert_eq!(outcome, PayslipOutcome::Forbidden);
    }

    #[test]
    fn test_unknown_payroll_is_not_found() {
        let f = setup();
        let outcome = view_payslip(&f.store, &f.admin, Uuid::new_v4(), "$").unwrap();
        assert_eq!(outcome, PayslipOutcome::NotFound);
    }

    #[test]
    fn test_payroll_with_missing_employee_is_not_found() {
        let f = setup();
        f.store
            .transaction(|tx| tx.employees().delete(f.employee_id))
            .unwrap();

        let outcome = view_payslip(&f.store, &f.admin, f.payroll_id, "$").unwrap();
        assert_eq!(outcome, PayslipOutcome::NotFound);
    }

    #[test]
    fn test_link_for_authorized_viewer() {
        let f = setup();
        let link = payslip_link_for(&f.store, &f.owner, f.payroll_id, "https://pay.example.com").unwrap();
        assert_eq!(link, format!("https://pay.example.com/payslip/{}", f.payroll_id));
    }

    #[test]
    fn test_link_refused_for_stranger() {
        let f = setup();
        let err = payslip_link_for(
            &f.store,
            &fixtures::employee_identity(),
            f.payroll_id,
            "https://pay.example.com",
        )
        .unwrap_err();
        assert!(matches!(err, PayrollError::Unauthorized { .. }));
    }

    #[test]
    fn test_qr_for_authorized_viewer() {
        let f = setup();
        let svg = payslip_qr(&f.store, &f.owner, f.payroll_id, "https://pay.example.com").unwrap();

        let link = format!("https://pay.example.com/payslip/{}", f.payroll_id);
        assert_eq!(svg, payslip_qr_svg(&link).unwrap());
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn test_qr_gated_like_link() {
        let f = setup();

        let refused = payslip_qr(
            &f.store,
            &fixtures::employee_identity(),
            f.payroll_id,
            "https://pay.example.com",
        )
        .unwrap_err();
        let missing = payslip_qr(&f.store, &f.admin, Uuid::new_v4(), "https://pay.example.com")
            .unwrap_err();

        assert!(matches!(refused, PayrollError::Unauthorized { .. }));
        assert!(matches!(missing, PayrollError::NotFound { .. }));
    }
}
