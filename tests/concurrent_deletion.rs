//! Races employee deletion against payroll generation.
//!
//! Whichever action commits first wins; in no interleaving may a payroll end
//! up referencing a deleted employee.

use std::sync::{Arc, Barrier};
use std::thread;

use payroll_engine::calculation::RawPayrollInputs;
use payroll_engine::error::PayrollError;
use payroll_engine::models::{Identity, Role};
use payroll_engine::service::{
    GeneratePayroll, NewEmployee, add_employee, delete_employee, generate_payroll,
};
use payroll_engine::store::{Datastore, MemoryStore, StoreResult};
use uuid::Uuid;

const ROUNDS: usize = 200;

fn admin() -> Identity {
    Identity {
        id: Uuid::new_v4(),
        role: Role::Admin,
    }
}

fn dangling_payrolls(store: &MemoryStore) -> usize {
    store
        .transaction(|tx| -> StoreResult<usize> {
            let payrolls = tx.payrolls().find_where(&|_| true)?;
            let mut dangling = 0;
            for payroll in payrolls {
                if tx.employees().get(payroll.employee_id)?.is_none() {
                    dangling += 1;
                }
            }
            Ok(dangling)
        })
        .unwrap()
}

#[test]
fn test_delete_and_generate_never_leave_dangling_payrolls() {
    let store = Arc::new(MemoryStore::new());
    let admin = admin();

    for round in 0..ROUNDS {
        let employee = add_employee(
            &*store,
            &admin,
            NewEmployee {
                name: format!("Employee {round}"),
                position: "Engineer".to_string(),
                department: "R&D".to_string(),
                email: format!("employee{round}@example.com"),
                salary: "1000".to_string(),
            },
        )
        .unwrap();

        let barrier = Arc::new(Barrier::new(2));

        let deleter = {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                delete_employee(&*store, &admin, employee.id)
            })
        };
        let generator = {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                generate_payroll(
                    &*store,
                    &admin,
                    GeneratePayroll {
                        employee_id: employee.id.to_string(),
                        pay_period: "March 2026".to_string(),
                        pay_date: "2026-03-31".to_string(),
                        amounts: RawPayrollInputs::default(),
                    },
                )
            })
        };

        let deleted = deleter.join().unwrap();
        let generated = generator.join().unwrap();

        match (&deleted, &generated) {
            (Ok(_), Err(PayrollError::NotFound { .. })) => {}
            (Err(PayrollError::HasDependents { payroll_count: 1, .. }), Ok(_)) => {}
            other => panic!("round {round}: unexpected outcome {other:?}"),
        }
    }

    assert_eq!(dangling_payrolls(&store), 0);
}
