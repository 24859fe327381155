//! Registration and sign-in.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::{hash_password, verify_password};
use crate::error::{PayrollError, PayrollResult};
use crate::models::{Employee, NOT_SET, Role, User};
use crate::store::{Datastore, Transaction};

use super::normalize_email;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Verified against on unknown emails so both refusals cost one argon2 run.
/// Same parameters as [`hash_password`]; matches no password.
const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Input for [`register_user`].
#[derive(Debug, Clone)]
pub struct RegisterUser {
    /// Display name.
    pub name: String,
    /// Login email; compared case-insensitively.
    pub email: String,
    /// Plain-text password.
    pub password: String,
    /// Must equal `password`.
    pub confirm_password: String,
    /// Requested role; ignored for the very first account, which is always admin.
    pub role: Role,
}

/// Registers a login account.
///
/// The first account ever registered becomes an admin regardless of the
/// requested role. Employee accounts are linked to the unowned employee
/// record with the same email, or get a fresh employee record.
///
/// # Errors
///
/// `ValidationFailure` for blank fields, mismatched passwords, or an email
/// already in use; nothing is written in that case.
pub fn register_user<S: Datastore>(store: &S, input: RegisterUser) -> PayrollResult<User> {
    let name = input.name.trim().to_string();
    let email = normalize_email(&input.email);

    if name.is_empty() {
        return Err(PayrollError::validation("name", "Name is required"));
    }
    if email.is_empty() {
        return Err(PayrollError::validation("email", "Email is required"));
    }
    if input.password.is_empty() {
        return Err(PayrollError::validation("password", "Password is required"));
    }
    if input.password != input.confirm_password {
        return Err(PayrollError::validation(
            "confirm_password",
            "Passwords do not match",
        ));
    }

    let password_hash = hash_password(&input.password)?;

    let user = store.transaction(|tx| {
        let taken = tx
            .users()
            .count_where(&|user| normalize_email(&user.email) == email)?;
        if taken > 0 {
            return Err(PayrollError::validation("email", "Email already in use"));
        }

        let first_account = tx.users().count_where(&|_| true)? == 0;
        let role = if first_account { Role::Admin } else { input.role };

        let user = tx.users().insert(User {
            id: Uuid::new_v4(),
            name,
            email: email.clone(),
            password_hash,
            role,
            created_at: Utc::now(),
        })?;

        if role == Role::Employee {
            link_employee_record(tx, &user)?;
        }

        Ok(user)
    });

    match &user {
        Ok(user) => info!(
            user_id = %user.id,
            role = user.role.as_str(),
            "User registered"
        ),
        Err(err) => warn!(error = %err, "Registration refused"),
    }
    user
}

/// Links `user` to the employee record carrying its email, creating one if
/// there is none.
fn link_employee_record(tx: &mut dyn Transaction, user: &User) -> PayrollResult<Employee> {
    let existing = tx
        .employees()
        .find_where(&|employee| normalize_email(&employee.email) == user.email)?;

    match existing.into_iter().next() {
        Some(employee) if employee.owner_id.is_none() => {
            let linked = tx.employees().update(Employee {
                owner_id: Some(user.id),
                ..employee
            })?;
            Ok(linked)
        }
        Some(_) => Err(PayrollError::validation(
            "email",
            "Email is already linked to another account",
        )),
        None => {
            let created = tx.employees().insert(Employee {
                id: Uuid::new_v4(),
                owner_id: Some(user.id),
                name: user.name.clone(),
                position: NOT_SET.to_string(),
                department: NOT_SET.to_string(),
                email: user.email.clone(),
                salary: Decimal::ZERO,
            })?;
            Ok(created)
        }
    }
}

/// Checks credentials and returns the matching account.
///
/// # Errors
///
/// `Unauthorized` when the email is unknown or the password is wrong.
pub fn authenticate<S: Datastore>(store: &S, email: &str, password: &str) -> PayrollResult<User> {
    let email = normalize_email(email);
    let found = store.transaction(|tx| {
        tx.users()
            .find_where(&|user| normalize_email(&user.email) == email)
    })?;

    let Some(user) = found.into_iter().next() else {
        warn!("Sign-in with unknown email");
        verify_password(password, DUMMY_PASSWORD_HASH)?;
        return Err(PayrollError::unauthorized(INVALID_CREDENTIALS));
    };

    if !verify_password(password, &user.password_hash)? {
        warn!(user_id = %user.id, "Sign-in with wrong password");
        return Err(PayrollError::unauthorized(INVALID_CREDENTIALS));
    }

    info!(user_id = %user.id, "User signed in");
    Ok(user)
}
