//! Argon2 password hashing.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::error::{PayrollError, PayrollResult};

/// Hashes a password into an argon2 PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> PayrollResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PayrollError::PasswordHash {
            message: e.to_string(),
        })
}

/// Checks a password against a stored PHC string.
///
/// A wrong password is `Ok(false)`; only an unreadable stored hash is an error.
pub fn verify_password(password: &str, hashed: &str) -> PayrollResult<bool> {
    let parsed = PasswordHash::new(hashed).map_err(|e| PayrollError::PasswordHash {
        message: e.to_string(),
    })?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hashed = hash_password("correct horse").unwrap();
        assert!(hashed.starts_with("$argon2"));
        assert!(verify_password("correct horse", &hashed).unwrap());
        assert!(!verify_password("battery staple", &hashed).unwrap());
    }

    #[test]
    fn test_same_password_gets_different_salts() {
        let first = hash_password("secret").unwrap();
        let second = hash_password("secret").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let result = verify_password("secret", "not-a-phc-string");
        assert!(matches!(result, Err(PayrollError::PasswordHash { .. })));
    }
}
