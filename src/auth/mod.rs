//! Credentials and identity for the Payroll Engine.
//!
//! Passwords are stored as argon2 hashes. Session issuance is left to the
//! deployment; this module only defines how an identity is obtained.

mod identity;
mod password;

pub use identity::{IdentityProvider, StoreIdentity};
pub use password::{hash_password, verify_password};
