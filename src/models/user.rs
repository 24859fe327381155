//! User accounts, roles, and the session identity shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::Record;

/// The role assigned to a login account at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Manages employees and payrolls; may view every payslip.
    Admin,
    /// May view only the payslips of the employee record they own.
    Employee,
}

impl Role {
    /// Returns the wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Employee => "employee",
        }
    }
}

/// A registered login account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the account.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Login email, stored lower-cased.
    pub email: String,
    /// Argon2 PHC string. Never serialized.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Role granted at registration.
    pub role: Role,
    /// When the account was registered.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Returns the session shape for this account.
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id,
            role: self.role,
        }
    }
}

impl Record for User {
    const ENTITY: &'static str = "User";

    fn id(&self) -> Uuid {
        self.id
    }
}

/// The requesting identity as seen by authorization checks.
///
/// This is always passed explicitly; nothing in the crate reads an ambient
/// "current user".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// The user id of the requester.
    pub id: Uuid,
    /// The requester's role.
    pub role: Role,
}

impl Identity {
    /// Returns true if the identity holds the admin role.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{Identity, Role};
    /// use uuid::Uuid;
    ///
    /// let admin = Identity { id: Uuid::new_v4(), role: Role::Admin };
    /// assert!(admin.is_admin());
    /// ```
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
