//! Employee model.
//!
//! An employee is a payroll subject. It may be linked to a login account
//! (its owning identity) so the employee can view their own payslips.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::Record;

/// Position and department given to employees created by self-registration.
pub const NOT_SET: &str = "Not set";

/// Represents an employee on the payroll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: Uuid,
    /// The login account linked to this employee, if any.
    #[serde(default)]
    pub owner_id: Option<Uuid>,
    /// Full name.
    pub name: String,
    /// Job title.
    pub position: String,
    /// Department name.
    pub department: String,
    /// Contact email, stored lower-cased and unique across employees.
    pub email: String,
    /// Standing salary, used to pre-fill basic salary on new payrolls.
    pub salary: Decimal,
}

impl Employee {
    /// Returns true if the given user id is this employee's owning identity.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::Employee;
    /// use rust_decimal::Decimal;
    /// use uuid::Uuid;
    ///
    /// let owner = Uuid::new_v4();
    /// let employee = Employee {
    ///     id: Uuid::new_v4(),
    ///     owner_id: Some(owner),
    ///     name: "John Doe".to_string(),
    ///     position: "Engineer".to_string(),
    ///     department: "R&D".to_string(),
    ///     email: "john@example.com".to_string(),
    ///     salary: Decimal::new(5000, 0),
    /// };
    /// assert!(employee.is_owned_by(owner));
    /// assert!(!employee.is_owned_by(Uuid::new_v4()));
    /// ```
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == Some(user_id)
    }
}

impl Record for Employee {
    const ENTITY: &'static str = "Employee";

    fn id(&self) -> Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_employee_without_owner() {
        let json = r#"{
            "id": "6f1c1e0a-1d5b-4c4e-9a57-0d3f4a3a9b10",
            "name": "John Doe",
            "position": "Engineer",
            "department": "R&D",
            "email": "john@example.com",
            "salary": "5000.00"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.owner_id, None);
        assert_eq!(employee.salary, Decimal::new(500000, 2));
        assert!(!employee.is_owned_by(Uuid::nil()));
    }

    #[test]
    fn test_salary_serializes_as_string() {
        let employee = Employee {
            id: Uuid::nil(),
            owner_id: None,
            name: "John Doe".to_string(),
            position: NOT_SET.to_string(),
            department: NOT_SET.to_string(),
            email: "john@example.com".to_string(),
            salary: Decimal::new(123456, 2),
        };

        let json = serde_json::to_value(&employee).unwrap();
        assert_eq!(json["salary"], "1234.56");
        assert_eq!(json["position"], "Not set");
        assert!(json["owner_id"].is_null());
    }
}
