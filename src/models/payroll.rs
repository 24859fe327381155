//! Payroll records and the amounts they are derived from.
//!
//! A [`Payroll`] stores both the itemized inputs and the derived totals, so a
//! payslip can be rendered later without recomputing anything.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::Record;

/// Itemized earnings and deductions for one pay period.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayrollInputs;
/// use rust_decimal::Decimal;
///
/// let inputs = PayrollInputs {
///     basic_salary: Decimal::new(5000, 0),
///     ..PayrollInputs::default()
/// };
/// assert_eq!(inputs.overtime, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollInputs {
    /// Basic salary for the period.
    pub basic_salary: Decimal,
    /// Overtime pay.
    pub overtime: Decimal,
    /// Bonus pay.
    pub bonus: Decimal,
    /// Tax withheld.
    pub tax: Decimal,
    /// Insurance withheld.
    pub insurance: Decimal,
    /// Any other deductions.
    pub other_deductions: Decimal,
}

/// Totals derived from [`PayrollInputs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTotals {
    /// Basic salary plus overtime plus bonus.
    pub gross_salary: Decimal,
    /// Tax plus insurance plus other deductions.
    pub total_deductions: Decimal,
    /// Gross salary minus total deductions. May be negative.
    pub net_salary: Decimal,
}

/// A generated payroll for one employee and one pay period.
///
/// Immutable once created; it can only be deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payroll {
    /// Unique identifier for the payroll.
    pub id: Uuid,
    /// The employee this payroll pays.
    pub employee_id: Uuid,
    /// The employee's name at the time the payroll was generated.
    pub employee_name: String,
    /// Free-text period label (e.g., "March 2026").
    pub pay_period: String,
    /// The date the pay is issued.
    pub pay_date: NaiveDate,
    /// Basic salary for the period.
    pub basic_salary: Decimal,
    /// Overtime pay.
    pub overtime: Decimal,
    /// Bonus pay.
    pub bonus: Decimal,
    /// Tax withheld.
    pub tax: Decimal,
    /// Insurance withheld.
    pub insurance: Decimal,
    /// Any other deductions.
    pub other_deductions: Decimal,
    /// Derived: basic salary + overtime + bonus.
    pub gross_salary: Decimal,
    /// Derived: tax + insurance + other deductions.
    pub total_deductions: Decimal,
    /// Derived: gross salary - total deductions.
    pub net_salary: Decimal,
    /// When the payroll was generated.
    pub created_at: DateTime<Utc>,
}

impl Record for Payroll {
    const ENTITY: &'static str = "Payroll";

    fn id(&self) -> Uuid {
        self.id
    }
}
