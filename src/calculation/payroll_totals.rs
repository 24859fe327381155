//! Gross-to-net payroll calculation.
//!
//! Gross salary is basic salary plus overtime plus bonus; total deductions
//! are tax plus insurance plus other deductions; net salary is gross minus
//! deductions. Net salary is allowed to go negative.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AuditStep, PayrollInputs, PayrollTotals};

use super::amount::RawAmount;

/// Itemized amounts as submitted on a payroll form.
///
/// Every field is optional; absent, blank or unparseable values count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPayrollInputs {
    /// Basic salary.
    #[serde(default)]
    pub basic_salary: Option<RawAmount>,
    /// Overtime pay.
    #[serde(default)]
    pub overtime: Option<RawAmount>,
    /// Bonus pay.
    #[serde(default)]
    pub bonus: Option<RawAmount>,
    /// Tax withheld.
    #[serde(default)]
    pub tax: Option<RawAmount>,
    /// Insurance withheld.
    #[serde(default)]
    pub insurance: Option<RawAmount>,
    /// Any other deductions.
    #[serde(default)]
    pub other_deductions: Option<RawAmount>,
}

impl RawPayrollInputs {
    /// Coerces every field to a decimal.
    pub fn coerce(&self) -> PayrollInputs {
        let amount = |raw: &Option<RawAmount>| {
            raw.as_ref()
                .map(RawAmount::amount)
                .unwrap_or(Decimal::ZERO)
        };

        PayrollInputs {
            basic_salary: amount(&self.basic_salary),
            overtime: amount(&self.overtime),
            bonus: amount(&self.bonus),
            tax: amount(&self.tax),
            insurance: amount(&self.insurance),
            other_deductions: amount(&self.other_deductions),
        }
    }
}

/// The result of a payroll calculation, including its audit steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollCalculation {
    /// The coerced inputs the totals were derived from.
    pub inputs: PayrollInputs,
    /// The derived totals.
    pub totals: PayrollTotals,
    /// One step per derived total, in calculation order.
    pub audit_steps: Vec<AuditStep>,
}

/// Derives gross salary, total deductions and net salary.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_totals;
/// use payroll_engine::models::PayrollInputs;
/// use rust_decimal::Decimal;
///
/// let totals = calculate_totals(&PayrollInputs {
///     basic_salary: Decimal::new(5000, 0),
///     overtime: Decimal::new(200, 0),
///     bonus: Decimal::new(100, 0),
///     tax: Decimal::new(300, 0),
///     insurance: Decimal::new(150, 0),
///     other_deductions: Decimal::new(50, 0),
/// });
/// assert_eq!(totals.gross_salary, Decimal::new(5300, 0));
/// assert_eq!(totals.total_deductions, Decimal::new(500, 0));
/// assert_eq!(totals.net_salary, Decimal::new(4800, 0));
/// ```
pub fn calculate_totals(inputs: &PayrollInputs) -> PayrollTotals {
    let gross_salary = inputs
        .basic_salary
        .saturating_add(inputs.overtime)
        .saturating_add(inputs.bonus);
    let total_deductions = inputs
        .tax
        .saturating_add(inputs.insurance)
        .saturating_add(inputs.other_deductions);

    PayrollTotals {
        gross_salary,
        total_deductions,
        net_salary: gross_salary.saturating_sub(total_deductions),
    }
}

/// Derives the totals and records an audit step for each of them.
///
/// Step numbers start at `first_step`.
pub fn calculate_payroll(inputs: &PayrollInputs, first_step: u32) -> PayrollCalculation {
    let totals = calculate_totals(inputs);

    let gross_step = AuditStep {
        step_number: first_step,
        rule_id: "gross_salary".to_string(),
        rule_name: "Gross Salary".to_string(),
        input: serde_json::json!({
            "basic_salary": inputs.basic_salary.normalize().to_string(),
            "overtime": inputs.overtime.normalize().to_string(),
            "bonus": inputs.bonus.normalize().to_string()
        }),
        output: serde_json::json!({
            "gross_salary": totals.gross_salary.normalize().to_string()
        }),
        reasoning: format!(
            "${} + ${} + ${} = ${}",
            inputs.basic_salary.normalize(),
            inputs.overtime.normalize(),
            inputs.bonus.normalize(),
            totals.gross_salary.normalize()
        ),
    };

    let deductions_step = AuditStep {
        step_number: first_step + 1,
        rule_id: "total_deductions".to_string(),
        rule_name: "Total Deductions".to_string(),
        input: serde_json::json!({
            "tax": inputs.tax.normalize().to_string(),
            "insurance": inputs.insurance.normalize().to_string(),
            "other_deductions": inputs.other_deductions.normalize().to_string()
        }),
        output: serde_json::json!({
            "total_deductions": totals.total_deductions.normalize().to_string()
        }),
        reasoning: format!(
            "${} + ${} + ${} = ${}",
            inputs.tax.normalize(),
            inputs.insurance.normalize(),
            inputs.other_deductions.normalize(),
            totals.total_deductions.normalize()
        ),
    };

    let net_reasoning = if totals.net_salary.is_sign_negative() && !totals.net_salary.is_zero() {
        format!(
            "${} - ${} = ${} (deductions exceed earnings)",
            totals.gross_salary.normalize(),
            totals.total_deductions.normalize(),
            totals.net_salary.normalize()
        )
    } else {
        format!(
            "${} - ${} = ${}",
            totals.gross_salary.normalize(),
            totals.total_deductions.normalize(),
            totals.net_salary.normalize()
        )
    };

    let net_step = AuditStep {
        step_number: first_step + 2,
        rule_id: "net_salary".to_string(),
        rule_name: "Net Salary".to_string(),
        input: serde_json::json!({
            "gross_salary": totals.gross_salary.normalize().to_string(),
            "total_deductions": totals.total_deductions.normalize().to_string()
        }),
        output: serde_json::json!({
            "net_salary": totals.net_salary.normalize().to_string()
        }),
        reasoning: net_reasoning,
    };

    PayrollCalculation {
        inputs: *inputs,
        totals,
        audit_steps: vec![gross_step, deductions_step, net_step],
    }
}
