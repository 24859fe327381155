//! Payslip view model.
//!
//! A payslip is the read-only presentation of one [`Payroll`] joined with the
//! employee it pays.

use qrcode::{Color, EcLevel, QrCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Employee, Payroll};
use crate::error::{PayrollError, PayrollResult};

/// Path segment under which payslips are served to browsers.
pub const PAYSLIP_PATH: &str = "payslip";

/// Light modules around the QR symbol, in modules.
pub const QR_MARGIN: usize = 2;

/// Rendered edge length of a payslip QR code, in pixels.
pub const QR_SIZE_PX: u32 = 200;

/// The employee details printed on a payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipEmployee {
    /// The employee id.
    pub id: Uuid,
    /// Full name.
    pub name: String,
    /// Job title.
    pub position: String,
    /// Department name.
    pub department: String,
    /// Contact email.
    pub email: String,
}

impl From<&Employee> for PayslipEmployee {
    fn from(employee: &Employee) -> Self {
        PayslipEmployee {
            id: employee.id,
            name: employee.name.clone(),
            position: employee.position.clone(),
            department: employee.department.clone(),
            email: employee.email.clone(),
        }
    }
}

/// A payroll ready to be shown to an authorized viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    /// The payroll being presented.
    pub payroll: Payroll,
    /// The employee the payroll pays.
    pub employee: PayslipEmployee,
    /// Currency symbol amounts are printed with.
    pub currency_symbol: String,
}

/// The terminal outcome of a payslip view request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayslipOutcome {
    /// The payroll or its employee could not be loaded.
    NotFound,
    /// Both loaded, but the requester may not view them.
    Forbidden,
    /// The requester may view the payslip.
    Authorized(Box<Payslip>),
}

/// Builds the shareable link to a payslip.
///
/// Exactly one slash separates the base URL from the payslip path.
///
/// # Example
///
/// ```
/// use payroll_engine::models::payslip_link;
/// use uuid::Uuid;
///
/// let id = Uuid::nil();
/// assert_eq!(
///     payslip_link("https://payroll.example.com/", id),
///     format!("https://payroll.example.com/payslip/{id}")
/// );
/// ```
pub fn payslip_link(base_url: &str, payroll_id: Uuid) -> String {
    format!(
        "{}/{}/{}",
        base_url.trim_end_matches('/'),
        PAYSLIP_PATH,
        payroll_id
    )
}

/// Renders a payslip link as an SVG QR code.
///
/// The symbol uses the highest error correction level and is drawn black on
/// white with a [`QR_MARGIN`]-module quiet zone.
pub fn payslip_qr_svg(link: &str) -> PayrollResult<String> {
    let code = QrCode::with_error_correction_level(link, EcLevel::H).map_err(|err| {
        PayrollError::QrEncoding {
            message: err.to_string(),
        }
    })?;

    let width = code.width();
    let edge = width + 2 * QR_MARGIN;

    let mut path = String::new();
    for (index, color) in code.to_colors().into_iter().enumerate() {
        if color == Color::Dark {
            let x = index % width + QR_MARGIN;
            let y = index / width + QR_MARGIN;
            path.push_str(&format!("M{x},{y}h1v1h-1z"));
        }
    }

    Ok(format!(
        r##"<?xml version="1.0" encoding="UTF-8"?><svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{QR_SIZE_PX}" height="{QR_SIZE_PX}" viewBox="0 0 {edge} {edge}" shape-rendering="crispEdges"><rect width="{edge}" height="{edge}" fill="#ffffff"/><path fill="#000000" d="{path}"/></svg>"##
    ))
}
