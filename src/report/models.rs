//! Wire-format records for the voucher endpoint.
//!
//! Field names follow the JSON contract (camelCase). Monetary amounts are
//! `Decimal` so values like 500.00 survive exactly.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Label rendered when the caller does not supply a company name.
pub const DEFAULT_COMPANY_NAME: &str = "AFCO ERP";

/// An accounting voucher: header fields plus itemized debit/credit lines.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Voucher {
    /// Also used as the output filename component.
    pub voucher_number: String,
    pub voucher_type: String,
    /// Free-form date string, not validated here.
    pub voucher_date: String,
    #[serde(default)]
    pub description: Option<String>,
    pub total_amount: Decimal,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub company_address: Option<String>,
    /// Rendering order is input order.
    #[serde(default)]
    pub line_entries: Vec<VoucherLine>,
}

impl Voucher {
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    pub fn company_name(&self) -> &str {
        self.company_name.as_deref().unwrap_or(DEFAULT_COMPANY_NAME)
    }

    pub fn company_address(&self) -> &str {
        self.company_address.as_deref().unwrap_or("")
    }
}

/// One row of a voucher, attributing an amount to an account code.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoucherLine {
    pub account_code: String,
    #[serde(default)]
    pub account_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub debit_amount: Decimal,
    #[serde(default)]
    pub credit_amount: Decimal,
}
