//! Opt-in voucher balance validation.
//!
//! Disabled by default so out of the box the service renders whatever it is
//! given, matching the upstream accounting flow. When enabled, a voucher must
//! reconcile before any rendering work starts.

use std::fmt;

use rust_decimal::Decimal;

use super::models::Voucher;

/// One reconciliation violation with a descriptive message.
#[derive(Debug, Clone)]
pub struct BalanceViolation {
    pub message: String,
}

impl fmt::Display for BalanceViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Collected violations, formatted as a single caller-facing message.
#[derive(Debug, Default)]
pub struct BalanceErrors {
    violations: Vec<BalanceViolation>,
}

impl BalanceErrors {
    fn add(&mut self, message: String) {
        self.violations.push(BalanceViolation { message });
    }

    fn into_result(self) -> Result<(), String> {
        if self.violations.is_empty() {
            return Ok(());
        }
        let parts: Vec<String> = self.violations.iter().map(|v| v.to_string()).collect();
        Err(format!("voucher is not balanced: {}", parts.join("; ")))
    }
}

/// Check that debits, credits, and the stated total reconcile.
pub fn validate_balanced(voucher: &Voucher) -> Result<(), String> {
    let debit_total: Decimal = voucher.line_entries.iter().map(|l| l.debit_amount).sum();
    let credit_total: Decimal = voucher.line_entries.iter().map(|l| l.credit_amount).sum();

    let mut errors = BalanceErrors::default();
    if debit_total != credit_total {
        errors.add(format!(
            "debit total {debit_total} does not equal credit total {credit_total}"
        ));
    }
    if debit_total != voucher.total_amount {
        errors.add(format!(
            "debit total {debit_total} does not equal voucher total {}",
            voucher.total_amount
        ));
    }
    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::models::VoucherLine;
    use rust_decimal_macros::dec;

    fn voucher_with(lines: Vec<VoucherLine>, total: Decimal) -> Voucher {
        Voucher {
            voucher_number: "V-1".to_string(),
            voucher_type: "JV".to_string(),
            voucher_date: "2026-08-07".to_string(),
            description: None,
            total_amount: total,
            company_name: None,
            company_address: None,
            line_entries: lines,
        }
    }

    fn line(debit: Decimal, credit: Decimal) -> VoucherLine {
        VoucherLine {
            account_code: "1000".to_string(),
            account_name: String::new(),
            description: String::new(),
            debit_amount: debit,
            credit_amount: credit,
        }
    }

    #[test]
    fn balanced_voucher_passes() {
        let voucher = voucher_with(
            vec![line(dec!(500.00), dec!(0)), line(dec!(0), dec!(500.00))],
            dec!(500.00),
        );
        assert!(validate_balanced(&voucher).is_ok());
    }

    #[test]
    fn debit_credit_mismatch_is_reported() {
        let voucher = voucher_with(
            vec![line(dec!(500.00), dec!(0)), line(dec!(0), dec!(400.00))],
            dec!(500.00),
        );
        let message = validate_balanced(&voucher).unwrap_err();
        assert!(message.contains("credit total 400.00"));
    }

    #[test]
    fn total_mismatch_is_reported() {
        let voucher = voucher_with(
            vec![line(dec!(500.00), dec!(0)), line(dec!(0), dec!(500.00))],
            dec!(450.00),
        );
        let message = validate_balanced(&voucher).unwrap_err();
        assert!(message.contains("voucher total 450.00"));
    }
}
