//! Voucher report generator - fills the bundled template with one voucher.

use rust_decimal::Decimal;

use crate::config::ReportConfig;

use super::engine::TypstRenderEngine;
use super::models::Voucher;
use super::template::TemplateStore;
use super::{GeneratedReport, RenderError};

const TEMPLATE_FILE: &str = "voucher_template.typ";

/// The rendering adapter: template in, voucher data in, PDF bytes out.
pub struct VoucherReportGenerator {
    templates: TemplateStore,
    engine: TypstRenderEngine,
}

impl VoucherReportGenerator {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            templates: TemplateStore::new(
                config.template_directory.clone(),
                config.cache_templates,
            ),
            engine: TypstRenderEngine::new(config.temp_directory.clone()),
        }
    }

    pub fn generate(&self, voucher: &Voucher) -> Result<GeneratedReport, RenderError> {
        let template = self.templates.load(TEMPLATE_FILE)?;
        let source = render_voucher_source(voucher, &template);
        let pdf = self.engine.render(TEMPLATE_FILE, &source)?;

        Ok(GeneratedReport {
            filename: output_filename(&voucher.voucher_number),
            pdf,
        })
    }
}

/// `voucher-<number>.pdf`, with the number sanitized for header/filesystem use.
fn output_filename(voucher_number: &str) -> String {
    let mut name = sanitize_filename::sanitize(voucher_number);
    if name.is_empty() {
        name = "report".to_string();
    }
    format!("voucher-{name}.pdf")
}

/// Prepend a `#let voucher = (..)` data block to the template body.
///
/// The template reads everything through the `voucher` dictionary, so the
/// layout never needs regenerating when field content changes.
fn render_voucher_source(voucher: &Voucher, template: &str) -> String {
    let mut rows = String::new();
    for line in &voucher.line_entries {
        rows.push_str(&format!(
            "    (account_code: \"{}\", account_name: \"{}\", description: \"{}\", debit: \"{}\", credit: \"{}\"),\n",
            escape_typst_string(&line.account_code),
            escape_typst_string(&line.account_name),
            escape_typst_string(&line.description),
            format_amount(&line.debit_amount),
            format_amount(&line.credit_amount),
        ));
    }
    let lines = if rows.is_empty() {
        "()".to_string()
    } else {
        format!("(\n{rows}  )")
    };

    format!(
        r#"#let voucher = (
  voucher_number: "{number}",
  voucher_type: "{kind}",
  voucher_date: "{date}",
  description: "{description}",
  company_name: "{company_name}",
  company_address: "{company_address}",
  total_amount: "{total}",
  lines: {lines},
)

{template}"#,
        number = escape_typst_string(&voucher.voucher_number),
        kind = escape_typst_string(&voucher.voucher_type),
        date = escape_typst_string(&voucher.voucher_date),
        description = escape_typst_string(voucher.description()),
        company_name = escape_typst_string(voucher.company_name()),
        company_address = escape_typst_string(voucher.company_address()),
        total = format_amount(&voucher.total_amount),
    )
}

/// Monetary display with exactly two decimal places.
fn format_amount(amount: &Decimal) -> String {
    format!("{amount:.2}")
}

/// Escape special characters for Typst string literals.
fn escape_typst_string(value: &str) -> String {
    value
        .replace('\\', r"\\")
        .replace('"', r#"\""#)
        .replace('\n', r"\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::models::VoucherLine;
    use rust_decimal_macros::dec;

    fn sample_voucher() -> Voucher {
        Voucher {
            voucher_number: "V-1001".to_string(),
            voucher_type: "JV".to_string(),
            voucher_date: "2026-08-07".to_string(),
            description: None,
            total_amount: dec!(500.00),
            company_name: None,
            company_address: None,
            line_entries: vec![
                VoucherLine {
                    account_code: "1000".to_string(),
                    account_name: "Cash".to_string(),
                    description: "Opening".to_string(),
                    debit_amount: dec!(500.00),
                    credit_amount: dec!(0),
                },
                VoucherLine {
                    account_code: "4000".to_string(),
                    account_name: "Revenue".to_string(),
                    description: String::new(),
                    debit_amount: dec!(0),
                    credit_amount: dec!(500.00),
                },
            ],
        }
    }

    #[test]
    fn fill_applies_header_defaults() {
        let source = render_voucher_source(&sample_voucher(), "#voucher.voucher_number");
        assert!(source.contains("company_name: \"AFCO ERP\""));
        assert!(source.contains("description: \"\""));
        assert!(source.contains("company_address: \"\""));
        assert!(!source.contains("null"));
    }

    #[test]
    fn fill_keeps_line_order() {
        let source = render_voucher_source(&sample_voucher(), "");
        let first = source.find("account_code: \"1000\"").unwrap();
        let second = source.find("account_code: \"4000\"").unwrap();
        assert!(first < second);
    }

    #[test]
    fn fill_appends_template_body_after_data() {
        let source = render_voucher_source(&sample_voucher(), "#table()");
        assert!(source.ends_with("#table()"));
        assert!(source.starts_with("#let voucher = ("));
    }

    #[test]
    fn amounts_render_with_two_decimals() {
        let mut voucher = sample_voucher();
        voucher.total_amount = dec!(500);
        let source = render_voucher_source(&voucher, "");
        assert!(source.contains("total_amount: \"500.00\""));
        assert!(source.contains("debit: \"500.00\""));
        assert!(source.contains("credit: \"0.00\""));
    }

    #[test]
    fn empty_line_entries_render_an_empty_array() {
        let mut voucher = sample_voucher();
        voucher.line_entries.clear();
        let source = render_voucher_source(&voucher, "");
        assert!(source.contains("lines: (),"));
    }

    #[test]
    fn strings_are_escaped_for_typst() {
        let mut voucher = sample_voucher();
        voucher.description = Some("say \"hi\"\nback\\slash".to_string());
        let source = render_voucher_source(&voucher, "");
        assert!(source.contains(r#"description: "say \"hi\"\nback\\slash""#));
    }

    #[test]
    fn filename_keeps_the_voucher_number_case() {
        assert_eq!(output_filename("V-1001"), "voucher-V-1001.pdf");
    }

    #[test]
    fn filename_falls_back_when_the_number_sanitizes_away() {
        assert_eq!(output_filename(""), "voucher-report.pdf");
        assert_eq!(output_filename(".."), "voucher-report.pdf");
    }
}
