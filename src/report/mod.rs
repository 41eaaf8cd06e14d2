//! Report module - voucher PDF generation from a bundled Typst template.
//!
//! The pipeline is split the way the request flows:
//! - `template` loads (and optionally caches) the template source
//! - `voucher` fills the template with one voucher's data
//! - `engine` compiles the filled source to PDF bytes
//! - `handlers` exposes the HTTP surface

pub mod engine;
pub mod handlers;
pub mod models;
pub mod template;
pub mod validation;
pub mod voucher;

pub use engine::TypstRenderEngine;
pub use models::{Voucher, VoucherLine};
pub use voucher::VoucherReportGenerator;

use thiserror::Error;

/// Errors that can occur while producing a voucher PDF.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("report template '{0}' not found")]
    TemplateNotFound(String),
    #[error("failed to load report template: {0}")]
    TemplateIo(#[source] std::io::Error),
    #[error("failed to create temporary directory: {0}")]
    TempDir(#[source] std::io::Error),
    #[error("failed to write Typst source: {0}")]
    WriteSource(#[source] std::io::Error),
    #[error("Typst CLI execution failed: {0}")]
    CompileIo(#[source] std::io::Error),
    #[error("Typst CLI exited with status {0}")]
    CompileExit(i32),
    #[error("failed to read generated PDF: {0}")]
    ReadPdf(#[source] std::io::Error),
}

impl RenderError {
    /// Stable code surfaced in error responses and logs.
    pub fn code(&self) -> &'static str {
        match self {
            RenderError::TemplateNotFound(_) => "TEMPLATE_NOT_FOUND",
            RenderError::TemplateIo(_) => "TEMPLATE_IO",
            RenderError::TempDir(_) => "TEMP_DIR",
            RenderError::WriteSource(_) => "FILL_FAILED",
            RenderError::CompileIo(_) => "COMPILE_FAILED",
            RenderError::CompileExit(_) => "COMPILE_FAILED",
            RenderError::ReadPdf(_) => "EXPORT_FAILED",
        }
    }
}

/// Result of a successful render.
#[derive(Debug)]
pub struct GeneratedReport {
    pub filename: String,
    pub pdf: Vec<u8>,
}
