//! Typst rendering engine.
//!
//! Writes filled Typst source into a per-render scratch directory, invokes
//! the `typst` CLI, and reads back the produced PDF.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use super::RenderError;

const OUTPUT_FILE: &str = "output.pdf";

/// Compiles Typst source to PDF via the `typst` binary.
pub struct TypstRenderEngine {
    temp_directory: PathBuf,
}

impl TypstRenderEngine {
    pub fn new(temp_directory: PathBuf) -> Self {
        Self { temp_directory }
    }

    /// Render a complete Typst source string to PDF bytes.
    ///
    /// `template_filename` is reused as the scratch source filename so
    /// compiler diagnostics name the template they came from.
    pub fn render(&self, template_filename: &str, typst_source: &str) -> Result<Vec<u8>, RenderError> {
        fs::create_dir_all(&self.temp_directory).map_err(RenderError::TempDir)?;
        let scratch = tempfile::Builder::new()
            .prefix("voucher-report-")
            .tempdir_in(&self.temp_directory)
            .map_err(RenderError::TempDir)?;

        let source_path = scratch.path().join(template_filename);
        fs::write(&source_path, typst_source).map_err(RenderError::WriteSource)?;

        let output_path = scratch.path().join(OUTPUT_FILE);
        let status = Command::new("typst")
            .arg("compile")
            .arg(&source_path)
            .arg(&output_path)
            .current_dir(scratch.path())
            .status()
            .map_err(RenderError::CompileIo)?;

        if !status.success() {
            return Err(RenderError::CompileExit(status.code().unwrap_or(-1)));
        }

        fs::read(&output_path).map_err(RenderError::ReadPdf)
    }
}
