//! Report exporters.
//!
//! - `DocxExporter`: Word document with one table per calculation
//! - `ExcelExporter`: single-sheet workbook with one row per calculation
//!
//! Both share `ExportTarget` (file name + export counter) and implement
//! `Exporter`, whose provided `export` method validates the input, resolves the
//! output path, and renders the package.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDateTime};

use crate::error::AppError;
use crate::models::CalculationResult;

pub mod docx;
pub mod package;
pub mod xlsx;

pub use docx::DocxExporter;
pub use xlsx::ExcelExporter;

/// Report title shared by both formats.
pub const REPORT_TITLE: &str = "Finishing materials calculation report";

/// Values stamped into a report besides the results themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportMeta {
    pub generated_at: NaiveDateTime,
    pub currency: String,
}

impl ReportMeta {
    pub fn now(currency: impl Into<String>) -> Self {
        Self {
            generated_at: Local::now().naive_local(),
            currency: currency.into(),
        }
    }

    /// `Date: dd.mm.YYYY HH:MM`
    pub fn date_line(&self) -> String {
        format!("Date: {}", self.generated_at.format("%d.%m.%Y %H:%M"))
    }
}

/// Where an exporter writes and how many times it has done so.
///
/// Without an explicit file name, one is generated from the current time on
/// the first export and reused afterwards.
#[derive(Debug, Clone)]
pub struct ExportTarget {
    filename: Option<PathBuf>,
    output_dir: PathBuf,
    export_count: usize,
}

impl ExportTarget {
    pub fn new(filename: Option<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            filename,
            output_dir: output_dir.into(),
            export_count: 0,
        }
    }

    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    pub fn set_filename(&mut self, value: impl Into<PathBuf>) -> Result<(), AppError> {
        let value = value.into();
        if value.as_os_str().is_empty() {
            return Err(AppError::invalid("File name must not be empty"));
        }
        self.filename = Some(value);
        Ok(())
    }

    pub fn export_count(&self) -> usize {
        self.export_count
    }

    /// `Kind(file: <path or <auto>>, exports: N)`
    pub fn describe(&self, kind: &str) -> String {
        let file = self
            .filename
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<auto>".to_string());
        format!("{kind}(file: {file}, exports: {})", self.export_count)
    }

    fn resolve(&mut self, extension: &str) -> PathBuf {
        self.filename
            .get_or_insert_with(|| self.output_dir.join(generate_filename(extension, Local::now())))
            .clone()
    }
}

/// `calculation_report_<YYYYmmdd_HHMMSS>.<extension>`
pub fn generate_filename(extension: &str, at: DateTime<Local>) -> String {
    format!("calculation_report_{}.{extension}", at.format("%Y%m%d_%H%M%S"))
}

/// A report format that can be written from a set of results.
pub trait Exporter {
    /// File extension without the dot.
    fn extension(&self) -> &'static str;

    fn target(&self) -> &ExportTarget;

    fn target_mut(&mut self) -> &mut ExportTarget;

    fn meta(&self) -> ReportMeta;

    /// Write `results` to `path`.
    fn render(&self, results: &[CalculationResult], meta: &ReportMeta, path: &Path) -> Result<(), AppError>;

    /// Export `results` and return the written path.
    fn export(&mut self, results: &[CalculationResult]) -> Result<PathBuf, AppError> {
        if results.is_empty() {
            return Err(AppError::invalid("No data to export"));
        }

        let extension = self.extension();
        let path = self.target_mut().resolve(extension);
        let meta = self.meta();
        self.render(results, &meta, &path)?;
        self.target_mut().export_count += 1;

        tracing::info!(
            path = %path.display(),
            format = extension,
            results = results.len(),
            "exported report"
        );
        Ok(path)
    }
}
