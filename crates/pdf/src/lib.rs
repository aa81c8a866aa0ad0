use std::path::{Path, PathBuf};

use medivision_core::{ReportSettings, StructuredRecord};

pub mod export;
pub mod layout;
pub mod sections;

pub use export::{encode_win_ansi, page_position, ExportError};
pub use layout::{ExportDocument, LayoutCursor, PlacedText, TextStyle};
pub use sections::{render_sections, render_text, Section, SectionBody, SectionKind};

/// Lay out `record` and encode it as PDF bytes.
pub fn export_pdf(record: &StructuredRecord, report: &ReportSettings) -> Result<Vec<u8>, ExportError> {
    let document = layout::layout_sections(&render_sections(record), report);
    export::write_pdf(&document, report)
}

/// Export `record` and write it to `path`, returning where it landed.
pub fn save_pdf(
    record: &StructuredRecord,
    report: &ReportSettings,
    path: &Path,
) -> Result<PathBuf, ExportError> {
    let bytes = export_pdf(record, report)?;
    export::save_bytes(&bytes, path)?;
    Ok(path.to_path_buf())
}

/// On-screen sections plus the laid-out export for one record.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub sections: Vec<Section>,
    pub document: ExportDocument,
}

/// Turns an already-built record into presentation artifacts. Never sees raw
/// OCR text except through `StructuredRecord::raw_text`.
#[derive(Debug, Clone, Default)]
pub struct ReportRenderer {
    report: ReportSettings,
}

impl ReportRenderer {
    pub fn new(report: ReportSettings) -> Self {
        Self { report }
    }

    pub fn settings(&self) -> &ReportSettings {
        &self.report
    }

    pub fn render(&self, record: &StructuredRecord) -> RenderedReport {
        let sections = render_sections(record);
        let document = layout::layout_sections(&sections, &self.report);
        RenderedReport { sections, document }
    }

    pub fn export_pdf(&self, record: &StructuredRecord) -> Result<Vec<u8>, ExportError> {
        export_pdf(record, &self.report)
    }

    pub fn save_pdf(&self, record: &StructuredRecord, path: &Path) -> Result<PathBuf, ExportError> {
        save_pdf(record, &self.report, path)
    }
}
