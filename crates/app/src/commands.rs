use anyhow::{Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};

use medivision_core::{Settings, StructuredRecord};
use medivision_ocr::{classify_lines, LineClassifier};
use medivision_pdf::{render_text, save_pdf, ReportRenderer};

/// Read a path, or stdin when the path is `-`.
pub fn read_input(input: &Path) -> Result<String> {
    if input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input.display()))
}

pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(p) => Settings::load(p).with_context(|| format!("Failed to load settings from {}", p.display())),
        None => Ok(Settings::default()),
    }
}

/// Build a record from either raw OCR text or a serialized record.
pub fn load_record(
    content: &str,
    is_record: bool,
    document_type: Option<&str>,
    settings: &Settings,
) -> Result<StructuredRecord> {
    if !is_record {
        let classifier = LineClassifier::new(settings.default_document_type.as_str());
        return Ok(classifier.classify(content, document_type));
    }

    let mut record = StructuredRecord::from_json(content).context("Input is not a valid record")?;
    if let Some(hint) = document_type.filter(|h| !h.is_empty()) {
        record.document_type = hint.to_string();
    }
    Ok(record)
}

pub fn classify_output(
    content: &str,
    document_type: Option<&str>,
    explain: bool,
    settings: &Settings,
) -> Result<String> {
    if explain {
        return Ok(explain_lines(content));
    }
    let record = load_record(content, false, document_type, settings)?;
    record.to_json().context("Failed to serialize record")
}

fn explain_lines(content: &str) -> String {
    classify_lines(content)
        .iter()
        .map(|line| {
            let slot = line.class.as_ref().map_or("dropped", |c| c.slot_name());
            format!("{:>3}  {:<13} {}\n", line.number, slot, line.text)
        })
        .collect()
}

pub fn render_output(record: &StructuredRecord, show_raw: bool, settings: &Settings) -> String {
    let rendered = ReportRenderer::new(settings.report.clone()).render(record);
    render_text(&rendered.sections, show_raw)
}

/// Export to `output`, or to the configured file name in the working directory.
pub fn export(record: &StructuredRecord, output: Option<PathBuf>, settings: &Settings) -> Result<PathBuf> {
    let path = output.unwrap_or_else(|| PathBuf::from(&settings.report.file_name));
    save_pdf(record, &settings.report, &path)
        .with_context(|| format!("Failed to export report to {}", path.display()))
}
