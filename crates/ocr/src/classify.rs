use medivision_core::{StructuredRecord, DEFAULT_DOCUMENT_TYPE};

use crate::rules::classify_line;
use crate::types::{ClassifiedLine, LineClass};

/// Split OCR text into trimmed, non-empty lines in document order.
/// A byte-order mark counts as whitespace.
pub fn split_lines(raw_text: &str) -> impl Iterator<Item = &str> {
    raw_text
        .split('\n')
        .map(|l| l.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}'))
        .filter(|l| !l.is_empty())
}

/// Per-line trace of what the rule table did with each line.
pub fn classify_lines(raw_text: &str) -> Vec<ClassifiedLine<'_>> {
    split_lines(raw_text)
        .enumerate()
        .map(|(idx, text)| ClassifiedLine {
            number: idx + 1,
            text,
            class: classify_line(text),
        })
        .collect()
}

/// Structure `raw_text` using the built-in default document type.
pub fn classify(raw_text: &str, document_type_hint: Option<&str>) -> StructuredRecord {
    LineClassifier::default().classify(raw_text, document_type_hint)
}

pub struct LineClassifier {
    default_document_type: String,
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_DOCUMENT_TYPE)
    }
}

impl LineClassifier {
    pub fn new(default_document_type: impl Into<String>) -> Self {
        Self { default_document_type: default_document_type.into() }
    }

    /// Build a record from raw OCR text. Never fails: lines no rule accepts
    /// are dropped, and empty input yields an empty record.
    pub fn classify(&self, raw_text: &str, document_type_hint: Option<&str>) -> StructuredRecord {
        let document_type = document_type_hint
            .filter(|h| !h.is_empty())
            .unwrap_or(self.default_document_type.as_str());

        let mut record = StructuredRecord::empty(document_type, raw_text);
        let mut dropped = 0usize;

        for (idx, line) in split_lines(raw_text).enumerate() {
            match classify_line(line) {
                Some(class) => assign(&mut record, class),
                None => {
                    dropped += 1;
                    tracing::trace!(line = idx + 1, "no rule matched, dropping line");
                }
            }
        }

        tracing::debug!(
            document_type = %record.document_type,
            symptoms = record.symptoms.len(),
            medicines = record.medicines.len(),
            dropped,
            "classified prescription text"
        );
        record
    }
}

fn assign(record: &mut StructuredRecord, class: LineClass) {
    match class {
        LineClass::Doctor(v) => record.doctor = Some(v),
        LineClass::Patient(v) => record.patient = Some(v),
        LineClass::Address(v) => record.address = Some(v),
        LineClass::Symptom(v) => record.symptoms.push(v),
        LineClass::BloodPressure(v) => record.vitals.bp = Some(v),
        LineClass::Pulse(v) => record.vitals.pulse = Some(v),
        LineClass::Medicine(v) => record.medicines.push(v),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
