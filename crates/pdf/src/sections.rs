use serde::Serialize;
use std::fmt::Write;

use medivision_core::StructuredRecord;

pub const BULLET: char = '•';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    DocumentType,
    Doctor,
    Patient,
    Address,
    Symptoms,
    Vitals,
    Medicines,
    RawText,
}

impl SectionKind {
    pub fn title(self) -> &'static str {
        match self {
            SectionKind::DocumentType => "Document Type",
            SectionKind::Doctor => "Doctor",
            SectionKind::Patient => "Patient",
            SectionKind::Address => "Clinic / Pharmacy Address",
            SectionKind::Symptoms => "Symptoms / Illness",
            SectionKind::Vitals => "Vitals",
            SectionKind::Medicines => "Prescribed Medicines",
            SectionKind::RawText => "OCR Extracted Text",
        }
    }

    /// Short label used where the section is written inline as `Label: value`.
    pub fn inline_label(self) -> &'static str {
        match self {
            SectionKind::Address => "Address",
            other => other.title(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "style", content = "lines", rename_all = "snake_case")]
pub enum SectionBody {
    Text(Vec<String>),
    Bullets(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    pub title: &'static str,
    pub body: SectionBody,
    /// Hidden behind a toggle until the reader expands it.
    pub collapsed: bool,
}

impl Section {
    fn text(kind: SectionKind, lines: Vec<String>) -> Self {
        Self { kind, title: kind.title(), body: SectionBody::Text(lines), collapsed: false }
    }

    fn bullets(kind: SectionKind, items: &[String]) -> Self {
        Self {
            kind,
            title: kind.title(),
            body: SectionBody::Bullets(items.to_vec()),
            collapsed: false,
        }
    }

    pub fn lines(&self) -> &[String] {
        match &self.body {
            SectionBody::Text(lines) | SectionBody::Bullets(lines) => lines,
        }
    }
}

/// Build the on-screen section list. Only Document Type and the raw text
/// section are unconditional; every other section needs a populated field.
pub fn render_sections(record: &StructuredRecord) -> Vec<Section> {
    let mut sections = vec![Section::text(
        SectionKind::DocumentType,
        vec![record.document_type.clone()],
    )];

    let singles = [
        (SectionKind::Doctor, &record.doctor),
        (SectionKind::Patient, &record.patient),
        (SectionKind::Address, &record.address),
    ];
    for (kind, value) in singles {
        if let Some(v) = value {
            sections.push(Section::text(kind, vec![v.clone()]));
        }
    }

    if !record.symptoms.is_empty() {
        sections.push(Section::bullets(SectionKind::Symptoms, &record.symptoms));
    }

    if !record.vitals.is_empty() {
        let lines = [("Pulse", &record.vitals.pulse), ("BP", &record.vitals.bp)]
            .into_iter()
            .filter_map(|(label, v)| v.as_ref().map(|v| format!("{label}: {v}")))
            .collect();
        sections.push(Section::text(SectionKind::Vitals, lines));
    }

    if !record.medicines.is_empty() {
        sections.push(Section::bullets(SectionKind::Medicines, &record.medicines));
    }

    sections.push(Section {
        collapsed: true,
        ..Section::text(SectionKind::RawText, vec![record.raw_text.clone()])
    });

    sections
}

/// Plain-text rendering of sections for terminals.
pub fn render_text(sections: &[Section], expand_collapsed: bool) -> String {
    let mut out = String::new();
    for section in sections {
        if section.collapsed && !expand_collapsed {
            let _ = writeln!(out, "== {} == (collapsed)", section.title);
            continue;
        }
        let _ = writeln!(out, "== {} ==", section.title);
        match &section.body {
            SectionBody::Text(lines) => {
                for line in lines {
                    let _ = writeln!(out, "{line}");
                }
            }
            SectionBody::Bullets(items) => {
                for item in items {
                    let _ = writeln!(out, "  {BULLET} {item}");
                }
            }
        }
        out.push('\n');
    }
    out
}
