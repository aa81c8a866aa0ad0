use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use thiserror::Error;

use medivision_core::{LayoutSettings, ReportSettings};

use crate::layout::{ExportDocument, PlacedText, TextStyle};

const MM_TO_PT: f32 = 72.0 / 25.4;
const FONT_NORMAL: &str = "F1";
const FONT_BOLD: &str = "F2";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF encoding error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Map a position on the continuous sheet to (page index, y on that page).
/// Page breaks belong here, not in the layout: the cursor is never reset.
/// Geometry with no printable height keeps everything on the first page.
pub fn page_position(y: f32, layout: &LayoutSettings) -> (usize, f32) {
    let printable = layout.printable_height();
    if !(printable.is_finite() && printable > 0.0) {
        return (0, y);
    }
    let offset = (y - layout.margin_top).max(0.0);
    let page = (offset / printable).floor() as usize;
    (page, y - page as f32 * printable)
}

/// Encode a PDF document for an already laid-out export.
pub fn write_pdf(document: &ExportDocument, report: &ReportSettings) -> Result<Vec<u8>, ExportError> {
    let layout = &report.layout;

    let mut per_page: Vec<Vec<&PlacedText>> = vec![Vec::new()];
    for line in &document.lines {
        let (page, _) = page_position(line.y, layout);
        if per_page.len() <= page {
            per_page.resize_with(page + 1, Vec::new);
        }
        per_page[page].push(line);
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_normal = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let font_bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_NORMAL => font_normal,
            FONT_BOLD => font_bold,
        },
    });

    let mut kids = Vec::with_capacity(per_page.len());
    for lines in &per_page {
        let operations: Vec<Operation> = lines
            .iter()
            .flat_map(|line| text_operations(line, report))
            .collect();
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let page_count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(layout.page_width * MM_TO_PT),
            Object::Real(layout.page_height * MM_TO_PT),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut buf = Vec::new();
    doc.save_to(&mut buf)?;
    Ok(buf)
}

/// Write PDF bytes to `path`. The only file I/O in the renderer.
pub fn save_bytes(bytes: &[u8], path: &Path) -> Result<(), ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote prescription report");
    Ok(())
}

fn text_operations(line: &PlacedText, report: &ReportSettings) -> Vec<Operation> {
    let layout = &report.layout;
    let (_, local_y) = page_position(line.y, layout);
    let font = match line.style {
        TextStyle::Normal => FONT_NORMAL,
        TextStyle::Bold => FONT_BOLD,
    };
    vec![
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![Object::Name(font.as_bytes().to_vec()), Object::Real(report.font_size)],
        ),
        Operation::new(
            "Td",
            vec![
                Object::Real(line.x * MM_TO_PT),
                Object::Real((layout.page_height - local_y) * MM_TO_PT),
            ],
        ),
        Operation::new("Tj", vec![Object::string_literal(encode_win_ansi(&line.text))]),
        Operation::new("ET", vec![]),
    ]
}

/// Encode text for the standard Type1 fonts. Characters WinAnsi cannot
/// represent become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\t' => b' ',
            ' '..='~' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '€' => 0x80,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '…' => 0x85,
            _ => b'?',
        })
        .collect()
}
