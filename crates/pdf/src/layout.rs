use medivision_core::{LayoutSettings, ReportSettings};

use crate::sections::{Section, SectionBody, SectionKind, BULLET};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Normal,
    Bold,
}

/// One line of text at an absolute position (millimetres from the top-left
/// corner of a single continuous sheet).
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub x: f32,
    pub y: f32,
    pub style: TextStyle,
    pub text: String,
}

/// The paginated export, independent of any PDF library.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportDocument {
    pub lines: Vec<PlacedText>,
    /// Cursor position after the last line.
    pub end_y: f32,
}

/// Vertical cursor over a continuous sheet. Starts at the top margin and only
/// ever moves down.
pub struct LayoutCursor<'a> {
    layout: &'a LayoutSettings,
    y: f32,
    lines: Vec<PlacedText>,
}

impl<'a> LayoutCursor<'a> {
    pub fn new(layout: &'a LayoutSettings) -> Self {
        Self { layout, y: layout.margin_top, lines: Vec::new() }
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn title(&mut self, text: &str) {
        self.place(self.layout.margin_left, TextStyle::Bold, text.to_string());
        self.y += self.layout.title_advance;
    }

    pub fn body(&mut self, text: String) {
        self.place(self.layout.margin_left, TextStyle::Normal, text);
        self.y += self.layout.line_height;
    }

    pub fn header(&mut self, text: String) {
        self.y += self.layout.header_gap;
        self.place(self.layout.margin_left, TextStyle::Bold, text);
        self.y += self.layout.line_height;
    }

    pub fn bullet(&mut self, text: &str) {
        let x = self.layout.margin_left + self.layout.bullet_indent;
        self.place(x, TextStyle::Normal, format!("{BULLET} {text}"));
        self.y += self.layout.bullet_height;
    }

    pub fn finish(self) -> ExportDocument {
        ExportDocument { lines: self.lines, end_y: self.y }
    }

    fn place(&mut self, x: f32, style: TextStyle, text: String) {
        self.lines.push(PlacedText { x, y: self.y, style, text });
    }
}

/// Lay out the exportable sections: single-value sections become inline
/// `Label: value` lines, list sections get a bold header. Collapsed sections
/// stay on screen only.
pub fn layout_sections(sections: &[Section], report: &ReportSettings) -> ExportDocument {
    let mut cursor = LayoutCursor::new(&report.layout);
    cursor.title(&report.title);

    for section in sections.iter().filter(|s| !s.collapsed) {
        match (&section.body, section.kind) {
            (SectionBody::Text(lines), SectionKind::Vitals) => {
                cursor.header(format!("{}:", section.title));
                for line in lines {
                    cursor.body(line.clone());
                }
            }
            (SectionBody::Text(lines), kind) => {
                for line in lines {
                    cursor.body(format!("{}: {line}", kind.inline_label()));
                }
            }
            (SectionBody::Bullets(items), _) => {
                cursor.header(format!("{}:", section.title));
                for item in items {
                    cursor.bullet(item);
                }
            }
        }
    }

    cursor.finish()
}
