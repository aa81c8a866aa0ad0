use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::record::DEFAULT_DOCUMENT_TYPE;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid layout: {0}")]
    Invalid(String),
}

/// Export geometry, in millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub margin_left: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    /// Advance after a body line or a section header.
    pub line_height: f32,
    /// Advance after a bulleted item.
    pub bullet_height: f32,
    /// Extra x offset for bulleted items relative to body text.
    pub bullet_indent: f32,
    /// Gap inserted before a section header.
    pub header_gap: f32,
    /// Advance after the report title.
    pub title_advance: f32,
    pub page_width: f32,
    pub page_height: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            margin_left: 10.0,
            margin_top: 10.0,
            margin_bottom: 10.0,
            line_height: 8.0,
            bullet_height: 7.0,
            bullet_indent: 2.0,
            header_gap: 4.0,
            title_advance: 12.0,
            // A4 portrait
            page_width: 210.0,
            page_height: 297.0,
        }
    }
}

impl LayoutSettings {
    /// Vertical space available for text on one page.
    pub fn printable_height(&self) -> f32 {
        self.page_height - self.margin_top - self.margin_bottom
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("margin_left", self.margin_left),
            ("margin_top", self.margin_top),
            ("margin_bottom", self.margin_bottom),
            ("line_height", self.line_height),
            ("bullet_height", self.bullet_height),
            ("bullet_indent", self.bullet_indent),
            ("header_gap", self.header_gap),
            ("title_advance", self.title_advance),
            ("page_width", self.page_width),
            ("page_height", self.page_height),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::Invalid(format!("{name} must be a finite number")));
        }
        let advances = [
            ("line_height", self.line_height),
            ("bullet_height", self.bullet_height),
            ("title_advance", self.title_advance),
        ];
        if let Some((name, _)) = advances.iter().find(|(_, v)| *v <= 0.0) {
            return Err(ConfigError::Invalid(format!("{name} must be positive")));
        }
        if self.header_gap < 0.0 || self.bullet_indent < 0.0 {
            return Err(ConfigError::Invalid(
                "header_gap and bullet_indent must not be negative".to_string(),
            ));
        }
        if self.printable_height() <= self.line_height {
            return Err(ConfigError::Invalid(format!(
                "page height {} leaves no room between margins",
                self.page_height
            )));
        }
        if self.page_width <= self.margin_left {
            return Err(ConfigError::Invalid(format!(
                "page width {} is narrower than the left margin",
                self.page_width
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub title: String,
    pub file_name: String,
    /// Font size in points for every exported line.
    pub font_size: f32,
    pub layout: LayoutSettings,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            title: "MediVision AI - Digital Prescription Report".to_string(),
            file_name: "MediVision_Report.pdf".to_string(),
            font_size: 12.0,
            layout: LayoutSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub default_document_type: String,
    pub report: ReportSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_document_type: DEFAULT_DOCUMENT_TYPE.to_string(),
            report: ReportSettings::default(),
        }
    }
}

impl Settings {
    pub fn from_toml(toml_content: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(toml_content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.report.font_size.is_finite() || self.report.font_size <= 0.0 {
            return Err(ConfigError::Invalid("font_size must be positive".to_string()));
        }
        self.report.layout.validate()
    }
}
