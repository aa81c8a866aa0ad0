use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Image decode error: {0}")]
    ImageDecode(String),
    #[error("OCR service error: {0}")]
    Service(String),
}

/// What an OCR/NER service hands back for one scanned prescription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrOutput {
    /// Cleaned, line-oriented text.
    pub text: String,
    /// Document class predicted by the service, if it ran a classifier.
    pub document_type: Option<String>,
}

/// Abstraction over whatever turns image bytes into prescription text.
/// The engine itself never performs recognition; implementations live at the edge.
pub trait OcrBackend: Send + Sync {
    fn recognize(&self, image_bytes: &[u8]) -> Result<OcrOutput, OcrError>;
}

// ── Mock backend (always available, used for tests) ───────────────────────────

/// Returns a pre-set output regardless of the image.
pub struct MockRecognizer {
    pub output: OcrOutput,
}

impl MockRecognizer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { output: OcrOutput { text: text.into(), document_type: None } }
    }

    pub fn with_document_type(mut self, document_type: impl Into<String>) -> Self {
        self.output.document_type = Some(document_type.into());
        self
    }
}

impl OcrBackend for MockRecognizer {
    fn recognize(&self, _image_bytes: &[u8]) -> Result<OcrOutput, OcrError> {
        Ok(self.output.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_returns_preset_text() {
        let r = MockRecognizer::new("Dr. Rao\nTab Dolo 650");
        let out = r.recognize(b"fake image data").unwrap();
        assert_eq!(out.text, "Dr. Rao\nTab Dolo 650");
        assert_eq!(out.document_type, None);
    }

    #[test]
    fn mock_carries_document_type() {
        let r = MockRecognizer::new("hello").with_document_type("Prescription");
        assert_eq!(r.recognize(b"").unwrap().document_type.as_deref(), Some("Prescription"));
    }
}
