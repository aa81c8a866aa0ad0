use sha2::{Digest, Sha256};
use std::path::Path;
use thiserror::Error;

use medivision_core::StructuredRecord;

use crate::classify::LineClassifier;
use crate::recognizer::{OcrBackend, OcrError};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("OCR recognition failed: {0}")]
    Ocr(#[from] OcrError),
}

/// The result of running one scanned prescription through the pipeline.
#[derive(Debug)]
pub struct ScanResult {
    /// SHA-256 hex digest of the source image, a stable key for caching the result.
    pub digest_hex: String,
    pub record: StructuredRecord,
}

/// Orchestrates: digest → recognize (external backend) → classify.
pub struct PrescriptionPipeline<R: OcrBackend> {
    recognizer: R,
    classifier: LineClassifier,
}

impl<R: OcrBackend> PrescriptionPipeline<R> {
    pub fn new(recognizer: R, classifier: LineClassifier) -> Self {
        Self { recognizer, classifier }
    }

    pub async fn process_file(&self, path: &Path) -> Result<ScanResult, PipelineError> {
        let bytes = tokio::fs::read(path).await?;
        self.process_bytes(&bytes)
    }

    pub fn process_bytes(&self, data: &[u8]) -> Result<ScanResult, PipelineError> {
        let digest_hex = content_digest(data);
        let output = self.recognizer.recognize(data)?;
        tracing::debug!(digest = %digest_hex, chars = output.text.len(), "recognized scan");

        let record = self
            .classifier
            .classify(&output.text, output.document_type.as_deref());

        Ok(ScanResult { digest_hex, record })
    }
}

/// Lowercase hex SHA-256 of `data` (64 chars).
pub fn content_digest(data: &[u8]) -> String {
    let hash: [u8; 32] = Sha256::digest(data).into();
    hash.iter().map(|b| format!("{b:02x}")).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizer::{MockRecognizer, OcrOutput};

    struct FailingRecognizer;

    impl OcrBackend for FailingRecognizer {
        fn recognize(&self, _image_bytes: &[u8]) -> Result<OcrOutput, OcrError> {
            Err(OcrError::Service("timeout".into()))
        }
    }

    #[test]
    fn digest_known_vector() {
        assert_eq!(
            content_digest(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn process_bytes_classifies_recognized_text() {
        let pipeline = PrescriptionPipeline::new(
            MockRecognizer::new("Dr. Rao\nC/O cough\nTab Dolo 650").with_document_type("Prescription"),
            LineClassifier::default(),
        );
        let result = pipeline.process_bytes(b"image").unwrap();
        assert_eq!(result.digest_hex.len(), 64);
        assert_eq!(result.record.document_type, "Prescription");
        assert_eq!(result.record.doctor.as_deref(), Some("Dr. Rao"));
        assert_eq!(result.record.symptoms, vec!["cough"]);
        assert_eq!(result.record.medicines, vec!["Tab Dolo 650"]);
    }

    #[test]
    fn digest_is_stable_per_input() {
        let pipeline = PrescriptionPipeline::new(MockRecognizer::new(""), LineClassifier::default());
        let a = pipeline.process_bytes(b"same").unwrap();
        let b = pipeline.process_bytes(b"same").unwrap();
        let c = pipeline.process_bytes(b"other").unwrap();
        assert_eq!(a.digest_hex, b.digest_hex);
        assert_ne!(a.digest_hex, c.digest_hex);
    }

    #[test]
    fn recognizer_failure_surfaces() {
        let pipeline = PrescriptionPipeline::new(FailingRecognizer, LineClassifier::default());
        let err = pipeline.process_bytes(b"x").unwrap_err();
        assert!(matches!(err, PipelineError::Ocr(OcrError::Service(_))));
    }

    #[tokio::test]
    async fn process_file_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.jpg");
        tokio::fs::write(&path, b"jpeg bytes").await.unwrap();

        let pipeline = PrescriptionPipeline::new(
            MockRecognizer::new("BP 120/80"),
            LineClassifier::new("Rx"),
        );
        let result = pipeline.process_file(&path).await.unwrap();
        assert_eq!(result.digest_hex, content_digest(b"jpeg bytes"));
        assert_eq!(result.record.document_type, "Rx");
        assert_eq!(result.record.vitals.bp.as_deref(), Some("BP 120/80"));
    }

    #[tokio::test]
    async fn process_file_missing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = PrescriptionPipeline::new(MockRecognizer::new(""), LineClassifier::default());
        let err = pipeline.process_file(&dir.path().join("nope.png")).await.unwrap_err();
        assert!(matches!(err, PipelineError::Io(_)));
    }
}
