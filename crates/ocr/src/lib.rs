pub mod classify;
pub mod pipeline;
pub mod recognizer;
pub mod rules;
pub mod types;

pub use classify::{classify, classify_lines, split_lines, LineClassifier};
pub use pipeline::{content_digest, PipelineError, PrescriptionPipeline, ScanResult};
pub use recognizer::{MockRecognizer, OcrBackend, OcrError, OcrOutput};
pub use rules::classify_line;
pub use types::{ClassifiedLine, LineClass, RuleKind};
