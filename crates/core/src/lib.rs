pub mod config;
pub mod record;

pub use config::{ConfigError, LayoutSettings, ReportSettings, Settings};
pub use record::{StructuredRecord, Vitals, DEFAULT_DOCUMENT_TYPE};
