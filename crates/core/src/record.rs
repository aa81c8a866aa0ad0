use serde::{Deserialize, Serialize};

/// Label used when no external classifier supplied a document type.
pub const DEFAULT_DOCUMENT_TYPE: &str = "Medical Prescription";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vitals {
    pub pulse: Option<String>,
    pub bp: Option<String>,
}

impl Vitals {
    pub fn is_empty(&self) -> bool {
        self.pulse.is_none() && self.bp.is_none()
    }
}

/// The typed result of structuring one prescription's OCR text.
///
/// Single-value slots hold the last line routed to them; `symptoms` and
/// `medicines` keep every matching line in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredRecord {
    pub document_type: String,
    pub doctor: Option<String>,
    pub patient: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub vitals: Vitals,
    #[serde(default)]
    pub medicines: Vec<String>,
    /// The input exactly as received: not split, not trimmed.
    #[serde(default)]
    pub raw_text: String,
}

impl StructuredRecord {
    /// An empty record carrying only a document type and the source text.
    pub fn empty(document_type: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            document_type: document_type.into(),
            doctor: None,
            patient: None,
            address: None,
            symptoms: Vec::new(),
            vitals: Vitals::default(),
            medicines: Vec::new(),
            raw_text: raw_text.into(),
        }
    }

    /// True when no line of the source was classified into any slot.
    pub fn is_blank(&self) -> bool {
        self.doctor.is_none()
            && self.patient.is_none()
            && self.address.is_none()
            && self.symptoms.is_empty()
            && self.vitals.is_empty()
            && self.medicines.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_record_is_blank() {
        let r = StructuredRecord::empty(DEFAULT_DOCUMENT_TYPE, "");
        assert!(r.is_blank());
        assert_eq!(r.document_type, "Medical Prescription");
    }

    #[test]
    fn vitals_count_towards_content() {
        let mut r = StructuredRecord::empty(DEFAULT_DOCUMENT_TYPE, "");
        r.vitals.bp = Some("BP 120/80".into());
        assert!(!r.is_blank());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let mut r = StructuredRecord::empty("Prescription", "Dr. X");
        r.doctor = Some("Dr. X".into());
        let v: serde_json::Value = serde_json::from_str(&r.to_json().unwrap()).unwrap();
        assert_eq!(v["documentType"], "Prescription");
        assert_eq!(v["doctor"], "Dr. X");
        assert_eq!(v["rawText"], "Dr. X");
        assert!(v["patient"].is_null());
        assert!(v["vitals"]["pulse"].is_null());
    }

    #[test]
    fn deserializes_without_optional_keys() {
        let r = StructuredRecord::from_json(
            r#"{"documentType":"Medical Prescription","doctor":"Dr. Y","medicines":["Tab A"]}"#,
        )
        .unwrap();
        assert_eq!(r.doctor.as_deref(), Some("Dr. Y"));
        assert_eq!(r.patient, None);
        assert!(r.symptoms.is_empty());
        assert!(r.vitals.is_empty());
        assert_eq!(r.medicines, vec!["Tab A".to_string()]);
        assert_eq!(r.raw_text, "");
    }
}
