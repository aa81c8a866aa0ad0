use serde::{Deserialize, Serialize};

/// One rule of the line classifier, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Doctor,
    Patient,
    CareOf,
    BloodPressure,
    Pulse,
    Medicine,
}

impl RuleKind {
    /// Evaluation order. The first rule that accepts a line claims it.
    pub const ALL: [RuleKind; 6] = [
        RuleKind::Doctor,
        RuleKind::Patient,
        RuleKind::CareOf,
        RuleKind::BloodPressure,
        RuleKind::Pulse,
        RuleKind::Medicine,
    ];
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleKind::Doctor => write!(f, "doctor"),
            RuleKind::Patient => write!(f, "patient"),
            RuleKind::CareOf => write!(f, "care_of"),
            RuleKind::BloodPressure => write!(f, "blood_pressure"),
            RuleKind::Pulse => write!(f, "pulse"),
            RuleKind::Medicine => write!(f, "medicine"),
        }
    }
}

/// The slot a single line was routed to, carrying the value it contributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "slot", content = "value", rename_all = "snake_case")]
pub enum LineClass {
    Doctor(String),
    Patient(String),
    Address(String),
    Symptom(String),
    BloodPressure(String),
    Pulse(String),
    Medicine(String),
}

impl LineClass {
    pub fn value(&self) -> &str {
        match self {
            LineClass::Doctor(v)
            | LineClass::Patient(v)
            | LineClass::Address(v)
            | LineClass::Symptom(v)
            | LineClass::BloodPressure(v)
            | LineClass::Pulse(v)
            | LineClass::Medicine(v) => v,
        }
    }

    /// The rule that produces this class. Address and symptom share the C/O rule.
    pub fn rule(&self) -> RuleKind {
        match self {
            LineClass::Doctor(_) => RuleKind::Doctor,
            LineClass::Patient(_) => RuleKind::Patient,
            LineClass::Address(_) | LineClass::Symptom(_) => RuleKind::CareOf,
            LineClass::BloodPressure(_) => RuleKind::BloodPressure,
            LineClass::Pulse(_) => RuleKind::Pulse,
            LineClass::Medicine(_) => RuleKind::Medicine,
        }
    }

    pub fn slot_name(&self) -> &'static str {
        match self {
            LineClass::Doctor(_) => "doctor",
            LineClass::Patient(_) => "patient",
            LineClass::Address(_) => "address",
            LineClass::Symptom(_) => "symptoms",
            LineClass::BloodPressure(_) => "vitals.bp",
            LineClass::Pulse(_) => "vitals.pulse",
            LineClass::Medicine(_) => "medicines",
        }
    }
}

/// A trimmed source line and what the classifier did with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedLine<'a> {
    /// 1-based position among the non-empty lines.
    pub number: usize,
    pub text: &'a str,
    /// `None` when no rule accepted the line and it was dropped.
    pub class: Option<LineClass>,
}
