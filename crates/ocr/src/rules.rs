use std::sync::OnceLock;

use regex::Regex;

use crate::types::{LineClass, RuleKind};

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

// ASCII-only matching: no Unicode case folding, digits or word characters.
re!(re_doctor, r"(?i-u)^Dr\.");
// Substring matches on purpose: "Female" also contains "male".
re!(re_patient, r"(?i-u)Age|Sex|Male|Female|M\s*F");
re!(re_care_of, r"(?i-u)^C/?O");
re!(re_address_keyword, r"(?i-u)store|clinic|hospital|medical");
re!(re_blood_pressure, r"(?i-u)BP");
re!(re_pulse, r"(?i-u)P\s*-\s*[0-9]+");
re!(re_medicine, r"(?i-u)\b(?:plus|gargles|tab|tablet|cap|mg|ml)\b");

// ── Rule table ───────────────────────────────────────────────────────────────

/// A predicate and its action fused: returns the class when the rule accepts.
pub struct Rule {
    pub kind: RuleKind,
    apply: fn(&str) -> Option<LineClass>,
}

impl Rule {
    pub fn apply(&self, line: &str) -> Option<LineClass> {
        (self.apply)(line)
    }
}

/// Every rule, in evaluation order.
pub static RULES: [Rule; 6] = [
    Rule { kind: RuleKind::Doctor, apply: doctor },
    Rule { kind: RuleKind::Patient, apply: patient },
    Rule { kind: RuleKind::CareOf, apply: care_of },
    Rule { kind: RuleKind::BloodPressure, apply: blood_pressure },
    Rule { kind: RuleKind::Pulse, apply: pulse },
    Rule { kind: RuleKind::Medicine, apply: medicine },
];

/// Run one trimmed line through the rule table; first acceptance wins.
pub fn classify_line(line: &str) -> Option<LineClass> {
    RULES.iter().find_map(|rule| rule.apply(line))
}

fn doctor(line: &str) -> Option<LineClass> {
    re_doctor().is_match(line).then(|| LineClass::Doctor(line.to_string()))
}

fn patient(line: &str) -> Option<LineClass> {
    re_patient().is_match(line).then(|| LineClass::Patient(line.to_string()))
}

/// "C/O" is either "complaint of" (a symptom) or "care of" (an address);
/// only the keyword list tells them apart.
fn care_of(line: &str) -> Option<LineClass> {
    if !re_care_of().is_match(line) {
        return None;
    }
    let content = re_care_of().replace(line, "").trim().to_string();
    if re_address_keyword().is_match(&content) {
        Some(LineClass::Address(content))
    } else {
        Some(LineClass::Symptom(content))
    }
}

fn blood_pressure(line: &str) -> Option<LineClass> {
    re_blood_pressure()
        .is_match(line)
        .then(|| LineClass::BloodPressure(line.to_string()))
}

fn pulse(line: &str) -> Option<LineClass> {
    re_pulse().is_match(line).then(|| LineClass::Pulse(line.to_string()))
}

fn medicine(line: &str) -> Option<LineClass> {
    re_medicine().is_match(line).then(|| LineClass::Medicine(line.to_string()))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_follows_rule_order() {
        let kinds: Vec<RuleKind> = RULES.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, RuleKind::ALL.to_vec());
    }

    // ── Doctor ────────────────────────────────────────────────────────────────

    #[test]
    fn doctor_prefix_case_insensitive() {
        assert_eq!(classify_line("DR. Mehta"), Some(LineClass::Doctor("DR. Mehta".into())));
        assert_eq!(classify_line("dr. rao"), Some(LineClass::Doctor("dr. rao".into())));
    }

    #[test]
    fn doctor_requires_prefix_and_dot() {
        assert_eq!(classify_line("Dr Mehta"), None);
        assert_eq!(classify_line("Consulting Dr. Mehta").map(|c| c.rule()), Some(RuleKind::CareOf));
    }

    #[test]
    fn doctor_wins_over_patient_tokens() {
        // "Dr. Male" would satisfy the patient rule too.
        assert!(matches!(classify_line("Dr. Male Ward"), Some(LineClass::Doctor(_))));
    }

    // ── Patient ───────────────────────────────────────────────────────────────

    #[test]
    fn patient_tokens() {
        for line in ["Age 34", "Sex: F", "Ravi Male", "Female 29y", "Ravi 40 M F", "34 mf"] {
            assert!(
                matches!(classify_line(line), Some(LineClass::Patient(_))),
                "{line} should be patient"
            );
        }
    }

    #[test]
    fn patient_token_inside_word_still_matches() {
        // Substring semantics: "dosage" contains "age".
        assert!(matches!(classify_line("Tab X dosage 2"), Some(LineClass::Patient(_))));
    }

    // ── C/O ───────────────────────────────────────────────────────────────────

    #[test]
    fn care_of_symptom_strips_marker() {
        assert_eq!(classify_line("C/O fever"), Some(LineClass::Symptom("fever".into())));
        assert_eq!(classify_line("CO cold"), Some(LineClass::Symptom("cold".into())));
        assert_eq!(classify_line("c/o headache"), Some(LineClass::Symptom("headache".into())));
    }

    #[test]
    fn care_of_address_keywords() {
        assert_eq!(
            classify_line("C/O City Medical Store"),
            Some(LineClass::Address("City Medical Store".into()))
        );
        assert_eq!(
            classify_line("C/O Sunrise CLINIC"),
            Some(LineClass::Address("Sunrise CLINIC".into()))
        );
        assert_eq!(
            classify_line("CO hospital-acquired infection"),
            Some(LineClass::Address("hospital-acquired infection".into()))
        );
    }

    #[test]
    fn care_of_marker_alone_yields_empty_symptom() {
        assert_eq!(classify_line("C/O"), Some(LineClass::Symptom(String::new())));
    }

    #[test]
    fn words_starting_with_co_take_the_care_of_rule() {
        assert_eq!(classify_line("Cough"), Some(LineClass::Symptom("ugh".into())));
    }

    // ── Vitals ────────────────────────────────────────────────────────────────

    #[test]
    fn blood_pressure_anywhere_in_line() {
        assert_eq!(
            classify_line("BP 120/80"),
            Some(LineClass::BloodPressure("BP 120/80".into()))
        );
        assert!(matches!(classify_line("recorded bp 130/90"), Some(LineClass::BloodPressure(_))));
    }

    #[test]
    fn blood_pressure_beats_medicine() {
        assert!(matches!(
            classify_line("BP tab 5 mg"),
            Some(LineClass::BloodPressure(_))
        ));
    }

    #[test]
    fn pulse_pattern() {
        assert_eq!(classify_line("P - 72"), Some(LineClass::Pulse("P - 72".into())));
        assert_eq!(classify_line("P-88"), Some(LineClass::Pulse("P-88".into())));
        assert_eq!(classify_line("p -  90/min"), Some(LineClass::Pulse("p -  90/min".into())));
    }

    #[test]
    fn pulse_needs_digits() {
        assert_eq!(classify_line("P - x"), None);
    }

    // ── Medicine ──────────────────────────────────────────────────────────────

    #[test]
    fn medicine_whole_word_tokens() {
        for line in [
            "Tab Paracetamol 500mg",
            "Cap Omez 20",
            "Betadine gargles",
            "Calpol plus",
            "Syrup 5 ml",
            "Tablet Dolo",
            "Zinc 50 mg",
        ] {
            assert_eq!(
                classify_line(line),
                Some(LineClass::Medicine(line.to_string())),
                "{line} should be medicine"
            );
        }
    }

    #[test]
    fn medicine_tokens_inside_words_do_not_match() {
        assert_eq!(classify_line("Syrup 5ml"), None);
        assert_eq!(classify_line("Capsicum"), None);
        assert_eq!(classify_line("Table salt"), None);
    }

    // ── ASCII matching ────────────────────────────────────────────────────────

    #[test]
    fn unicode_case_folds_do_not_match_tokens() {
        // U+017F LONG S folds to "s" under Unicode rules.
        assert_eq!(classify_line("ſex"), None);
    }

    #[test]
    fn pulse_needs_ascii_digits() {
        assert_eq!(classify_line("P - ७२"), None);
    }

    #[test]
    fn medicine_token_before_non_ascii_letter_still_matches() {
        assert_eq!(
            classify_line("Crocin 500 mgé"),
            Some(LineClass::Medicine("Crocin 500 mgé".into()))
        );
    }

    // ── Fallthrough ───────────────────────────────────────────────────────────

    #[test]
    fn unmatched_line_is_dropped() {
        assert_eq!(classify_line("Follow up in 5 days"), None);
        assert_eq!(classify_line("!@#$%^&*()"), None);
    }
}
