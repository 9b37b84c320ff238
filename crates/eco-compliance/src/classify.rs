//! Response classifiers.
//!
//! [`classify_freeform`] is the keyword heuristic for answers not tied to a
//! fixed option set. [`classify_by_options`] is the declared-polarity lookup
//! used for live entry. The two are intentionally independent.

use eco_core::entities::{QuestionOption, labels_match};
use eco_core::enums::Classification;

/// Answers that count against compliance. Checked before [`POSITIVE_LABELS`]
/// so that e.g. "non-present" is not swallowed by "present".
pub const NEGATIVE_LABELS: &[&str] = &[
    "no",
    "non_compliant",
    "fail",
    "negative",
    "not",
    "disapproved",
    "unsatisfactory",
    "poor",
    "incomplete",
    "pending",
    "false",
    "0",
    "violated",
    "violation",
    "issue",
    "problem",
    "deficiency",
    "non-present",
    "absent",
    "unavailable",
    "not installed",
    "non-functional",
    "broken",
    "malfunctioning",
];

/// Answers that count toward compliance.
pub const POSITIVE_LABELS: &[&str] = &[
    "yes",
    "compliant",
    "pass",
    "positive",
    "ok",
    "okay",
    "approved",
    "satisfactory",
    "good",
    "excellent",
    "complete",
    "done",
    "true",
    "1",
    "present",
    "available",
    "installed",
    "functional",
    "working",
    "operational",
];

/// Classify a free-text answer with keyword heuristics.
///
/// Order matters: not-applicable markers, then negative labels (exact, then
/// substring, then numeric zero), then positive labels (exact, then
/// substring, then numeric one). Anything else is neutral.
#[must_use]
pub fn classify_freeform(raw_answer: &str) -> Classification {
    let normalized = raw_answer.trim().to_lowercase();

    if is_not_applicable(&normalized) {
        return Classification::NotApplicable;
    }
    if matches_any(&normalized, NEGATIVE_LABELS) || numeric_equals(&normalized, 0.0) {
        return Classification::Negative;
    }
    if matches_any(&normalized, POSITIVE_LABELS) || numeric_equals(&normalized, 1.0) {
        return Classification::Positive;
    }
    Classification::Neutral
}

/// Resolve an answer against a question's declared option polarities.
///
/// Matching is trimmed and case-insensitive. An answer matching no option is
/// neutral; this path never yields `NotApplicable`.
#[must_use]
pub fn classify_by_options(raw_answer: &str, options: &[QuestionOption]) -> Classification {
    options
        .iter()
        .find(|opt| labels_match(&opt.label, raw_answer))
        .map_or(Classification::Neutral, |opt| opt.polarity.into())
}

fn is_not_applicable(normalized: &str) -> bool {
    normalized.is_empty() || normalized == "n/a" || normalized.contains("not applicable")
}

fn matches_any(normalized: &str, labels: &[&str]) -> bool {
    labels.contains(&normalized) || labels.iter().any(|label| normalized.contains(label))
}

/// True when the answer is purely numeric and equals `target`.
fn numeric_equals(normalized: &str, target: f64) -> bool {
    let purely_numeric = normalized.chars().any(|c| c.is_ascii_digit())
        && normalized
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'));
    purely_numeric
        && normalized
            .parse::<f64>()
            .is_ok_and(|value| (value - target).abs() < f64::EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use eco_core::enums::Polarity;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("N/A")]
    #[case("n/a")]
    #[case("not applicable, see attached")]
    #[case("Not Applicable")]
    fn not_applicable_answers(#[case] answer: &str) {
        assert_eq!(classify_freeform(answer), Classification::NotApplicable);
    }

    #[test]
    fn every_negative_label_is_negative() {
        for label in NEGATIVE_LABELS {
            assert_eq!(
                classify_freeform(label),
                Classification::Negative,
                "label {label:?}"
            );
        }
    }

    #[test]
    fn every_positive_label_is_positive() {
        for label in POSITIVE_LABELS {
            assert_eq!(
                classify_freeform(label),
                Classification::Positive,
                "label {label:?}"
            );
        }
    }

    #[rstest]
    #[case("non-present")]
    #[case("Non-Present")]
    #[case("Not installed")]
    #[case("equipment is broken")]
    #[case("violation noted at the drain")]
    #[case("unavailable")]
    fn negative_wins_over_positive_substring(#[case] answer: &str) {
        assert_eq!(classify_freeform(answer), Classification::Negative);
    }

    #[rstest]
    #[case("1", Classification::Positive)]
    #[case("0", Classification::Negative)]
    #[case("2", Classification::Neutral)]
    #[case("0.0", Classification::Negative)]
    #[case("10", Classification::Negative)]
    fn numeric_answers(#[case] answer: &str, #[case] expected: Classification) {
        assert_eq!(classify_freeform(answer), expected);
    }

    #[rstest]
    #[case("  YES  ", Classification::Positive)]
    #[case("Compliant", Classification::Positive)]
    #[case("all good", Classification::Positive)]
    #[case("Fail", Classification::Negative)]
    #[case("unknown", Classification::Negative)]
    #[case("moderate", Classification::Neutral)]
    #[case("see remarks", Classification::Neutral)]
    fn heuristic_examples(#[case] answer: &str, #[case] expected: Classification) {
        assert_eq!(classify_freeform(answer), expected);
    }

    fn options() -> Vec<QuestionOption> {
        vec![
            QuestionOption {
                label: "Compliant".into(),
                polarity: Polarity::Positive,
            },
            QuestionOption {
                label: "Not Compliant".into(),
                polarity: Polarity::Negative,
            },
            QuestionOption {
                label: "For Verification".into(),
                polarity: Polarity::Neutral,
            },
        ]
    }

    #[rstest]
    #[case("Compliant", Classification::Positive)]
    #[case("  compliant ", Classification::Positive)]
    #[case("COMPLIANT", Classification::Positive)]
    #[case("not compliant", Classification::Negative)]
    #[case("for verification", Classification::Neutral)]
    #[case("something else", Classification::Neutral)]
    #[case("", Classification::Neutral)]
    fn option_lookup(#[case] answer: &str, #[case] expected: Classification) {
        assert_eq!(classify_by_options(answer, &options()), expected);
    }

    #[test]
    fn paths_can_disagree() {
        let opts = vec![QuestionOption {
            label: "No".into(),
            polarity: Polarity::Positive,
        }];
        assert_eq!(classify_by_options("No", &opts), Classification::Positive);
        assert_eq!(classify_freeform("No"), Classification::Negative);
        assert_eq!(classify_by_options("N/A", &opts), Classification::Neutral);
        assert_eq!(classify_freeform("N/A"), Classification::NotApplicable);
    }
}
