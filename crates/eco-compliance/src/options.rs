//! Load-time polarity tagging for question options.
//!
//! Options authored without an explicit polarity get one from the freeform
//! classifier exactly once, when the question is loaded. After that the
//! polarity is frozen and only [`crate::classify_by_options`] reads it.

use chrono::{DateTime, Utc};
use eco_core::entities::{ChecklistQuestion, QuestionOption};
use eco_core::submission::{NewQuestion, OptionInput};

use crate::classify::classify_freeform;

/// Resolve every option to a definite polarity.
#[must_use]
pub fn freeze_options(options: &[OptionInput]) -> Vec<QuestionOption> {
    options
        .iter()
        .map(|opt| QuestionOption {
            label: opt.label().trim().to_string(),
            polarity: opt
                .declared_polarity()
                .unwrap_or_else(|| classify_freeform(opt.label()).to_polarity()),
        })
        .collect()
}

/// Build a stored question from author input, freezing option polarities.
#[must_use]
pub fn load_question(id: &str, input: NewQuestion, created_at: DateTime<Utc>) -> ChecklistQuestion {
    ChecklistQuestion {
        id: id.to_string(),
        options: freeze_options(&input.options),
        text: input.text,
        category: input.category,
        kind: input.kind,
        is_conditional: input.is_conditional,
        conditional_logic: input.conditional_logic,
        sort_order: input.sort_order,
        created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eco_core::enums::{Polarity, QuestionKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn bare_labels_are_tagged_heuristically() {
        let frozen = freeze_options(&[
            OptionInput::Label("Present".into()),
            OptionInput::Label("Non-present".into()),
            OptionInput::Label("N/A".into()),
            OptionInput::Label("For follow-up".into()),
        ]);
        let polarities: Vec<Polarity> = frozen.iter().map(|o| o.polarity).collect();
        assert_eq!(
            polarities,
            vec![
                Polarity::Positive,
                Polarity::Negative,
                Polarity::Neutral,
                Polarity::Neutral
            ]
        );
    }

    #[test]
    fn declared_polarity_is_kept() {
        let frozen = freeze_options(&[OptionInput::Tagged {
            label: " No ".into(),
            polarity: Some(Polarity::Positive),
        }]);
        assert_eq!(frozen[0].label, "No");
        assert_eq!(frozen[0].polarity, Polarity::Positive);
    }

    #[test]
    fn tagged_without_polarity_falls_back_to_heuristic() {
        let frozen = freeze_options(&[OptionInput::Tagged {
            label: "Approved".into(),
            polarity: None,
        }]);
        assert_eq!(frozen[0].polarity, Polarity::Positive);
    }

    #[test]
    fn load_question_copies_fields() {
        let q = load_question(
            "qst-1",
            NewQuestion {
                text: "Is the generator set functional?".into(),
                category: "Air".into(),
                kind: QuestionKind::SingleChoice,
                options: vec![OptionInput::Label("Working".into()), OptionInput::Label("Broken".into())],
                is_conditional: false,
                conditional_logic: None,
                sort_order: 4,
            },
            Utc::now(),
        );
        assert_eq!(q.id, "qst-1");
        assert_eq!(q.category, "Air");
        assert_eq!(q.sort_order, 4);
        assert_eq!(q.options[1].polarity, Polarity::Negative);
    }
}
