//! Input shapes for questions and inspection submissions.
//!
//! These are what callers hand to validation, evaluation and storage. They
//! carry no generated IDs or timestamps.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::ConditionalLogic;
use crate::enums::{Polarity, QuestionKind};

fn default_category() -> String {
    String::from("General")
}

/// An option as supplied by a question author: either a bare label or a
/// label with an explicit polarity.
///
/// Options without polarity are tagged heuristically when the question is
/// loaded (see `eco_compliance::options::freeze_options`).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(untagged)]
pub enum OptionInput {
    Label(String),
    Tagged {
        label: String,
        #[serde(default)]
        polarity: Option<Polarity>,
    },
}

impl OptionInput {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Label(label) | Self::Tagged { label, .. } => label,
        }
    }

    #[must_use]
    pub const fn declared_polarity(&self) -> Option<Polarity> {
        match self {
            Self::Label(_) => None,
            Self::Tagged { polarity, .. } => *polarity,
        }
    }
}

/// A checklist question before it is stored.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewQuestion {
    pub text: String,
    #[serde(default = "default_category")]
    pub category: String,
    pub kind: QuestionKind,
    #[serde(default)]
    pub options: Vec<OptionInput>,
    #[serde(default)]
    pub is_conditional: bool,
    #[serde(default)]
    pub conditional_logic: Option<ConditionalLogic>,
    #[serde(default)]
    pub sort_order: i64,
}

/// One answered question in a submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ResponseInput {
    pub question_id: String,
    #[serde(default)]
    pub raw_answer: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    /// Conditional field name → entered value.
    #[serde(default)]
    pub conditional_fields: BTreeMap<String, String>,
    /// Explicit "permit expired" checkbox for a conditional question.
    #[serde(default)]
    pub expired: bool,
}

/// Utility usage entered with a submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct UtilityInput {
    pub utility: String,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub monthly_consumption: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
}

/// Everything recorded for one establishment during one inspection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Submission {
    pub inspection_id: String,
    pub establishment_id: String,
    #[serde(default)]
    pub responses: Vec<ResponseInput>,
    #[serde(default)]
    pub utilities: Vec<UtilityInput>,
}
