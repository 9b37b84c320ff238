//! Ordered keyword rules mapping question text to a recommendation category.

use eco_core::enums::RecommendationCategory;
use serde::{Deserialize, Serialize};

/// If the lower-cased question text contains any keyword, the rule applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub keywords: Vec<String>,
    pub category: RecommendationCategory,
}

impl CategoryRule {
    pub fn new<I, S>(keywords: I, category: RecommendationCategory) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.into().to_lowercase())
                .collect(),
            category,
        }
    }

    fn matches(&self, lowered_text: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| !keyword.is_empty() && lowered_text.contains(keyword.as_str()))
    }
}

/// First matching rule wins; `fallback` applies when none match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRules {
    rules: Vec<CategoryRule>,
    fallback: RecommendationCategory,
}

impl Default for CategoryRules {
    fn default() -> Self {
        Self {
            rules: vec![
                CategoryRule::new(
                    ["permit", "license"],
                    RecommendationCategory::ComplyLackingPermits,
                ),
                CategoryRule::new(
                    ["facility", "equipment"],
                    RecommendationCategory::ProvideLackingFacilities,
                ),
            ],
            fallback: RecommendationCategory::Others,
        }
    }
}

impl CategoryRules {
    /// Put `extra` ahead of the current rules so they take precedence.
    #[must_use]
    pub fn with_rules_first<I>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = CategoryRule>,
    {
        let mut rules: Vec<CategoryRule> = extra
            .into_iter()
            .map(|rule| CategoryRule::new(rule.keywords, rule.category))
            .collect();
        rules.append(&mut self.rules);
        self.rules = rules;
        self
    }

    #[must_use]
    pub fn categorize(&self, question_text: &str) -> RecommendationCategory {
        let lowered = question_text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map_or(self.fallback, |rule| rule.category)
    }

    #[must_use]
    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }
}
