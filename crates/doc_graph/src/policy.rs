//! Validation policy: relation vocabulary, core-document rules, required view sections and the
//! thresholds used by the freshness and summary checks.
//!
//! The defaults are the corpus contract. A workspace may override individual fields through the
//! `[policy]` table of its docs config; [`ValidationPolicy::validate`] must pass before the policy
//! is handed to the validation passes.

use serde::Deserialize;
use thiserror::Error;

/// Closed relation vocabulary for canonical links.
pub const ALLOWED_RELS: &[&str] = &[
    "related",
    "companion",
    "responds_to",
    "implications_for",
    "informed_by",
    "supersedes",
    "superseded_by",
    "implements",
    "depends_on",
    "blocks",
    "references",
    "contradicts",
    "duplicates",
];

/// Sections every derived view must contain, in report order.
pub const REQUIRED_VIEW_SECTIONS: &[&str] = &[
    "LLM Summary",
    "Canonical Statements",
    "Scope and Non-Goals",
    "Dependencies and Interfaces",
    "Evidence and Freshness",
    "Open Questions",
    "Change Log",
];

/// Identifier prefixes that mark a canonical document as core.
pub const CORE_PREFIXES: &[&str] = &["SYS-", "DD-", "STD-", "ADR-"];

/// Exact identifiers that are core regardless of prefix.
pub const CORE_IDS: &[&str] = &["IDX-00-MASTER"];

const SUMMARY_SECTION: &str = "LLM Summary";
const SUMMARY_MIN_WORDS: usize = 120;
const SUMMARY_MAX_WORDS: usize = 180;
const REVIEW_WINDOW_DAYS: i64 = 30;
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Invalid policy overrides.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("relation vocabulary must not be empty")]
    EmptyRelationVocabulary,
    #[error("summary word band is inverted ({min} > {max})")]
    InvertedSummaryBand { min: usize, max: usize },
    #[error("summary section name must not be empty")]
    EmptySummarySection,
    #[error("review window must not be negative (got {0} days)")]
    NegativeReviewWindow(i64),
}

/// Rules applied by the link, freshness and view-content passes.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationPolicy {
    pub allowed_rels: Vec<String>,
    pub core_prefixes: Vec<String>,
    pub core_ids: Vec<String>,
    pub required_sections: Vec<String>,
    /// Section whose words are counted against the summary band.
    pub summary_section: String,
    pub summary_min_words: usize,
    pub summary_max_words: usize,
    /// Largest positive day delta still classified as `review`.
    pub review_window_days: i64,
    /// `chrono` format string for `updated` / `source_updated`.
    pub date_format: String,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            allowed_rels: owned(ALLOWED_RELS),
            core_prefixes: owned(CORE_PREFIXES),
            core_ids: owned(CORE_IDS),
            required_sections: owned(REQUIRED_VIEW_SECTIONS),
            summary_section: SUMMARY_SECTION.to_string(),
            summary_min_words: SUMMARY_MIN_WORDS,
            summary_max_words: SUMMARY_MAX_WORDS,
            review_window_days: REVIEW_WINDOW_DAYS,
            date_format: DATE_FORMAT.to_string(),
        }
    }
}

impl ValidationPolicy {
    /// Reject overrides the validation passes cannot work with.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.allowed_rels.is_empty() {
            return Err(PolicyError::EmptyRelationVocabulary);
        }
        if self.summary_min_words > self.summary_max_words {
            return Err(PolicyError::InvertedSummaryBand {
                min: self.summary_min_words,
                max: self.summary_max_words,
            });
        }
        if self.summary_section.trim().is_empty() {
            return Err(PolicyError::EmptySummarySection);
        }
        if self.review_window_days < 0 {
            return Err(PolicyError::NegativeReviewWindow(self.review_window_days));
        }
        Ok(())
    }

    pub fn is_allowed_rel(&self, rel: &str) -> bool {
        self.allowed_rels.iter().any(|allowed| allowed == rel)
    }

    /// Core documents are expected to declare outbound links.
    pub fn is_core_id(&self, id: &str) -> bool {
        if id.is_empty() {
            return false;
        }
        self.core_ids.iter().any(|core| core == id)
            || self
                .core_prefixes
                .iter()
                .any(|prefix| id.starts_with(prefix.as_str()))
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_valid_and_matches_contract() {
        let policy = ValidationPolicy::default();
        assert_eq!(policy.validate(), Ok(()));
        assert_eq!(policy.allowed_rels.len(), 13);
        assert_eq!(policy.required_sections.len(), 7);
        assert_eq!(policy.summary_min_words, 120);
        assert_eq!(policy.summary_max_words, 180);
        assert_eq!(policy.review_window_days, 30);
    }

    #[test]
    fn core_ids_match_prefixes_and_master_index() {
        let policy = ValidationPolicy::default();
        assert!(policy.is_core_id("IDX-00-MASTER"));
        assert!(policy.is_core_id("SYS-001-runtime"));
        assert!(policy.is_core_id("ADR-0007"));
        assert!(!policy.is_core_id("IDX-01-glossary"));
        assert!(!policy.is_core_id("RF-12"));
        assert!(!policy.is_core_id(""));
    }

    #[test]
    fn relation_vocabulary_is_case_sensitive() {
        let policy = ValidationPolicy::default();
        assert!(policy.is_allowed_rel("depends_on"));
        assert!(!policy.is_allowed_rel("Depends_On"));
        assert!(!policy.is_allowed_rel("parent"));
    }

    #[test]
    fn validate_rejects_inverted_band_and_empty_vocabulary() {
        let policy = ValidationPolicy {
            summary_min_words: 200,
            ..ValidationPolicy::default()
        };
        assert_eq!(
            policy.validate(),
            Err(PolicyError::InvertedSummaryBand { min: 200, max: 180 })
        );

        let policy = ValidationPolicy {
            allowed_rels: Vec::new(),
            ..ValidationPolicy::default()
        };
        assert_eq!(policy.validate(), Err(PolicyError::EmptyRelationVocabulary));
    }
}
