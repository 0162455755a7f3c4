//! Freshness of a derived view relative to its canonical document.

use crate::loader::{file_name, CanonicalDocument, DerivedView};
use crate::policy::ValidationPolicy;
use crate::report::{Finding, FindingKind};
use chrono::NaiveDate;
use std::fmt::{self, Display, Formatter};

/// Expected staleness classification of a view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Staleness {
    Fresh,
    Review,
    Stale,
}

impl Staleness {
    /// `<= 0` days is fresh, up to `review_window_days` is review, anything older is stale.
    pub fn classify(delta_days: i64, review_window_days: i64) -> Self {
        if delta_days <= 0 {
            Staleness::Fresh
        } else if delta_days <= review_window_days {
            Staleness::Review
        } else {
            Staleness::Stale
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Staleness::Fresh => "fresh",
            Staleness::Review => "review",
            Staleness::Stale => "stale",
        }
    }
}

impl Display for Staleness {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn parse_date(value: &str, format: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, format).ok()
}

/// Classification implied by the two dates, or `None` if either does not parse.
pub fn expected_staleness(
    source_updated: &str,
    canonical_updated: &str,
    policy: &ValidationPolicy,
) -> Option<Staleness> {
    let source = parse_date(source_updated, &policy.date_format)?;
    let canonical = parse_date(canonical_updated, &policy.date_format)?;
    let delta_days = (canonical - source).num_days();
    Some(Staleness::classify(delta_days, policy.review_window_days))
}

/// Compare a view's `source_updated` with its canonical document's `updated`.
///
/// Only unequal strings are examined further; equal strings are fresh without a date parse.
pub fn check_freshness(
    view: &DerivedView,
    canonical: &CanonicalDocument,
    policy: &ValidationPolicy,
) -> Vec<Finding> {
    let finding = |kind: FindingKind| Finding::new(view.source_id.clone(), file_name(&view.path), kind);

    let (Some(source_updated), Some(canonical_updated)) = (
        view.header.scalar("source_updated"),
        canonical.header.scalar("updated"),
    ) else {
        return vec![finding(FindingKind::IncompleteFreshness)];
    };
    if source_updated == canonical_updated {
        return Vec::new();
    }

    let mut findings = vec![finding(FindingKind::StaleView {
        source_updated: source_updated.to_string(),
        canonical_updated: canonical_updated.to_string(),
    })];

    let Some(expected) = expected_staleness(source_updated, canonical_updated, policy) else {
        return findings;
    };
    if let Some(declared) = view.header.scalar("staleness") {
        if declared != expected.as_str() {
            findings.push(finding(FindingKind::StalenessMismatch {
                expected: expected.to_string(),
                found: declared.to_string(),
            }));
        }
    }
    findings
}
