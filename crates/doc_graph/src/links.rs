//! Link graph integrity: view coverage, relation vocabulary and link targets.
//!
//! Cycles and relation symmetry (`supersedes` vs `superseded_by`) are not checked.

use crate::header::{HeaderValue, LinkEntry, LinksValue};
use crate::loader::{file_name, Collection, Corpus};
use crate::policy::ValidationPolicy;
use crate::report::{Finding, FindingKind};

/// One error per identifier that more than one document declared.
pub fn check_duplicates(corpus: &Corpus) -> Vec<Finding> {
    corpus
        .duplicates
        .iter()
        .map(|dup| {
            let first_file = file_name(&dup.replaced);
            let kind = match dup.collection {
                Collection::Canonical => FindingKind::DuplicateId { first_file },
                Collection::View => FindingKind::DuplicateView { first_file },
            };
            Finding::new(dup.id.clone(), file_name(&dup.kept), kind)
        })
        .collect()
}

/// Every canonical document needs a derived view.
pub fn check_view_coverage(corpus: &Corpus) -> Vec<Finding> {
    corpus
        .canonical
        .values()
        .filter(|doc| !corpus.views.contains_key(&doc.id))
        .map(|doc| Finding::new(doc.id.clone(), file_name(&doc.path), FindingKind::MissingView))
        .collect()
}

/// Validate every canonical document's outbound links.
pub fn validate_links(corpus: &Corpus, policy: &ValidationPolicy) -> Vec<Finding> {
    let mut findings = Vec::new();

    for doc in corpus.canonical.values() {
        let file = file_name(&doc.path);
        let finding = |kind: FindingKind| Finding::new(doc.id.clone(), file.clone(), kind);

        let entries = match doc.header.get("links") {
            None | Some(HeaderValue::Null) => {
                if policy.is_core_id(&doc.id) {
                    findings.push(finding(FindingKind::MissingCoreLinks));
                }
                continue;
            }
            Some(HeaderValue::Links(LinksValue::Entries(entries))) => entries,
            Some(HeaderValue::Links(LinksValue::Invalid))
            | Some(HeaderValue::Scalar(_))
            | Some(HeaderValue::List(_)) => {
                findings.push(finding(FindingKind::InvalidLinksFormat));
                continue;
            }
        };

        for entry in entries {
            let record = match entry {
                LinkEntry::Record(record) => record,
                LinkEntry::Malformed(raw) => {
                    findings.push(finding(FindingKind::InvalidLinksEntry { entry: raw.clone() }));
                    continue;
                }
            };
            let (Some(rel), Some(target_id)) = (record.rel(), record.target_id()) else {
                findings.push(finding(FindingKind::IncompleteLink));
                continue;
            };
            if !policy.is_allowed_rel(rel) {
                findings.push(finding(FindingKind::InvalidRel {
                    rel: rel.to_string(),
                }));
            }
            if !corpus.contains_id(target_id) {
                findings.push(finding(FindingKind::UnknownTarget {
                    target_id: target_id.to_string(),
                }));
            }
        }
    }

    findings
}
