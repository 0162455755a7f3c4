//! Validation engine for corpora of cross-referencing documents.
//!
//! A corpus holds canonical documents (typed identifier, header, typed links to other canonical
//! documents) and derived views that summarize one canonical document each. The engine parses
//! headers ([`header`]), indexes both collections ([`loader`]), runs the link, freshness and
//! view-content passes, and aggregates their findings into a [`Report`].
//!
//! Every pass is a pure function from the loaded [`Corpus`] to a list of [`Finding`]s, so passes
//! can be run and tested on their own. [`validate_corpus`] runs all of them in report order.

pub mod freshness;
pub mod header;
pub mod links;
pub mod loader;
pub mod policy;
pub mod report;
pub mod view_content;

pub use header::{parse_header, Header, HeaderValue, LinkEntry, LinkRecord, LinksValue};
pub use loader::{load_corpus, CanonicalDocument, Corpus, DerivedView, SourceDocument};
pub use policy::{PolicyError, ValidationPolicy};
pub use report::{Finding, FindingKind, Report, Severity, Verdict};

use loader::file_name;
use tracing::info;

/// Duplicate identifiers, view coverage and the link graph, in that order.
pub fn graph_findings(corpus: &Corpus, policy: &ValidationPolicy) -> Vec<Finding> {
    let mut findings = links::check_duplicates(corpus);
    findings.extend(links::check_view_coverage(corpus));
    findings.extend(links::validate_links(corpus, policy));
    findings
}

/// Per-view findings in source-id order.
///
/// A view whose source is not a loaded canonical document gets a single error and no further
/// checks; otherwise freshness findings come before content findings.
pub fn view_findings(corpus: &Corpus, policy: &ValidationPolicy) -> Vec<Finding> {
    let mut findings = Vec::new();
    for view in corpus.views.values() {
        let Some(canonical) = corpus.canonical.get(&view.source_id) else {
            findings.push(Finding::new(
                view.source_id.clone(),
                file_name(&view.path),
                FindingKind::UnknownSource,
            ));
            continue;
        };
        findings.extend(freshness::check_freshness(view, canonical, policy));
        findings.extend(view_content::validate_view_content(view, policy));
    }
    findings
}

/// Run every pass over `corpus` and aggregate the findings.
pub fn validate_corpus(corpus: &Corpus, policy: &ValidationPolicy) -> Report {
    let mut findings = graph_findings(corpus, policy);
    findings.extend(view_findings(corpus, policy));
    let report = Report::from_findings(findings);
    info!(
        canonical = corpus.canonical.len(),
        views = corpus.views.len(),
        errors = report.error_count(),
        warnings = report.warning_count(),
        "validated document corpus"
    );
    report
}
