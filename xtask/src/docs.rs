//! Docs corpus validation: discovery, the engine run, and report output.
//!
//! Report lines are written to stdout in engine order. Whether a run fails is decided here from
//! the report verdict, not by the engine.

mod audit;
mod discovery;

pub use audit::{report_json, write_json_report};
pub use discovery::{collect_corpus, CorpusSources};

use crate::docs_config::load_docs_config;
use crate::runtime::error::{XtaskError, XtaskResult};
use doc_graph::{graph_findings, load_corpus, validate_corpus, view_findings, Report, Verdict};
use std::path::Path;
use tracing::debug;

/// Which passes a run executes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValidationScope {
    All,
    Links,
    Views,
}

/// Outcome of one validation run.
#[derive(Clone, Debug)]
pub struct ValidationRun {
    pub report: Report,
    pub canonical_count: usize,
    pub view_count: usize,
}

/// Load the docs config, discover and index the corpus under `root`, and run `scope`.
pub fn run_validation(root: &Path, scope: ValidationScope) -> XtaskResult<ValidationRun> {
    if !root.is_dir() {
        return Err(XtaskError::environment("corpus root is not a directory")
            .with_operation("discover docs corpus")
            .with_path(root)
            .with_hint("pass an existing directory with `--root <dir>`"));
    }

    let resolved = load_docs_config(root)?;
    if resolved.from_file {
        debug!(path = %resolved.path.display(), "loaded docs config");
    }
    let policy = &resolved.config.policy;

    let sources = collect_corpus(root, &resolved.config.layout)?;
    debug!(
        canonical = sources.canonical.len(),
        views = sources.views.len(),
        "discovered corpus files"
    );
    let corpus = load_corpus(sources.canonical, sources.views);

    let report = match scope {
        ValidationScope::All => validate_corpus(&corpus, policy),
        ValidationScope::Links => Report::from_findings(graph_findings(&corpus, policy)),
        ValidationScope::Views => Report::from_findings(view_findings(&corpus, policy)),
    };

    Ok(ValidationRun {
        report,
        canonical_count: corpus.canonical.len(),
        view_count: corpus.views.len(),
    })
}

pub fn print_report(report: &Report) {
    for line in report.lines() {
        println!("{line}");
    }
}

/// Map the report verdict to the command result.
pub fn finish(report: &Report, strict: bool) -> XtaskResult<()> {
    match report.verdict(strict) {
        Verdict::Pass => Ok(()),
        Verdict::Fail => Err(XtaskError::validation("docs validation failed")
            .with_hint(format!("{} error(s) recorded", report.error_count()))),
    }
}
