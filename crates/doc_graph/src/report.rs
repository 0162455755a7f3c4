//! Findings and the aggregated report.

use std::fmt::{self, Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }

    /// Line prefix used by the text report.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN",
        }
    }
}

/// What a finding is about, with the data its message needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FindingKind {
    DuplicateId { first_file: String },
    DuplicateView { first_file: String },
    MissingView,
    UnknownSource,
    InvalidLinksFormat,
    InvalidLinksEntry { entry: String },
    IncompleteLink,
    InvalidRel { rel: String },
    UnknownTarget { target_id: String },
    MissingCoreLinks,
    IncompleteFreshness,
    StaleView {
        source_updated: String,
        canonical_updated: String,
    },
    StalenessMismatch { expected: String, found: String },
    MissingSummary,
    SummaryLength { words: usize },
    MissingSections { sections: Vec<String> },
}

impl FindingKind {
    pub fn severity(&self) -> Severity {
        match self {
            FindingKind::MissingCoreLinks
            | FindingKind::IncompleteFreshness
            | FindingKind::StaleView { .. }
            | FindingKind::StalenessMismatch { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Stable machine name of the check that produced the finding.
    pub fn check(&self) -> &'static str {
        match self {
            FindingKind::DuplicateId { .. } => "duplicate_id",
            FindingKind::DuplicateView { .. } => "duplicate_view",
            FindingKind::MissingView => "missing_view",
            FindingKind::UnknownSource => "unknown_source",
            FindingKind::InvalidLinksFormat => "invalid_links_format",
            FindingKind::InvalidLinksEntry { .. } => "invalid_links_entry",
            FindingKind::IncompleteLink => "incomplete_link",
            FindingKind::InvalidRel { .. } => "invalid_rel",
            FindingKind::UnknownTarget { .. } => "unknown_target",
            FindingKind::MissingCoreLinks => "missing_core_links",
            FindingKind::IncompleteFreshness => "incomplete_freshness",
            FindingKind::StaleView { .. } => "stale_view",
            FindingKind::StalenessMismatch { .. } => "staleness_mismatch",
            FindingKind::MissingSummary => "missing_summary",
            FindingKind::SummaryLength { .. } => "summary_length",
            FindingKind::MissingSections { .. } => "missing_sections",
        }
    }
}

/// One reported problem. `subject` is the canonical id (or a view's source id) and `file` the
/// document's file name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Finding {
    pub subject: String,
    pub file: String,
    pub kind: FindingKind,
}

impl Finding {
    pub fn new(subject: impl Into<String>, file: impl Into<String>, kind: FindingKind) -> Self {
        Self {
            subject: subject.into(),
            file: file.into(),
            kind,
        }
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl Display for Finding {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (id, file) = (&self.subject, &self.file);
        match &self.kind {
            FindingKind::DuplicateId { first_file } => {
                write!(f, "Duplicate id {id} in {file} (also declared in {first_file})")
            }
            FindingKind::DuplicateView { first_file } => write!(
                f,
                "Duplicate LLM view for {id} in {file} (also declared in {first_file})"
            ),
            FindingKind::MissingView => write!(f, "Missing LLM view for {id} ({file})"),
            FindingKind::UnknownSource => {
                write!(f, "LLM view has unknown source_id {id} ({file})")
            }
            FindingKind::InvalidLinksFormat => write!(f, "Invalid links format in {id} ({file})"),
            FindingKind::InvalidLinksEntry { .. } => {
                write!(f, "Invalid links entry in {id} ({file})")
            }
            FindingKind::IncompleteLink => {
                write!(f, "Links entry missing rel/target_id in {id} ({file})")
            }
            FindingKind::InvalidRel { rel } => write!(f, "Invalid rel '{rel}' in {id} ({file})"),
            FindingKind::UnknownTarget { target_id } => {
                write!(f, "Unknown target_id '{target_id}' in {id} ({file})")
            }
            FindingKind::MissingCoreLinks => {
                write!(f, "Missing links for core doc {id} ({file})")
            }
            FindingKind::IncompleteFreshness => write!(
                f,
                "Missing source_updated or canonical updated for {id} ({file})"
            ),
            FindingKind::StaleView {
                source_updated,
                canonical_updated,
            } => write!(
                f,
                "Stale LLM view for {id}: source_updated {source_updated} != canonical updated {canonical_updated}"
            ),
            FindingKind::StalenessMismatch { expected, found } => write!(
                f,
                "Staleness mismatch for {id}: expected {expected}, found {found}"
            ),
            FindingKind::MissingSummary => write!(f, "Missing LLM Summary in {file}"),
            FindingKind::SummaryLength { words } => {
                write!(f, "LLM Summary out of range in {file} ({words} words)")
            }
            FindingKind::MissingSections { sections } => {
                write!(f, "Missing sections in {file}: {}", sections.join(", "))
            }
        }
    }
}

/// Outcome of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
}

/// Errors and warnings in the order the passes produced them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
}

impl Report {
    pub fn from_findings(findings: impl IntoIterator<Item = Finding>) -> Self {
        let (errors, warnings) = findings
            .into_iter()
            .partition(|finding| finding.severity() == Severity::Error);
        Self { errors, warnings }
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Warnings never fail a run; errors fail it only in strict mode.
    pub fn verdict(&self, strict: bool) -> Verdict {
        if strict && !self.errors.is_empty() {
            Verdict::Fail
        } else {
            Verdict::Pass
        }
    }

    pub fn summary_line(&self) -> String {
        format!(
            "Summary: {} error(s), {} warning(s)",
            self.errors.len(),
            self.warnings.len()
        )
    }

    /// Report lines: every error, then every warning, then the summary line.
    pub fn lines(&self) -> Vec<String> {
        self.errors
            .iter()
            .chain(&self.warnings)
            .map(|finding| format!("{}: {finding}", finding.severity().label()))
            .chain(std::iter::once(self.summary_line()))
            .collect()
    }

    pub fn render(&self) -> String {
        let mut out = self.lines().join("\n");
        out.push('\n');
        out
    }
}
