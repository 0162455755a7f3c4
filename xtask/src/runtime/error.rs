//! Structured xtask error types.

use std::fmt::{self, Display, Formatter};
use std::path::Path;

/// Coarse error categories for command failures.
///
/// Validation findings are not errors; they are reported through the docs report. These
/// categories only describe why a command could not complete or why it exits unsuccessfully.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum XtaskErrorCategory {
    /// Invalid or unreadable configuration.
    Config,
    /// Missing corpus root or other local prerequisites.
    Environment,
    /// Invalid user input, or a strict run that recorded errors.
    Validation,
    /// Filesystem or general I/O failure.
    Io,
}

/// Structured xtask error with contextual metadata.
///
/// Optional `operation`, `target`, and `hint` fields are attached as the error propagates and
/// are rendered after the message.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct XtaskError {
    pub category: XtaskErrorCategory,
    pub message: String,
    pub operation: Option<String>,
    pub target: Option<String>,
    pub hint: Option<String>,
}

/// Convenience result type for xtask internals.
pub type XtaskResult<T> = Result<T, XtaskError>;

impl XtaskError {
    pub fn new(category: XtaskErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            operation: None,
            target: None,
            hint: None,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(XtaskErrorCategory::Config, message)
    }

    pub fn environment(message: impl Into<String>) -> Self {
        Self::new(XtaskErrorCategory::Environment, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(XtaskErrorCategory::Validation, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(XtaskErrorCategory::Io, message)
    }

    /// Attach an operation label.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Attach a target path.
    pub fn with_path(mut self, path: &Path) -> Self {
        self.target = Some(path.display().to_string());
        self
    }

    /// Attach a remediation hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl Display for XtaskError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(operation) = &self.operation {
            write!(f, " [operation: {operation}]")?;
        }
        if let Some(target) = &self.target {
            write!(f, " [target: {target}]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " [hint: {hint}]")?;
        }
        Ok(())
    }
}

impl std::error::Error for XtaskError {}

impl From<doc_graph::PolicyError> for XtaskError {
    fn from(value: doc_graph::PolicyError) -> Self {
        XtaskError::config(format!("invalid docs policy: {value}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_appends_context_fields() {
        let err = XtaskError::config("failed to parse docs config")
            .with_operation("load docs config")
            .with_path(Path::new("tools/docs/doc_graph.toml"))
            .with_hint("check the `[policy]` table");
        assert_eq!(
            err.to_string(),
            "failed to parse docs config [operation: load docs config] \
             [target: tools/docs/doc_graph.toml] [hint: check the `[policy]` table]"
        );
    }

    #[test]
    fn policy_errors_map_to_config_category() {
        let err = XtaskError::from(doc_graph::PolicyError::EmptyRelationVocabulary);
        assert_eq!(err.category, XtaskErrorCategory::Config);
        assert!(err.message.contains("relation vocabulary"));
    }
}
