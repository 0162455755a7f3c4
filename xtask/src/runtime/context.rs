//! Shared command context passed into command families.

use crate::runtime::error::{XtaskError, XtaskResult};
use std::path::{Path, PathBuf};

/// Shared execution context for xtask command families.
#[derive(Clone, Debug)]
pub struct CommandContext {
    root: PathBuf,
}

impl CommandContext {
    /// Create a new command context rooted at the current working directory.
    pub fn new() -> XtaskResult<Self> {
        Ok(Self::with_root(invocation_root()?))
    }

    /// Context rooted at an explicit directory.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Default corpus root for docs commands.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn invocation_root() -> XtaskResult<PathBuf> {
    std::env::current_dir().map_err(|err| {
        XtaskError::environment(format!("failed to resolve current directory: {err}"))
            .with_hint("pass the corpus root with `--root <dir>`")
    })
}
