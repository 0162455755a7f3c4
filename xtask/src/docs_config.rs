//! Versioned docs corpus configuration.
//!
//! The file is optional; every field falls back to the corpus contract defaults, so a repository
//! only lists what it changes:
//!
//! ```toml
//! [layout]
//! views_dir = "views"
//!
//! [policy]
//! review_window_days = 14
//! ```

use crate::runtime::config::ConfigLoader;
use crate::runtime::error::XtaskResult;
use doc_graph::ValidationPolicy;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Corpus-relative location of the docs config.
pub const DOCS_CONFIG_PATH: &str = "tools/docs/doc_graph.toml";

const CANONICAL_PREFIXES: &[&str] = &["ADR-", "RF-", "DD-", "STD-", "SYS-", "IDX-"];
const VIEWS_DIR: &str = "llm";
const VIEW_PREFIX: &str = "LLM-";

/// Where canonical documents and derived views live under the corpus root.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct CorpusLayout {
    /// File-name prefixes of canonical documents directly under the root.
    pub canonical_prefixes: Vec<String>,
    /// Root-relative directory holding derived views.
    pub views_dir: String,
    /// File-name prefix of derived views.
    pub view_prefix: String,
}

impl Default for CorpusLayout {
    fn default() -> Self {
        Self {
            canonical_prefixes: CANONICAL_PREFIXES.iter().map(|p| p.to_string()).collect(),
            views_dir: VIEWS_DIR.to_string(),
            view_prefix: VIEW_PREFIX.to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DocsConfig {
    pub layout: CorpusLayout,
    pub policy: ValidationPolicy,
}

/// Loaded config plus where it came from.
#[derive(Clone, Debug)]
pub struct ResolvedDocsConfig {
    pub config: DocsConfig,
    pub path: PathBuf,
    /// `false` when the file was absent and defaults are in effect.
    pub from_file: bool,
}

/// Load `tools/docs/doc_graph.toml` under `root` and validate its policy.
pub fn load_docs_config(root: &Path) -> XtaskResult<ResolvedDocsConfig> {
    let loader = ConfigLoader::<DocsConfig>::new(root, DOCS_CONFIG_PATH);
    let path = loader.path().to_path_buf();
    let loaded = loader
        .load_optional()
        .map_err(|err| err.with_operation("load docs config"))?;
    let from_file = loaded.is_some();
    let config = loaded.unwrap_or_default();
    config.policy.validate().map_err(|err| {
        crate::runtime::error::XtaskError::from(err)
            .with_operation("validate docs policy")
            .with_path(&path)
    })?;
    Ok(ResolvedDocsConfig {
        config,
        path,
        from_file,
    })
}
