//! Corpus file discovery.
//!
//! Canonical documents are the prefixed `*.md` files directly under the corpus root; derived
//! views are the prefixed `*.md` files directly under the views directory. Neither collection is
//! searched recursively. A file that cannot be read as UTF-8 text is logged and skipped so the
//! rest of the corpus is still validated.

use crate::docs_config::CorpusLayout;
use crate::runtime::error::{XtaskError, XtaskResult};
use doc_graph::SourceDocument;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const MARKDOWN_SUFFIX: &str = ".md";

/// Both document collections, each sorted by path.
#[derive(Clone, Debug, Default)]
pub struct CorpusSources {
    pub canonical: Vec<SourceDocument>,
    pub views: Vec<SourceDocument>,
}

pub fn collect_corpus(root: &Path, layout: &CorpusLayout) -> XtaskResult<CorpusSources> {
    let canonical_paths = list_markdown_files(root, |name| {
        layout
            .canonical_prefixes
            .iter()
            .any(|prefix| name.starts_with(prefix.as_str()))
    })?;

    let views_root = root.join(&layout.views_dir);
    let view_paths = if views_root.is_dir() {
        list_markdown_files(&views_root, |name| {
            name.starts_with(layout.view_prefix.as_str())
        })?
    } else {
        debug!(path = %views_root.display(), "views directory not found");
        Vec::new()
    };

    Ok(CorpusSources {
        canonical: read_documents(canonical_paths),
        views: read_documents(view_paths),
    })
}

fn list_markdown_files(dir: &Path, accept: impl Fn(&str) -> bool) -> XtaskResult<Vec<PathBuf>> {
    let mut entries: Vec<_> = fs::read_dir(dir)
        .map_err(|err| {
            XtaskError::io(format!("failed to read {}: {err}", dir.display()))
                .with_operation("list corpus documents")
                .with_path(dir)
        })?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| XtaskError::io(format!("failed to read {}: {err}", dir.display())))?;
    entries.sort_by_key(|e| e.path());

    Ok(entries
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(MARKDOWN_SUFFIX) && accept(name))
        })
        .collect())
}

fn read_documents(paths: Vec<PathBuf>) -> Vec<SourceDocument> {
    paths
        .into_iter()
        .filter_map(|path| match fs::read_to_string(&path) {
            Ok(text) => Some(SourceDocument::new(path, text)),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping unreadable document");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_root(prefix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let path = std::env::temp_dir().join(format!("{prefix}_{}_{}", std::process::id(), nanos));
        fs::create_dir_all(path.join("llm")).expect("create temp corpus");
        path
    }

    fn names(docs: &[SourceDocument]) -> Vec<String> {
        docs.iter()
            .map(|doc| doc.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn collects_prefixed_markdown_files_in_sorted_order() {
        let root = temp_root("docs_discovery_sorted");
        for name in ["SYS-1.md", "ADR-2.md", "README.md", "DD-3.txt", "notes-SYS.md"] {
            fs::write(root.join(name), "---\nid: x\n---\n").expect("write doc");
        }
        fs::create_dir_all(root.join("RF-dir.md")).expect("dir named like a doc");
        fs::write(root.join("llm/LLM-SYS-1.md"), "view").expect("write view");
        fs::write(root.join("llm/draft.md"), "draft").expect("write draft");
        fs::write(root.join("LLM-root.md"), "not a view here").expect("write stray");

        let sources = collect_corpus(&root, &CorpusLayout::default()).expect("collect");
        assert_eq!(names(&sources.canonical), vec!["ADR-2.md", "SYS-1.md"]);
        assert_eq!(names(&sources.views), vec!["LLM-SYS-1.md"]);

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn missing_views_directory_yields_no_views() {
        let root = temp_root("docs_discovery_no_views");
        fs::remove_dir_all(root.join("llm")).expect("remove views dir");
        fs::write(root.join("DD-1.md"), "---\nid: DD-1\n---\n").expect("write doc");

        let sources = collect_corpus(&root, &CorpusLayout::default()).expect("collect");
        assert_eq!(sources.canonical.len(), 1);
        assert!(sources.views.is_empty());

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn unreadable_document_is_skipped() {
        let root = temp_root("docs_discovery_unreadable");
        fs::write(root.join("DD-1.md"), [0xff, 0xfe, 0x00, 0x80]).expect("write binary doc");
        fs::write(root.join("DD-2.md"), "---\nid: DD-2\n---\n").expect("write doc");

        let sources = collect_corpus(&root, &CorpusLayout::default()).expect("collect");
        assert_eq!(names(&sources.canonical), vec!["DD-2.md"]);

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn missing_root_is_an_io_error() {
        let root = temp_root("docs_discovery_missing_root").join("nope");
        let err = collect_corpus(&root, &CorpusLayout::default()).expect_err("missing root");
        assert!(err.to_string().contains("list corpus documents"));
    }
}
