//! Builds the in-memory corpus from already-read document texts.

use crate::header::{parse_header, Header};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Raw document as handed over by discovery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceDocument {
    pub path: PathBuf,
    pub text: String,
}

impl SourceDocument {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Same document with `\r\n` and lone `\r` line endings rewritten to `\n`.
    pub fn normalized(self) -> Self {
        if !self.text.contains('\r') {
            return self;
        }
        let text = self.text.replace("\r\n", "\n").replace('\r', "\n");
        Self { text, ..self }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanonicalDocument {
    pub id: String,
    pub path: PathBuf,
    pub header: Header,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DerivedView {
    pub source_id: String,
    pub path: PathBuf,
    pub header: Header,
    pub text: String,
}

/// Which collection a duplicate identifier was found in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collection {
    Canonical,
    View,
}

/// Identifier declared by more than one document. The later file replaced the earlier one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DuplicateEntry {
    pub collection: Collection,
    pub id: String,
    pub kept: PathBuf,
    pub replaced: PathBuf,
}

/// Loaded corpus. Map iteration order is the report order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Corpus {
    pub canonical: BTreeMap<String, CanonicalDocument>,
    pub views: BTreeMap<String, DerivedView>,
    pub duplicates: Vec<DuplicateEntry>,
}

impl Corpus {
    pub fn contains_id(&self, id: &str) -> bool {
        self.canonical.contains_key(id)
    }
}

/// Index canonical documents by `id` and views by `source_id`.
///
/// Line endings are normalized first. Documents without a header or without the identifying key
/// are skipped. When two documents
/// declare the same identifier the later one in input order wins and the pair is recorded in
/// [`Corpus::duplicates`].
pub fn load_corpus(canonical: Vec<SourceDocument>, views: Vec<SourceDocument>) -> Corpus {
    let mut corpus = Corpus::default();

    for doc in canonical {
        let doc = doc.normalized();
        let Some((id, header)) = identified_header(&doc, "id") else {
            continue;
        };
        let entry = CanonicalDocument {
            id: id.clone(),
            path: doc.path,
            header,
            text: doc.text,
        };
        if let Some(previous) = corpus.canonical.insert(id.clone(), entry) {
            corpus.duplicates.push(DuplicateEntry {
                collection: Collection::Canonical,
                kept: corpus.canonical[&id].path.clone(),
                id,
                replaced: previous.path,
            });
        }
    }

    for doc in views {
        let doc = doc.normalized();
        let Some((source_id, header)) = identified_header(&doc, "source_id") else {
            continue;
        };
        let entry = DerivedView {
            source_id: source_id.clone(),
            path: doc.path,
            header,
            text: doc.text,
        };
        if let Some(previous) = corpus.views.insert(source_id.clone(), entry) {
            corpus.duplicates.push(DuplicateEntry {
                collection: Collection::View,
                kept: corpus.views[&source_id].path.clone(),
                id: source_id,
                replaced: previous.path,
            });
        }
    }

    debug!(
        canonical = corpus.canonical.len(),
        views = corpus.views.len(),
        duplicates = corpus.duplicates.len(),
        "loaded document corpus"
    );
    corpus
}

fn identified_header(doc: &SourceDocument, key: &str) -> Option<(String, Header)> {
    let Some(header) = parse_header(&doc.text) else {
        debug!(path = %doc.path.display(), "skipping document without header");
        return None;
    };
    let Some(id) = header.scalar(key).map(str::to_string) else {
        debug!(path = %doc.path.display(), key, "skipping document without identifier");
        return None;
    };
    Some((id, header))
}

/// Final path component for report messages.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn indexes_documents_by_identifier_in_sorted_order() {
        let corpus = load_corpus(
            vec![
                SourceDocument::new("SYS-2.md", "---\nid: SYS-2\n---\n"),
                SourceDocument::new("ADR-1.md", "---\nid: ADR-1\n---\n"),
            ],
            vec![SourceDocument::new(
                "llm/LLM-SYS-2.md",
                "---\nsource_id: SYS-2\n---\n",
            )],
        );

        let ids: Vec<_> = corpus.canonical.keys().cloned().collect();
        assert_eq!(ids, vec!["ADR-1".to_string(), "SYS-2".to_string()]);
        assert!(corpus.views.contains_key("SYS-2"));
        assert!(corpus.duplicates.is_empty());
    }

    #[test]
    fn skips_documents_without_header_or_identifier() {
        let corpus = load_corpus(
            vec![
                SourceDocument::new("DD-1.md", "# no header\n"),
                SourceDocument::new("DD-2.md", "---\ntitle: untitled\n---\n"),
                SourceDocument::new("DD-3.md", "---\nid: \n---\n"),
                SourceDocument::new("DD-4.md", "---\nid: DD-4\n---\n"),
            ],
            vec![SourceDocument::new("llm/LLM-x.md", "---\nid: DD-4\n---\n")],
        );

        let ids: Vec<_> = corpus.canonical.keys().cloned().collect();
        assert_eq!(ids, vec!["DD-4".to_string()]);
        assert!(corpus.views.is_empty());
    }

    #[test]
    fn duplicate_identifier_keeps_last_and_is_recorded() {
        let corpus = load_corpus(
            vec![
                SourceDocument::new("DD-1-a.md", "---\nid: DD-1\nupdated: a\n---\n"),
                SourceDocument::new("DD-1-b.md", "---\nid: DD-1\nupdated: b\n---\n"),
            ],
            Vec::new(),
        );

        assert_eq!(corpus.canonical["DD-1"].header.scalar("updated"), Some("b"));
        assert_eq!(
            corpus.duplicates,
            vec![DuplicateEntry {
                collection: Collection::Canonical,
                id: "DD-1".to_string(),
                kept: PathBuf::from("DD-1-b.md"),
                replaced: PathBuf::from("DD-1-a.md"),
            }]
        );
    }

    #[test]
    fn crlf_documents_are_indexed_like_lf_documents() {
        let corpus = load_corpus(
            vec![
                SourceDocument::new("ADR-5.md", "---\r\nid: ADR-5\r\nupdated: 2024-01-10\r\n---\r\n# Body\r\n"),
                SourceDocument::new("DD-6.md", "---\rid: DD-6\r---\r"),
            ],
            vec![SourceDocument::new(
                "llm/LLM-ADR-5.md",
                "---\r\nsource_id: ADR-5\r\n---\r\n## LLM Summary\r\ntext\r\n",
            )],
        );

        let ids: Vec<_> = corpus.canonical.keys().cloned().collect();
        assert_eq!(ids, vec!["ADR-5".to_string(), "DD-6".to_string()]);
        assert_eq!(corpus.canonical["ADR-5"].header.scalar("updated"), Some("2024-01-10"));
        assert!(!corpus.views["ADR-5"].text.contains('\r'));
    }

    #[test]
    fn duplicate_view_source_keeps_last_and_is_recorded() {
        let corpus = load_corpus(
            Vec::new(),
            vec![
                SourceDocument::new("llm/LLM-DD-1.md", "---\nsource_id: DD-1\nstaleness: fresh\n---\n"),
                SourceDocument::new("llm/LLM-DD-1-copy.md", "---\nsource_id: DD-1\nstaleness: stale\n---\n"),
            ],
        );

        assert_eq!(corpus.views["DD-1"].header.scalar("staleness"), Some("stale"));
        assert_eq!(
            corpus.duplicates,
            vec![DuplicateEntry {
                collection: Collection::View,
                id: "DD-1".to_string(),
                kept: PathBuf::from("llm/LLM-DD-1-copy.md"),
                replaced: PathBuf::from("llm/LLM-DD-1.md"),
            }]
        );
    }

    #[test]
    fn file_name_uses_last_component() {
        assert_eq!(file_name(Path::new("docs/llm/LLM-DD-1.md")), "LLM-DD-1.md");
    }
}
