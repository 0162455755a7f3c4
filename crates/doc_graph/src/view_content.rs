//! Shape checks on derived-view bodies: the summary word band and required sections.

use crate::loader::{file_name, DerivedView};
use crate::policy::ValidationPolicy;
use crate::report::{Finding, FindingKind};

const SECTION_MARKER: &str = "## ";
const NEXT_SECTION: &str = "\n## ";

/// Text of the named `## ` section up to the next `## ` heading, trimmed.
///
/// Returns `None` when the heading is absent or the section is empty.
pub fn extract_section<'a>(text: &'a str, section: &str) -> Option<&'a str> {
    let heading = format!("{SECTION_MARKER}{section}\n");
    let start = text.find(&heading)? + heading.len();
    let rest = &text[start..];
    let end = rest.find(NEXT_SECTION).unwrap_or(rest.len());
    let body = rest[..end].trim();
    (!body.is_empty()).then_some(body)
}

/// Number of ASCII alphanumeric runs in `text`.
pub fn word_count(text: &str) -> usize {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|token| !token.is_empty())
        .count()
}

/// Required section names whose `## ` heading does not appear anywhere in `text`.
pub fn missing_sections<'p>(text: &str, required: &'p [String]) -> Vec<&'p str> {
    required
        .iter()
        .filter(|section| !text.contains(&format!("{SECTION_MARKER}{section}")))
        .map(String::as_str)
        .collect()
}

pub fn validate_view_content(view: &DerivedView, policy: &ValidationPolicy) -> Vec<Finding> {
    let file = file_name(&view.path);
    let finding = |kind: FindingKind| Finding::new(view.source_id.clone(), file.clone(), kind);
    let mut findings = Vec::new();

    match extract_section(&view.text, &policy.summary_section) {
        None => findings.push(finding(FindingKind::MissingSummary)),
        Some(summary) => {
            let words = word_count(summary);
            if words < policy.summary_min_words || words > policy.summary_max_words {
                findings.push(finding(FindingKind::SummaryLength { words }));
            }
        }
    }

    let missing = missing_sections(&view.text, &policy.required_sections);
    if !missing.is_empty() {
        findings.push(finding(FindingKind::MissingSections {
            sections: missing.into_iter().map(str::to_string).collect(),
        }));
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    const OTHER_SECTIONS: &str = "## Canonical Statements\n- a\n\n## Scope and Non-Goals\n- b\n\n## Dependencies and Interfaces\n- c\n\n## Evidence and Freshness\n- d\n\n## Open Questions\n- e\n\n## Change Log\n- f\n";

    fn view_with_summary_words(count: usize) -> DerivedView {
        let summary = (0..count)
            .map(|i| format!("word{i}"))
            .collect::<Vec<_>>()
            .join(" ");
        view_from_body(&format!("## LLM Summary\n{summary}\n\n{OTHER_SECTIONS}"))
    }

    fn view_from_body(body: &str) -> DerivedView {
        DerivedView {
            source_id: "DD-1".to_string(),
            path: PathBuf::from("llm/LLM-DD-1.md"),
            header: Default::default(),
            text: format!("---\nsource_id: DD-1\n---\n# View\n\n{body}"),
        }
    }

    fn check(view: &DerivedView) -> Vec<String> {
        validate_view_content(view, &ValidationPolicy::default())
            .iter()
            .map(Finding::message)
            .collect()
    }

    #[test]
    fn summary_band_is_inclusive() {
        assert_eq!(
            check(&view_with_summary_words(119)),
            vec!["LLM Summary out of range in LLM-DD-1.md (119 words)".to_string()]
        );
        assert!(check(&view_with_summary_words(120)).is_empty());
        assert!(check(&view_with_summary_words(180)).is_empty());
        assert_eq!(
            check(&view_with_summary_words(181)),
            vec!["LLM Summary out of range in LLM-DD-1.md (181 words)".to_string()]
        );
    }

    #[test]
    fn summary_stops_at_next_section() {
        let text = "## LLM Summary\none two-three, four!\n## Canonical Statements\nfive six\n";
        assert_eq!(extract_section(text, "LLM Summary"), Some("one two-three, four!"));
        assert_eq!(word_count("one two-three, four!"), 4);
    }

    #[test]
    fn missing_or_empty_summary_is_reported() {
        let messages = check(&view_from_body(OTHER_SECTIONS));
        assert_eq!(
            messages,
            vec![
                "Missing LLM Summary in LLM-DD-1.md".to_string(),
                "Missing sections in LLM-DD-1.md: LLM Summary".to_string(),
            ]
        );

        let empty = view_from_body(&format!("## LLM Summary\n   \n{OTHER_SECTIONS}"));
        assert_eq!(
            check(&empty),
            vec!["Missing LLM Summary in LLM-DD-1.md".to_string()]
        );
    }

    #[test]
    fn missing_sections_are_aggregated_in_required_order() {
        let summary = vec!["w"; 150].join(" ");
        let view = view_from_body(&format!(
            "## LLM Summary\n{summary}\n## Change Log\n## Canonical Statements\n"
        ));
        assert_eq!(
            check(&view),
            vec![
                "Missing sections in LLM-DD-1.md: Scope and Non-Goals, Dependencies and Interfaces, Evidence and Freshness, Open Questions"
                    .to_string()
            ]
        );
    }

    #[test]
    fn word_count_ignores_punctuation_and_non_ascii() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("--- ... !!!"), 0);
        assert_eq!(word_count("v1.2 is ok"), 4);
        assert_eq!(word_count("naïve"), 2);
    }
}
