//! Machine-readable docs report.

use super::ValidationRun;
use crate::runtime::error::{XtaskError, XtaskResult};
use chrono::{SecondsFormat, Utc};
use doc_graph::{Finding, FindingKind};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

/// JSON body of the report for `run`.
pub fn report_json(run: &ValidationRun) -> Value {
    json!({
        "generated_at": Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        "canonical_count": run.canonical_count,
        "view_count": run.view_count,
        "error_count": run.report.error_count(),
        "warning_count": run.report.warning_count(),
        "errors": findings_json(&run.report.errors),
        "warnings": findings_json(&run.report.warnings),
    })
}

/// Write the JSON report to `output`, creating parent directories as needed.
pub fn write_json_report(run: &ValidationRun, output: &Path) -> XtaskResult<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| {
            XtaskError::io(format!("failed to create {}: {err}", parent.display()))
                .with_path(parent)
        })?;
    }
    let body = serde_json::to_string_pretty(&report_json(run))
        .map_err(|err| XtaskError::io(format!("failed to serialize docs report: {err}")))?;
    fs::write(output, format!("{body}\n")).map_err(|err| {
        XtaskError::io(format!("failed to write {}: {err}", output.display()))
            .with_operation("write docs report")
            .with_path(output)
    })?;
    println!("Wrote docs report: {}", output.display());
    Ok(())
}

fn findings_json(findings: &[Finding]) -> Vec<Value> {
    findings
        .iter()
        .map(|finding| {
            let mut value = json!({
                "severity": finding.severity().as_str(),
                "check": finding.kind.check(),
                "subject": finding.subject,
                "file": finding.file,
                "message": finding.message(),
            });
            if let FindingKind::InvalidLinksEntry { entry } = &finding.kind {
                value["entry"] = json!(entry);
            }
            value
        })
        .collect()
}
