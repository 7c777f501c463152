//! Report rendering: markdown tables for the terminal, JSON for tooling.

use std::fmt::Write as _;

use serde::Serialize;

use crate::reports::ReportSet;

/// Corpus-wide totals shown under the reports and carried in JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    /// Total anchors declared in the corpus.
    pub num_anchors: usize,
    /// Total dangling reference records.
    pub num_dangling_references: usize,
    /// Total documents scanned.
    pub num_documents: usize,
    /// Total reference records.
    pub num_references: usize,
}

/// Combined JSON payload for `analyze --json`.
#[derive(Serialize)]
struct AnalyzeJson<'a> {
    reports: &'a ReportSet,
    summary: &'a Summary,
    version: String,
}

// ── Markdown output ───────────────────────────────────────────────────

/// Render all three reports as markdown tables followed by the summary.
pub fn render_markdown(reports: &ReportSet, summary: &Summary) -> String {
    let mut out = String::new();

    out.push_str("# Single anchor under reference pressure\n\n");
    if reports.single_anchor.is_empty() {
        out.push_str("(no rows)\n");
    } else {
        out.push_str("| document | refs | lines | score |\n");
        out.push_str("|----------|------|-------|-------|\n");
        for row in &reports.single_anchor {
            let _ = writeln!(
                out,
                "| {} | {} | {} | {} |",
                row.document.display(),
                row.num_references,
                row.num_lines,
                row.score
            );
        }
    }

    out.push_str("\n# Partially adopted anchor granularity\n\n");
    if reports.partial_adoption.is_empty() {
        out.push_str("(no rows)\n");
    } else {
        out.push_str("| document | refs | lines | anchors | referenced | pct |\n");
        out.push_str("|----------|------|-------|---------|------------|-----|\n");
        for row in &reports.partial_adoption {
            let _ = writeln!(
                out,
                "| {} | {} | {} | {} | {} | {:.2} |",
                row.document.display(),
                row.num_references,
                row.num_lines,
                row.num_anchors,
                row.num_anchors_referenced,
                row.pct_anchors_referenced
            );
        }
    }

    out.push_str("\n# Single referenced anchor despite candidates\n\n");
    if reports.lone_anchor.is_empty() {
        out.push_str("(no rows)\n");
    } else {
        out.push_str("| document | refs | anchors | anchor | score |\n");
        out.push_str("|----------|------|---------|--------|-------|\n");
        for row in &reports.lone_anchor {
            let _ = writeln!(
                out,
                "| {} | {} | {} | {} | {} |",
                row.document.display(),
                row.num_references,
                row.num_anchors,
                row.referenced_anchor,
                row.score
            );
        }
    }

    let _ = write!(
        out,
        "\n{} documents, {} anchors, {} references, {} dangling\n",
        summary.num_documents,
        summary.num_anchors,
        summary.num_references,
        summary.num_dangling_references
    );
    return out;
}

// ── JSON output ───────────────────────────────────────────────────────

/// Render reports and summary as one pretty-printed JSON object.
pub fn render_json(reports: &ReportSet, summary: &Summary) -> String {
    let payload = AnalyzeJson {
        reports,
        summary,
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    // serde_json::to_string_pretty won't fail on this structure.
    return serde_json::to_string_pretty(&payload).unwrap_or_default();
}
