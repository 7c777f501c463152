//! The three ranked reports over per-document metrics.
//!
//! Each report is a pure filter-and-sort query; the scoring formulas are
//! heuristic calibration points and are kept exactly as-is. Ties beyond
//! the stated sort keys break on document path so output is byte-stable.

use std::cmp::Ordering;
use std::path::PathBuf;

use crate::config::Config;
use crate::index::CrossRefIndex;
use crate::types::FileMetrics;

/// Row of the "single anchor under reference pressure" report: a large page
/// exposing one reference target that is pointed at often.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SingleAnchorRow {
    /// The document needing finer anchors.
    pub document: PathBuf,
    /// Line count of the document.
    pub num_lines: u64,
    /// Incoming reference count.
    pub num_references: u32,
    /// `num_references * num_lines`.
    pub score: u64,
}

/// Row of the "partially adopted granularity" report: a page that already
/// declares fine-grained anchors, most of which go unused.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PartialAdoptionRow {
    /// The document whose anchors are underused.
    pub document: PathBuf,
    /// Anchors declared in the document.
    pub num_anchors: u32,
    /// Anchors that are ever a reference target.
    pub num_anchors_referenced: u32,
    /// Line count of the document.
    pub num_lines: u64,
    /// Incoming reference count.
    pub num_references: u32,
    /// `100.0 * num_anchors_referenced / num_anchors`.
    pub pct_anchors_referenced: f64,
}

/// Row of the "lone referenced anchor" report: many candidate anchors but
/// exactly one distinct anchor is ever referenced.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LoneAnchorRow {
    /// The document with a single used anchor.
    pub document: PathBuf,
    /// Anchors declared in the document.
    pub num_anchors: u32,
    /// Incoming reference count.
    pub num_references: u32,
    /// The single anchor identifier that is actually referenced.
    pub referenced_anchor: String,
    /// `num_anchors * num_references`.
    pub score: u64,
}

/// All three reports for one run.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ReportSet {
    /// Report C rows, score-descending.
    pub lone_anchor: Vec<LoneAnchorRow>,
    /// Report B rows, percentage-ascending.
    pub partial_adoption: Vec<PartialAdoptionRow>,
    /// Report A rows, score-descending.
    pub single_anchor: Vec<SingleAnchorRow>,
}

/// Generate all three reports from metrics rows.
/// Thresholds (`min_refs`, `min_lines`) come from config and gate the two
/// size-sensitive reports.
pub fn generate(metrics: &[FileMetrics], index: &CrossRefIndex, config: &Config) -> ReportSet {
    return ReportSet {
        lone_anchor: lone_anchor(metrics, index),
        partial_adoption: partial_adoption(metrics, config),
        single_anchor: single_anchor(metrics, config),
    };
}

/// Report A: documents exposing exactly one anchor, referenced at least
/// `min_refs` times, with at least `min_lines` lines.
/// Score is `num_references * num_lines`, descending.
fn single_anchor(metrics: &[FileMetrics], config: &Config) -> Vec<SingleAnchorRow> {
    let mut rows: Vec<SingleAnchorRow> = metrics
        .iter()
        .filter(|m| {
            m.num_anchors == 1
                && m.num_references >= config.min_refs
                && m.num_lines >= config.min_lines
        })
        .map(|m| SingleAnchorRow {
            document: m.document.clone(),
            num_lines: m.num_lines,
            num_references: m.num_references,
            score: u64::from(m.num_references).saturating_mul(m.num_lines),
        })
        .collect();

    rows.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.document.cmp(&b.document))
    });
    return rows;
}

/// Report B: documents with several anchors where only some are referenced.
/// Ascending by percentage referenced, then descending by anchor count.
fn partial_adoption(metrics: &[FileMetrics], config: &Config) -> Vec<PartialAdoptionRow> {
    let mut rows: Vec<PartialAdoptionRow> = metrics
        .iter()
        .filter(|m| {
            m.num_anchors > 1
                && m.num_references >= config.min_refs
                && m.num_anchors_referenced > 0
                && m.num_anchors_referenced < m.num_anchors
                && m.num_lines >= config.min_lines
        })
        .map(|m| PartialAdoptionRow {
            document: m.document.clone(),
            num_anchors: m.num_anchors,
            num_anchors_referenced: m.num_anchors_referenced,
            num_lines: m.num_lines,
            num_references: m.num_references,
            pct_anchors_referenced: 100.0 * f64::from(m.num_anchors_referenced)
                / f64::from(m.num_anchors),
        })
        .collect();

    rows.sort_by(|a, b| {
        a.pct_anchors_referenced
            .partial_cmp(&b.pct_anchors_referenced)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.num_anchors.cmp(&a.num_anchors))
            .then_with(|| a.document.cmp(&b.document))
    });
    return rows;
}

/// Report C: documents where exactly one distinct anchor is ever referenced
/// despite several candidates. Score is `num_anchors * num_references`,
/// descending. The emitted anchor identifier is the unique referenced one,
/// found through the index.
fn lone_anchor(metrics: &[FileMetrics], index: &CrossRefIndex) -> Vec<LoneAnchorRow> {
    let mut rows: Vec<LoneAnchorRow> = metrics
        .iter()
        .filter(|m| m.num_anchors_referenced == 1 && m.num_anchors > 1 && m.num_references > 1)
        .map(|m| {
            // By the filter exactly one anchor of this document has incoming
            // references, so the first hit is the only hit.
            let referenced_anchor = index
                .anchors_of(&m.document)
                .iter()
                .find(|a| !index.references_to(&a.id).is_empty())
                .map(|a| a.id.clone())
                .unwrap_or_default();
            LoneAnchorRow {
                document: m.document.clone(),
                num_anchors: m.num_anchors,
                num_references: m.num_references,
                referenced_anchor,
                score: u64::from(m.num_anchors).saturating_mul(u64::from(m.num_references)),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.document.cmp(&b.document))
    });
    return rows;
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::metrics;
    use crate::types::DocumentScan;

    fn doc(path: &str, lines: u64, anchors: &[&str], targets: &[&str]) -> DocumentScan {
        DocumentScan {
            anchors: anchors.iter().map(ToString::to_string).collect(),
            line_count: lines,
            path: PathBuf::from(path),
            targets: targets.iter().map(ToString::to_string).collect(),
        }
    }

    fn reports_for(scans: &[DocumentScan]) -> ReportSet {
        let index = CrossRefIndex::build(scans).unwrap();
        let rows = metrics::aggregate(&index);
        generate(&rows, &index, &Config::defaults())
    }

    #[test]
    fn single_anchor_page_referenced_often_scores_refs_times_lines() {
        let scans = vec![
            doc("foo.md", 250, &["foo-top"], &[]),
            doc(
                "other.md",
                50,
                &[],
                &["foo-top", "foo-top", "foo-top", "foo-top", "foo-top"],
            ),
        ];
        let reports = reports_for(&scans);

        assert_eq!(reports.single_anchor.len(), 1);
        let row = &reports.single_anchor[0];
        assert_eq!(row.document, PathBuf::from("foo.md"));
        assert_eq!(row.num_references, 5);
        assert_eq!(row.num_lines, 250);
        assert_eq!(row.score, 1250);
    }

    #[test]
    fn single_anchor_report_respects_thresholds() {
        // Referenced often enough but too short; and long enough but
        // referenced too rarely. Neither qualifies.
        let scans = vec![
            doc("short.md", 100, &["short-top"], &[]),
            doc("rare.md", 300, &["rare-top"], &[]),
            doc(
                "other.md",
                50,
                &[],
                &["short-top", "short-top", "short-top", "rare-top", "rare-top"],
            ),
        ];
        let reports = reports_for(&scans);
        assert!(reports.single_anchor.is_empty());
    }

    #[test]
    fn single_anchor_scores_strictly_ordered_descending() {
        let scans = vec![
            doc("one.md", 200, &["one-top"], &[]),
            doc("two.md", 400, &["two-top"], &[]),
            doc(
                "other.md",
                50,
                &[],
                &["one-top", "one-top", "one-top", "two-top", "two-top", "two-top"],
            ),
        ];
        let reports = reports_for(&scans);
        let scores: Vec<u64> = reports.single_anchor.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![1200, 600]);
    }

    #[test]
    fn partial_adoption_computes_percentage_to_two_decimals_worth() {
        // bar has 10 anchors, 4 distinct ever referenced, 6 incoming
        // references, 300 lines: pct = 40.00.
        let anchors: Vec<String> = (1..=10).map(|i| format!("bar-{i}")).collect();
        let anchor_refs: Vec<&str> = vec!["bar-1", "bar-1", "bar-1", "bar-2", "bar-3", "bar-4"];
        let scans = vec![
            doc(
                "bar.md",
                300,
                &anchors.iter().map(String::as_str).collect::<Vec<_>>(),
                &[],
            ),
            doc("other.md", 50, &[], &anchor_refs),
        ];
        let reports = reports_for(&scans);

        assert_eq!(reports.partial_adoption.len(), 1);
        let row = &reports.partial_adoption[0];
        assert_eq!(row.document, PathBuf::from("bar.md"));
        assert_eq!(row.num_anchors, 10);
        assert_eq!(row.num_anchors_referenced, 4);
        assert_eq!(row.num_references, 6);
        assert_eq!(format!("{:.2}", row.pct_anchors_referenced), "40.00");
    }

    #[test]
    fn partial_adoption_sorts_ascending_then_anchor_count_descending() {
        // low.md: 1 of 10 referenced (10%), high.md: 1 of 4 referenced (25%),
        // wide.md: 1 of 10 referenced (10%) but more anchors than... same
        // count; tie breaks on path.
        let ten: Vec<String> = (1..=10).map(|i| format!("low-{i}")).collect();
        let four: Vec<String> = (1..=4).map(|i| format!("high-{i}")).collect();
        let scans = vec![
            doc(
                "low.md",
                300,
                &ten.iter().map(String::as_str).collect::<Vec<_>>(),
                &[],
            ),
            doc(
                "high.md",
                300,
                &four.iter().map(String::as_str).collect::<Vec<_>>(),
                &[],
            ),
            doc(
                "other.md",
                50,
                &[],
                &["low-1", "low-1", "low-1", "high-1", "high-1", "high-1"],
            ),
        ];
        let reports = reports_for(&scans);
        let order: Vec<&PathBuf> = reports.partial_adoption.iter().map(|r| &r.document).collect();
        assert_eq!(
            order,
            vec![&PathBuf::from("low.md"), &PathBuf::from("high.md")]
        );
    }

    #[test]
    fn partial_adoption_excludes_fully_referenced_documents() {
        let scans = vec![
            doc("full.md", 300, &["full-1", "full-2"], &[]),
            doc(
                "other.md",
                50,
                &[],
                &["full-1", "full-2", "full-1", "full-2"],
            ),
        ];
        let reports = reports_for(&scans);
        assert!(reports.partial_adoption.is_empty());
    }

    #[test]
    fn lone_anchor_emits_the_unique_referenced_identifier() {
        let scans = vec![
            doc("baz.md", 120, &["baz-sect1", "baz-sect2", "baz-sect3"], &[]),
            doc("other.md", 50, &[], &["baz-sect2", "baz-sect2"]),
        ];
        let reports = reports_for(&scans);

        assert_eq!(reports.lone_anchor.len(), 1);
        let row = &reports.lone_anchor[0];
        assert_eq!(row.document, PathBuf::from("baz.md"));
        assert_eq!(row.referenced_anchor, "baz-sect2");
        assert_eq!(row.num_anchors, 3);
        assert_eq!(row.num_references, 2);
        assert_eq!(row.score, 6);
    }

    #[test]
    fn lone_anchor_requires_more_than_one_candidate_and_reference() {
        let scans = vec![
            // Only one anchor declared: excluded.
            doc("single.md", 120, &["single-top"], &[]),
            // Referenced exactly once: excluded.
            doc("rare.md", 120, &["rare-1", "rare-2"], &[]),
            doc(
                "other.md",
                50,
                &[],
                &["single-top", "single-top", "rare-1"],
            ),
        ];
        let reports = reports_for(&scans);
        assert!(reports.lone_anchor.is_empty());
    }
}
