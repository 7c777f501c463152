use std::path::{Path, PathBuf};

use regex::Regex;
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::Error;
use crate::types::DocumentScan;

/// Scan all markdown documents under `root` and extract anchors and
/// reference targets. Applies the config's include/exclude filters.
/// Results are sorted by path so downstream output is byte-stable.
///
/// An unreadable document still yields a scan with zero lines and no
/// extractions — partial corpora must not abort the whole run. The skip
/// is reported on stderr.
///
/// # Errors
///
/// Returns `Error::CorpusNotFound` if `root` is not a directory.
///
/// # Panics
///
/// Panics if the hardcoded extraction regexes are invalid (compile-time invariant).
pub fn scan(root: &Path, config: &Config) -> Result<Vec<DocumentScan>, Error> {
    if !root.is_dir() {
        return Err(Error::CorpusNotFound { path: root.to_path_buf() });
    }

    let anchor_pattern = Regex::new(r"\{#([A-Za-z][A-Za-z0-9_.:-]*)\}").expect("valid regex");
    let target_pattern = Regex::new(r"\]\(#([A-Za-z][A-Za-z0-9_.:-]*)\)").expect("valid regex");
    let mut scans: Vec<DocumentScan> = Vec::new();

    for entry in WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let doc_path = entry.path();
        let relative = doc_path.strip_prefix(root).unwrap_or(doc_path).to_path_buf();

        let relative_str = relative.to_string_lossy();
        if !config.should_scan(&relative_str) {
            continue;
        }

        match std::fs::read_to_string(doc_path) {
            Ok(content) => {
                scans.push(extract_document_scan(&content, relative, &anchor_pattern, &target_pattern));
            },
            Err(e) => {
                eprintln!("warning: skipping unreadable document {relative_str}: {e}");
                scans.push(DocumentScan {
                    anchors: Vec::new(),
                    line_count: 0,
                    path: relative,
                    targets: Vec::new(),
                });
            },
        }
    }

    scans.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(scans)
}

/// Extract all `{#id}` anchor declarations and `[text](#id)` reference
/// targets from one document's content, in document order.
/// Pure function of the content; no resolution, no deduplication —
/// uniqueness enforcement belongs to the cross-reference index.
fn extract_document_scan(
    content: &str,
    path: PathBuf,
    anchor_pattern: &Regex,
    target_pattern: &Regex,
) -> DocumentScan {
    let mut anchors: Vec<String> = Vec::new();
    let mut targets: Vec<String> = Vec::new();

    for line in content.lines() {
        for cap in anchor_pattern.captures_iter(line) {
            if let Some(id) = cap.get(1) {
                anchors.push(id.as_str().to_string());
            }
        }
        for cap in target_pattern.captures_iter(line) {
            if let Some(id) = cap.get(1) {
                targets.push(id.as_str().to_string());
            }
        }
    }

    let line_count: u64 = content.lines().count().try_into().unwrap_or(u64::MAX);

    DocumentScan { anchors, line_count, path, targets }
}
