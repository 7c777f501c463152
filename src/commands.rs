//! Core CLI commands for anchorstat: analyze, graph, info.

use std::path::Path;

use crate::config::Config;
use crate::error::Error;
use crate::graph::{ReferenceGraph, render_dot};
use crate::index::CrossRefIndex;
use crate::metrics;
use crate::render::{self, Summary};
use crate::reports;
use crate::scanner;

/// Run the full pipeline and print the three reports plus a summary.
/// With `json`, emits one JSON object instead of markdown tables.
///
/// # Errors
///
/// Returns errors from config loading, corpus scanning, or index
/// construction (notably `Error::DuplicateAnchor`, which aborts before
/// any report is produced).
pub fn analyze(root: &Path, json: bool) -> Result<(), Error> {
    let config = Config::load(root)?;
    let scans = scanner::scan(root, &config)?;
    let index = CrossRefIndex::build(&scans)?;
    warn_dangling(&index);

    let rows = metrics::aggregate(&index);
    let report_set = reports::generate(&rows, &index, &config);
    let summary = Summary {
        num_anchors: index.anchor_count(),
        num_dangling_references: index.dangling_reference_count(),
        num_documents: index.documents().count(),
        num_references: index.reference_count(),
    };

    if json {
        println!("{}", render::render_json(&report_set, &summary));
    } else {
        print!("{}", render::render_markdown(&report_set, &summary));
    }
    return Ok(());
}

/// Run the pipeline through graph construction and emit the DOT text,
/// to stdout or to `output` when given.
///
/// # Errors
///
/// Returns errors from config loading, corpus scanning, index construction,
/// or writing the output file.
pub fn graph(root: &Path, output: Option<&Path>) -> Result<(), Error> {
    let config = Config::load(root)?;
    let scans = scanner::scan(root, &config)?;
    let index = CrossRefIndex::build(&scans)?;
    warn_dangling(&index);

    let reference_graph = ReferenceGraph::build(&index);
    let dot = render_dot(&reference_graph);

    match output {
        Some(path) => {
            std::fs::write(path, dot)?;
            println!("Wrote graph to {}", path.display());
        },
        None => print!("{dot}"),
    }
    return Ok(());
}

/// Output the comprehensive anchorstat reference document.
pub fn info() {
    let version = env!("CARGO_PKG_VERSION");
    print!(
        "\
# anchorstat {version}

Anchor granularity analysis for markdown corpora — find pages whose single
reference target is overused relative to the anchors declared inside them.

## Corpus Syntax

    ## Heading {{#anchor-id}}          anchor declaration (globally unique)
    [link text](#anchor-id)           reference to an anchor, any document

## Workflow

    anchorstat analyze [ROOT]         Print the three ranked reports
    anchorstat analyze --json         Same data as one JSON object
    anchorstat graph [ROOT]           Print the reference graph as DOT
    anchorstat graph --output g.dot   Write the DOT text to a file
    anchorstat info                   This document

## Reports

| Report | Filter | Sort |
|--------|--------|------|
| Single anchor under reference pressure | 1 anchor, refs >= min_refs, lines >= min_lines | refs * lines, descending |
| Partially adopted anchor granularity | >1 anchors, some but not all referenced | pct referenced ascending |
| Single referenced anchor despite candidates | >1 anchors, exactly 1 referenced | anchors * refs, descending |

## Configuration (.anchorstat.toml)

    min_lines = 200                   # line threshold for size-gated reports
    min_refs = 3                      # incoming-reference threshold
    include = [\"docs/\"]               # only scan these paths
    exclude = [\"docs/archive/\"]       # skip these paths

## Exit Codes

| Code | Meaning |
|------|---------|
| 0    | Analysis completed |
| 1    | Runtime error (duplicate anchor, bad config, I/O) |
"
    );
}

/// Report each distinct dangling identifier once on stderr.
/// Dangling references are non-fatal; they are classified explicitly and
/// surfaced so corpus authors can fix broken links.
fn warn_dangling(index: &CrossRefIndex) {
    for (id, source) in index.dangling_ids() {
        eprintln!(
            "warning: dangling reference `{id}` (first seen in {})",
            source.display()
        );
    }
}
