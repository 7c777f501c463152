//! Per-document metric aggregation over the cross-reference index.

use std::collections::HashSet;

use crate::index::CrossRefIndex;
use crate::types::{FileMetrics, RefKind};

/// Clamp a collection size into a `u32` counter.
fn count_u32(n: usize) -> u32 {
    return n.try_into().unwrap_or(u32::MAX);
}

/// Compute one `FileMetrics` row per known document, path-sorted.
///
/// Total, never sparse: a document with zero anchors and zero references
/// still produces an all-zero row. Distinct counting uses target identifier
/// strings, not record identity. Dangling references count toward outgoing
/// link totals (with their own split) and never toward incoming references.
pub fn aggregate(index: &CrossRefIndex) -> Vec<FileMetrics> {
    return index
        .documents()
        .map(|(path, lines)| {
            let mut m = FileMetrics::empty(path.clone(), lines);
            aggregate_incoming(index, &mut m);
            aggregate_outgoing(index, &mut m);
            m
        })
        .collect();
}

/// Fill the anchor and incoming-reference counters for one document.
fn aggregate_incoming(index: &CrossRefIndex, m: &mut FileMetrics) {
    let anchors = index.anchors_of(&m.document);
    m.num_anchors = count_u32(anchors.len());

    for anchor in anchors {
        let incoming = index.references_to(&anchor.id);
        if incoming.is_empty() {
            m.num_anchors_not_referenced = m.num_anchors_not_referenced.saturating_add(1);
            continue;
        }

        m.num_anchors_referenced = m.num_anchors_referenced.saturating_add(1);
        if incoming.iter().any(|r| r.reference.source == anchor.document) {
            m.num_anchors_referenced_internal = m.num_anchors_referenced_internal.saturating_add(1);
        }
        if incoming.iter().any(|r| r.reference.source != anchor.document) {
            m.num_anchors_referenced_external = m.num_anchors_referenced_external.saturating_add(1);
        }

        for reference in incoming {
            m.num_references = m.num_references.saturating_add(1);
            match reference.kind {
                RefKind::External => {
                    m.num_references_external = m.num_references_external.saturating_add(1);
                },
                RefKind::Internal => {
                    m.num_references_internal = m.num_references_internal.saturating_add(1);
                },
                // references_to only returns resolved records for a declared
                // anchor, so a dangling kind here is a logic defect upstream.
                RefKind::Dangling => {},
            }
        }
    }
}

/// Fill the outgoing-link counters for one document.
fn aggregate_outgoing(index: &CrossRefIndex, m: &mut FileMetrics) {
    let outgoing = index.references_from(&m.document);
    m.num_links = count_u32(outgoing.len());

    let mut distinct: HashSet<&str> = HashSet::new();
    let mut distinct_dangling: HashSet<&str> = HashSet::new();
    let mut distinct_external: HashSet<&str> = HashSet::new();
    let mut distinct_internal: HashSet<&str> = HashSet::new();

    for reference in outgoing {
        let target = reference.reference.target_id.as_str();
        distinct.insert(target);
        match reference.kind {
            RefKind::Dangling => {
                m.num_links_dangling = m.num_links_dangling.saturating_add(1);
                distinct_dangling.insert(target);
            },
            RefKind::External => {
                m.num_links_external = m.num_links_external.saturating_add(1);
                distinct_external.insert(target);
            },
            RefKind::Internal => {
                m.num_links_internal = m.num_links_internal.saturating_add(1);
                distinct_internal.insert(target);
            },
        }
    }

    m.num_distinct_links = count_u32(distinct.len());
    m.num_distinct_links_dangling = count_u32(distinct_dangling.len());
    m.num_distinct_links_external = count_u32(distinct_external.len());
    m.num_distinct_links_internal = count_u32(distinct_internal.len());
}
