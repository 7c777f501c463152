//! Document-level reference graph construction and text export.
//!
//! The graph is descriptive corpus metadata sized for documentation, not for
//! rendering at scale. Construction and serialization are kept separate so
//! alternate export formats can be added without touching graph building.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::index::CrossRefIndex;
use crate::types::RefKind;

/// One directed edge: references from `source` into anchors owned by `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    /// Document the references originate from.
    pub source: PathBuf,
    /// Document owning the referenced anchors.
    pub target: PathBuf,
    /// Number of reference records between the pair.
    pub weight: u64,
}

/// Directed weighted graph of cross-document references.
/// Self-edges are excluded: internal references are not graph edges.
#[derive(Debug, Clone)]
pub struct ReferenceGraph {
    /// Edges sorted by weight descending, then (source, target) ascending.
    pub edges: Vec<GraphEdge>,
    /// Every known document, path-sorted. Nodes exist even without edges.
    pub nodes: Vec<PathBuf>,
}

impl ReferenceGraph {
    /// Build the graph from the classified references in the index.
    /// Only external references contribute edges; dangling references have
    /// no owning document and internal references are self-edges.
    pub fn build(index: &CrossRefIndex) -> Self {
        let nodes: Vec<PathBuf> = index.documents().map(|(path, _)| path.clone()).collect();

        let mut weights: BTreeMap<(PathBuf, PathBuf), u64> = BTreeMap::new();
        for node in &nodes {
            for reference in index.references_from(node) {
                if reference.kind != RefKind::External {
                    continue;
                }
                let Some(owner) = &reference.owner else {
                    continue;
                };
                let key = (node.clone(), owner.clone());
                let count = weights.entry(key).or_insert(0);
                *count = count.saturating_add(1);
            }
        }

        let mut edges: Vec<GraphEdge> = weights
            .into_iter()
            .map(|((source, target), weight)| GraphEdge { source, target, weight })
            .collect();
        edges.sort_by(|a, b| {
            b.weight
                .cmp(&a.weight)
                .then_with(|| (&a.source, &a.target).cmp(&(&b.source, &b.target)))
        });

        return Self { edges, nodes };
    }
}

/// Serialize a reference graph as Graphviz DOT text.
///
/// One node statement per document (sanitized-path identifier, original path
/// as label), then one edge statement per pair, heaviest first. Weight is
/// implicit in the edge ordering.
pub fn render_dot(graph: &ReferenceGraph) -> String {
    let ids = assign_node_ids(&graph.nodes);
    let mut out = String::from("digraph anchor_references {\n");

    for node in &graph.nodes {
        let Some(id) = ids.get(node.as_path()) else {
            continue;
        };
        let _ = writeln!(
            out,
            "    \"{id}\" [label=\"{}\"];",
            escape_label(&node.display().to_string())
        );
    }

    for edge in &graph.edges {
        let (Some(source), Some(target)) =
            (ids.get(edge.source.as_path()), ids.get(edge.target.as_path()))
        else {
            continue;
        };
        let _ = writeln!(out, "    \"{source}\" -> \"{target}\";");
    }

    out.push_str("}\n");
    return out;
}

/// Assign a unique graph-safe identifier to every node.
/// Distinct paths can sanitize to the same identifier (`a-b.md` and
/// `a_b.md` both yield `a_b`); later nodes get a numeric suffix so their
/// edges are never merged.
fn assign_node_ids(nodes: &[PathBuf]) -> HashMap<&Path, String> {
    let mut ids: HashMap<&Path, String> = HashMap::new();
    let mut taken: HashSet<String> = HashSet::new();

    for node in nodes {
        let base = node_id(node);
        let mut id = base.clone();
        let mut suffix = 2_u32;
        while !taken.insert(id.clone()) {
            id = format!("{base}_{suffix}");
            suffix = suffix.saturating_add(1);
        }
        ids.insert(node.as_path(), id);
    }

    return ids;
}

/// Graph-safe identifier for a document node: extension stripped,
/// every non-alphanumeric character replaced with an underscore.
fn node_id(path: &Path) -> String {
    let stem = path.with_extension("");
    return stem
        .to_string_lossy()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
}

/// Escape backslashes and double quotes so a path is a valid quoted
/// DOT string.
fn escape_label(label: &str) -> String {
    return label.replace('\\', "\\\\").replace('"', "\\\"");
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use crate::types::DocumentScan;

    fn doc(path: &str, anchors: &[&str], targets: &[&str]) -> DocumentScan {
        DocumentScan {
            anchors: anchors.iter().map(ToString::to_string).collect(),
            line_count: 10,
            path: PathBuf::from(path),
            targets: targets.iter().map(ToString::to_string).collect(),
        }
    }

    fn graph_for(scans: &[DocumentScan]) -> ReferenceGraph {
        let index = CrossRefIndex::build(scans).unwrap();
        ReferenceGraph::build(&index)
    }

    #[test]
    fn edge_weight_counts_reference_records() {
        let graph = graph_for(&[
            doc("a.md", &[], &["b-top", "b-top", "b-sect"]),
            doc("b.md", &["b-top", "b-sect"], &[]),
        ]);
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].source, PathBuf::from("a.md"));
        assert_eq!(graph.edges[0].target, PathBuf::from("b.md"));
        assert_eq!(graph.edges[0].weight, 3);
    }

    #[test]
    fn self_edges_and_dangling_targets_are_excluded() {
        let graph = graph_for(&[doc("a.md", &["a-top"], &["a-top", "nowhere"])]);
        assert!(graph.edges.is_empty());
        assert_eq!(graph.nodes, vec![PathBuf::from("a.md")]);
    }

    #[test]
    fn edges_sorted_heaviest_first_with_path_tiebreak() {
        let graph = graph_for(&[
            doc("a.md", &[], &["c-top"]),
            doc("b.md", &[], &["c-top", "c-top"]),
            doc("c.md", &["c-top"], &["d-top"]),
            doc("d.md", &["d-top"], &[]),
        ]);
        let pairs: Vec<(&Path, &Path, u64)> = graph
            .edges
            .iter()
            .map(|e| (e.source.as_path(), e.target.as_path(), e.weight))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (Path::new("b.md"), Path::new("c.md"), 2),
                (Path::new("a.md"), Path::new("c.md"), 1),
                (Path::new("c.md"), Path::new("d.md"), 1),
            ]
        );
    }

    #[test]
    fn dot_output_has_markers_nodes_and_ordered_edges() {
        let graph = graph_for(&[
            doc("docs/guide.md", &["guide-top"], &[]),
            doc("docs/api.md", &[], &["guide-top"]),
        ]);
        let dot = render_dot(&graph);

        assert!(dot.starts_with("digraph anchor_references {\n"));
        assert!(dot.ends_with("}\n"));
        assert!(dot.contains("\"docs_guide\" [label=\"docs/guide.md\"];"));
        assert!(dot.contains("\"docs_api\" [label=\"docs/api.md\"];"));
        assert!(dot.contains("\"docs_api\" -> \"docs_guide\";"));
    }

    #[test]
    fn node_id_strips_extension_and_sanitizes_separators() {
        assert_eq!(node_id(Path::new("docs/user-guide.md")), "docs_user_guide");
        assert_eq!(node_id(Path::new("intro.md")), "intro");
    }

    #[test]
    fn colliding_sanitized_ids_get_unique_suffixes() {
        // Both paths sanitize to `a_b`; the edge must not self-loop.
        let graph = graph_for(&[
            doc("a-b.md", &["ab-top"], &[]),
            doc("a_b.md", &[], &["ab-top"]),
        ]);
        let dot = render_dot(&graph);
        assert!(dot.contains("\"a_b\" [label=\"a-b.md\"];"), "dot: {dot}");
        assert!(dot.contains("\"a_b_2\" [label=\"a_b.md\"];"), "dot: {dot}");
        assert!(dot.contains("\"a_b_2\" -> \"a_b\";"), "dot: {dot}");
        assert!(!dot.contains("\"a_b\" -> \"a_b\";"), "dot: {dot}");
    }

    #[test]
    fn quotes_in_paths_are_escaped_in_labels() {
        let graph = graph_for(&[doc("we\"ird.md", &[], &[])]);
        let dot = render_dot(&graph);
        assert!(dot.contains("[label=\"we\\\"ird.md\"]"), "dot: {dot}");
    }
}
