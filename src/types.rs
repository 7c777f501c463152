/// Core domain types for anchorstat anchors, references, and metrics.
use std::path::PathBuf;

/// A declared, addressable identifier inside a document.
/// Parsed from kramdown-style `{#id}` attributes by the scanner.
#[derive(Debug, Clone)]
pub struct Anchor {
    /// Global declaration sequence number across the whole corpus.
    /// The lowest-numbered anchor of a document is its page-level anchor.
    pub declaration_order: u32,
    /// Document that declares this anchor.
    pub document: PathBuf,
    /// The anchor identifier. Unique across the entire corpus.
    pub id: String,
}

/// One occurrence of a link to an anchor identifier.
/// Repeats are distinct records since reference count is a scoring input.
#[derive(Debug, Clone)]
pub struct Reference {
    /// Document containing the link.
    pub source: PathBuf,
    /// Anchor identifier the link points at.
    pub target_id: String,
}

/// How a reference resolves against the global anchor map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    /// The target identifier matches no declared anchor anywhere.
    Dangling,
    /// The target anchor is owned by a different document.
    External,
    /// The target anchor is owned by the source document itself.
    Internal,
}

/// A reference together with its resolution result.
#[derive(Debug, Clone)]
pub struct ClassifiedReference {
    /// Resolution outcome against the anchor map.
    pub kind: RefKind,
    /// Document owning the target anchor, if the target resolved.
    pub owner: Option<PathBuf>,
    /// The underlying reference occurrence.
    pub reference: Reference,
}

/// Raw extraction output for one document: everything the index needs,
/// nothing resolved yet.
#[derive(Debug, Clone)]
pub struct DocumentScan {
    /// Anchor identifiers in document order, repeats preserved.
    pub anchors: Vec<String>,
    /// Number of lines in the document's text content.
    pub line_count: u64,
    /// Corpus-relative path of the document.
    pub path: PathBuf,
    /// Reference target identifiers in document order, one per occurrence.
    pub targets: Vec<String>,
}

/// Per-document counters derived from the cross-reference index.
/// Recomputed in full every run; every known document gets a row.
#[derive(Debug, Clone, serde::Serialize)]
pub struct FileMetrics {
    /// Corpus-relative path of the document.
    pub document: PathBuf,
    /// Distinct anchors declared in this document.
    pub num_anchors: u32,
    /// Anchors of this document that are never a reference target.
    pub num_anchors_not_referenced: u32,
    /// Anchors of this document that are a reference target somewhere.
    pub num_anchors_referenced: u32,
    /// Referenced anchors with at least one external referencing link.
    pub num_anchors_referenced_external: u32,
    /// Referenced anchors with at least one internal referencing link.
    pub num_anchors_referenced_internal: u32,
    /// Distinct target identifiers referenced from this document.
    pub num_distinct_links: u32,
    /// Distinct dangling target identifiers referenced from this document.
    pub num_distinct_links_dangling: u32,
    /// Distinct externally-resolving targets referenced from this document.
    pub num_distinct_links_external: u32,
    /// Distinct internally-resolving targets referenced from this document.
    pub num_distinct_links_internal: u32,
    /// Line count of the document, used as a size proxy in scoring.
    pub num_lines: u64,
    /// Count of references originating from this document.
    pub num_links: u32,
    /// Outgoing references whose target resolves to no anchor.
    pub num_links_dangling: u32,
    /// Outgoing references resolving to an anchor in another document.
    pub num_links_external: u32,
    /// Outgoing references resolving to an anchor in this document.
    pub num_links_internal: u32,
    /// Count of references into this document's anchors, from anywhere.
    pub num_references: u32,
    /// Incoming references originating in other documents.
    pub num_references_external: u32,
    /// Incoming references originating in this document itself.
    pub num_references_internal: u32,
}

impl FileMetrics {
    /// An all-zero row for a document known only by path and size.
    pub fn empty(document: PathBuf, num_lines: u64) -> Self {
        return Self {
            document,
            num_anchors: 0,
            num_anchors_not_referenced: 0,
            num_anchors_referenced: 0,
            num_anchors_referenced_external: 0,
            num_anchors_referenced_internal: 0,
            num_distinct_links: 0,
            num_distinct_links_dangling: 0,
            num_distinct_links_external: 0,
            num_distinct_links_internal: 0,
            num_lines,
            num_links: 0,
            num_links_dangling: 0,
            num_links_external: 0,
            num_links_internal: 0,
            num_references: 0,
            num_references_external: 0,
            num_references_internal: 0,
        };
    }
}
