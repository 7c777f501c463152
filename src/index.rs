//! Global cross-reference index: anchor ownership, uniqueness enforcement,
//! and reference classification.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::types::{Anchor, ClassifiedReference, DocumentScan, RefKind, Reference};

/// The corpus-wide anchor map plus every classified reference.
/// Built once per run, immutable afterwards; all aggregation and reporting
/// stages read this through its projections.
#[derive(Debug)]
pub struct CrossRefIndex {
    /// Anchors grouped by owning document, in declaration order.
    anchors_by_doc: HashMap<PathBuf, Vec<Anchor>>,
    /// Dangling target identifiers mapped to the first document that used them.
    dangling_by_id: BTreeMap<String, PathBuf>,
    /// Every known document mapped to its line count. Total: a document with
    /// no anchors and no references still has an entry here.
    documents: BTreeMap<PathBuf, u64>,
    /// The global anchor-identifier-to-owning-document mapping.
    owner_by_id: HashMap<String, PathBuf>,
    /// All classified reference records, corpus-wide, in scan order.
    references: Vec<ClassifiedReference>,
    /// Indices into `references` keyed by source document.
    refs_from: HashMap<PathBuf, Vec<usize>>,
    /// Indices into `references` keyed by target identifier.
    refs_to: HashMap<String, Vec<usize>>,
}

impl CrossRefIndex {
    /// Build the index from per-document scans.
    ///
    /// All anchor insertions complete (and the uniqueness check passes)
    /// before any reference is resolved — resolution needs the complete
    /// global anchor map.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateAnchor` if any identifier is declared more
    /// than once anywhere in the corpus, including twice in one document.
    pub fn build(scans: &[DocumentScan]) -> Result<Self, Error> {
        let mut anchors_by_doc: HashMap<PathBuf, Vec<Anchor>> = HashMap::new();
        let mut documents: BTreeMap<PathBuf, u64> = BTreeMap::new();
        let mut owner_by_id: HashMap<String, PathBuf> = HashMap::new();
        let mut declaration_order = 0_u32;

        for scan in scans {
            documents.insert(scan.path.clone(), scan.line_count);

            for id in &scan.anchors {
                if let Some(first) = owner_by_id.get(id) {
                    return Err(Error::DuplicateAnchor {
                        first: first.clone(),
                        id: id.clone(),
                        second: scan.path.clone(),
                    });
                }
                owner_by_id.insert(id.clone(), scan.path.clone());
                anchors_by_doc.entry(scan.path.clone()).or_default().push(Anchor {
                    declaration_order,
                    document: scan.path.clone(),
                    id: id.clone(),
                });
                declaration_order = declaration_order.saturating_add(1);
            }
        }

        let mut dangling_by_id: BTreeMap<String, PathBuf> = BTreeMap::new();
        let mut references: Vec<ClassifiedReference> = Vec::new();
        let mut refs_from: HashMap<PathBuf, Vec<usize>> = HashMap::new();
        let mut refs_to: HashMap<String, Vec<usize>> = HashMap::new();

        for scan in scans {
            for target_id in &scan.targets {
                let owner = owner_by_id.get(target_id).cloned();
                let kind = match &owner {
                    Some(doc) if *doc == scan.path => RefKind::Internal,
                    Some(_) => RefKind::External,
                    None => RefKind::Dangling,
                };
                if kind == RefKind::Dangling {
                    dangling_by_id
                        .entry(target_id.clone())
                        .or_insert_with(|| scan.path.clone());
                }

                let idx = references.len();
                refs_from.entry(scan.path.clone()).or_default().push(idx);
                refs_to.entry(target_id.clone()).or_default().push(idx);
                references.push(ClassifiedReference {
                    kind,
                    owner,
                    reference: Reference {
                        source: scan.path.clone(),
                        target_id: target_id.clone(),
                    },
                });
            }
        }

        return Ok(Self {
            anchors_by_doc,
            dangling_by_id,
            documents,
            owner_by_id,
            references,
            refs_from,
            refs_to,
        });
    }

    /// Anchors declared by `document`, in declaration order.
    pub fn anchors_of(&self, document: &Path) -> &[Anchor] {
        return self.anchors_by_doc.get(document).map_or(&[], Vec::as_slice);
    }

    /// Total number of anchors declared in the corpus.
    pub fn anchor_count(&self) -> usize {
        return self.owner_by_id.len();
    }

    /// Dangling target identifiers, each with the first document that used it.
    /// Sorted by identifier so warning output is stable.
    pub fn dangling_ids(&self) -> &BTreeMap<String, PathBuf> {
        return &self.dangling_by_id;
    }

    /// Number of dangling reference records corpus-wide (occurrences, not
    /// distinct identifiers).
    pub fn dangling_reference_count(&self) -> usize {
        return self
            .references
            .iter()
            .filter(|r| r.kind == RefKind::Dangling)
            .count();
    }

    /// Every known document with its line count, path-sorted.
    /// Includes documents with zero anchors and zero references.
    pub fn documents(&self) -> impl Iterator<Item = (&PathBuf, u64)> {
        return self.documents.iter().map(|(path, lines)| (path, *lines));
    }

    /// Total number of reference records in the corpus.
    pub fn reference_count(&self) -> usize {
        return self.references.len();
    }

    /// All classified references originating from `document`, in document order.
    pub fn references_from(&self, document: &Path) -> Vec<&ClassifiedReference> {
        return self
            .refs_from
            .get(document)
            .map_or_else(Vec::new, |indices| {
                indices.iter().filter_map(|&i| self.references.get(i)).collect()
            });
    }

    /// All classified references targeting the anchor `id`.
    pub fn references_to(&self, id: &str) -> Vec<&ClassifiedReference> {
        return self.refs_to.get(id).map_or_else(Vec::new, |indices| {
            indices.iter().filter_map(|&i| self.references.get(i)).collect()
        });
    }
}
