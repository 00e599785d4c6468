//! In-memory vector store: parallel vectors/metadata with exhaustive
//! cosine-similarity search and a JSON snapshot format.
//!
//! Every search is an O(n * d) scan over all stored vectors. That is a
//! deliberate design limit: the knowledge base holds tens of facts, so an
//! index would be overhead. Past a few thousand vectors this structure
//! needs replacing with a real ANN index.

use std::fmt;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::errors::Result;
use crate::knowledge::FactType;

/// Expense ratio plan variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanKind {
    Direct,
    Regular,
}

impl fmt::Display for PlanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => f.write_str("Direct"),
            Self::Regular => f.write_str("Regular"),
        }
    }
}

/// Metadata stored alongside each embedding: one atomic fact about a
/// scheme, or a platform-level statement-download entry (`scheme: null`).
///
/// Field names serialize in camelCase so snapshots stay compatible with
/// the original `embeddings.json` layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactRecord {
    pub scheme: Option<String>,
    pub fact_type: FactType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fact_sub_type: Option<PlanKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub source_url: String,
    /// The exact natural-language string that was embedded
    pub text: String,
}

/// One ranked search result
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    /// Original insertion index of the matched fact
    pub index: usize,
    pub similarity: f32,
    pub metadata: FactRecord,
}

/// Snapshot file layout: `vectors[i]` pairs with `metadata[i]`
#[derive(Serialize, Deserialize)]
struct Snapshot {
    vectors: Vec<Vec<f32>>,
    metadata: Vec<FactRecord>,
}

/// Append-only vector store. Built once offline, then read-only while
/// serving; concurrent readers need no locking.
#[derive(Debug, Clone, Default)]
pub struct VectorStore {
    vectors: Vec<Vec<f32>>,
    metadata: Vec<FactRecord>,
}

impl VectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored facts
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Append an embedding and its fact metadata. Push-only: no dedup and
    /// no dimension validation; mismatched vectors simply score zero.
    pub fn add(&mut self, vector: Vec<f32>, metadata: FactRecord) {
        self.vectors.push(vector);
        self.metadata.push(metadata);
    }

    /// Exhaustive nearest-neighbor search by cosine similarity.
    ///
    /// Returns at most `top_k` hits sorted by descending similarity. Ties
    /// keep insertion order (the sort is stable), so earlier facts rank
    /// first on equal scores.
    pub fn search(&self, query: &[f32], top_k: usize) -> Vec<SearchHit> {
        let mut hits: Vec<SearchHit> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(index, vector)| SearchHit {
                index,
                similarity: cosine_similarity(query, vector),
                metadata: self.metadata[index].clone(),
            })
            .collect();

        hits.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(top_k);
        hits
    }

    /// Serialize the store to a human-inspectable JSON snapshot
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let snapshot = Snapshot {
            vectors: self.vectors.clone(),
            metadata: self.metadata.clone(),
        };
        let json = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(&path, json)?;
        debug!("Vector store saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Restore a store verbatim from a snapshot file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;
        debug!(
            "Vector store loaded from {} ({} vectors)",
            path.as_ref().display(),
            snapshot.vectors.len()
        );
        Ok(Self {
            vectors: snapshot.vectors,
            metadata: snapshot.metadata,
        })
    }
}

/// Cosine similarity of two vectors.
///
/// Defined as exactly 0 when the lengths differ or either magnitude is
/// zero; malformed input scores silently instead of erroring.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}
