//! Dense vector search over a persisted index

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use tribunal_core::{EvidenceItem, EvidenceSource};
use tribunal_llm::EmbeddingProvider;

use crate::error::{IndexUnavailable, RetrievalError};

/// Passage metadata stored alongside the vector file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassageRecord {
    #[serde(default)]
    pub id: String,
    pub passage: String,
}

#[derive(Debug, Deserialize)]
struct DenseMetadata {
    dimension: usize,
    passages: Vec<PassageRecord>,
}

/// A loaded dense index.
///
/// Two artifacts persist the index: a flat little-endian `f32` vector file
/// and a JSON metadata file carrying the dimension and the passages in
/// vector order. Both must exist and agree on shape or the handle is not
/// constructed. Query embeddings come from the injected
/// [`EmbeddingProvider`].
pub struct DenseIndex {
    dimension: usize,
    vectors: Vec<Vec<f32>>,
    passages: Vec<PassageRecord>,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl std::fmt::Debug for DenseIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DenseIndex")
            .field("dimension", &self.dimension)
            .field("passages", &self.passages.len())
            .finish()
    }
}

impl DenseIndex {
    /// Open a persisted index from its vector and metadata files.
    pub fn open(
        index_path: impl AsRef<Path>,
        metadata_path: impl AsRef<Path>,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Result<Self, IndexUnavailable> {
        let index_path = index_path.as_ref();
        let metadata_path = metadata_path.as_ref();
        for path in [index_path, metadata_path] {
            if !path.exists() {
                return Err(IndexUnavailable::PathNotFound(path.to_path_buf()));
            }
        }

        let metadata_raw = std::fs::read_to_string(metadata_path)
            .map_err(|e| IndexUnavailable::Io(e.to_string()))?;
        let metadata: DenseMetadata = serde_json::from_str(&metadata_raw)
            .map_err(|e| IndexUnavailable::Corrupt(format!("metadata: {}", e)))?;

        if metadata.dimension == 0 {
            return Err(IndexUnavailable::Corrupt("metadata: zero dimension".to_string()));
        }
        if metadata.passages.is_empty() {
            return Err(IndexUnavailable::Empty);
        }

        let bytes = std::fs::read(index_path).map_err(|e| IndexUnavailable::Io(e.to_string()))?;
        let expected = metadata.passages.len() * metadata.dimension * 4;
        if bytes.len() != expected {
            return Err(IndexUnavailable::Corrupt(format!(
                "vector file is {} bytes, expected {} ({} passages x {} dims)",
                bytes.len(),
                expected,
                metadata.passages.len(),
                metadata.dimension
            )));
        }

        // Decode flat little-endian f32s into one vector per passage
        let vectors = bytes
            .chunks_exact(metadata.dimension * 4)
            .map(|chunk| {
                chunk
                    .chunks_exact(4)
                    .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
                    .collect()
            })
            .collect();

        debug!(
            passages = metadata.passages.len(),
            dimension = metadata.dimension,
            "Dense index loaded"
        );

        Ok(Self {
            dimension: metadata.dimension,
            vectors,
            passages: metadata.passages,
            embedder,
        })
    }

    /// Vector dimension of the index
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of indexed passages
    pub fn len(&self) -> usize {
        self.passages.len()
    }

    /// Whether the index is empty (never true after a successful `open`)
    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// Embed `query` and return the `k` most similar passages.
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<EvidenceItem>, RetrievalError> {
        let embedding = self.embedder.embed(query).await?;
        if embedding.len() != self.dimension {
            return Err(RetrievalError::DimensionMismatch(
                self.dimension,
                embedding.len(),
            ));
        }

        let mut scored: Vec<(f32, &PassageRecord)> = self
            .vectors
            .iter()
            .zip(self.passages.iter())
            .map(|(vector, passage)| (cosine_similarity(&embedding, vector), passage))
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);

        Ok(scored
            .into_iter()
            .map(|(score, record)| {
                EvidenceItem::new(record.passage.clone(), EvidenceSource::Dense, score as f64)
            })
            .collect())
    }
}

/// Cosine similarity with a zero-norm guard
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::io::Write;
    use tribunal_llm::LlmError;

    /// Embeds onto a fixed 2-d basis so similarity is easy to reason about
    #[derive(Debug)]
    struct AxisEmbedder;

    #[async_trait]
    impl EmbeddingProvider for AxisEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
            if text.contains("eviction") {
                Ok(vec![1.0, 0.0])
            } else {
                Ok(vec![0.0, 1.0])
            }
        }
    }

    fn write_index(dir: &tempfile::TempDir, vectors: &[[f32; 2]], passages: &[&str]) -> (std::path::PathBuf, std::path::PathBuf) {
        let index_path = dir.path().join("index.bin");
        let metadata_path = dir.path().join("metadata.json");

        let mut bytes = Vec::new();
        for vector in vectors {
            for value in vector {
                bytes.extend_from_slice(&value.to_le_bytes());
            }
        }
        std::fs::write(&index_path, bytes).unwrap();

        let records: Vec<PassageRecord> = passages
            .iter()
            .enumerate()
            .map(|(i, p)| PassageRecord {
                id: format!("p{}", i),
                passage: p.to_string(),
            })
            .collect();
        let mut file = std::fs::File::create(&metadata_path).unwrap();
        write!(
            file,
            "{}",
            serde_json::json!({"dimension": 2, "passages": records})
        )
        .unwrap();

        (index_path, metadata_path)
    }

    #[test]
    fn test_open_missing_files() {
        let err = DenseIndex::open(
            "/nonexistent/index.bin",
            "/nonexistent/metadata.json",
            Arc::new(AxisEmbedder),
        )
        .unwrap_err();
        assert!(matches!(err, IndexUnavailable::PathNotFound(_)));
    }

    #[test]
    fn test_open_rejects_length_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let (index_path, metadata_path) =
            write_index(&dir, &[[1.0, 0.0]], &["passage one", "passage two"]);
        // metadata says 2 passages, vector file only has 1
        let err = DenseIndex::open(index_path, metadata_path, Arc::new(AxisEmbedder)).unwrap_err();
        assert!(matches!(err, IndexUnavailable::Corrupt(_)));
    }

    #[tokio::test]
    async fn test_search_returns_most_similar() {
        let dir = tempfile::tempdir().unwrap();
        let (index_path, metadata_path) = write_index(
            &dir,
            &[[1.0, 0.0], [0.0, 1.0]],
            ["eviction requires notice", "nuisance requires interference"].as_ref(),
        );
        let index = DenseIndex::open(index_path, metadata_path, Arc::new(AxisEmbedder)).unwrap();

        let hits = index.search("eviction of tenant", 1).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].text, "eviction requires notice");
        assert_eq!(hits[0].source, EvidenceSource::Dense);
        assert!(hits[0].score > 0.9);
    }

    #[test]
    fn test_cosine_zero_norm_guard() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }
}
