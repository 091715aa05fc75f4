//! Keyword search over a pre-built JSONL corpus

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use tribunal_core::{EvidenceItem, EvidenceSource};

use crate::error::IndexUnavailable;

/// One corpus document as stored in the index file.
///
/// The corpus is line-delimited JSON; each line carries the passage under a
/// `contents` (or legacy `raw`) field.
#[derive(Debug, Clone, Deserialize)]
struct CorpusDocument {
    #[serde(default)]
    #[allow(dead_code)]
    id: String,
    #[serde(alias = "raw")]
    contents: String,
}

/// A loaded keyword index.
///
/// Construction reads the whole corpus and tokenizes each document once;
/// queries are ranked with tf-idf style term-overlap scoring. Index
/// *construction* is out of scope - the JSONL file is assumed pre-built.
#[derive(Debug)]
pub struct KeywordIndex {
    docs: Vec<(String, HashMap<String, usize>)>,
}

impl KeywordIndex {
    /// Open a corpus file.
    ///
    /// Malformed lines are skipped with a warning; a missing path, an
    /// unreadable file, or a corpus with no valid documents yields
    /// [`IndexUnavailable`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self, IndexUnavailable> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(IndexUnavailable::PathNotFound(path.to_path_buf()));
        }

        let raw = std::fs::read_to_string(path).map_err(|e| IndexUnavailable::Io(e.to_string()))?;

        let mut docs = Vec::new();
        let mut skipped = 0usize;
        for line in raw.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<CorpusDocument>(line) {
                Ok(doc) => docs.push((doc.contents.clone(), tokenize_counts(&doc.contents))),
                Err(_) => skipped += 1,
            }
        }
        if skipped > 0 {
            warn!(path = %path.display(), skipped, "Skipped malformed corpus lines");
        }
        if docs.is_empty() {
            return Err(IndexUnavailable::Empty);
        }

        debug!(path = %path.display(), documents = docs.len(), "Keyword index loaded");
        Ok(Self { docs })
    }

    /// Number of documents in the corpus
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Whether the corpus is empty (never true after a successful `open`)
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Rank documents against `query`, returning up to `k` matches.
    ///
    /// Best-effort: a query with no matching terms returns an empty vec.
    pub fn search(&self, query: &str, k: usize) -> Vec<EvidenceItem> {
        let terms: Vec<String> = tokenize(query);
        if terms.is_empty() {
            return Vec::new();
        }

        let total_docs = self.docs.len() as f64;
        // Document frequency per unique query term
        let mut unique_terms = terms.clone();
        unique_terms.sort();
        unique_terms.dedup();
        let idf: HashMap<&str, f64> = unique_terms
            .iter()
            .map(|term| {
                let df = self
                    .docs
                    .iter()
                    .filter(|(_, counts)| counts.contains_key(term))
                    .count() as f64;
                (term.as_str(), (1.0 + total_docs / (1.0 + df)).ln())
            })
            .collect();

        let mut scored: Vec<(f64, &str)> = self
            .docs
            .iter()
            .filter_map(|(contents, counts)| {
                let score: f64 = unique_terms
                    .iter()
                    .filter_map(|term| {
                        counts
                            .get(term)
                            .map(|tf| *tf as f64 * idf.get(term.as_str()).copied().unwrap_or(0.0))
                    })
                    .sum();
                (score > 0.0).then_some((score, contents.as_str()))
            })
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);

        scored
            .into_iter()
            .map(|(score, contents)| EvidenceItem::new(contents, EvidenceSource::Keyword, score))
            .collect()
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() > 1)
        .map(|t| t.to_lowercase())
        .collect()
}

fn tokenize_counts(text: &str) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for token in tokenize(text) {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn corpus_file(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_open_missing_path() {
        let err = KeywordIndex::open("/nonexistent/corpus.jsonl").unwrap_err();
        assert!(matches!(err, IndexUnavailable::PathNotFound(_)));
    }

    #[test]
    fn test_open_empty_corpus() {
        let file = corpus_file(&[]);
        let err = KeywordIndex::open(file.path()).unwrap_err();
        assert!(matches!(err, IndexUnavailable::Empty));
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let file = corpus_file(&[
            r#"{"id": "1", "contents": "tenant eviction notice"}"#,
            "not json at all",
            r#"{"id": "2", "contents": "cement dust nuisance claim"}"#,
        ]);
        let index = KeywordIndex::open(file.path()).unwrap();
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_search_ranks_relevant_docs() {
        let file = corpus_file(&[
            r#"{"id": "1", "contents": "the tenant complained about code violations before eviction"}"#,
            r#"{"id": "2", "contents": "cement dust from the plant interfered with enjoyment of property"}"#,
            r#"{"id": "3", "contents": "eviction of a tenant requires proper notice"}"#,
        ]);
        let index = KeywordIndex::open(file.path()).unwrap();

        let hits = index.search("tenant eviction", 2);
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|h| h.source == EvidenceSource::Keyword));
        assert!(hits.iter().all(|h| h.text.contains("tenant")));
        assert!(hits[0].score >= hits[1].score);
    }

    #[test]
    fn test_search_accepts_raw_field() {
        let file = corpus_file(&[r#"{"id": "1", "raw": "nuisance doctrine overview"}"#]);
        let index = KeywordIndex::open(file.path()).unwrap();
        let hits = index.search("nuisance", 3);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_search_no_match_is_empty() {
        let file = corpus_file(&[r#"{"contents": "contract formation requires offer and acceptance"}"#]);
        let index = KeywordIndex::open(file.path()).unwrap();
        assert!(index.search("zzzz", 3).is_empty());
        assert!(index.search("", 3).is_empty());
    }
}
