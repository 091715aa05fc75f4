//! Evidence items and defensive content extraction

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where an evidence passage came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceSource {
    /// Keyword (term-overlap) index hit
    Keyword,
    /// Dense vector index hit
    Dense,
    /// Produced by the advocate's reasoning loop
    Advocate,
    /// Supplied by the caller (e.g. a dataset's context passages)
    External,
}

impl EvidenceSource {
    /// Stable string form, matching the serialized representation
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceSource::Keyword => "keyword",
            EvidenceSource::Dense => "dense",
            EvidenceSource::Advocate => "advocate",
            EvidenceSource::External => "external",
        }
    }
}

impl std::fmt::Display for EvidenceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single passage of evidence.
///
/// Immutable once created; owned by whichever caller requested retrieval
/// and discarded after a single advocate/jury run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceItem {
    /// Passage text
    pub text: String,
    /// Which collaborator produced it
    pub source: EvidenceSource,
    /// Relevance score (1.0 for advocate-derived passages)
    pub score: f64,
}

impl EvidenceItem {
    /// Create a new evidence item
    pub fn new(text: impl Into<String>, source: EvidenceSource, score: f64) -> Self {
        Self {
            text: text.into(),
            source,
            score,
        }
    }

    /// Render as a loosely typed JSON value accepted by the jury
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::String(self.text.clone()))
    }
}

/// Extract the displayable content of one evidence element.
///
/// Evidence arrives in three shapes:
/// - a raw string that may itself be a JSON document with a `contents`
///   field (dataset context passages)
/// - a JSON object with `contents` or `text`
/// - anything else, rendered compactly
///
/// Extraction never fails; malformed input falls back to the raw form.
pub fn document_content(value: &Value) -> String {
    match value {
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(Value::Object(map)) => match map.get("contents") {
                Some(Value::String(contents)) => contents.clone(),
                Some(other) => other.to_string(),
                None => s.clone(),
            },
            _ => s.clone(),
        },
        Value::Object(map) => match map.get("contents").or_else(|| map.get("text")) {
            Some(Value::String(content)) => content.clone(),
            Some(other) => other.to_string(),
            None => value.to_string(),
        },
        other => other.to_string(),
    }
}

/// Flatten an evidence list into one labeled block, one segment per item,
/// preserving input order.
pub fn format_documents(evidence: &[Value]) -> String {
    let mut block = String::new();
    for (i, item) in evidence.iter().enumerate() {
        block.push_str(&format!("[Document {}] {}\n", i + 1, document_content(item)));
    }
    block
}
