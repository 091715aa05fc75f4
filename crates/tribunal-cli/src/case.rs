//! Case records as they appear in case files and datasets

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use tribunal_core::Question;

/// One multiple-choice case.
///
/// `context_passages` elements may be raw strings (often JSON documents
/// with a `contents` field) or structured objects; the jury extracts
/// content defensively either way.
#[derive(Debug, Clone, Deserialize)]
pub struct CaseRecord {
    /// Dataset identifier, carried through to output records
    #[serde(default)]
    pub passage_idx: Option<Value>,
    pub question: String,
    pub choices: BTreeMap<String, String>,
    #[serde(default)]
    pub context_passages: Vec<Value>,
    /// Gold label, when the dataset has one
    #[serde(default)]
    pub gold_answer: Option<String>,
}

impl CaseRecord {
    /// Load a single case from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading case file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing case file {}", path.display()))
    }

    /// Build the typed question this case asks
    pub fn question(&self) -> Result<Question> {
        Question::try_from_parts(&self.question, self.choices.clone())
            .context("invalid question in case record")
    }

    /// Identifier for output records, falling back to the given index
    pub fn id_or(&self, index: usize) -> Value {
        self.passage_idx
            .clone()
            .unwrap_or_else(|| Value::Number(index.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_case_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "passage_idx": "mbe_130",
                "question": "Which crime?",
                "choices": {{"A": "Manslaughter", "B": "Murder"}},
                "context_passages": ["{{\"contents\": \"passage\"}}"]
            }}"#
        )
        .unwrap();
        file.flush().unwrap();

        let case = CaseRecord::load(file.path()).unwrap();
        assert_eq!(case.passage_idx, Some(Value::String("mbe_130".to_string())));
        assert_eq!(case.context_passages.len(), 1);

        let question = case.question().unwrap();
        assert!(question.is_valid_choice('B'));
    }

    #[test]
    fn test_id_falls_back_to_index() {
        let case = CaseRecord {
            passage_idx: None,
            question: "q".to_string(),
            choices: BTreeMap::new(),
            context_passages: vec![],
            gold_answer: None,
        };
        assert_eq!(case.id_or(7), Value::Number(7.into()));
    }
}
