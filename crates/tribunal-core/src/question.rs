//! Multiple-choice legal questions

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors constructing a question from untrusted input
#[derive(Debug, Error)]
pub enum QuestionError {
    #[error("Question text is empty")]
    EmptyText,
    #[error("Question has no answer choices")]
    NoChoices,
    #[error("Choice key '{0}' is not a single letter")]
    InvalidChoiceKey(String),
    #[error("Duplicate choice key '{0}'")]
    DuplicateChoiceKey(char),
}

/// A multiple-choice question.
///
/// Choice keys are single letters ("A".."D" in the bar-exam datasets).
/// The `BTreeMap` gives a deterministic, alphabetical iteration order for
/// formatting and tallying.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Question text
    pub text: String,
    /// Choice key -> answer text
    pub choices: BTreeMap<char, String>,
}

impl Question {
    /// Create a question from already-validated parts
    pub fn new(text: impl Into<String>, choices: BTreeMap<char, String>) -> Self {
        Self {
            text: text.into(),
            choices,
        }
    }

    /// Build a question from string-keyed choices, as they appear in case
    /// files and datasets. Keys must be single letters and unique; they are
    /// normalized to upper case.
    pub fn try_from_parts(
        text: &str,
        choices: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self, QuestionError> {
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }

        let mut normalized = BTreeMap::new();
        for (key, answer) in choices {
            let mut chars = key.trim().chars();
            let letter = match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphabetic() => c.to_ascii_uppercase(),
                _ => return Err(QuestionError::InvalidChoiceKey(key)),
            };
            if normalized.insert(letter, answer).is_some() {
                return Err(QuestionError::DuplicateChoiceKey(letter));
            }
        }

        if normalized.is_empty() {
            return Err(QuestionError::NoChoices);
        }

        Ok(Self::new(text, normalized))
    }

    /// Whether `key` is one of this question's choice keys
    pub fn is_valid_choice(&self, key: char) -> bool {
        self.choices.contains_key(&key)
    }

    /// Format the choices as one `K: text` line per option
    pub fn options_block(&self) -> String {
        self.choices
            .iter()
            .map(|(key, answer)| format!("{}: {}", key, answer))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abcd() -> Vec<(String, String)> {
        vec![
            ("A".to_string(), "Involuntary manslaughter".to_string()),
            ("B".to_string(), "Voluntary manslaughter".to_string()),
            ("C".to_string(), "Murder".to_string()),
            ("D".to_string(), "None of the above".to_string()),
        ]
    }

    #[test]
    fn test_try_from_parts() {
        let question = Question::try_from_parts("Which crime?", abcd()).unwrap();
        assert_eq!(question.choices.len(), 4);
        assert!(question.is_valid_choice('C'));
        assert!(!question.is_valid_choice('E'));
    }

    #[test]
    fn test_keys_normalized_to_upper_case() {
        let question = Question::try_from_parts(
            "Which crime?",
            vec![("a".to_string(), "Yes".to_string())],
        )
        .unwrap();
        assert!(question.is_valid_choice('A'));
    }

    #[test]
    fn test_rejects_multi_letter_key() {
        let err = Question::try_from_parts(
            "Which crime?",
            vec![("AB".to_string(), "Yes".to_string())],
        )
        .unwrap_err();
        assert!(matches!(err, QuestionError::InvalidChoiceKey(_)));
    }

    #[test]
    fn test_rejects_empty_text_and_empty_choices() {
        assert!(matches!(
            Question::try_from_parts("  ", abcd()),
            Err(QuestionError::EmptyText)
        ));
        assert!(matches!(
            Question::try_from_parts("Which crime?", vec![]),
            Err(QuestionError::NoChoices)
        ));
    }

    #[test]
    fn test_options_block_alphabetical() {
        let question = Question::try_from_parts("Which crime?", abcd()).unwrap();
        let block = question.options_block();
        assert!(block.starts_with("A: Involuntary manslaughter\n"));
        assert!(block.ends_with("D: None of the above"));
    }
}
