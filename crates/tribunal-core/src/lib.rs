//! # Tribunal Core
//!
//! Shared data model for the Tribunal pipeline.
//!
//! ## Key Types
//!
//! - [`Question`] - a multiple-choice legal question with single-letter
//!   option keys
//! - [`EvidenceItem`] - a retrieved or supplied passage with a source tag
//!   and relevance score
//! - [`evidence::document_content`] - defensive content extraction from
//!   loosely typed evidence inputs
//!
//! ## Quick Start
//!
//! ```rust
//! use tribunal_core::Question;
//!
//! let question = Question::try_from_parts(
//!     "Is the landlord liable?",
//!     [("A".to_string(), "Yes".to_string()), ("B".to_string(), "No".to_string())],
//! )
//! .unwrap();
//!
//! assert!(question.is_valid_choice('A'));
//! ```

pub mod evidence;
pub mod question;

pub use evidence::{document_content, format_documents, EvidenceItem, EvidenceSource};
pub use question::{Question, QuestionError};
