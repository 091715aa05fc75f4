//! # Tribunal Jury
//!
//! Persona-conditioned jurors vote on a multiple-choice legal question
//! given retrieved evidence; votes reduce to a [`Verdict`] with a
//! confidence score and a full deliberation transcript.
//!
//! ## Key Types
//!
//! - [`Persona`] - a closed set of five evaluative stances
//! - [`PersonaRegistry`] - uniform sampling without replacement
//! - [`Ballot`] - one juror's vote-and-reasoning record
//! - [`Verdict`] - winning choice, confidence, tally, transcript
//! - [`JuryCoordinator`] - runs one deliberation end to end
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use tribunal_core::Question;
//! use tribunal_jury::{JuryConfig, JuryCoordinator};
//! use tribunal_llm::MockProvider;
//!
//! #[tokio::main]
//! async fn main() {
//!     let question = Question::try_from_parts(
//!         "Will the claim prevail?",
//!         [("A".to_string(), "Yes".to_string()), ("B".to_string(), "No".to_string())],
//!     )
//!     .unwrap();
//!
//!     let jury = JuryCoordinator::new(
//!         Arc::new(MockProvider::juror(&["A", "A", "B"])),
//!         JuryConfig::default(),
//!     );
//!
//!     let verdict = jury
//!         .synthesize(&question, &[serde_json::json!({"contents": "..."})], 3)
//!         .await;
//!     assert_eq!(verdict.final_verdict, Some('A'));
//! }
//! ```

pub mod coordinator;
pub mod persona;
pub mod verdict;

pub use coordinator::{extract_vote, JuryConfig, JuryCoordinator};
pub use persona::{Persona, PersonaRegistry};
pub use verdict::{Ballot, Verdict};
