//! # Tribunal Retrieval
//!
//! Evidence retrieval collaborators for the advocate agent.
//!
//! ## Key Types
//!
//! - [`KeywordIndex`] - pre-built JSONL corpus with term-overlap ranking
//! - [`DenseIndex`] - persisted vector index ranked by cosine similarity
//! - [`KeywordSearchTool`] / [`DenseSearchTool`] - [`tribunal_llm::Tool`]
//!   wrappers offered to the reasoning loop
//!
//! Both indexes are opened once at startup. A missing or corrupt index
//! yields [`IndexUnavailable`] from the constructor - the dependent tool is
//! simply not registered, and the host keeps running. After construction,
//! retrieval is best-effort: tool wrappers convert every failure into a
//! descriptive string result instead of propagating an error.

pub mod dense;
pub mod error;
pub mod keyword;
pub mod tools;

pub use dense::{DenseIndex, PassageRecord};
pub use error::{IndexUnavailable, RetrievalError};
pub use keyword::KeywordIndex;
pub use tools::{DenseSearchTool, KeywordSearchTool, PREVIEW_CHARS};
