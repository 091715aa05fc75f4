//! # Tribunal Advocate
//!
//! The advocate drives a tool-augmented reasoning loop to gather passages
//! that support a legal hypothesis.
//!
//! ## Key Types
//!
//! - [`Advocate`] - the retrieval orchestrator
//! - [`AdvocateCapabilities`] - which retrieval tools were registered at
//!   construction
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tribunal_advocate::{Advocate, AdvocateConfig};
//! use tribunal_llm::MockProvider;
//! use tribunal_retrieval::KeywordIndex;
//!
//! # async fn run() {
//! let keyword = KeywordIndex::open("corpus.jsonl").ok().map(Arc::new);
//! let advocate = Advocate::new(
//!     Some(Arc::new(MockProvider::constant(r#"{"evidence": "passage"}"#))),
//!     keyword,
//!     None,
//!     AdvocateConfig::default(),
//! );
//!
//! let evidence = advocate
//!     .retrieve("A landlord cannot evict a tenant for reporting code violations.", 3)
//!     .await;
//! # }
//! ```

mod advocate;

pub use advocate::{Advocate, AdvocateCapabilities, AdvocateConfig};
