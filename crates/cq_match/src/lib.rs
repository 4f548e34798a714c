//! # Character Quiz Match (`cq_match`)
//!
//! ## Purpose
//!
//! `cq_match` sits on top of the artifact layer (`cq_model`). It turns a
//! user's answer set into a single user vector by averaging the resolved
//! answer-node embeddings, then ranks every character node of the
//! relationship graph by cosine similarity against that vector.
//!
//! ## Core Types
//!
//! - [`Matcher`]: the engine trait; [`QuizMatcher`] is the production
//!   implementation over a loaded [`cq_model::EmbeddingStore`] and
//!   [`cq_model::RelationshipGraph`].
//! - [`MatchRequest`]: answer set + per-request [`MatchConfig`].
//! - [`MatchReport`]: the [`MatchOutcome`] (best character and similarity,
//!   or the no-match sentinel) plus resolved/total answer counts.
//! - [`AnswerChoice`]: the canonical five-option answer vocabulary.
//!
//! ## Semantics worth knowing
//!
//! - An answer whose `A:<label>:<axis>` key is absent from the store is
//!   skipped silently; the report's resolve counts expose the skip rate.
//! - Cosine similarity uses a definite zero-norm convention (0.0, never
//!   NaN), so ranking is always well-defined.
//! - Ties are broken lexicographically on character name, independent of
//!   the graph's enumeration order.
//! - A fully unresolved answer set, or an empty intersection between
//!   graph candidates and store keys, yields [`MatchOutcome::NoMatch`]
//!   rather than an error.
//!
//! ## Example
//!
//! ```
//! use cq_model::{EmbeddingStore, RelationshipGraph};
//! use cq_match::{Matcher, MatchRequest, QuizMatcher};
//!
//! let store = EmbeddingStore::from_entries(2, vec![
//!     ("A:Agree:Q1".to_string(), vec![1.0, 0.0]),
//!     ("C:Alice".to_string(), vec![1.0, 0.0]),
//!     ("C:Bob".to_string(), vec![0.0, 1.0]),
//! ]).expect("store");
//! let graph = RelationshipGraph::from_parts(
//!     vec!["A:Agree:Q1".into(), "C:Alice".into(), "C:Bob".into()],
//!     Vec::new(),
//! ).expect("graph");
//!
//! let matcher = QuizMatcher::new(store, graph);
//! let mut answers = cq_match::AnswerSet::new();
//! answers.insert("Q1".to_string(), "Agree".to_string());
//! let report = matcher.match_answers(&MatchRequest::new(answers)).expect("match");
//! assert!(report.is_match());
//! ```
//!
//! ## Observability
//!
//! Install a [`MatchMetrics`] implementation via [`set_match_metrics`] to
//! record per-request latency, resolve counts, and outcomes. Typically
//! done once during startup.

pub mod engine;
pub mod metrics;
pub mod types;

pub use crate::engine::{Matcher, QuizMatcher};
pub use crate::metrics::{set_match_metrics, MatchMetrics};
pub use crate::types::{
    AnswerChoice, AnswerSet, MatchConfig, MatchError, MatchOutcome, MatchReport, MatchRequest,
};
