//! Artifact stores for the character quiz matcher.
//!
//! Two immutable leaf structures back every match request:
//!
//! - [`EmbeddingStore`]: node key → fixed-length `f32` vector, plus the
//!   model's declared vector size. Produced offline by the embedding
//!   training pipeline and loaded whole before any lookup.
//! - [`RelationshipGraph`]: the node set (and edges) of the trained
//!   relationship graph. The matcher only consults its `C:` character
//!   subset to enumerate candidates.
//!
//! Both are serialized with bincode and compressed with zstd, carry a
//! schema version, and fail loading fatally on any shape violation: a
//! vector whose length disagrees with the declared size is data
//! corruption, not a recoverable condition.
//!
//! Node keys come in two disjoint families, distinguished by prefix:
//! `A:<answer_label>:<axis_id>` for an answer option on one statement
//! axis, and `C:<character_name>` for a character. See [`NodeKey`].

mod error;
mod graph;
mod key;
mod store;

pub use error::ModelError;
pub use graph::{RelationshipGraph, GRAPH_SCHEMA_VERSION};
pub use key::NodeKey;
pub use store::{EmbeddingStore, MODEL_SCHEMA_VERSION};
