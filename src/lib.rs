//! Umbrella crate for the character quiz matcher.
//!
//! Stitches the artifact layer (`cq_model`) and the matching engine
//! (`cq_match`) together with configuration, display catalogs, and a
//! process-wide init-once asset lifecycle, so callers get a single API
//! entry point:
//!
//! ```no_run
//! use charquiz::{find_matching_character, AnswerSet, MatchOutcome, QuizAssets, QuizConfig};
//!
//! let config = QuizConfig::from_file("quiz.yaml")?;
//! let assets = charquiz::init_assets(&config)?;
//!
//! let mut answers = AnswerSet::new();
//! answers.insert("Q1".to_string(), "Agree".to_string());
//!
//! let report = find_matching_character(answers, assets)?;
//! match report.outcome {
//!     MatchOutcome::Match { character, similarity } => {
//!         println!("you are {character} ({similarity:.2})");
//!     }
//!     MatchOutcome::NoMatch => println!("no character could be ranked"),
//! }
//! # Ok::<(), charquiz::QuizError>(())
//! ```
//!
//! The presentation layer (whatever renders statements and results) and
//! the offline training pipeline that produces the artifacts live
//! outside this workspace; they meet this crate at [`QuizConfig`], the
//! catalogs, and [`MatchReport`].

pub use cq_match::{
    set_match_metrics, AnswerChoice, AnswerSet, MatchConfig, MatchError, MatchMetrics,
    MatchOutcome, MatchReport, MatchRequest, Matcher, QuizMatcher,
};
pub use cq_model::{
    EmbeddingStore, ModelError, NodeKey, RelationshipGraph, GRAPH_SCHEMA_VERSION,
    MODEL_SCHEMA_VERSION,
};

mod assets;
mod catalog;
mod config;

pub use assets::{assets, init_assets, QuizAssets};
pub use catalog::{CatalogError, CharacterWorks, StatementCatalog};
pub use config::{ConfigError, QuizConfig};

use thiserror::Error;

/// Any failure the quiz pipeline can surface to a caller.
#[derive(Debug, Error)]
pub enum QuizError {
    /// Artifact loading or validation failed (fatal at startup).
    #[error("model artifact error: {0}")]
    Model(#[from] ModelError),
    /// The matching engine rejected a request.
    #[error("match error: {0}")]
    Match(#[from] MatchError),
    /// A display catalog failed to load or sample.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    /// The configuration file is unreadable or invalid.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Match a completed answer set against the loaded assets.
///
/// Convenience wrapper over [`QuizAssets::matcher`] using the
/// [`MatchConfig`] the assets were loaded with (the `matcher` section of
/// the config file); callers that need a different per-request
/// configuration build a [`MatchRequest`] themselves.
pub fn find_matching_character(
    answers: AnswerSet,
    assets: &QuizAssets,
) -> Result<MatchReport, QuizError> {
    let matcher = assets.matcher();
    let request = MatchRequest {
        answers,
        config: assets.match_config().clone(),
    };
    let report = matcher.match_answers(&request)?;
    Ok(report)
}
