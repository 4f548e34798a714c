use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The five canonical answer options, from strongest agreement to
/// strongest disagreement.
///
/// The engine itself accepts arbitrary label strings (an unknown label is
/// simply an unresolved node, never an error), so this enumeration exists
/// for callers that want the trained vocabulary rather than for input
/// validation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AnswerChoice {
    #[serde(rename = "Strongly Agree")]
    StronglyAgree,
    #[serde(rename = "Agree")]
    Agree,
    #[serde(rename = "Don't Know")]
    DontKnow,
    #[serde(rename = "Disagree")]
    Disagree,
    #[serde(rename = "Strongly Disagree")]
    StronglyDisagree,
}

impl AnswerChoice {
    /// All options in display order.
    pub const ALL: [AnswerChoice; 5] = [
        AnswerChoice::StronglyAgree,
        AnswerChoice::Agree,
        AnswerChoice::DontKnow,
        AnswerChoice::Disagree,
        AnswerChoice::StronglyDisagree,
    ];

    /// The label exactly as it appears in answer node keys.
    pub fn label(&self) -> &'static str {
        match self {
            AnswerChoice::StronglyAgree => "Strongly Agree",
            AnswerChoice::Agree => "Agree",
            AnswerChoice::DontKnow => "Don't Know",
            AnswerChoice::Disagree => "Disagree",
            AnswerChoice::StronglyDisagree => "Strongly Disagree",
        }
    }
}

impl fmt::Display for AnswerChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One quiz round's answers: axis id → chosen answer label.
///
/// Labels are free strings at this boundary; aggregation is a sum, so the
/// map's iteration order never affects the result.
pub type AnswerSet = BTreeMap<String, String>;

/// Configuration for a single match request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchConfig {
    /// Emit a `tracing` warning when the fraction of answers that failed
    /// to resolve to a store node exceeds this threshold. Unresolved
    /// answers are skipped silently by design; a high rate usually means
    /// the UI vocabulary has drifted from the trained model.
    #[serde(default = "MatchConfig::default_unresolved_warn_ratio")]
    pub unresolved_warn_ratio: f32,
}

impl MatchConfig {
    pub(crate) fn default_unresolved_warn_ratio() -> f32 {
        0.5
    }

    /// Validate the configuration for a single request.
    pub fn validate(&self) -> Result<(), MatchError> {
        if !(0.0..=1.0).contains(&self.unresolved_warn_ratio) {
            return Err(MatchError::InvalidConfig(
                "unresolved_warn_ratio must be between 0.0 and 1.0".into(),
            ));
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            unresolved_warn_ratio: Self::default_unresolved_warn_ratio(),
        }
    }
}

/// A single match request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchRequest {
    /// The user's answers for this quiz round.
    pub answers: AnswerSet,
    /// Per-request configuration; use `MatchConfig::default()` when in doubt.
    #[serde(default)]
    pub config: MatchConfig,
}

impl MatchRequest {
    /// Request with default configuration.
    pub fn new(answers: AnswerSet) -> Self {
        Self {
            answers,
            config: MatchConfig::default(),
        }
    }
}

/// Outcome of a match: either the best-ranked character or the sentinel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchOutcome {
    /// Best candidate by cosine similarity; ties broken lexicographically
    /// on character name.
    Match {
        /// Character name with the `C:` prefix stripped.
        character: String,
        /// Cosine similarity in [-1.0, 1.0].
        similarity: f32,
    },
    /// No candidate could be ranked: either no answer resolved to a store
    /// node, or no graph character node is present in the store.
    NoMatch,
}

/// Full result of a match request.
///
/// `resolved_answers` / `total_answers` surface the silent-skip rate so
/// callers can detect vocabulary drift between UI and model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchReport {
    pub outcome: MatchOutcome,
    /// Answers that resolved to a node in the embedding store.
    pub resolved_answers: usize,
    /// Answers submitted with the request.
    pub total_answers: usize,
}

impl MatchReport {
    pub fn is_match(&self) -> bool {
        matches!(self.outcome, MatchOutcome::Match { .. })
    }

    /// Fraction of answers that resolved; 1.0 for an empty answer set.
    pub fn resolved_ratio(&self) -> f32 {
        if self.total_answers == 0 {
            1.0
        } else {
            self.resolved_answers as f32 / self.total_answers as f32
        }
    }
}

/// Errors produced by the matching layer.
///
/// Degenerate inputs (empty answer sets, unknown labels, an empty
/// candidate set) are not errors; they produce [`MatchOutcome::NoMatch`].
#[derive(Debug, Error)]
pub enum MatchError {
    /// Invalid per-request configuration.
    #[error("invalid match config: {0}")]
    InvalidConfig(String),
}
