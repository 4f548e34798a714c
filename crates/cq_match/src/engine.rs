use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Instant;

use cq_model::{EmbeddingStore, NodeKey, RelationshipGraph};
use tracing::{debug, warn};

use crate::metrics::metrics_recorder;
use crate::types::{AnswerSet, MatchError, MatchOutcome, MatchReport, MatchRequest};

/// Trait for a matching engine.
pub trait Matcher: Send + Sync {
    /// Run a single match request and return the report.
    fn match_answers(&self, req: &MatchRequest) -> Result<MatchReport, MatchError>;
}

/// Production matcher over a loaded embedding store and relationship
/// graph.
///
/// Both inputs are immutable after load, so one matcher can serve any
/// number of concurrent requests without locking.
pub struct QuizMatcher {
    store: Arc<EmbeddingStore>,
    graph: Arc<RelationshipGraph>,
}

impl QuizMatcher {
    /// Construct a matcher that takes ownership of freshly loaded stores.
    pub fn new(store: EmbeddingStore, graph: RelationshipGraph) -> Self {
        Self::with_shared(Arc::new(store), Arc::new(graph))
    }

    /// Construct a matcher from shared store handles.
    pub fn with_shared(store: Arc<EmbeddingStore>, graph: Arc<RelationshipGraph>) -> Self {
        Self { store, graph }
    }

    /// Average the embeddings of all answers that resolve to a store
    /// node. Returns the user vector and the resolved count; unresolved
    /// answers contribute nothing.
    fn user_vector(&self, answers: &AnswerSet) -> (Vec<f32>, usize) {
        let mut acc = vec![0.0f32; self.store.vector_size()];
        let mut resolved = 0usize;

        for (axis, label) in answers {
            let key = NodeKey::answer(label.clone(), axis.clone()).encode();
            if let Some(vector) = self.store.lookup(&key) {
                for (slot, value) in acc.iter_mut().zip(vector) {
                    *slot += value;
                }
                resolved += 1;
            }
        }

        if resolved > 0 {
            let divisor = resolved as f32;
            for slot in &mut acc {
                *slot /= divisor;
            }
        }
        (acc, resolved)
    }

    /// Cosine similarity with a definite zero-norm convention: if either
    /// vector has zero norm the similarity is 0.0, never NaN, so ranking
    /// stays well-defined.
    fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
        if a.len() != b.len() || a.is_empty() {
            return 0.0;
        }
        let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
        let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }
        dot / (norm_a * norm_b)
    }

    /// Score every graph character node present in the store against the
    /// user vector and return the best candidate.
    ///
    /// Ties are broken lexicographically on character name so the result
    /// does not depend on the graph's enumeration order.
    fn best_candidate(&self, user_vector: &[f32]) -> Option<(String, f32)> {
        let mut candidates: Vec<(&str, f32)> = self
            .graph
            .character_nodes()
            .filter_map(|key| {
                let vector = self.store.lookup(key)?;
                let name = NodeKey::character_name(key)?;
                Some((name, Self::cosine_similarity(vector, user_vector)))
            })
            .collect();

        candidates.sort_unstable_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });
        candidates
            .first()
            .map(|(name, score)| (name.to_string(), *score))
    }
}

impl Matcher for QuizMatcher {
    fn match_answers(&self, req: &MatchRequest) -> Result<MatchReport, MatchError> {
        req.config.validate()?;

        let start = Instant::now();
        let total = req.answers.len();
        let (user_vector, resolved) = self.user_vector(&req.answers);

        if total > 0 {
            let unresolved_ratio = (total - resolved) as f32 / total as f32;
            if unresolved_ratio > req.config.unresolved_warn_ratio {
                warn!(
                    resolved,
                    total,
                    threshold = req.config.unresolved_warn_ratio,
                    "high unresolved answer rate; UI vocabulary may have drifted from the model"
                );
            }
        }

        // A fully unresolved answer set gives an all-zero user vector;
        // every candidate would score 0.0 and the "winner" would be an
        // arbitrary lexicographic pick. Return the sentinel instead.
        let outcome = if resolved == 0 {
            debug!(total, "no answers resolved; returning no-match");
            MatchOutcome::NoMatch
        } else {
            match self.best_candidate(&user_vector) {
                Some((character, similarity)) => MatchOutcome::Match {
                    character,
                    similarity,
                },
                None => {
                    debug!("no graph character node present in the store");
                    MatchOutcome::NoMatch
                }
            }
        };

        let report = MatchReport {
            outcome,
            resolved_answers: resolved,
            total_answers: total,
        };

        if let Some(recorder) = metrics_recorder() {
            recorder.record_match(&report.outcome, resolved, total, start.elapsed());
        }

        Ok(report)
    }
}
