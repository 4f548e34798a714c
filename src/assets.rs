//! Process-wide asset lifecycle.
//!
//! The embedding store and relationship graph are static artifacts: they
//! change only when an operator ships a new model. They are therefore
//! loaded at most once per process and shared read-only afterwards —
//! immutability is the whole concurrency strategy. There is no reload
//! path; a new model means a new process.

use std::sync::Arc;

use cq_match::{MatchConfig, QuizMatcher};
use cq_model::{EmbeddingStore, ModelError, RelationshipGraph};
use once_cell::sync::OnceCell;
use tracing::info;

use crate::config::QuizConfig;

static ASSETS: OnceCell<QuizAssets> = OnceCell::new();

/// The two loaded artifacts a matcher needs, plus the match
/// configuration they were deployed with.
pub struct QuizAssets {
    store: Arc<EmbeddingStore>,
    graph: Arc<RelationshipGraph>,
    match_config: MatchConfig,
}

impl QuizAssets {
    /// Load both artifacts named by the configuration.
    ///
    /// Any failure is fatal for startup: a process must never serve
    /// matches over a store or graph it could not fully load.
    pub fn load(config: &QuizConfig) -> Result<Self, ModelError> {
        let store = EmbeddingStore::load(&config.model_path)?;
        let graph = RelationshipGraph::load(&config.graph_path)?;
        info!(
            store_nodes = store.len(),
            graph_nodes = graph.len(),
            "quiz assets loaded"
        );
        Ok(Self {
            store: Arc::new(store),
            graph: Arc::new(graph),
            match_config: config.matcher.clone(),
        })
    }

    pub fn store(&self) -> &Arc<EmbeddingStore> {
        &self.store
    }

    pub fn graph(&self) -> &Arc<RelationshipGraph> {
        &self.graph
    }

    /// The match configuration from the deployment's config file.
    pub fn match_config(&self) -> &MatchConfig {
        &self.match_config
    }

    /// A matcher sharing these assets.
    pub fn matcher(&self) -> QuizMatcher {
        QuizMatcher::with_shared(Arc::clone(&self.store), Arc::clone(&self.graph))
    }
}

/// Load the process-wide assets exactly once.
///
/// The first successful call loads from `config`; later calls return the
/// already-loaded instance regardless of their argument. A failed load
/// leaves the cell empty so startup can be retried with a fixed
/// configuration.
pub fn init_assets(config: &QuizConfig) -> Result<&'static QuizAssets, ModelError> {
    ASSETS.get_or_try_init(|| QuizAssets::load(config))
}

/// The process-wide assets, if [`init_assets`] has succeeded.
pub fn assets() -> Option<&'static QuizAssets> {
    ASSETS.get()
}
