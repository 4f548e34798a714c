//! Display catalogs consumed by the presentation layer.
//!
//! Two flat JSON tables ride alongside the trained artifacts: the
//! statement catalog (axis id → statement text, the questions a quiz
//! round draws from) and the character/work catalog (character name →
//! source work, used to caption a match result). Neither participates in
//! matching itself; the engine only ever sees axis ids and labels.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use rand::seq::index;
use rand::Rng;
use thiserror::Error;

/// Errors raised while loading or sampling a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("requested {requested} questions but only {available} statements exist")]
    NotEnoughStatements { requested: usize, available: usize },
}

/// The personality statement table: axis id → statement text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementCatalog {
    statements: BTreeMap<String, String>,
}

impl StatementCatalog {
    /// Load from a JSON object file (`{"Q1": "I enjoy ...", ...}`).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        let statements: BTreeMap<String, String> = serde_json::from_str(&content)?;
        Ok(Self { statements })
    }

    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            statements: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Statement text for an axis id.
    pub fn statement(&self, axis: &str) -> Option<&str> {
        self.statements.get(axis).map(String::as_str)
    }

    /// All axis ids, in lexicographic order.
    pub fn axes(&self) -> impl Iterator<Item = &str> {
        self.statements.keys().map(String::as_str)
    }

    /// Draw `count` distinct axis ids for one quiz round.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<String>, CatalogError> {
        let available = self.statements.len();
        if count > available {
            return Err(CatalogError::NotEnoughStatements {
                requested: count,
                available,
            });
        }
        let axes: Vec<&String> = self.statements.keys().collect();
        Ok(index::sample(rng, available, count)
            .iter()
            .map(|i| axes[i].clone())
            .collect())
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// The character → source-work table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterWorks {
    works: BTreeMap<String, String>,
}

impl CharacterWorks {
    /// Load from a JSON object file (`{"Alice": "Wonderland", ...}`).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        let works: BTreeMap<String, String> = serde_json::from_str(&content)?;
        Ok(Self { works })
    }

    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            works: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// The work a character comes from; `None` for unknown characters
    /// (the presentation layer decides how to render that).
    pub fn work_for(&self, character: &str) -> Option<&str> {
        self.works.get(character).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.works.len()
    }

    pub fn is_empty(&self) -> bool {
        self.works.is_empty()
    }
}
