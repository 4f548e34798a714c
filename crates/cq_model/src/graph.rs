use std::fs;
use std::path::Path;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use tracing::info;
use zstd::{decode_all, encode_all};

use crate::{ModelError, NodeKey};

/// Bump this value whenever the on-disk graph artifact layout changes.
pub const GRAPH_SCHEMA_VERSION: u16 = 1;

const ZSTD_LEVEL: i32 = 3;

/// On-disk layout of the relationship graph artifact.
#[derive(Serialize, Deserialize)]
struct GraphArtifact {
    schema_version: u16,
    nodes: Vec<String>,
    edges: Vec<(String, String)>,
}

/// Immutable node/edge set of the trained relationship graph.
///
/// The matcher only enumerates the `C:` character subset of the nodes;
/// edges are carried because the training pipeline emits them, but no
/// traversal happens at match time. Candidate enumeration order is the
/// node insertion order of the artifact and is not contractually stable —
/// the engine must not depend on it for correctness.
#[derive(Debug)]
pub struct RelationshipGraph {
    nodes: Vec<String>,
    node_set: HashSet<String>,
    edges: Vec<(String, String)>,
}

impl RelationshipGraph {
    /// Build a graph from in-memory parts, rejecting duplicate nodes and
    /// edges whose endpoints are not in the node set.
    pub fn from_parts(
        nodes: Vec<String>,
        edges: Vec<(String, String)>,
    ) -> Result<Self, ModelError> {
        let mut node_set: HashSet<String> = HashSet::with_capacity(nodes.len());
        for node in &nodes {
            if !node_set.insert(node.clone()) {
                return Err(ModelError::DuplicateNode(node.clone()));
            }
        }
        for (from, to) in &edges {
            for endpoint in [from, to] {
                if !node_set.contains(endpoint.as_str()) {
                    return Err(ModelError::UnknownEndpoint(endpoint.clone()));
                }
            }
        }
        Ok(Self {
            nodes,
            node_set,
            edges,
        })
    }

    /// Load and validate an artifact from disk. Failures are fatal, as
    /// for [`crate::EmbeddingStore::load`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let raw = fs::read(path)?;
        let artifact: GraphArtifact = bincode::deserialize(&decode_all(&raw[..])?)?;
        if artifact.schema_version != GRAPH_SCHEMA_VERSION {
            return Err(ModelError::SchemaVersion {
                found: artifact.schema_version,
                expected: GRAPH_SCHEMA_VERSION,
            });
        }
        let graph = Self::from_parts(artifact.nodes, artifact.edges)?;
        info!(
            path = %path.display(),
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            characters = graph.character_nodes().count(),
            "relationship graph loaded"
        );
        Ok(graph)
    }

    /// Serialize the graph to disk in artifact form.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ModelError> {
        let artifact = GraphArtifact {
            schema_version: GRAPH_SCHEMA_VERSION,
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        };
        let encoded = bincode::serialize(&artifact)?;
        fs::write(path, encode_all(&encoded[..], ZSTD_LEVEL)?)?;
        Ok(())
    }

    /// All node keys, in artifact order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    /// The `C:`-prefixed candidate subset, in artifact order.
    pub fn character_nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes().filter(|key| NodeKey::is_character_key(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.node_set.contains(key)
    }

    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.edges.iter().map(|(a, b)| (a.as_str(), b.as_str()))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_graph() -> RelationshipGraph {
        RelationshipGraph::from_parts(
            vec![
                "C:Alice".to_string(),
                "A:Agree:Q1".to_string(),
                "C:Bob".to_string(),
            ],
            vec![("A:Agree:Q1".to_string(), "C:Alice".to_string())],
        )
        .expect("valid graph")
    }

    #[test]
    fn character_nodes_filters_answer_nodes() {
        let graph = sample_graph();
        let characters: Vec<&str> = graph.character_nodes().collect();
        assert_eq!(characters, vec!["C:Alice", "C:Bob"]);
        assert_eq!(graph.len(), 3);
    }

    #[test]
    fn contains_covers_all_nodes_and_only_nodes() {
        let graph = sample_graph();
        for node in graph.nodes() {
            assert!(graph.contains(node));
        }
        assert!(!graph.contains("C:Ghost"));
        assert!(!graph.contains("Alice"));
    }

    #[test]
    fn duplicate_nodes_rejected() {
        let err = RelationshipGraph::from_parts(
            vec!["C:Alice".to_string(), "C:Alice".to_string()],
            Vec::new(),
        )
        .expect_err("duplicate must be rejected");
        assert!(matches!(err, ModelError::DuplicateNode(node) if node == "C:Alice"));
    }

    #[test]
    fn dangling_edge_rejected() {
        let err = RelationshipGraph::from_parts(
            vec!["C:Alice".to_string()],
            vec![("C:Alice".to_string(), "C:Ghost".to_string())],
        )
        .expect_err("dangling endpoint must be rejected");
        assert!(matches!(err, ModelError::UnknownEndpoint(node) if node == "C:Ghost"));
    }

    #[test]
    fn save_load_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("graph.bin");

        sample_graph().save(&path).expect("save");
        let loaded = RelationshipGraph::load(&path).expect("load");

        assert_eq!(loaded.len(), 3);
        assert!(loaded.contains("A:Agree:Q1"));
        assert_eq!(loaded.edges().count(), 1);
        assert_eq!(
            loaded.character_nodes().collect::<Vec<_>>(),
            vec!["C:Alice", "C:Bob"]
        );
    }

    #[test]
    fn corrupt_artifact_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("graph.bin");
        fs::write(&path, b"garbage").expect("write");
        assert!(matches!(
            RelationshipGraph::load(&path),
            Err(ModelError::Io(_))
        ));
    }
}
