use std::fs;
use std::path::Path;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use tracing::info;
use zstd::{decode_all, encode_all};

use crate::ModelError;

/// Bump this value whenever the on-disk model artifact layout changes.
pub const MODEL_SCHEMA_VERSION: u16 = 1;

const ZSTD_LEVEL: i32 = 3;

/// On-disk layout of the embedding model artifact.
///
/// Entries are a flat `(key, vector)` list rather than a map so the
/// serialized form is stable and order-checkable; duplicates are a load
/// error.
#[derive(Serialize, Deserialize)]
struct ModelArtifact {
    schema_version: u16,
    vector_size: usize,
    vectors: Vec<(String, Vec<f32>)>,
}

/// Immutable node → embedding mapping with a declared vector size.
///
/// Fully resident after [`EmbeddingStore::load`]; there is no lazy or
/// partial loading. Lookups never mutate, so a loaded store can be
/// shared freely across threads.
#[derive(Debug)]
pub struct EmbeddingStore {
    vector_size: usize,
    vectors: HashMap<String, Vec<f32>>,
}

impl EmbeddingStore {
    /// Build a store from in-memory entries, enforcing the shape
    /// invariants (uniform vector length, unique keys, nonzero size).
    pub fn from_entries<I, K>(vector_size: usize, entries: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = (K, Vec<f32>)>,
        K: Into<String>,
    {
        if vector_size == 0 {
            return Err(ModelError::ZeroVectorSize);
        }
        let mut vectors = HashMap::new();
        for (key, vector) in entries {
            let key = key.into();
            if vector.len() != vector_size {
                return Err(ModelError::DimensionMismatch {
                    node: key,
                    len: vector.len(),
                    expected: vector_size,
                });
            }
            if vectors.insert(key.clone(), vector).is_some() {
                return Err(ModelError::DuplicateNode(key));
            }
        }
        Ok(Self {
            vector_size,
            vectors,
        })
    }

    /// Load and validate an artifact from disk.
    ///
    /// Any failure here is fatal for the process: serving matches over a
    /// partially loaded or corrupt store is never correct.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let raw = fs::read(path)?;
        let artifact: ModelArtifact = bincode::deserialize(&decode_all(&raw[..])?)?;
        if artifact.schema_version != MODEL_SCHEMA_VERSION {
            return Err(ModelError::SchemaVersion {
                found: artifact.schema_version,
                expected: MODEL_SCHEMA_VERSION,
            });
        }
        let store = Self::from_entries(artifact.vector_size, artifact.vectors)?;
        info!(
            path = %path.display(),
            nodes = store.len(),
            vector_size = store.vector_size(),
            "embedding store loaded"
        );
        Ok(store)
    }

    /// Serialize the store to disk in artifact form.
    ///
    /// Entries are written in lexicographic key order so equal stores
    /// produce byte-identical artifacts.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ModelError> {
        let mut vectors: Vec<(String, Vec<f32>)> = self
            .vectors
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        vectors.sort_by(|a, b| a.0.cmp(&b.0));
        let artifact = ModelArtifact {
            schema_version: MODEL_SCHEMA_VERSION,
            vector_size: self.vector_size,
            vectors,
        };
        let encoded = bincode::serialize(&artifact)?;
        fs::write(path, encode_all(&encoded[..], ZSTD_LEVEL)?)?;
        Ok(())
    }

    /// Look up the embedding for a node key; `None` when absent.
    pub fn lookup(&self, key: &str) -> Option<&[f32]> {
        self.vectors.get(key).map(Vec::as_slice)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.vectors.contains_key(key)
    }

    /// The model's declared vector dimensionality.
    pub fn vector_size(&self) -> usize {
        self.vector_size
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> EmbeddingStore {
        EmbeddingStore::from_entries(
            2,
            vec![
                ("A:Agree:Q1".to_string(), vec![1.0, 0.0]),
                ("A:Disagree:Q1".to_string(), vec![-1.0, 0.0]),
                ("C:Alice".to_string(), vec![1.0, 0.0]),
                ("C:Bob".to_string(), vec![0.0, 1.0]),
            ],
        )
        .expect("valid store")
    }

    #[test]
    fn lookup_present_and_absent() {
        let store = sample_store();
        assert_eq!(store.lookup("C:Alice"), Some(&[1.0, 0.0][..]));
        assert_eq!(store.lookup("C:Carol"), None);
        assert_eq!(store.vector_size(), 2);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn dimension_mismatch_is_fatal() {
        let err = EmbeddingStore::from_entries(3, vec![("C:Alice".to_string(), vec![1.0, 0.0])])
            .expect_err("mismatched vector must be rejected");
        match err {
            ModelError::DimensionMismatch { node, len, expected } => {
                assert_eq!(node, "C:Alice");
                assert_eq!(len, 2);
                assert_eq!(expected, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicate_keys_rejected() {
        let err = EmbeddingStore::from_entries(
            1,
            vec![
                ("C:Alice".to_string(), vec![1.0]),
                ("C:Alice".to_string(), vec![2.0]),
            ],
        )
        .expect_err("duplicate must be rejected");
        assert!(matches!(err, ModelError::DuplicateNode(node) if node == "C:Alice"));
    }

    #[test]
    fn zero_vector_size_rejected() {
        let err = EmbeddingStore::from_entries(0, Vec::<(String, Vec<f32>)>::new())
            .expect_err("zero size must be rejected");
        assert!(matches!(err, ModelError::ZeroVectorSize));
    }

    #[test]
    fn save_load_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("model.bin");

        sample_store().save(&path).expect("save");
        let loaded = EmbeddingStore::load(&path).expect("load");

        assert_eq!(loaded.vector_size(), 2);
        assert_eq!(loaded.len(), 4);
        assert_eq!(loaded.lookup("A:Disagree:Q1"), Some(&[-1.0, 0.0][..]));
    }

    #[test]
    fn schema_version_mismatch_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("model.bin");

        let artifact = ModelArtifact {
            schema_version: MODEL_SCHEMA_VERSION + 1,
            vector_size: 1,
            vectors: vec![("C:Alice".to_string(), vec![1.0])],
        };
        let encoded = bincode::serialize(&artifact).expect("serialize");
        fs::write(&path, encode_all(&encoded[..], ZSTD_LEVEL).expect("zstd")).expect("write");

        let err = EmbeddingStore::load(&path).expect_err("version mismatch must fail");
        assert!(matches!(
            err,
            ModelError::SchemaVersion { found, expected }
                if found == MODEL_SCHEMA_VERSION + 1 && expected == MODEL_SCHEMA_VERSION
        ));
    }

    #[test]
    fn corrupt_artifact_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("model.bin");
        fs::write(&path, b"not a zstd frame").expect("write");
        assert!(matches!(
            EmbeddingStore::load(&path),
            Err(ModelError::Io(_))
        ));
    }

    #[test]
    fn missing_artifact_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(matches!(
            EmbeddingStore::load(dir.path().join("absent.bin")),
            Err(ModelError::Io(_))
        ));
    }
}
