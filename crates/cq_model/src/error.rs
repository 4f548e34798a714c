use thiserror::Error;

/// Errors raised while loading, saving, or validating a model artifact.
///
/// Every variant is fatal for the artifact in question: callers are
/// expected to abort startup rather than serve matches over a store or
/// graph that failed to load.
#[derive(Error, Debug)]
pub enum ModelError {
    /// Reading/writing the artifact file or the zstd frame failed.
    #[error("artifact I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The decompressed payload is not a valid artifact.
    #[error("artifact decode error: {0}")]
    Decode(#[from] bincode::Error),
    /// The artifact was written by an incompatible layout revision.
    #[error("unsupported artifact schema version {found} (expected {expected})")]
    SchemaVersion { found: u16, expected: u16 },
    /// A stored vector disagrees with the declared vector size.
    #[error("vector for node `{node}` has length {len}, expected {expected}")]
    DimensionMismatch {
        node: String,
        len: usize,
        expected: usize,
    },
    /// The same node key appears more than once in the artifact.
    #[error("duplicate node key `{0}`")]
    DuplicateNode(String),
    /// A declared vector size of zero cannot describe any embedding.
    #[error("declared vector size is zero")]
    ZeroVectorSize,
    /// A graph edge references a node that is not in the node set.
    #[error("edge endpoint `{0}` is not a node of the graph")]
    UnknownEndpoint(String),
}
