use assay_primitives::{GotExpected, B256};

/// Provider result type.
pub type ProviderResult<Ok> = Result<Ok, ProviderError>;

/// Infrastructure faults raised by the chain store and the world-state layer.
///
/// None of these say anything about the validity of the block that was being looked at when they
/// were raised.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The backing database failed or has been closed.
    #[error("database error: {0}")]
    Database(String),
    /// A trie node referenced by a state root could not be loaded.
    #[error("missing trie node {0}")]
    TrieNodeMissing(B256),
    /// Opening a state produced a different root than the one it was requested at, the local
    /// trie is corrupted.
    #[error("world state root mismatch: {0}")]
    StateRootMismatch(GotExpected<B256>),
    /// Any other storage fault.
    #[error("{0}")]
    Other(String),
}

impl ProviderError {
    /// Creates a [`ProviderError::Database`] from anything displayable.
    pub fn database(err: impl std::fmt::Display) -> Self {
        Self::Database(err.to_string())
    }
}
