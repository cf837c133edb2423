//! Errors surfaced by a block state transition.

use assay_consensus::ConsensusError;
use assay_storage_api::errors::ProviderError;

/// The cause carried by an exceptional state transition result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlockExecutionError {
    /// The transition violated a protocol rule.
    #[error(transparent)]
    Validation(#[from] ConsensusError),
    /// The executor hit a storage fault.
    #[error(transparent)]
    Provider(#[from] ProviderError),
    /// Any other error the executor chose to surface.
    #[error("{0}")]
    Internal(String),
}

impl BlockExecutionError {
    /// Create a new [`BlockExecutionError::Internal`] variant.
    pub fn msg(msg: impl std::fmt::Display) -> Self {
        Self::Internal(msg.to_string())
    }

    /// Returns `true` if the error is a storage fault, either raised directly or reported by a
    /// rule engine the executor consulted.
    pub const fn is_infrastructure(&self) -> bool {
        match self {
            Self::Provider(_) => true,
            Self::Validation(err) => err.is_infrastructure(),
            Self::Internal(_) => false,
        }
    }

    /// Returns the storage fault if this error is one.
    pub const fn as_provider(&self) -> Option<&ProviderError> {
        match self {
            Self::Provider(err) | Self::Validation(ConsensusError::Provider(err)) => Some(err),
            _ => None,
        }
    }
}
