use assay_consensus::BodyValidationMode;
use assay_storage_api::errors::ProviderError;

/// Errors of
/// [`BlockValidator::validate_block_for_syncing`](crate::BlockValidator::validate_block_for_syncing)
/// that are not a verdict about the block.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncValidationError {
    /// The requested body validation needs execution outputs, which the syncing check does not
    /// produce.
    #[error("body validation mode {0} is not supported when validating for syncing")]
    UnsupportedBodyMode(BodyValidationMode),
    /// A collaborator hit a storage fault.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}
