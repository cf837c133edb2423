use assay_primitives::{BlockHash, BlockNumber, SealedHeader};
use assay_storage_errors::provider::ProviderResult;

/// Client trait for fetching headers of the local chain, the chain store.
#[auto_impl::auto_impl(&, Box, Arc)]
pub trait HeaderProvider: Send + Sync {
    /// Check if block is known
    fn is_known(&self, block_hash: &BlockHash) -> ProviderResult<bool> {
        self.header(block_hash).map(|header| header.is_some())
    }

    /// Get header by block hash
    fn header(&self, block_hash: &BlockHash) -> ProviderResult<Option<SealedHeader>>;

    /// Get header by block number
    fn header_by_number(&self, number: BlockNumber) -> ProviderResult<Option<SealedHeader>>;
}
