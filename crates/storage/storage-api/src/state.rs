use assay_primitives::{SealedHeader, B256};
use assay_storage_errors::provider::ProviderResult;
use std::fmt::Debug;

/// A world state a block can be executed against.
///
/// Returned by a [`WorldStateProvider`] already positioned at the parent of the block that is
/// about to be executed. Execution mutates it in place.
pub trait MutableWorldState: Debug + Send {
    /// Returns the root hash of the state as it currently is.
    fn state_root(&self) -> B256;

    /// Durably commits the state as the post-state of the given header.
    fn persist(&mut self, header: &SealedHeader) -> ProviderResult<()>;
}

impl<T: MutableWorldState + ?Sized> MutableWorldState for Box<T> {
    fn state_root(&self) -> B256 {
        (**self).state_root()
    }

    fn persist(&mut self, header: &SealedHeader) -> ProviderResult<()> {
        (**self).persist(header)
    }
}

/// Resolves mutable world states anchored at a given header.
#[auto_impl::auto_impl(&, Box, Arc)]
pub trait WorldStateProvider: Send + Sync {
    /// Returns a mutable world state positioned at the post-state of `header`.
    ///
    /// If `update_node_head` is set the returned state is the node's working head and whatever is
    /// persisted through it becomes durable; otherwise it is a detached copy kept only for
    /// inspection.
    ///
    /// Returns `Ok(None)` if the state is not available locally, for example because it has been
    /// pruned or not yet materialized.
    fn world_state(
        &self,
        header: &SealedHeader,
        update_node_head: bool,
    ) -> ProviderResult<Option<Box<dyn MutableWorldState>>>;
}
