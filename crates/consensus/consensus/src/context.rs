use assay_bad_blocks::BadBlockManager;
use assay_storage_api::{HeaderProvider, WorldStateProvider};
use std::{fmt, sync::Arc};

/// The chain-wide collaborators a validation runs against.
///
/// One context exists per chain and is shared by every validation on that chain; cloning it only
/// clones the handles.
#[derive(Clone)]
pub struct ProtocolContext {
    chain: Arc<dyn HeaderProvider>,
    world_state: Arc<dyn WorldStateProvider>,
    bad_blocks: BadBlockManager,
}

impl ProtocolContext {
    /// Creates a new context.
    pub fn new(
        chain: Arc<dyn HeaderProvider>,
        world_state: Arc<dyn WorldStateProvider>,
        bad_blocks: BadBlockManager,
    ) -> Self {
        Self { chain, world_state, bad_blocks }
    }

    /// Returns the chain store.
    pub fn chain(&self) -> &dyn HeaderProvider {
        &*self.chain
    }

    /// Returns the world-state provider.
    pub fn world_state(&self) -> &dyn WorldStateProvider {
        &*self.world_state
    }

    /// Returns the bad-block registry of the chain.
    pub const fn bad_block_manager(&self) -> &BadBlockManager {
        &self.bad_blocks
    }
}

impl fmt::Debug for ProtocolContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProtocolContext")
            .field("bad_blocks", &self.bad_blocks)
            .finish_non_exhaustive()
    }
}
