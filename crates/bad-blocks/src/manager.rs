use crate::{BadBlockCause, BadBlockHook};
use assay_primitives::{BlockHash, SealedBlock, SealedHeader};
use metrics::Counter;
use parking_lot::RwLock;
use std::{collections::HashMap, fmt, sync::Arc};
use tracing::debug;

/// A block recorded as bad, together with why.
#[derive(Debug, Clone)]
pub struct BadBlockEntry {
    block: Arc<SealedBlock>,
    cause: BadBlockCause,
}

impl BadBlockEntry {
    /// Returns the bad block.
    pub fn block(&self) -> &SealedBlock {
        &self.block
    }

    /// Returns the hash of the bad block.
    pub fn hash(&self) -> BlockHash {
        self.block.hash()
    }

    /// Returns the recorded cause.
    pub const fn cause(&self) -> &BadBlockCause {
        &self.cause
    }
}

/// A header recorded as bad without its body.
#[derive(Debug, Clone)]
pub struct BadHeaderEntry {
    header: SealedHeader,
    cause: BadBlockCause,
}

impl BadHeaderEntry {
    /// Returns the bad header.
    pub const fn header(&self) -> &SealedHeader {
        &self.header
    }

    /// Returns the recorded cause.
    pub const fn cause(&self) -> &BadBlockCause {
        &self.cause
    }
}

#[derive(Default)]
struct BadBlockManagerInner {
    blocks: RwLock<HashMap<BlockHash, BadBlockEntry>>,
    headers: RwLock<HashMap<BlockHash, BadHeaderEntry>>,
    latest_valid_hashes: RwLock<HashMap<BlockHash, BlockHash>>,
    hooks: RwLock<Vec<Arc<dyn BadBlockHook>>>,
    recorded: Option<Counter>,
}

/// Registry of blocks rejected for protocol reasons.
///
/// This is a cheaply cloneable handle: every clone refers to the same registry, so one instance
/// is created per chain and handed to every validator working on that chain. Recording is safe
/// from any number of threads.
///
/// Recording a hash that is already present replaces the stored entry, the registry never holds
/// more than one entry per hash.
#[derive(Clone, Default)]
pub struct BadBlockManager {
    inner: Arc<BadBlockManagerInner>,
}

impl BadBlockManager {
    /// Creates a new, empty registry that reports the number of recorded blocks through the
    /// `bad_blocks.recorded` counter.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(BadBlockManagerInner {
                recorded: Some(metrics::counter!("bad_blocks.recorded")),
                ..Default::default()
            }),
        }
    }

    /// Records `block` as bad.
    pub fn add_bad_block(&self, block: &SealedBlock, cause: BadBlockCause) {
        let entry = BadBlockEntry { block: Arc::new(block.clone()), cause };
        debug!(
            target: "bad_blocks",
            number = block.number,
            hash = ?entry.hash(),
            cause = %entry.cause,
            "Recording bad block"
        );

        if self.inner.blocks.write().insert(entry.hash(), entry.clone()).is_some() {
            debug!(target: "bad_blocks", hash = ?entry.hash(), "Replaced existing bad block entry");
        }
        if let Some(counter) = &self.inner.recorded {
            counter.increment(1);
        }

        // hooks run outside of the lock
        let hooks = self.inner.hooks.read().clone();
        for hook in hooks {
            hook.on_bad_block(&entry);
        }
    }

    /// Records a header as bad when its body is not available.
    pub fn add_bad_header(&self, header: &SealedHeader, cause: BadBlockCause) {
        debug!(
            target: "bad_blocks",
            number = header.number,
            hash = ?header.hash(),
            %cause,
            "Recording bad header"
        );
        self.inner
            .headers
            .write()
            .insert(header.hash(), BadHeaderEntry { header: header.clone(), cause });
    }

    /// Returns the bad block entry for the given hash, if any.
    pub fn get_bad_block(&self, hash: &BlockHash) -> Option<BadBlockEntry> {
        self.inner.blocks.read().get(hash).cloned()
    }

    /// Returns all recorded bad blocks, in no particular order.
    pub fn bad_blocks(&self) -> Vec<BadBlockEntry> {
        self.inner.blocks.read().values().cloned().collect()
    }

    /// Returns the number of recorded bad blocks.
    pub fn bad_block_count(&self) -> usize {
        self.inner.blocks.read().len()
    }

    /// Returns the bad header for the given hash, looking at both header-only entries and the
    /// headers of recorded bad blocks.
    pub fn get_bad_header(&self, hash: &BlockHash) -> Option<SealedHeader> {
        if let Some(entry) = self.inner.headers.read().get(hash) {
            return Some(entry.header.clone())
        }
        self.inner.blocks.read().get(hash).map(|entry| entry.block.header.clone())
    }

    /// Returns all header-only entries.
    pub fn bad_headers(&self) -> Vec<BadHeaderEntry> {
        self.inner.headers.read().values().cloned().collect()
    }

    /// Returns `true` if the hash belongs to a recorded bad block or bad header.
    pub fn is_bad(&self, hash: &BlockHash) -> bool {
        self.inner.blocks.read().contains_key(hash) || self.inner.headers.read().contains_key(hash)
    }

    /// Remembers the latest valid ancestor of an invalid block.
    pub fn add_latest_valid_hash(&self, invalid: BlockHash, latest_valid: BlockHash) {
        self.inner.latest_valid_hashes.write().insert(invalid, latest_valid);
    }

    /// Returns the latest valid ancestor recorded for an invalid block.
    pub fn latest_valid_hash(&self, invalid: &BlockHash) -> Option<BlockHash> {
        self.inner.latest_valid_hashes.read().get(invalid).copied()
    }

    /// Registers a hook that is invoked for every recorded bad block.
    pub fn add_hook<H>(&self, hook: H)
    where
        H: BadBlockHook + 'static,
    {
        self.inner.hooks.write().push(Arc::new(hook));
    }

    /// Forgets every recorded block, header and latest valid hash. Hooks are kept.
    pub fn reset(&self) {
        self.inner.blocks.write().clear();
        self.inner.headers.write().clear();
        self.inner.latest_valid_hashes.write().clear();
    }
}

impl fmt::Debug for BadBlockManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BadBlockManager")
            .field("bad_blocks", &self.inner.blocks.read().len())
            .field("bad_headers", &self.inner.headers.read().len())
            .field("hooks", &self.inner.hooks.read().len())
            .finish_non_exhaustive()
    }
}
