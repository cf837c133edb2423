use assay_primitives::{BlockHash, BlockNumber, SealedHeader, B256};
use assay_storage_api::{
    errors::{ProviderError, ProviderResult},
    HeaderProvider, MutableWorldState, WorldStateProvider,
};
use parking_lot::{Mutex, RwLock};
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

/// An in-memory chain store.
///
/// A fault can be injected so that every lookup fails with it. Every lookup is counted, faulted
/// or not.
#[derive(Debug, Default)]
pub struct InMemoryChainStore {
    headers: RwLock<HashMap<BlockHash, SealedHeader>>,
    fault: Mutex<Option<ProviderError>>,
    lookups: AtomicUsize,
}

impl InMemoryChainStore {
    /// Creates a store holding the given headers.
    pub fn with_headers<'a>(headers: impl IntoIterator<Item = &'a SealedHeader>) -> Self {
        let store = Self::default();
        store.extend(headers);
        store
    }

    /// Inserts a header.
    pub fn insert(&self, header: SealedHeader) {
        self.headers.write().insert(header.hash(), header);
    }

    /// Inserts all given headers.
    pub fn extend<'a>(&self, headers: impl IntoIterator<Item = &'a SealedHeader>) {
        let mut map = self.headers.write();
        for header in headers {
            map.insert(header.hash(), header.clone());
        }
    }

    /// Removes the header with the given hash.
    pub fn remove(&self, hash: &BlockHash) -> Option<SealedHeader> {
        self.headers.write().remove(hash)
    }

    /// Makes every following lookup fail with `fault`.
    pub fn fail_with(&self, fault: ProviderError) {
        *self.fault.lock() = Some(fault);
    }

    /// Returns the number of lookups served so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    fn check_fault(&self) -> ProviderResult<()> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        match self.fault.lock().clone() {
            Some(fault) => Err(fault),
            None => Ok(()),
        }
    }
}

impl HeaderProvider for InMemoryChainStore {
    fn header(&self, block_hash: &BlockHash) -> ProviderResult<Option<SealedHeader>> {
        self.check_fault()?;
        Ok(self.headers.read().get(block_hash).cloned())
    }

    fn header_by_number(&self, number: BlockNumber) -> ProviderResult<Option<SealedHeader>> {
        self.check_fault()?;
        Ok(self.headers.read().values().find(|header| header.number == number).cloned())
    }
}

#[derive(Debug, Default)]
struct WorldStates {
    available: HashMap<BlockHash, B256>,
    requests: Vec<(BlockHash, bool)>,
    persisted: Vec<SealedHeader>,
    fault: Option<ProviderError>,
    persist_fault: Option<ProviderError>,
}

/// An in-memory world-state provider.
///
/// States are registered per header: a state registered for a header is the post-state of that
/// header and has its state root. Every request and every persisted state is recorded.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorldStateProvider {
    inner: Arc<Mutex<WorldStates>>,
}

impl InMemoryWorldStateProvider {
    /// Makes the post-state of `header` available.
    pub fn add_state(&self, header: &SealedHeader) {
        self.inner.lock().available.insert(header.hash(), header.state_root);
    }

    /// Makes the post-state of `header` unavailable.
    pub fn remove_state(&self, header: &SealedHeader) {
        self.inner.lock().available.remove(&header.hash());
    }

    /// Makes every following request fail with `fault`.
    pub fn fail_with(&self, fault: ProviderError) {
        self.inner.lock().fault = Some(fault);
    }

    /// Makes every following persist fail with `fault`.
    pub fn fail_persist_with(&self, fault: ProviderError) {
        self.inner.lock().persist_fault = Some(fault);
    }

    /// Returns the requests received so far, as `(header hash, update_node_head)` pairs.
    pub fn requests(&self) -> Vec<(BlockHash, bool)> {
        self.inner.lock().requests.clone()
    }

    /// Returns the headers whose post-state was persisted, in order.
    pub fn persisted(&self) -> Vec<SealedHeader> {
        self.inner.lock().persisted.clone()
    }
}

impl WorldStateProvider for InMemoryWorldStateProvider {
    fn world_state(
        &self,
        header: &SealedHeader,
        update_node_head: bool,
    ) -> ProviderResult<Option<Box<dyn MutableWorldState>>> {
        let mut inner = self.inner.lock();
        inner.requests.push((header.hash(), update_node_head));
        if let Some(fault) = inner.fault.clone() {
            return Err(fault)
        }
        Ok(inner.available.get(&header.hash()).map(|root| {
            Box::new(MockWorldState { root: *root, provider: self.inner.clone() })
                as Box<dyn MutableWorldState>
        }))
    }
}

/// A world state handed out by [`InMemoryWorldStateProvider`].
#[derive(Debug)]
pub struct MockWorldState {
    root: B256,
    provider: Arc<Mutex<WorldStates>>,
}

impl MutableWorldState for MockWorldState {
    fn state_root(&self) -> B256 {
        self.root
    }

    fn persist(&mut self, header: &SealedHeader) -> ProviderResult<()> {
        let mut provider = self.provider.lock();
        if let Some(fault) = provider.persist_fault.clone() {
            return Err(fault)
        }
        self.root = header.state_root;
        provider.available.insert(header.hash(), header.state_root);
        provider.persisted.push(header.clone());
        Ok(())
    }
}
