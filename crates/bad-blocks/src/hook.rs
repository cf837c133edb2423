use crate::BadBlockEntry;

/// A hook invoked every time a bad block is recorded.
pub trait BadBlockHook: Send + Sync {
    /// Invoked after `entry` has been stored.
    fn on_bad_block(&self, entry: &BadBlockEntry);
}

impl<F> BadBlockHook for F
where
    F: Fn(&BadBlockEntry) + Send + Sync,
{
    fn on_bad_block(&self, entry: &BadBlockEntry) {
        self(entry)
    }
}
