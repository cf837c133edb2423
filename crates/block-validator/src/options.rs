use assay_config::ValidationConfig;

/// Per-call options of
/// [`BlockValidator::validate_and_process_block`](crate::BlockValidator::validate_and_process_block).
///
/// Both flags default to `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidateOptions {
    /// Whether the world state produced by a valid block is committed durably as the node's
    /// head. Otherwise it is only kept for inspection. Never affects the verdict.
    pub persist: bool,
    /// Whether a block rejected for a protocol reason is recorded in the bad-block registry.
    pub record_bad_block: bool,
}

impl ValidateOptions {
    /// Returns the default options.
    pub const fn new() -> Self {
        Self { persist: true, record_bad_block: true }
    }

    /// Sets whether the resulting world state is persisted.
    pub const fn with_persist(mut self, persist: bool) -> Self {
        self.persist = persist;
        self
    }

    /// Sets whether rejected blocks are recorded as bad.
    pub const fn with_record_bad_block(mut self, record_bad_block: bool) -> Self {
        self.record_bad_block = record_bad_block;
        self
    }
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&ValidationConfig> for ValidateOptions {
    fn from(config: &ValidationConfig) -> Self {
        Self { persist: config.persist_state, record_bad_block: config.record_bad_blocks }
    }
}
