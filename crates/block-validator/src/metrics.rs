use metrics::Counter;

/// Metrics of the block validator.
#[derive(Debug, Clone)]
pub(crate) struct BlockValidatorMetrics {
    /// Blocks found valid.
    pub(crate) valid: Counter,
    /// Blocks rejected for a protocol reason.
    pub(crate) invalid: Counter,
    /// Blocks that could not be processed because a prerequisite is missing locally.
    pub(crate) unavailable: Counter,
    /// Validations aborted by an infrastructure fault.
    pub(crate) fault: Counter,
    /// Syncing checks that passed.
    pub(crate) sync_valid: Counter,
    /// Syncing checks that rejected the block.
    pub(crate) sync_invalid: Counter,
    /// Syncing checks that could not decide because a prerequisite is missing locally.
    pub(crate) sync_unavailable: Counter,
}

impl Default for BlockValidatorMetrics {
    fn default() -> Self {
        const PROCESSED: &str = "block_validator.blocks_processed";
        const SYNC: &str = "block_validator.sync_checks";
        Self {
            valid: metrics::counter!(PROCESSED, "outcome" => "valid"),
            invalid: metrics::counter!(PROCESSED, "outcome" => "invalid"),
            unavailable: metrics::counter!(PROCESSED, "outcome" => "unavailable"),
            fault: metrics::counter!(PROCESSED, "outcome" => "fault"),
            sync_valid: metrics::counter!(SYNC, "outcome" => "valid"),
            sync_invalid: metrics::counter!(SYNC, "outcome" => "invalid"),
            sync_unavailable: metrics::counter!(SYNC, "outcome" => "unavailable"),
        }
    }
}
