use crate::{metrics::BlockValidatorMetrics, BlockValidator};
use assay_consensus::{
    BaselineBodyValidator, BaselineHeaderValidator, BodyValidator, HeaderValidator,
};
use assay_evm::BlockProcessor;
use assay_primitives::constants::MAX_RLP_BLOCK_SIZE;
use std::{sync::Arc, time::Duration};

/// The rule engines a [`BlockValidator`] delegates to.
#[derive(Debug, Clone)]
pub struct RuleSet {
    /// Validates headers.
    pub header_validator: Arc<dyn HeaderValidator>,
    /// Validates bodies, before and after execution.
    pub body_validator: Arc<dyn BodyValidator>,
    /// Applies the state transition.
    pub block_processor: Arc<dyn BlockProcessor>,
}

impl RuleSet {
    /// Creates a new rule set.
    pub fn new<H, B, P>(header_validator: H, body_validator: B, block_processor: P) -> Self
    where
        H: HeaderValidator + 'static,
        B: BodyValidator + 'static,
        P: BlockProcessor + 'static,
    {
        Self {
            header_validator: Arc::new(header_validator),
            body_validator: Arc::new(body_validator),
            block_processor: Arc::new(block_processor),
        }
    }

    /// Creates a rule set that applies the baseline header and body rules around the given
    /// executor.
    pub fn baseline<P>(block_processor: P) -> Self
    where
        P: BlockProcessor + 'static,
    {
        Self::new(BaselineHeaderValidator::new(), BaselineBodyValidator::new(), block_processor)
    }
}

/// Builds a [`BlockValidator`] for one fork segment.
#[derive(Debug, Clone)]
pub struct BlockValidatorBuilder {
    rules: RuleSet,
    max_rlp_block_size: Option<usize>,
    slow_block_threshold: Option<Duration>,
}

impl BlockValidatorBuilder {
    /// Creates a builder for a validator without a block size bound.
    pub const fn new(rules: RuleSet) -> Self {
        Self { rules, max_rlp_block_size: None, slow_block_threshold: None }
    }

    /// A validator for the forks before Osaka, blocks are not bounded in size.
    pub const fn frontier(rules: RuleSet) -> Self {
        Self::new(rules)
    }

    /// A validator for Osaka, blocks are bounded to [`MAX_RLP_BLOCK_SIZE`] encoded bytes.
    ///
    /// See [EIP-7934](https://eips.ethereum.org/EIPS/eip-7934).
    pub const fn osaka(rules: RuleSet) -> Self {
        Self::new(rules).max_rlp_block_size(Some(MAX_RLP_BLOCK_SIZE))
    }

    /// Sets the maximum encoded size of a block, `None` for unbounded.
    pub const fn max_rlp_block_size(mut self, max_rlp_block_size: Option<usize>) -> Self {
        self.max_rlp_block_size = max_rlp_block_size;
        self
    }

    /// Validations taking longer than `threshold` are logged as slow.
    pub const fn slow_block_threshold(mut self, threshold: Duration) -> Self {
        self.slow_block_threshold = Some(threshold);
        self
    }

    /// Builds the validator.
    pub fn build(self) -> BlockValidator {
        let Self { rules, max_rlp_block_size, slow_block_threshold } = self;
        BlockValidator {
            header_validator: rules.header_validator,
            body_validator: rules.body_validator,
            block_processor: rules.block_processor,
            max_rlp_block_size,
            slow_block_threshold,
            metrics: BlockValidatorMetrics::default(),
        }
    }
}
