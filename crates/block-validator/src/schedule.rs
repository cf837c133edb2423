use crate::{BlockValidator, BlockValidatorBuilder, RuleSet};
use assay_chainspec::ChainSpec;
use assay_config::ValidationConfig;
use assay_primitives::Header;
use std::sync::Arc;

/// The block validators of a chain, one per fork segment.
///
/// Built once per chain; [`ProtocolSchedule::validator_for`] picks the validator whose rules
/// apply at the number and timestamp of a header.
#[derive(Debug, Clone)]
pub struct ProtocolSchedule {
    chain_spec: Arc<ChainSpec>,
    /// Validator for blocks that are not bounded in size.
    unbounded: Arc<BlockValidator>,
    /// Validator for blocks from the fork that introduced the size bound on.
    bounded: Arc<BlockValidator>,
}

impl ProtocolSchedule {
    /// Creates the schedule of `chain_spec` using the same rule engines for every segment.
    pub fn new(chain_spec: Arc<ChainSpec>, rules: RuleSet) -> Self {
        Self::with_config(chain_spec, rules, &ValidationConfig::default())
    }

    /// Creates the schedule of `chain_spec`, applying the size override and slow block threshold
    /// of `config`.
    ///
    /// The size override only applies to segments whose fork bounds the block size.
    pub fn with_config(
        chain_spec: Arc<ChainSpec>,
        rules: RuleSet,
        config: &ValidationConfig,
    ) -> Self {
        let unbounded = BlockValidatorBuilder::frontier(rules.clone())
            .slow_block_threshold(config.slow_block_threshold)
            .build();

        let mut bounded = BlockValidatorBuilder::osaka(rules)
            .slow_block_threshold(config.slow_block_threshold);
        if let Some(max_rlp_block_size) = config.max_rlp_block_size {
            bounded = bounded.max_rlp_block_size(Some(max_rlp_block_size));
        }

        Self { chain_spec, unbounded: Arc::new(unbounded), bounded: Arc::new(bounded.build()) }
    }

    /// Returns the chain spec the schedule was built from.
    pub const fn chain_spec(&self) -> &Arc<ChainSpec> {
        &self.chain_spec
    }

    /// Returns the validator for the block with the given header.
    pub fn validator_for(&self, header: &Header) -> &Arc<BlockValidator> {
        if self.chain_spec.max_rlp_block_size_at(header.number, header.timestamp).is_some() {
            &self.bounded
        } else {
            &self.unbounded
        }
    }
}
