use crate::{EthereumHardfork, ForkCondition};
use assay_primitives::{constants::MAX_RLP_BLOCK_SIZE, BlockNumber};
use std::sync::{Arc, LazyLock};

/// The Ethereum mainnet spec
pub static MAINNET: LazyLock<Arc<ChainSpec>> = LazyLock::new(|| {
    ChainSpec {
        chain_id: 1,
        hardforks: vec![
            (EthereumHardfork::Frontier, ForkCondition::Block(0)),
            (EthereumHardfork::Homestead, ForkCondition::Block(1_150_000)),
            (EthereumHardfork::Dao, ForkCondition::Block(1_920_000)),
            (EthereumHardfork::Tangerine, ForkCondition::Block(2_463_000)),
            (EthereumHardfork::SpuriousDragon, ForkCondition::Block(2_675_000)),
            (EthereumHardfork::Byzantium, ForkCondition::Block(4_370_000)),
            (EthereumHardfork::Constantinople, ForkCondition::Block(7_280_000)),
            (EthereumHardfork::Petersburg, ForkCondition::Block(7_280_000)),
            (EthereumHardfork::Istanbul, ForkCondition::Block(9_069_000)),
            (EthereumHardfork::MuirGlacier, ForkCondition::Block(9_200_000)),
            (EthereumHardfork::Berlin, ForkCondition::Block(12_244_000)),
            (EthereumHardfork::London, ForkCondition::Block(12_965_000)),
            (EthereumHardfork::ArrowGlacier, ForkCondition::Block(13_773_000)),
            (EthereumHardfork::GrayGlacier, ForkCondition::Block(15_050_000)),
            (EthereumHardfork::Paris, ForkCondition::Block(15_537_394)),
            (EthereumHardfork::Shanghai, ForkCondition::Timestamp(1_681_338_455)),
            (EthereumHardfork::Cancun, ForkCondition::Timestamp(1_710_338_135)),
            (EthereumHardfork::Prague, ForkCondition::Timestamp(1_746_612_311)),
            (EthereumHardfork::Osaka, ForkCondition::Timestamp(1_764_798_551)),
        ],
    }
    .into()
});

/// An Ethereum chain specification.
///
/// Only the parts that decide which validation rules apply to a block are modelled: the chain id
/// and the activation condition of every hardfork.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSpec {
    /// The chain ID
    pub chain_id: u64,
    /// The active hard forks and their activation conditions, in activation order.
    pub hardforks: Vec<(EthereumHardfork, ForkCondition)>,
}

impl ChainSpec {
    /// Returns a [`ChainSpecBuilder`] to help build custom specs.
    pub fn builder() -> ChainSpecBuilder {
        ChainSpecBuilder::default()
    }

    /// Returns the activation condition of the given fork, [`ForkCondition::Never`] if the fork
    /// is not scheduled.
    pub fn fork(&self, fork: EthereumHardfork) -> ForkCondition {
        self.hardforks
            .iter()
            .find_map(|(f, condition)| (*f == fork).then_some(*condition))
            .unwrap_or_default()
    }

    /// Convenience method to check if a fork is active at a given block number.
    pub fn is_fork_active_at_block(&self, fork: EthereumHardfork, block_number: BlockNumber) -> bool {
        self.fork(fork).active_at_block(block_number)
    }

    /// Convenience method to check if a fork is active at a given timestamp.
    pub fn is_fork_active_at_timestamp(&self, fork: EthereumHardfork, timestamp: u64) -> bool {
        self.fork(fork).active_at_timestamp(timestamp)
    }

    /// Convenience method to check if [`EthereumHardfork::Osaka`] is active at a given timestamp.
    pub fn is_osaka_active_at_timestamp(&self, timestamp: u64) -> bool {
        self.is_fork_active_at_timestamp(EthereumHardfork::Osaka, timestamp)
    }

    /// Returns the latest fork active for a block with the given number and timestamp.
    pub fn hardfork_at(&self, number: BlockNumber, timestamp: u64) -> Option<EthereumHardfork> {
        self.hardforks
            .iter()
            .filter(|(_, condition)| condition.active_at(number, timestamp))
            .map(|(fork, _)| *fork)
            .max()
    }

    /// Returns the maximum RLP encoded block size for a block with the given number and
    /// timestamp, `None` while no fork bounding the block size is active.
    pub fn max_rlp_block_size_at(&self, number: BlockNumber, timestamp: u64) -> Option<usize> {
        self.fork(EthereumHardfork::Osaka).active_at(number, timestamp).then_some(MAX_RLP_BLOCK_SIZE)
    }
}

/// A helper to build custom chain specs
#[derive(Debug, Default, Clone)]
pub struct ChainSpecBuilder {
    chain_id: Option<u64>,
    hardforks: Vec<(EthereumHardfork, ForkCondition)>,
}

impl ChainSpecBuilder {
    /// Construct a new builder from the mainnet chain spec.
    pub fn mainnet() -> Self {
        Self { chain_id: Some(MAINNET.chain_id), hardforks: MAINNET.hardforks.clone() }
    }

    /// Set the chain ID
    pub const fn chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    /// Add the given fork with the given activation condition to the spec.
    pub fn with_fork(mut self, fork: EthereumHardfork, condition: ForkCondition) -> Self {
        if let Some(entry) = self.hardforks.iter_mut().find(|(f, _)| *f == fork) {
            entry.1 = condition;
        } else {
            self.hardforks.push((fork, condition));
            self.hardforks.sort_by_key(|(f, _)| *f);
        }
        self
    }

    /// Remove the given fork from the spec.
    pub fn without_fork(mut self, fork: EthereumHardfork) -> Self {
        self.hardforks.retain(|(f, _)| *f != fork);
        self
    }

    /// Enable Frontier at genesis.
    pub fn frontier_activated(self) -> Self {
        self.with_fork(EthereumHardfork::Frontier, ForkCondition::Block(0))
    }

    /// Enable every fork up to and including Prague at genesis.
    pub fn prague_activated(mut self) -> Self {
        for fork in EthereumHardfork::ALL {
            if fork == EthereumHardfork::Osaka {
                break
            }
            let condition = if fork.is_timestamp_based() {
                ForkCondition::Timestamp(0)
            } else {
                ForkCondition::Block(0)
            };
            self = self.with_fork(fork, condition);
        }
        self
    }

    /// Enable every fork up to and including Osaka at genesis.
    pub fn osaka_activated(self) -> Self {
        self.prague_activated().with_fork(EthereumHardfork::Osaka, ForkCondition::Timestamp(0))
    }

    /// Build the resulting [`ChainSpec`].
    ///
    /// # Panics
    ///
    /// This function panics if the chain ID was not set.
    pub fn build(self) -> ChainSpec {
        ChainSpec {
            chain_id: self.chain_id.expect("The chain ID is required"),
            hardforks: self.hardforks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mainnet_osaka_is_timestamp_gated() {
        let osaka = MAINNET.fork(EthereumHardfork::Osaka);
        let activation = osaka.as_timestamp().unwrap();

        assert_eq!(MAINNET.max_rlp_block_size_at(23_000_000, activation - 1), None);
        assert_eq!(MAINNET.max_rlp_block_size_at(23_000_000, activation), Some(8_388_608));
        assert!(MAINNET.is_osaka_active_at_timestamp(activation));
    }

    #[test]
    fn hardfork_at() {
        assert_eq!(MAINNET.hardfork_at(0, 0), Some(EthereumHardfork::Frontier));
        assert_eq!(MAINNET.hardfork_at(12_965_000, 0), Some(EthereumHardfork::London));
        assert_eq!(
            MAINNET.hardfork_at(17_034_870, 1_681_338_455),
            Some(EthereumHardfork::Shanghai)
        );
    }

    #[test]
    fn builder_presets() {
        let frontier = ChainSpec::builder().chain_id(1337).frontier_activated().build();
        assert_eq!(frontier.max_rlp_block_size_at(u64::MAX, u64::MAX), None);
        assert_eq!(frontier.fork(EthereumHardfork::London), ForkCondition::Never);

        let osaka = ChainSpec::builder().chain_id(1337).osaka_activated().build();
        assert_eq!(osaka.max_rlp_block_size_at(0, 0), Some(MAX_RLP_BLOCK_SIZE));
        assert_eq!(osaka.hardfork_at(0, 0), Some(EthereumHardfork::Osaka));
        assert_eq!(osaka.hardforks.len(), EthereumHardfork::ALL.len());

        let without = ChainSpecBuilder::mainnet().without_fork(EthereumHardfork::Osaka).build();
        assert_eq!(without.max_rlp_block_size_at(u64::MAX, u64::MAX), None);
    }
}
