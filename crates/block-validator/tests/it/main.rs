//! Root module for test modules, so that the tests are built into a single binary.
#![allow(missing_docs)]

use assay_bad_blocks::BadBlockManager;
use assay_block_validator::{
    BlockValidator, BlockValidatorBuilder, HeaderValidationMode, ProcessingResult, RuleSet,
    ValidateOptions,
};
use assay_consensus::ProtocolContext;
use assay_primitives::{SealedBlock, SealedHeader};
use assay_testing_utils::{
    generators::{self, random_block, random_header},
    InMemoryChainStore, InMemoryWorldStateProvider, MockBlockProcessor, MockBodyValidator,
    MockHeaderValidator,
};
use rand::rngs::StdRng;
use std::sync::Arc;

mod process;
mod schedule;
mod syncing;

const fn main() {}

/// A validator wired to in-memory collaborators, with a genesis header whose state is available.
struct Harness {
    chain: Arc<InMemoryChainStore>,
    world_state: Arc<InMemoryWorldStateProvider>,
    ctx: ProtocolContext,
    headers: MockHeaderValidator,
    bodies: MockBodyValidator,
    processor: MockBlockProcessor,
    validator: BlockValidator,
    genesis: SealedHeader,
    rng: StdRng,
}

impl Harness {
    fn new() -> Self {
        Self::with_validator(BlockValidatorBuilder::frontier)
    }

    fn with_validator(build: impl FnOnce(RuleSet) -> BlockValidatorBuilder) -> Self {
        let headers = MockHeaderValidator::default();
        let bodies = MockBodyValidator::default();
        let processor = MockBlockProcessor::default();
        let rules = RuleSet::new(headers.clone(), bodies.clone(), processor.clone());
        Self::with_rules(rules, build, headers, bodies, processor)
    }

    fn with_rules(
        rules: RuleSet,
        build: impl FnOnce(RuleSet) -> BlockValidatorBuilder,
        headers: MockHeaderValidator,
        bodies: MockBodyValidator,
        processor: MockBlockProcessor,
    ) -> Self {
        assay_tracing::init_test_tracing();

        let mut rng = generators::rng();
        let genesis = random_header(&mut rng, 0, None);
        let chain = Arc::new(InMemoryChainStore::with_headers([&genesis]));
        let world_state = Arc::new(InMemoryWorldStateProvider::default());
        world_state.add_state(&genesis);
        let ctx = ProtocolContext::new(chain.clone(), world_state.clone(), BadBlockManager::new());

        Self {
            chain,
            world_state,
            ctx,
            headers,
            bodies,
            processor,
            validator: build(rules).build(),
            genesis,
            rng,
        }
    }

    /// Returns a new child of genesis.
    fn block(&mut self) -> SealedBlock {
        random_block(&mut self.rng, &self.genesis)
    }

    fn bad_blocks(&self) -> &BadBlockManager {
        self.ctx.bad_block_manager()
    }

    fn validate(&self, block: &SealedBlock) -> ProcessingResult {
        self.validate_with(block, ValidateOptions::default())
    }

    fn validate_with(&self, block: &SealedBlock, options: ValidateOptions) -> ProcessingResult {
        self.validator.validate_and_process_block(
            &self.ctx,
            block,
            HeaderValidationMode::DetachedOnly,
            HeaderValidationMode::DetachedOnly,
            options,
        )
    }
}
