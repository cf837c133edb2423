use assay_bad_blocks::BadBlockManager;
use assay_block_validator::{HeaderValidationMode, ProtocolSchedule, RuleSet, ValidateOptions};
use assay_chainspec::{ChainSpecBuilder, EthereumHardfork, ForkCondition};
use assay_consensus::ProtocolContext;
use assay_primitives::constants::MAX_RLP_BLOCK_SIZE;
use assay_testing_utils::{
    generators::{self, block_with_min_size, random_block, random_header},
    InMemoryChainStore, InMemoryWorldStateProvider, MockBlockProcessor,
};
use std::sync::Arc;

#[test]
fn schedule_applies_size_bound_from_osaka() {
    assay_tracing::init_test_tracing();
    let mut rng = generators::rng();

    // Osaka activates at timestamp 1000
    let spec = ChainSpecBuilder::mainnet()
        .prague_activated()
        .with_fork(EthereumHardfork::Osaka, ForkCondition::Timestamp(1000))
        .build();
    let rules = RuleSet::baseline(MockBlockProcessor::default());
    let schedule = ProtocolSchedule::new(Arc::new(spec), rules);

    let mut parent = random_header(&mut rng, 0, None).unseal();
    parent.timestamp = 1000 - 100;
    let parent = parent.seal_slow();

    let chain = Arc::new(InMemoryChainStore::with_headers([&parent]));
    let world_state = Arc::new(InMemoryWorldStateProvider::default());
    world_state.add_state(&parent);
    let ctx = ProtocolContext::new(chain, world_state, BadBlockManager::new());

    let small = random_block(&mut rng, &parent);
    assert!(small.timestamp < 1000);
    let validator = schedule.validator_for(&small.header);
    assert_eq!(validator.max_rlp_block_size(), None);
    assert!(validator
        .validate_and_process_block(
            &ctx,
            &small,
            HeaderValidationMode::Full,
            HeaderValidationMode::Full,
            ValidateOptions::default(),
        )
        .is_successful());

    let mut large = block_with_min_size(&mut rng, &parent, MAX_RLP_BLOCK_SIZE).unseal();
    large.header.timestamp = 1000;
    let large = large.seal_slow();
    let validator = schedule.validator_for(&large.header);
    assert_eq!(validator.max_rlp_block_size(), Some(MAX_RLP_BLOCK_SIZE));
    let result = validator.validate_and_process_block(
        &ctx,
        &large,
        HeaderValidationMode::Full,
        HeaderValidationMode::Full,
        ValidateOptions::default(),
    );
    assert!(result.error_message().unwrap().starts_with("block exceeds maximum size"));
    assert!(ctx.bad_block_manager().is_bad(&large.hash()));
}
