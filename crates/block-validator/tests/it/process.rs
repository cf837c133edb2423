use crate::Harness;
use assay_bad_blocks::BadBlockReason;
use assay_block_validator::{
    BlockValidatorBuilder, HeaderValidationMode, ProcessingResult, RuleSet, ValidateOptions,
};
use assay_consensus::{BaselineBodyValidator, BaselineHeaderValidator, ConsensusError};
use assay_evm::{BlockExecutionError, BlockExecutionOutput, BlockProcessingResult};
use assay_primitives::{constants::EMPTY_ROOT_HASH, GotExpected, B256};
use assay_storage_api::errors::ProviderError;
use assay_testing_utils::{
    generators::{block_with_min_size, random_block, with_state_root},
    MockBlockProcessor, MockBodyValidator, MockHeaderValidator, ProcessorResponse,
};
use assert_matches::assert_matches;

const NO_RECORD: ValidateOptions = ValidateOptions::new().with_record_bad_block(false);

#[test]
fn valid_block_is_processed_and_persisted() {
    let mut harness = Harness::new();
    let block = harness.block();

    let result = harness.validate(&block);

    let output = result.output().expect("block is valid");
    assert_eq!(output.state_root, block.state_root);
    assert!(result.error_message().is_none());
    assert_eq!(harness.processor.calls(), vec![(block.hash(), harness.genesis.state_root)]);
    assert_eq!(harness.world_state.requests(), vec![(harness.genesis.hash(), true)]);
    assert_eq!(harness.world_state.persisted(), vec![block.header.clone()]);
    assert_eq!(
        harness.headers.calls(),
        vec![(block.hash(), HeaderValidationMode::DetachedOnly)]
    );
    assert_eq!(harness.bodies.full_calls().len(), 1);
    assert_eq!(harness.bad_blocks().bad_block_count(), 0);
}

#[test]
fn persist_flag_only_controls_commit() {
    let mut harness = Harness::new();
    let block = harness.block();

    let result = harness.validate_with(&block, ValidateOptions::new().with_persist(false));

    assert!(result.is_successful());
    assert_eq!(harness.world_state.requests(), vec![(harness.genesis.hash(), false)]);
    assert!(harness.world_state.persisted().is_empty());
}

#[test]
fn missing_parent_is_not_quarantined() {
    let mut harness = Harness::new();
    let block = harness.block();
    harness.chain.remove(&harness.genesis.hash());

    let result = harness.validate(&block);

    assert_matches!(&result, ProcessingResult::Failed { message }
        if message == &format!("Parent block with hash {} not present", harness.genesis.hash()));
    assert!(result.caused_by().is_none());
    assert!(harness.headers.calls().is_empty());
    assert_eq!(harness.bad_blocks().bad_block_count(), 0);
}

#[test]
fn header_failure_is_quarantined() {
    for mode in [HeaderValidationMode::DetachedOnly, HeaderValidationMode::Full] {
        let mut harness = Harness::new();
        let block = harness.block();
        harness.headers.fail_for(
            block.hash(),
            ConsensusError::TimestampIsInPast { parent_timestamp: 10, timestamp: 10 },
        );

        let result = harness.validator.validate_and_process_block(
            &harness.ctx,
            &block,
            mode,
            HeaderValidationMode::DetachedOnly,
            ValidateOptions::default(),
        );

        assert!(result.is_failed());
        let message = result.error_message().unwrap();
        assert!(message.contains(&format!("Header validation failed ({mode})")), "{message}");
        assert!(message.contains("timestamp 10 is in the past"), "{message}");
        assert!(harness.processor.calls().is_empty());

        let entry = harness.bad_blocks().get_bad_block(&block.hash()).expect("recorded");
        assert_eq!(entry.block(), &block);
        assert_eq!(entry.cause().reason(), BadBlockReason::ValidationFailure);
        assert_eq!(
            harness.bad_blocks().latest_valid_hash(&block.hash()),
            Some(harness.genesis.hash())
        );
    }
}

#[test]
fn header_failure_respects_record_flag() {
    let mut harness = Harness::new();
    let block = harness.block();
    harness.headers.fail_for(block.hash(), ConsensusError::ExtraDataExceedsMax { len: 33 });

    let result = harness.validate_with(&block, NO_RECORD);

    assert!(result.is_failed());
    assert!(!harness.bad_blocks().is_bad(&block.hash()));
}

#[test]
fn header_engine_missing_ancestor_is_not_quarantined() {
    let mut harness = Harness::new();
    let block = harness.block();
    harness.headers.fail_for(block.hash(), ConsensusError::ParentUnknown { hash: B256::ZERO });

    let result = harness.validate(&block);

    assert_matches!(result, ProcessingResult::Failed { .. });
    assert_eq!(harness.bad_blocks().bad_block_count(), 0);
}

#[test]
fn header_engine_fault_is_exceptional() {
    let mut harness = Harness::new();
    let block = harness.block();
    let fault = ProviderError::TrieNodeMissing(B256::repeat_byte(0xee));
    harness.headers.fail_for(block.hash(), fault.clone().into());

    let result = harness.validate(&block);

    assert_eq!(result.caused_by(), Some(&BlockExecutionError::Provider(fault.clone())));
    assert!(result.error_message().unwrap().contains(&fault.to_string()));
    assert_eq!(harness.bad_blocks().bad_block_count(), 0);
}

#[test]
fn missing_world_state_is_not_quarantined() {
    let mut harness = Harness::new();
    let block = harness.block();
    harness.world_state.remove_state(&harness.genesis);

    let result = harness.validate(&block);

    assert_matches!(result, ProcessingResult::Failed { ref message } if message == &format!(
        "Unable to process block because parent world state {} is not available",
        harness.genesis.state_root
    ));
    assert!(harness.processor.calls().is_empty());
    assert_eq!(harness.bad_blocks().bad_block_count(), 0);
}

#[test]
fn failed_transition_is_quarantined() {
    let mut harness = Harness::new();
    let block = harness.block();
    harness
        .processor
        .respond(block.hash(), ProcessorResponse::Result(BlockProcessingResult::Failed));

    let result = harness.validate(&block);

    assert_eq!(result.error_message(), Some("processing failed"));
    assert!(result.caused_by().is_none());
    let entry = harness.bad_blocks().get_bad_block(&block.hash()).expect("recorded");
    assert_eq!(entry.cause().description(), "processing failed");
    assert!(harness.bodies.full_calls().is_empty());
    assert!(harness.world_state.persisted().is_empty());
}

#[test]
fn failed_transition_respects_record_flag() {
    let mut harness = Harness::new();
    let block = harness.block();
    harness
        .processor
        .respond(block.hash(), ProcessorResponse::Result(BlockProcessingResult::Failed));

    let result = harness.validate_with(&block, NO_RECORD);

    assert_eq!(result.error_message(), Some("processing failed"));
    assert!(result.caused_by().is_none());
    assert_eq!(harness.bad_blocks().bad_block_count(), 0);
}

#[test]
fn transition_failed_with_cause_is_exceptional_and_quarantined() {
    let mut harness = Harness::new();
    let block = harness.block();
    let cause = BlockExecutionError::msg("transaction nonce too low");
    harness.processor.respond(
        block.hash(),
        ProcessorResponse::Result(BlockProcessingResult::FailedWithCause(cause.clone())),
    );

    let result = harness.validate(&block);

    assert_eq!(result.caused_by(), Some(&cause));
    assert!(result.error_message().unwrap().contains("transaction nonce too low"));
    let entry = harness.bad_blocks().get_bad_block(&block.hash()).expect("recorded");
    let fault = entry.cause().fault().expect("fault is kept");
    assert_eq!(fault.downcast_ref::<BlockExecutionError>(), Some(&cause));

    let mut harness = Harness::new();
    let block = harness.block();
    harness.processor.respond(
        block.hash(),
        ProcessorResponse::Result(BlockProcessingResult::FailedWithCause(cause.clone())),
    );
    let result = harness.validate_with(&block, NO_RECORD);
    assert_eq!(result.caused_by(), Some(&cause));
    assert_eq!(harness.bad_blocks().bad_block_count(), 0);
}

#[test]
fn transition_failed_with_storage_cause_is_not_quarantined() {
    let mut harness = Harness::new();
    let block = harness.block();
    let cause = BlockExecutionError::Provider(ProviderError::database("read failed"));
    harness.processor.respond(
        block.hash(),
        ProcessorResponse::Result(BlockProcessingResult::FailedWithCause(cause.clone())),
    );

    let result = harness.validate(&block);

    assert_eq!(result.caused_by(), Some(&cause));
    assert_eq!(harness.bad_blocks().bad_block_count(), 0);
}

#[test]
fn body_failure_is_quarantined() {
    let mut harness = Harness::new();
    let block = harness.block();
    harness.bodies.fail_full_for(
        block.hash(),
        ConsensusError::BlockGasUsed { gas: GotExpected { got: 1, expected: 2 } },
    );

    let result = harness.validate(&block);

    assert!(result.is_failed());
    assert!(result.caused_by().is_none());
    assert!(result
        .error_message()
        .unwrap()
        .starts_with("failed to validate output of imported block"));
    assert!(harness.bad_blocks().is_bad(&block.hash()));
    assert!(harness.world_state.persisted().is_empty());
}

#[test]
fn state_root_mismatch_is_detected_after_execution() {
    let headers = MockHeaderValidator::default();
    let bodies = MockBodyValidator::default();
    let processor = MockBlockProcessor::default();
    let rules = RuleSet::new(headers.clone(), BaselineBodyValidator::new(), processor.clone());
    let mut harness =
        Harness::with_rules(rules, BlockValidatorBuilder::frontier, headers, bodies, processor);

    let good = harness.block();
    let inspect_only = ValidateOptions::new().with_persist(false);
    assert!(harness.validate_with(&good, inspect_only).is_successful());

    // executing the mutated block still produces the root of the good block
    let mutated = with_state_root(&good, EMPTY_ROOT_HASH);
    harness.processor.execute_with(
        mutated.hash(),
        BlockExecutionOutput { state_root: good.state_root, ..Default::default() },
    );

    let result = harness.validate(&mutated);

    assert!(!result.is_successful());
    assert!(result
        .error_message()
        .unwrap()
        .contains("failed to validate output of imported block: mismatched block state root"));
    let bad: Vec<_> = harness.bad_blocks().bad_blocks().iter().map(|entry| entry.hash()).collect();
    assert_eq!(bad, vec![mutated.hash()]);
}

#[test]
fn infrastructure_faults_are_never_quarantined() {
    let fault = ProviderError::database("database closed");

    for record_bad_block in [true, false] {
        let options = ValidateOptions::new().with_record_bad_block(record_bad_block);

        // parent lookup
        let mut harness = Harness::new();
        let block = harness.block();
        harness.chain.fail_with(fault.clone());
        let result = harness.validate_with(&block, options);
        assert_eq!(result.caused_by(), Some(&BlockExecutionError::Provider(fault.clone())));
        assert!(result.error_message().unwrap().contains("database closed"));
        assert_eq!(harness.bad_blocks().bad_block_count(), 0);

        // world-state resolution
        let mut harness = Harness::new();
        let block = harness.block();
        harness.world_state.fail_with(fault.clone());
        let result = harness.validate_with(&block, options);
        assert_eq!(result.caused_by(), Some(&BlockExecutionError::Provider(fault.clone())));
        assert!(result.error_message().unwrap().contains("database closed"));
        assert!(harness.processor.calls().is_empty());
        assert_eq!(harness.bad_blocks().bad_block_count(), 0);

        // execution
        let mut harness = Harness::new();
        let block = harness.block();
        harness.processor.respond(block.hash(), ProcessorResponse::Fault(fault.clone()));
        let result = harness.validate_with(&block, options);
        assert_eq!(result.caused_by(), Some(&BlockExecutionError::Provider(fault.clone())));
        assert!(result.error_message().unwrap().contains("database closed"));
        assert_eq!(harness.bad_blocks().bad_block_count(), 0);

        // persisting the post-state
        let mut harness = Harness::new();
        let block = harness.block();
        harness.world_state.fail_persist_with(fault.clone());
        let result = harness.validate_with(&block, options);
        assert_eq!(result.caused_by(), Some(&BlockExecutionError::Provider(fault.clone())));
        assert_eq!(harness.bad_blocks().bad_block_count(), 0);
    }
}

#[test]
fn oversized_block_is_rejected_before_lookup() {
    let mut harness = Harness::with_validator(|rules| {
        BlockValidatorBuilder::osaka(rules).max_rlp_block_size(Some(1024))
    });
    assert_eq!(harness.validator.max_rlp_block_size(), Some(1024));
    let block = block_with_min_size(&mut harness.rng, &harness.genesis, 2048);
    harness.chain.remove(&harness.genesis.hash());

    let result = harness.validate(&block);

    assert_matches!(&result, ProcessingResult::Failed { message }
        if message.starts_with("block exceeds maximum size"));
    assert!(harness.headers.calls().is_empty());
    assert!(harness.world_state.requests().is_empty());
    assert!(harness.bad_blocks().is_bad(&block.hash()));
}

#[test]
fn oversized_block_never_touches_chain_store() {
    let mut harness = Harness::with_validator(|rules| {
        BlockValidatorBuilder::osaka(rules).max_rlp_block_size(Some(1024))
    });
    let block = block_with_min_size(&mut harness.rng, &harness.genesis, 2048);
    harness.chain.fail_with(ProviderError::database("database closed"));

    let result = harness.validate(&block);

    assert_matches!(&result, ProcessingResult::Failed { message }
        if message.starts_with("block exceeds maximum size"));
    assert_eq!(harness.chain.lookups(), 0);
    assert!(harness.bad_blocks().is_bad(&block.hash()));
    assert_eq!(harness.bad_blocks().latest_valid_hash(&block.hash()), None);
}

#[test]
fn latest_valid_hash_comes_from_resolved_parent() {
    let mut harness = Harness::new();
    let block = harness.block();
    harness.processor.respond(
        block.hash(),
        ProcessorResponse::Result(BlockProcessingResult::Failed),
    );

    let result = harness.validate(&block);

    assert_eq!(result.error_message(), Some("processing failed"));
    // the parent lookup is the only chain access
    assert_eq!(harness.chain.lookups(), 1);
    assert_eq!(
        harness.bad_blocks().latest_valid_hash(&block.hash()),
        Some(harness.genesis.hash())
    );
}

#[test]
fn size_bound_is_inclusive() {
    let mut harness = Harness::new();
    let block = harness.block();
    let size = block.rlp_length();

    let exact = Harness::with_validator(|rules| {
        BlockValidatorBuilder::new(rules).max_rlp_block_size(Some(size))
    });
    exact.chain.insert(harness.genesis.clone());
    exact.world_state.add_state(&harness.genesis);
    assert!(exact.validate(&block).is_successful());

    let smaller = Harness::with_validator(|rules| {
        BlockValidatorBuilder::new(rules).max_rlp_block_size(Some(size - 1))
    });
    let result = smaller.validate_with(&block, NO_RECORD);
    assert!(result.error_message().unwrap().starts_with("block exceeds maximum size"));
    assert_eq!(smaller.bad_blocks().bad_block_count(), 0);
}

#[test]
fn osaka_bound_rejects_large_blocks_only_when_enabled() {
    let mut osaka = Harness::with_validator(BlockValidatorBuilder::osaka);
    let block = block_with_min_size(&mut osaka.rng, &osaka.genesis, 8_388_608);
    let result = osaka.validate(&block);
    assert!(result.error_message().unwrap().starts_with("block exceeds maximum size"));
    assert!(osaka.bad_blocks().is_bad(&block.hash()));

    let frontier = Harness::new();
    frontier.chain.insert(osaka.genesis.clone());
    frontier.world_state.add_state(&osaka.genesis);
    assert!(frontier.validate(&block).is_successful());
}

#[test]
fn validating_twice_is_idempotent() {
    let mut harness = Harness::new();
    let block = harness.block();

    let first = harness.validate_with(&block, ValidateOptions::new().with_persist(false));
    let second = harness.validate_with(&block, ValidateOptions::new().with_persist(false));

    assert!(first.is_successful());
    assert_eq!(first, second);
    assert_eq!(harness.bad_blocks().bad_block_count(), 0);
}

#[test]
fn child_of_bad_block_is_quarantined_as_descendant() {
    let headers = MockHeaderValidator::default();
    let bodies = MockBodyValidator::default();
    let processor = MockBlockProcessor::default();
    let rules = RuleSet::new(BaselineHeaderValidator::new(), bodies.clone(), processor.clone());
    let mut harness =
        Harness::with_rules(rules, BlockValidatorBuilder::frontier, headers, bodies, processor);

    let parent = harness.block();
    harness.chain.insert(parent.header.clone());
    harness.world_state.add_state(&parent.header);
    harness.bad_blocks().add_bad_block(
        &parent,
        assay_bad_blocks::BadBlockCause::from_validation_failure("processing failed"),
    );
    let child = random_block(&mut harness.rng, &parent.header);

    let result = harness.validator.validate_and_process_block(
        &harness.ctx,
        &child,
        HeaderValidationMode::Full,
        HeaderValidationMode::Full,
        ValidateOptions::default(),
    );

    assert!(result.error_message().unwrap().starts_with("Header validation failed (FULL)"));
    let entry = harness.bad_blocks().get_bad_block(&child.hash()).expect("recorded");
    assert_eq!(entry.cause().reason(), BadBlockReason::DescendsFromBadBlock);
    assert_eq!(harness.bad_blocks().latest_valid_hash(&child.hash()), None);
}

#[test]
fn concurrent_validations_record_every_bad_block() {
    let mut harness = Harness::new();
    let invalid: Vec<_> = (0..64).map(|_| harness.block()).collect();
    let valid: Vec<_> = (0..64).map(|_| harness.block()).collect();
    for block in &invalid {
        harness
            .processor
            .respond(block.hash(), ProcessorResponse::Result(BlockProcessingResult::Failed));
    }

    let harness = &harness;
    std::thread::scope(|scope| {
        for (invalid, valid) in invalid.chunks(8).zip(valid.chunks(8)) {
            scope.spawn(move || {
                for (invalid, valid) in invalid.iter().zip(valid) {
                    let options = ValidateOptions::new().with_persist(false);
                    assert!(harness.validate_with(invalid, options).is_failed());
                    assert!(harness.validate_with(valid, options).is_successful());
                }
            });
        }
    });

    assert_eq!(harness.bad_blocks().bad_block_count(), invalid.len());
    for block in &invalid {
        assert!(harness.bad_blocks().is_bad(&block.hash()));
    }
    for block in &valid {
        assert!(!harness.bad_blocks().is_bad(&block.hash()));
    }
}
