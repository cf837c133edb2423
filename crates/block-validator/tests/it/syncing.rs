use crate::Harness;
use assay_block_validator::{BodyValidationMode, HeaderValidationMode, SyncValidationError};
use assay_consensus::ConsensusError;
use assay_primitives::{GotExpected, SealedBlock, B256};
use assay_storage_api::errors::ProviderError;
use assert_matches::assert_matches;

fn validate_for_syncing(
    harness: &Harness,
    block: &SealedBlock,
    body_mode: BodyValidationMode,
) -> Result<bool, SyncValidationError> {
    harness.validator.validate_block_for_syncing(
        &harness.ctx,
        block,
        &block.body.ommers,
        HeaderValidationMode::Full,
        HeaderValidationMode::Full,
        body_mode,
    )
}

#[test]
fn full_body_mode_is_unsupported() {
    let mut harness = Harness::new();
    let block = harness.block();

    assert_matches!(
        validate_for_syncing(&harness, &block, BodyValidationMode::Full),
        Err(SyncValidationError::UnsupportedBodyMode(BodyValidationMode::Full))
    );
    assert!(harness.headers.calls().is_empty());
    assert!(harness.bodies.light_calls().is_empty());
    assert_eq!(harness.bad_blocks().bad_block_count(), 0);
}

#[test]
fn valid_block_passes_light_checks_without_execution() {
    let mut harness = Harness::new();
    let block = harness.block();

    assert_matches!(validate_for_syncing(&harness, &block, BodyValidationMode::Light), Ok(true));
    assert_eq!(harness.headers.calls(), vec![(block.hash(), HeaderValidationMode::Full)]);
    assert_eq!(harness.bodies.light_calls(), vec![block.hash()]);
    assert!(harness.bodies.full_calls().is_empty());
    assert!(harness.processor.calls().is_empty());
    assert!(harness.world_state.requests().is_empty());
}

#[test]
fn unknown_parent_is_not_quarantined() {
    let mut harness = Harness::new();
    let block = harness.block();
    harness.chain.remove(&harness.genesis.hash());

    assert_matches!(validate_for_syncing(&harness, &block, BodyValidationMode::Light), Ok(false));
    assert!(harness.bodies.light_calls().is_empty());
    assert_eq!(harness.bad_blocks().bad_block_count(), 0);
}

#[test]
fn header_failure_is_quarantined() {
    let mut harness = Harness::new();
    let block = harness.block();
    harness.headers.fail_for(
        block.hash(),
        ConsensusError::ParentHashMismatch(GotExpected::new(B256::ZERO, harness.genesis.hash())),
    );

    assert_matches!(validate_for_syncing(&harness, &block, BodyValidationMode::Light), Ok(false));
    let entry = harness.bad_blocks().get_bad_block(&block.hash()).expect("recorded");
    assert!(entry.cause().description().starts_with("Header validation failed (FULL)"));
    assert!(harness.bodies.light_calls().is_empty());
}

#[test]
fn light_body_failure_is_quarantined() {
    let mut harness = Harness::new();
    let block = harness.block();
    harness.bodies.fail_light_for(
        block.hash(),
        ConsensusError::BodyOmmersHashDiff(GotExpected::new(B256::ZERO, block.ommers_hash)),
    );

    assert_matches!(validate_for_syncing(&harness, &block, BodyValidationMode::Light), Ok(false));
    let entry = harness.bad_blocks().get_bad_block(&block.hash()).expect("recorded");
    assert!(entry.cause().description().starts_with("Body validation failed (LIGHT)"));
}

#[test]
fn storage_fault_is_an_error() {
    let mut harness = Harness::new();
    let block = harness.block();
    let fault = ProviderError::database("database closed");
    harness.chain.fail_with(fault.clone());

    assert_eq!(
        validate_for_syncing(&harness, &block, BodyValidationMode::Light),
        Err(SyncValidationError::Provider(fault))
    );
    assert_eq!(harness.bad_blocks().bad_block_count(), 0);
}
