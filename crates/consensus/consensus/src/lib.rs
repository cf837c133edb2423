//! Consensus protocol functions: the contracts of the header and body rule engines invoked by
//! block validation, the context they run in, and a baseline implementation of both.

#![doc(issue_tracker_base_url = "https://github.com/assay-rs/assay/issues/")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

use assay_execution_types::BlockExecutionOutput;
use assay_primitives::{Header, SealedBlock, SealedHeader};
use std::fmt::Debug;

mod baseline;
pub use baseline::{BaselineBodyValidator, BaselineHeaderValidator};

mod context;
pub use context::ProtocolContext;

mod error;
pub use error::ConsensusError;

mod mode;
pub use mode::{BodyValidationMode, HeaderValidationMode};

pub mod validation;

/// Validates headers.
#[auto_impl::auto_impl(&, Arc)]
pub trait HeaderValidator: Debug + Send + Sync {
    /// Validates a header against its already resolved parent.
    ///
    /// `mode` selects how strict the validation is, [`HeaderValidationMode::None`] is expected to
    /// accept any header.
    fn validate_header_against_parent(
        &self,
        header: &SealedHeader,
        parent: &SealedHeader,
        ctx: &ProtocolContext,
        mode: HeaderValidationMode,
    ) -> Result<(), ConsensusError>;

    /// Validates a header, resolving whatever ancestors the rules need through the chain store of
    /// `ctx`.
    ///
    /// Implementations report an ancestor that is not available locally as
    /// [`ConsensusError::ParentUnknown`].
    fn validate_header(
        &self,
        header: &SealedHeader,
        ctx: &ProtocolContext,
        mode: HeaderValidationMode,
    ) -> Result<(), ConsensusError>;
}

/// Validates block bodies.
#[auto_impl::auto_impl(&, Arc)]
pub trait BodyValidator: Debug + Send + Sync {
    /// Validates the body of an executed block, reconciling the commitments in the header with
    /// the outputs of the state transition.
    fn validate_body(
        &self,
        ctx: &ProtocolContext,
        block: &SealedBlock,
        output: &BlockExecutionOutput,
        parent: &SealedHeader,
        ommer_mode: HeaderValidationMode,
        header_mode: HeaderValidationMode,
    ) -> Result<(), ConsensusError>;

    /// Validates the parts of a body that can be checked without executing it.
    ///
    /// `ommers` are the ommer headers delivered alongside the block.
    fn validate_body_light(
        &self,
        ctx: &ProtocolContext,
        block: &SealedBlock,
        ommers: &[Header],
        ommer_mode: HeaderValidationMode,
    ) -> Result<(), ConsensusError>;
}
