//! Block validation: the ordered decision procedure that checks a candidate block against the
//! header rules, applies its state transition, reconciles the outputs with the body rules and
//! quarantines blocks that are proven invalid.
//!
//! The entry points are [`BlockValidator::validate_and_process_block`] for full import and
//! [`BlockValidator::validate_block_for_syncing`] for the cheap pre-admission check. A
//! [`BlockValidator`] is bound to the rule engines of one fork segment, a [`ProtocolSchedule`]
//! selects the right one for a given header.

#![doc(issue_tracker_base_url = "https://github.com/assay-rs/assay/issues/")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod builder;
pub use builder::{BlockValidatorBuilder, RuleSet};

mod error;
pub use error::SyncValidationError;

mod metrics;

mod options;
pub use options::ValidateOptions;

mod result;
pub use result::ProcessingResult;

mod schedule;
pub use schedule::ProtocolSchedule;

mod validator;
pub use validator::BlockValidator;

// Re-export the modes, they are part of every call.
pub use assay_consensus::{BodyValidationMode, HeaderValidationMode};
