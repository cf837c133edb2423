//! Bad-block bookkeeping.
//!
//! A block lands in the [`BadBlockManager`] once it has been conclusively shown to violate the
//! protocol. Blocks that merely could not be validated (missing parent, missing state, storage
//! faults) are never recorded here.

#![doc(issue_tracker_base_url = "https://github.com/assay-rs/assay/issues/")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod cause;
pub use cause::{BadBlockCause, BadBlockReason};

mod hook;
pub use hook::BadBlockHook;

mod manager;
pub use manager::{BadBlockEntry, BadBlockManager, BadHeaderEntry};
