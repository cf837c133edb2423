//! The chain specification: which hardfork is active when, and the validation parameters each
//! fork introduces.

#![doc(issue_tracker_base_url = "https://github.com/assay-rs/assay/issues/")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod forkcondition;
pub use forkcondition::ForkCondition;

mod hardfork;
pub use hardfork::EthereumHardfork;

mod spec;
pub use spec::{ChainSpec, ChainSpecBuilder, MAINNET};
