//! Ethereum protocol-related constants

use alloy_primitives::{b256, B256};

/// Root hash of an empty trie: `keccak256(rlp(""))`.
pub const EMPTY_ROOT_HASH: B256 =
    b256!("56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421");

/// Ommer root of an empty list: `keccak256(rlp([]))`.
pub const EMPTY_OMMER_ROOT_HASH: B256 =
    b256!("1dcc4de8dec75d7aab85b567b6ccd41ad312451b948a7413f0a142fd40d49347");

/// The maximum size of the header extra data field.
pub const MAXIMUM_EXTRA_DATA_SIZE: usize = 32;

/// Absolute upper bound of an execution block, [EIP-7934].
///
/// [EIP-7934]: https://eips.ethereum.org/EIPS/eip-7934
pub const MAX_BLOCK_SIZE: usize = 10_485_760;

/// Space reserved below [`MAX_BLOCK_SIZE`] for the consensus layer wrapper.
pub const BLOCK_SIZE_SAFETY_MARGIN: usize = 2_097_152;

/// Maximum RLP-encoded size of an execution block once [EIP-7934] is active.
///
/// [EIP-7934]: https://eips.ethereum.org/EIPS/eip-7934
pub const MAX_RLP_BLOCK_SIZE: usize = MAX_BLOCK_SIZE - BLOCK_SIZE_SAFETY_MARGIN;
