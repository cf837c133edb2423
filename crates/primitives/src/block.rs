use crate::{Header, SealedHeader};
use alloy_primitives::{Address, BlockHash, Bytes, B256};
use alloy_rlp::{length_of_length, BufMut, Decodable, Encodable, RlpDecodable, RlpEncodable};
use std::ops::Deref;

/// Withdrawal represents a validator withdrawal from the consensus layer.
///
/// See [EIP-4895](https://eips.ethereum.org/EIPS/eip-4895).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, RlpEncodable, RlpDecodable)]
pub struct Withdrawal {
    /// Monotonically increasing identifier issued by consensus layer.
    pub index: u64,
    /// Index of validator associated with withdrawal.
    pub validator_index: u64,
    /// Target address for withdrawn ether.
    pub address: Address,
    /// Value of the withdrawal in gwei.
    pub amount: u64,
}

/// The body of a block: everything the header commits to.
///
/// Transactions are kept as their canonical encoded envelopes, decoding them is the business of
/// the executor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlockBody {
    /// Encoded transaction envelopes in this block.
    pub transactions: Vec<Bytes>,
    /// Ommer/uncle headers.
    pub ommers: Vec<Header>,
    /// Block withdrawals.
    pub withdrawals: Option<Vec<Withdrawal>>,
}

impl BlockBody {
    /// Calculates the ommers root committed to by [`Header::ommers_hash`].
    pub fn calculate_ommers_root(&self) -> B256 {
        crate::proofs::calculate_ommers_root(&self.ommers)
    }

    fn payload_length(&self, header: &Header) -> usize {
        let mut length = header.length();
        length += self.transactions.length();
        length += self.ommers.length();
        if let Some(withdrawals) = &self.withdrawals {
            length += withdrawals.length();
        }
        length
    }

    fn encode_with_header(&self, header: &Header, out: &mut dyn BufMut) {
        alloy_rlp::Header { list: true, payload_length: self.payload_length(header) }.encode(out);
        header.encode(out);
        self.transactions.encode(out);
        self.ommers.encode(out);
        if let Some(withdrawals) = &self.withdrawals {
            withdrawals.encode(out);
        }
    }

    fn encoded_length_with_header(&self, header: &Header) -> usize {
        let payload_length = self.payload_length(header);
        payload_length + length_of_length(payload_length)
    }
}

/// Ethereum full block.
///
/// Withdrawals can be optionally included at the end of the RLP encoded message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
    /// Block header.
    pub header: Header,
    /// Block body.
    pub body: BlockBody,
}

impl Block {
    /// Calculate the header hash and seal the block so that it can't be changed.
    pub fn seal_slow(self) -> SealedBlock {
        SealedBlock { header: self.header.seal_slow(), body: self.body }
    }

    /// Seal the block with a known hash.
    ///
    /// WARNING: This method does not perform validation whether the hash is correct.
    pub fn seal(self, hash: B256) -> SealedBlock {
        SealedBlock { header: self.header.seal(hash), body: self.body }
    }
}

impl Encodable for Block {
    fn encode(&self, out: &mut dyn BufMut) {
        self.body.encode_with_header(&self.header, out)
    }

    fn length(&self) -> usize {
        self.body.encoded_length_with_header(&self.header)
    }
}

impl Decodable for Block {
    fn decode(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        let rlp_head = alloy_rlp::Header::decode(buf)?;
        if !rlp_head.list {
            return Err(alloy_rlp::Error::UnexpectedString)
        }
        let started_len = buf.len();
        let header = Header::decode(buf)?;
        let transactions = Vec::<Bytes>::decode(buf)?;
        let ommers = Vec::<Header>::decode(buf)?;
        let withdrawals = if started_len - buf.len() < rlp_head.payload_length {
            Some(Vec::<Withdrawal>::decode(buf)?)
        } else {
            None
        };

        let consumed = started_len - buf.len();
        if consumed != rlp_head.payload_length {
            return Err(alloy_rlp::Error::ListLengthMismatch {
                expected: rlp_head.payload_length,
                got: consumed,
            })
        }

        Ok(Self { header, body: BlockBody { transactions, ommers, withdrawals } })
    }
}

/// Sealed Ethereum full block.
///
/// The block hash is the hash of the header; it is computed once when the block is sealed and
/// identifies the block everywhere else in the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SealedBlock {
    /// Locked block header.
    pub header: SealedHeader,
    /// Block body.
    pub body: BlockBody,
}

impl SealedBlock {
    /// Create a new sealed block instance using the sealed header and block body.
    #[inline]
    pub const fn new(header: SealedHeader, body: BlockBody) -> Self {
        Self { header, body }
    }

    /// Header hash.
    #[inline]
    pub const fn hash(&self) -> BlockHash {
        self.header.hash()
    }

    /// Returns the sealed header.
    #[inline]
    pub const fn sealed_header(&self) -> &SealedHeader {
        &self.header
    }

    /// Splits the sealed block into underlying components
    pub fn split(self) -> (SealedHeader, BlockBody) {
        (self.header, self.body)
    }

    /// Unseal the block
    pub fn unseal(self) -> Block {
        Block { header: self.header.unseal(), body: self.body }
    }

    /// Returns the length of the RLP encoded block, which is what the block size limits are
    /// measured against.
    pub fn rlp_length(&self) -> usize {
        self.body.encoded_length_with_header(self.header.header())
    }
}

impl Deref for SealedBlock {
    type Target = SealedHeader;

    fn deref(&self) -> &Self::Target {
        &self.header
    }
}

impl Encodable for SealedBlock {
    fn encode(&self, out: &mut dyn BufMut) {
        self.body.encode_with_header(self.header.header(), out)
    }

    fn length(&self) -> usize {
        self.rlp_length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{EMPTY_OMMER_ROOT_HASH, EMPTY_ROOT_HASH};

    fn block() -> Block {
        Block {
            header: Header { number: 1, gas_limit: 30_000_000, ..Default::default() },
            body: BlockBody {
                transactions: vec![Bytes::from_static(&[0x02, 0xc0]), Bytes::from(vec![7u8; 300])],
                ommers: vec![],
                withdrawals: None,
            },
        }
    }

    #[test]
    fn block_rlp_roundtrip() {
        let with_withdrawals = {
            let mut block = block();
            block.header.withdrawals_root = Some(EMPTY_ROOT_HASH);
            block.header.base_fee_per_gas = Some(1);
            block.body.withdrawals = Some(vec![Withdrawal {
                index: 1,
                validator_index: 2,
                address: Address::repeat_byte(3),
                amount: 4,
            }]);
            block
        };

        for block in [block(), with_withdrawals] {
            let encoded = alloy_rlp::encode(&block);
            assert_eq!(encoded.len(), block.length());
            assert_eq!(Block::decode(&mut encoded.as_slice()).unwrap(), block);
        }
    }

    #[test]
    fn sealed_block_length_matches_unsealed() {
        let block = block();
        let sealed = block.clone().seal_slow();
        assert_eq!(sealed.rlp_length(), alloy_rlp::encode(&block).len());
        assert_eq!(sealed.hash(), block.header.hash_slow());
    }

    #[test]
    fn rlp_length_grows_with_transactions() {
        let small = block().seal_slow();
        let mut large = block();
        large.body.transactions.push(Bytes::from(vec![0u8; 1024]));
        assert!(large.seal_slow().rlp_length() > small.rlp_length() + 1024);
    }

    #[test]
    fn empty_ommers_root() {
        assert_eq!(BlockBody::default().calculate_ommers_root(), EMPTY_OMMER_ROOT_HASH);
    }
}
