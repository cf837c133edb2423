//! Generators for different data structures like block headers and blocks.

use assay_primitives::{
    Block, BlockBody, BlockHash, Bytes, Header, SealedBlock, SealedHeader, B256, B64, U256,
};
use rand::{distributions::uniform::SampleRange, rngs::StdRng, Rng, SeedableRng};

/// Returns a random number generator that can be seeded using the `SEED` environment variable.
///
/// If `SEED` is not set, a random seed is used.
pub fn rng() -> StdRng {
    if let Ok(seed) = std::env::var("SEED") {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        std::hash::Hash::hash(&seed, &mut hasher);
        StdRng::seed_from_u64(std::hash::Hasher::finish(&hasher))
    } else {
        StdRng::from_rng(rand::thread_rng()).expect("could not build rng")
    }
}

/// Generates a range of random [`SealedHeader`]s.
///
/// The parent hash of the first header in the result will be equal to `head`, every following
/// header links to the previous one and has a strictly greater timestamp.
pub fn random_header_range<R: Rng>(
    rng: &mut R,
    range: std::ops::Range<u64>,
    head: BlockHash,
) -> Vec<SealedHeader> {
    let mut headers: Vec<SealedHeader> =
        Vec::with_capacity(range.end.saturating_sub(range.start) as usize);
    for number in range {
        let parent = headers.last().map(|header| header.hash()).unwrap_or(head);
        headers.push(random_header(rng, number, Some(parent)));
    }
    headers
}

/// Generate a random [`SealedHeader`].
///
/// The header is assumed to not be correct if validated.
pub fn random_header<R: Rng>(rng: &mut R, number: u64, parent: Option<BlockHash>) -> SealedHeader {
    Header {
        number,
        nonce: B64::from(rng.gen::<[u8; 8]>()),
        difficulty: U256::from(rng.gen::<u32>()),
        parent_hash: parent.unwrap_or_default(),
        state_root: B256::from(rng.gen::<[u8; 32]>()),
        gas_limit: 30_000_000,
        timestamp: number * 12,
        ..Default::default()
    }
    .seal_slow()
}

/// Generate a header that is a valid child of `parent` under the baseline header rules.
pub fn random_child_header<R: Rng>(rng: &mut R, parent: &SealedHeader) -> SealedHeader {
    Header {
        number: parent.number + 1,
        parent_hash: parent.hash(),
        timestamp: parent.timestamp + rng.gen_range(1..=24),
        gas_limit: parent.gas_limit,
        state_root: B256::from(rng.gen::<[u8; 32]>()),
        ..Default::default()
    }
    .seal_slow()
}

/// Generate random opaque transaction envelopes.
pub fn random_transactions<R: Rng>(rng: &mut R, count: impl SampleRange<usize>) -> Vec<Bytes> {
    let count = rng.gen_range(count);
    (0..count)
        .map(|_| {
            let len = rng.gen_range(64..256);
            let mut tx = vec![0x02];
            tx.extend((0..len).map(|_| rng.gen::<u8>()));
            Bytes::from(tx)
        })
        .collect()
}

/// Generate a random block that is a valid child of `parent` under the baseline rules.
///
/// The block carries a few random transactions and no ommers.
pub fn random_block<R: Rng>(rng: &mut R, parent: &SealedHeader) -> SealedBlock {
    let header = random_child_header(rng, parent).unseal();
    let body =
        BlockBody { transactions: random_transactions(rng, 0..4), ..Default::default() };
    Block { header, body }.seal_slow()
}

/// Generate a child of `parent` whose encoded size is at least `min_size` bytes, by carrying a
/// single oversized transaction.
pub fn block_with_min_size<R: Rng>(
    rng: &mut R,
    parent: &SealedHeader,
    min_size: usize,
) -> SealedBlock {
    let header = random_child_header(rng, parent).unseal();
    let body = BlockBody {
        transactions: vec![Bytes::from(vec![0xaa; min_size])],
        ..Default::default()
    };
    Block { header, body }.seal_slow()
}

/// Returns a copy of `block` whose header commits to `state_root` instead.
///
/// The block is resealed, so the result has a different hash.
pub fn with_state_root(block: &SealedBlock, state_root: B256) -> SealedBlock {
    let mut block = block.clone().unseal();
    block.header.state_root = state_root;
    block.seal_slow()
}
