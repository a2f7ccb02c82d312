// Copyright 2025 Irreducible Inc.

//! Blake2B and Blake2S (RFC 7693) with keying, salt, personalization and tree parameters, and
//! their extendable-output forms Blake2XB and Blake2XS.

mod blake2b;
mod blake2s;
mod blake2x;
mod config;

pub use blake2b::Blake2b;
pub use blake2s::Blake2s;
pub use blake2x::Blake2xCompressor;
pub use config::{Blake2Config, Blake2TreeConfig};
use config::ParameterBlock;
use hashkit_utils::ensure;
use zeroize::{Zeroize, Zeroizing};

use crate::{
	block::{BlockCompressor, BlockHasher},
	hasher::HashError,
	xof::XofHasher,
};

const SIGMA: [[usize; 16]; 10] = [
	[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
	[14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
	[11, 8, 12, 0, 5, 2, 15, 13, 10, 14, 3, 6, 7, 1, 9, 4],
	[7, 9, 3, 1, 13, 12, 11, 14, 2, 6, 5, 10, 4, 0, 15, 8],
	[9, 0, 5, 7, 2, 4, 10, 15, 14, 1, 11, 12, 6, 8, 3, 13],
	[2, 12, 6, 10, 0, 11, 8, 3, 4, 13, 7, 5, 15, 14, 1, 9],
	[12, 5, 1, 15, 14, 13, 4, 10, 0, 7, 6, 3, 9, 2, 8, 11],
	[13, 11, 7, 14, 12, 1, 3, 9, 5, 0, 15, 4, 8, 6, 2, 10],
	[6, 15, 14, 9, 11, 3, 0, 8, 12, 2, 13, 7, 1, 4, 10, 5],
	[10, 2, 8, 4, 7, 6, 1, 5, 15, 11, 9, 14, 3, 12, 13, 0],
];

/// Word size and limits of one Blake2 flavour.
pub trait Variant: Clone + Send + Sync + 'static {
	type State: Copy + Send + Sync + Zeroize;

	const NAME: &'static str;
	const XOF_NAME: &'static str;
	const BLOCK_SIZE: usize;
	/// Also the maximum key length.
	const MAX_HASH_SIZE: usize;
	/// Length of both the salt and the personalization.
	const SALT_SIZE: usize;
	const PARAMETER_BLOCK_SIZE: usize;
	const NODE_OFFSET_SIZE: usize;
	const MAX_NODE_OFFSET: u64;
	/// Largest Blake2X output in bytes; the all-ones length is reserved.
	const MAX_XOF_SIZE: u64;

	fn initial_state(parameter_block: &[u8]) -> Self::State;

	/// Compression function `F` with byte counter `counter` and the two finalization flags.
	fn compress(
		state: &mut Self::State,
		block: &[u8],
		counter: u128,
		last_block: bool,
		last_node: bool,
	);

	/// Little-endian serialization, truncated to `out.len()`.
	fn write_state(state: &Self::State, out: &mut [u8]);
}

/// Blake2 compression state together with the parameter block it was derived from.
#[derive(Clone)]
pub struct Blake2Compressor<V: Variant> {
	params: ParameterBlock,
	key_block: Zeroizing<Vec<u8>>,
	last_node: bool,
	state: V::State,
	counter: u128,
}

pub type Blake2bCompressor = Blake2Compressor<Blake2b>;
pub type Blake2sCompressor = Blake2Compressor<Blake2s>;
pub type Blake2bHasher = BlockHasher<Blake2bCompressor>;
pub type Blake2sHasher = BlockHasher<Blake2sCompressor>;
pub type Blake2xbHasher = XofHasher<Blake2xCompressor<Blake2b>>;
pub type Blake2xsHasher = XofHasher<Blake2xCompressor<Blake2s>>;

impl<V: Variant> Blake2Compressor<V> {
	pub fn new(config: &Blake2Config, tree: &Blake2TreeConfig) -> Result<Self, HashError> {
		let params = ParameterBlock::new::<V>(config, tree)?;
		Ok(Self::from_parameters(params, config.key(), tree.is_last_node))
	}

	pub(crate) fn from_parameters(params: ParameterBlock, key: &[u8], last_node: bool) -> Self {
		let mut key_block = Zeroizing::new(Vec::new());
		if !key.is_empty() {
			key_block.extend_from_slice(key);
			key_block.resize(V::BLOCK_SIZE, 0);
		}
		let state = V::initial_state(&params.encode::<V>());
		Self {
			params,
			key_block,
			last_node,
			state,
			counter: 0,
		}
	}

	pub(crate) fn params(&self) -> &ParameterBlock {
		&self.params
	}

	pub(crate) fn params_mut(&mut self) -> &mut ParameterBlock {
		&mut self.params
	}
}

impl<V: Variant> BlockCompressor for Blake2Compressor<V> {
	fn name(&self) -> String {
		format!("{}_{}", V::NAME, usize::from(self.params.digest_length) * 8)
	}

	fn block_size(&self) -> usize {
		V::BLOCK_SIZE
	}

	fn hash_size(&self) -> usize {
		self.params.digest_length.into()
	}

	fn reset(&mut self) {
		self.state = V::initial_state(&self.params.encode::<V>());
		self.counter = 0;
	}

	fn preamble(&self) -> &[u8] {
		&self.key_block
	}

	fn defers_last_block(&self) -> bool {
		true
	}

	fn compress(&mut self, block: &[u8]) {
		self.counter = self.counter.wrapping_add(V::BLOCK_SIZE as u128);
		V::compress(&mut self.state, block, self.counter, false, false);
	}

	fn finish(&mut self, tail: &[u8], _processed_bytes: u64) {
		self.counter = self.counter.wrapping_add(tail.len() as u128);
		let mut last = Zeroizing::new(vec![0u8; V::BLOCK_SIZE]);
		last[..tail.len()].copy_from_slice(tail);
		V::compress(&mut self.state, &last, self.counter, true, self.last_node);
	}

	fn write_digest(&self, out: &mut [u8]) {
		V::write_state(&self.state, out);
	}
}

impl<V: Variant> Drop for Blake2Compressor<V> {
	fn drop(&mut self) {
		self.state.zeroize();
	}
}

/// Sequential Blake2B.
pub fn blake2b(config: &Blake2Config) -> Result<Blake2bHasher, HashError> {
	blake2b_tree(config, &Blake2TreeConfig::default())
}

/// Blake2B computing one node of a hash tree.
pub fn blake2b_tree(
	config: &Blake2Config,
	tree: &Blake2TreeConfig,
) -> Result<Blake2bHasher, HashError> {
	Ok(BlockHasher::new(Blake2Compressor::new(config, tree)?))
}

/// Sequential Blake2S.
pub fn blake2s(config: &Blake2Config) -> Result<Blake2sHasher, HashError> {
	blake2s_tree(config, &Blake2TreeConfig::default())
}

pub fn blake2s_tree(
	config: &Blake2Config,
	tree: &Blake2TreeConfig,
) -> Result<Blake2sHasher, HashError> {
	Ok(BlockHasher::new(Blake2Compressor::new(config, tree)?))
}

/// Blake2XB producing `xof_size_in_bits` bits.
///
/// The root always uses the maximum digest size, so a configured hash size other than 64 is
/// rejected.
pub fn blake2xb(config: &Blake2Config, xof_size_in_bits: u64) -> Result<Blake2xbHasher, HashError> {
	blake2x(config, xof_size_in_bits)
}

/// Blake2XS producing `xof_size_in_bits` bits; a configured hash size must be 32.
pub fn blake2xs(config: &Blake2Config, xof_size_in_bits: u64) -> Result<Blake2xsHasher, HashError> {
	blake2x(config, xof_size_in_bits)
}

fn blake2x<V: Variant>(
	config: &Blake2Config,
	xof_size_in_bits: u64,
) -> Result<XofHasher<Blake2xCompressor<V>>, HashError> {
	if let Some(actual) = config.hash_size() {
		ensure!(
			actual == V::MAX_HASH_SIZE,
			HashError::InvalidHashSize {
				min: V::MAX_HASH_SIZE,
				max: V::MAX_HASH_SIZE,
				actual
			}
		);
	}
	let root = Blake2Compressor::<V>::new(config, &Blake2TreeConfig::default())?;
	XofHasher::new(Blake2xCompressor::new(root), xof_size_in_bits)
}
