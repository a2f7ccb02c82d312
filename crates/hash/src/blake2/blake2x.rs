// Copyright 2025 Irreducible Inc.

use zeroize::{Zeroize, Zeroizing};

use super::{config::ParameterBlock, Blake2Compressor, Variant};
use crate::{block::BlockCompressor, xof::ExtendableCompressor};

/// Blake2X: a Blake2 root hash of the input, expanded by hashing the root digest once per output
/// block with the block index as node offset.
#[derive(Clone)]
pub struct Blake2xCompressor<V: Variant> {
	root: Blake2Compressor<V>,
	root_hash: Zeroizing<Vec<u8>>,
	output_block: Zeroizing<Vec<u8>>,
	position: u64,
}

impl<V: Variant> Blake2xCompressor<V> {
	pub(crate) fn new(root: Blake2Compressor<V>) -> Self {
		Self {
			root,
			root_hash: Zeroizing::new(Vec::new()),
			output_block: Zeroizing::new(Vec::new()),
			position: 0,
		}
	}

	fn xof_size(&self) -> u64 {
		u64::from(self.root.params().xof_length)
	}

	/// Computes output block `index` from the root digest.
	fn output_node(&self, index: u64) -> Zeroizing<Vec<u8>> {
		let max = V::MAX_HASH_SIZE as u64;
		let digest_length = max.min(self.xof_size() - max * index) as usize;
		let root = self.root.params();
		let params = ParameterBlock {
			digest_length: digest_length as u8,
			key_length: 0,
			fanout: 0,
			max_depth: 0,
			leaf_length: max as u32,
			node_offset: index,
			xof_length: root.xof_length,
			node_depth: 0,
			inner_length: max as u8,
			salt: root.salt,
			personalization: root.personalization,
		};

		let mut node = Blake2Compressor::<V>::from_parameters(params, &[], false);
		node.finish(&self.root_hash, 0);
		let mut out = Zeroizing::new(vec![0u8; digest_length]);
		node.write_digest(&mut out);
		out
	}
}

impl<V: Variant> BlockCompressor for Blake2xCompressor<V> {
	fn name(&self) -> String {
		format!("{}_XOFSizeInBytes_{}", V::XOF_NAME, self.xof_size())
	}

	fn block_size(&self) -> usize {
		V::BLOCK_SIZE
	}

	fn hash_size(&self) -> usize {
		self.xof_size() as usize
	}

	fn reset(&mut self) {
		self.root.reset();
		self.root_hash.zeroize();
		self.output_block.zeroize();
		self.position = 0;
	}

	fn preamble(&self) -> &[u8] {
		self.root.preamble()
	}

	fn defers_last_block(&self) -> bool {
		true
	}

	fn compress(&mut self, block: &[u8]) {
		self.root.compress(block);
	}

	fn finish(&mut self, tail: &[u8], processed_bytes: u64) {
		self.root.finish(tail, processed_bytes);
		self.root_hash = Zeroizing::new(vec![0u8; V::MAX_HASH_SIZE]);
		self.root.write_digest(&mut self.root_hash);
		self.position = 0;
	}

	fn write_digest(&self, out: &mut [u8]) {
		self.clone().squeeze(out);
	}
}

impl<V: Variant> ExtendableCompressor for Blake2xCompressor<V> {
	fn xof_bits_range(&self) -> (u64, u64) {
		(8, V::MAX_XOF_SIZE * 8)
	}

	fn xof_size_in_bits(&self) -> u64 {
		self.xof_size() * 8
	}

	fn set_xof_size_in_bits(&mut self, bits: u64) {
		self.root.params_mut().xof_length = (bits / 8) as u32;
	}

	fn squeeze(&mut self, mut out: &mut [u8]) {
		let max = V::MAX_HASH_SIZE as u64;
		while !out.is_empty() {
			let within = (self.position % max) as usize;
			if within == 0 {
				self.output_block = self.output_node(self.position / max);
			}
			let n = out.len().min(self.output_block.len() - within);
			out[..n].copy_from_slice(&self.output_block[within..within + n]);
			out = &mut out[n..];
			self.position += n as u64;
		}
	}
}
