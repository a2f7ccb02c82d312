// Copyright 2025 Irreducible Inc.

//! Block-buffering engine shared by every algorithm in the crate.
//!
//! An algorithm only provides a [`BlockCompressor`]: its block size, its compression function
//! and its finalization rule. [`BlockHasher`] owns the input buffer and the byte counter and
//! drives the compressor, so clones and resets behave identically across algorithms.

use digest::{HashMarker, Reset, Update};
use zeroize::{Zeroize, Zeroizing};

use crate::hasher::{HashError, HashResult, Hasher};

/// Fixed-capacity buffer for input bytes that do not yet form a complete block.
#[derive(Clone)]
pub struct BlockBuffer {
	data: Vec<u8>,
	capacity: usize,
}

impl BlockBuffer {
	pub fn new(capacity: usize) -> Self {
		Self {
			data: Vec::with_capacity(capacity),
			capacity,
		}
	}

	/// Copies as much of `input` as fits and returns the number of bytes taken.
	pub fn fill(&mut self, input: &[u8]) -> usize {
		let taken = input.len().min(self.capacity - self.data.len());
		self.data.extend_from_slice(&input[..taken]);
		taken
	}

	pub fn len(&self) -> usize {
		self.data.len()
	}

	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	pub fn is_full(&self) -> bool {
		self.data.len() == self.capacity
	}

	pub fn as_slice(&self) -> &[u8] {
		&self.data
	}

	pub fn clear(&mut self) {
		self.data.zeroize();
	}
}

impl Drop for BlockBuffer {
	fn drop(&mut self) {
		self.data.zeroize();
	}
}

/// The algorithm-specific half of a block hash.
pub trait BlockCompressor: Clone + Send + Sync + 'static {
	fn name(&self) -> String;

	fn block_size(&self) -> usize;

	fn hash_size(&self) -> usize;

	/// Re-derives the chaining state from the configuration.
	fn reset(&mut self);

	/// Bytes absorbed after every reset, ahead of the caller's data.
	fn preamble(&self) -> &[u8] {
		&[]
	}

	/// When set, a complete block is kept buffered until more input arrives, so that
	/// [`BlockCompressor::finish`] always sees a non-empty tail for non-empty input.
	fn defers_last_block(&self) -> bool {
		false
	}

	/// Consumes exactly one block.
	fn compress(&mut self, block: &[u8]);

	/// Pads `tail` and runs the final compressions.
	///
	/// `processed_bytes` counts the caller's bytes absorbed since the last reset, tail included.
	fn finish(&mut self, tail: &[u8], processed_bytes: u64);

	/// Serializes the finalized state into `out`, which is `hash_size()` bytes long.
	fn write_digest(&self, out: &mut [u8]);
}

/// Generic hasher driving a [`BlockCompressor`].
#[derive(Clone)]
pub struct BlockHasher<C: BlockCompressor> {
	compressor: C,
	buffer: BlockBuffer,
	processed_bytes: u64,
}

impl<C: BlockCompressor> BlockHasher<C> {
	pub fn new(compressor: C) -> Self {
		let buffer = BlockBuffer::new(compressor.block_size());
		let mut hasher = Self {
			compressor,
			buffer,
			processed_bytes: 0,
		};
		hasher.reset_state();
		hasher
	}

	pub fn compressor(&self) -> &C {
		&self.compressor
	}

	pub(crate) fn compressor_mut(&mut self) -> &mut C {
		&mut self.compressor
	}

	/// Number of caller bytes absorbed since the last initialization.
	pub fn processed_bytes(&self) -> u64 {
		self.processed_bytes
	}

	pub(crate) fn reset_state(&mut self) {
		self.compressor.reset();
		self.buffer.clear();
		self.processed_bytes = 0;

		let preamble = Zeroizing::new(self.compressor.preamble().to_vec());
		self.absorb(&preamble);
	}

	pub(crate) fn update_bytes(&mut self, data: &[u8]) {
		self.processed_bytes += data.len() as u64;
		self.absorb(data);
	}

	/// Runs the padding rule over the buffered tail. The compressor is left finalized.
	pub(crate) fn finish(&mut self) -> &mut C {
		self.compressor
			.finish(self.buffer.as_slice(), self.processed_bytes);
		self.buffer.clear();
		&mut self.compressor
	}

	fn absorb(&mut self, mut data: &[u8]) {
		let block_size = self.compressor.block_size();
		let defer = self.compressor.defers_last_block();

		if !self.buffer.is_empty() {
			if self.buffer.is_full() {
				if data.is_empty() {
					return;
				}
				self.flush_buffer();
			}

			let taken = self.buffer.fill(data);
			data = &data[taken..];
			if !self.buffer.is_full() || (defer && data.is_empty()) {
				return;
			}
			self.flush_buffer();
		}

		while data.len() > block_size || (!defer && data.len() == block_size) {
			let (block, rest) = data.split_at(block_size);
			self.compressor.compress(block);
			data = rest;
		}

		self.buffer.fill(data);
	}

	fn flush_buffer(&mut self) {
		self.compressor.compress(self.buffer.as_slice());
		self.buffer.clear();
	}
}

impl<C: BlockCompressor> Hasher for BlockHasher<C> {
	fn name(&self) -> String {
		self.compressor.name()
	}

	fn block_size(&self) -> usize {
		self.compressor.block_size()
	}

	fn hash_size(&self) -> usize {
		self.compressor.hash_size()
	}

	fn initialize(&mut self) {
		self.reset_state();
	}

	fn transform_bytes(&mut self, data: &[u8]) -> Result<(), HashError> {
		self.update_bytes(data);
		Ok(())
	}

	fn transform_final(&mut self) -> Result<HashResult, HashError> {
		let mut out = vec![0u8; self.compressor.hash_size()];
		self.finish().write_digest(&mut out);
		self.reset_state();
		Ok(HashResult::new(out))
	}

	fn clone_hasher(&self) -> Box<dyn Hasher> {
		Box::new(self.clone())
	}
}

impl<C: BlockCompressor> HashMarker for BlockHasher<C> {}

impl<C: BlockCompressor> Update for BlockHasher<C> {
	fn update(&mut self, data: &[u8]) {
		self.update_bytes(data);
	}
}

impl<C: BlockCompressor> Reset for BlockHasher<C> {
	fn reset(&mut self) {
		self.reset_state();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Records every block it is handed, so dispatch decisions can be inspected.
	#[derive(Clone, Default)]
	struct Recorder {
		defer: bool,
		blocks: Vec<Vec<u8>>,
		tail: Vec<u8>,
		total: u64,
	}

	impl BlockCompressor for Recorder {
		fn name(&self) -> String {
			"Recorder".into()
		}

		fn block_size(&self) -> usize {
			4
		}

		fn hash_size(&self) -> usize {
			1
		}

		fn reset(&mut self) {
			self.blocks.clear();
			self.tail.clear();
			self.total = 0;
		}

		fn defers_last_block(&self) -> bool {
			self.defer
		}

		fn compress(&mut self, block: &[u8]) {
			assert_eq!(block.len(), 4);
			self.blocks.push(block.to_vec());
		}

		fn finish(&mut self, tail: &[u8], processed_bytes: u64) {
			self.tail = tail.to_vec();
			self.total = processed_bytes;
		}

		fn write_digest(&self, out: &mut [u8]) {
			out[0] = self.blocks.len() as u8;
		}
	}

	fn run(defer: bool, chunks: &[&[u8]]) -> Recorder {
		let mut hasher = BlockHasher::new(Recorder {
			defer,
			..Default::default()
		});
		for chunk in chunks {
			hasher.update_bytes(chunk);
		}
		hasher.finish().clone()
	}

	#[test]
	fn test_full_blocks_are_compressed_eagerly() {
		let rec = run(false, &[b"ab", b"cdefgh", b"", b"ij"]);
		assert_eq!(rec.blocks, vec![b"abcd".to_vec(), b"efgh".to_vec()]);
		assert_eq!(rec.tail, b"ij");
		assert_eq!(rec.total, 10);
	}

	#[test]
	fn test_exact_block_leaves_empty_tail() {
		let rec = run(false, &[b"abcdefgh"]);
		assert_eq!(rec.blocks.len(), 2);
		assert!(rec.tail.is_empty());
	}

	#[test]
	fn test_deferred_last_block() {
		let rec = run(true, &[b"abcdefgh"]);
		assert_eq!(rec.blocks, vec![b"abcd".to_vec()]);
		assert_eq!(rec.tail, b"efgh");

		let rec = run(true, &[b"ab", b"cd", b"", b"e"]);
		assert_eq!(rec.blocks, vec![b"abcd".to_vec()]);
		assert_eq!(rec.tail, b"e");

		let rec = run(true, &[b"abcd"]);
		assert!(rec.blocks.is_empty());
		assert_eq!(rec.tail, b"abcd");
	}

	#[test]
	fn test_reinitialization_clears_buffer() {
		let mut hasher = BlockHasher::new(Recorder::default());
		hasher.update_bytes(b"abcdef");
		hasher.initialize();
		assert_eq!(hasher.processed_bytes(), 0);
		hasher.update_bytes(b"xy");
		let rec = hasher.finish().clone();
		assert!(rec.blocks.is_empty());
		assert_eq!(rec.tail, b"xy");
	}

	fn feed_through_digest_traits<D: Update + Reset + HashMarker>(hasher: &mut D) {
		hasher.update(b"discarded");
		hasher.reset();
		hasher.update(b"a");
		hasher.update(b"bc");
	}

	#[test]
	fn test_digest_trait_impls() {
		let mut hasher = crate::sha2::sha2_256();
		feed_through_digest_traits(&mut hasher);
		assert_eq!(
			hasher.transform_final().unwrap(),
			hex_literal::hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
		);
	}
}
