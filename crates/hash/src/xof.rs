// Copyright 2025 Irreducible Inc.

use hashkit_utils::ensure;
use tracing::trace;

use crate::{
	block::{BlockCompressor, BlockHasher},
	hasher::{HashError, HashResult, Hasher, Xof},
};

/// A [`BlockCompressor`] whose finalized state can be stretched into an output stream.
pub trait ExtendableCompressor: BlockCompressor {
	/// Inclusive bounds on the output length, in bits.
	fn xof_bits_range(&self) -> (u64, u64);

	fn xof_size_in_bits(&self) -> u64;

	/// Records the output length. Takes effect at the next reset.
	fn set_xof_size_in_bits(&mut self, bits: u64);

	/// Writes the next `out.len()` bytes of the stream. Only called after `finish`.
	fn squeeze(&mut self, out: &mut [u8]);
}

/// Life cycle of an extendable-output computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XofState {
	Absorbing,
	Finalized,
	Reading,
}

/// Extendable-output hasher driving an [`ExtendableCompressor`].
#[derive(Clone)]
pub struct XofHasher<C: ExtendableCompressor> {
	inner: BlockHasher<C>,
	state: XofState,
	produced: u64,
}

impl<C: ExtendableCompressor> XofHasher<C> {
	/// Creates the hasher with an output length of `xof_size_in_bits`.
	pub fn new(mut compressor: C, xof_size_in_bits: u64) -> Result<Self, HashError> {
		validate_xof_size(&compressor, xof_size_in_bits)?;
		compressor.set_xof_size_in_bits(xof_size_in_bits);
		Ok(Self {
			inner: BlockHasher::new(compressor),
			state: XofState::Absorbing,
			produced: 0,
		})
	}

	pub fn state(&self) -> XofState {
		self.state
	}

	pub fn compressor(&self) -> &C {
		self.inner.compressor()
	}

	fn xof_size_in_bytes(&self) -> u64 {
		self.inner.compressor().xof_size_in_bits() / 8
	}
}

fn validate_xof_size<C: ExtendableCompressor>(compressor: &C, bits: u64) -> Result<(), HashError> {
	ensure!(bits % 8 == 0, HashError::XofSizeNotByteAligned { bits });
	let (min_bits, max_bits) = compressor.xof_bits_range();
	ensure!(
		(min_bits..=max_bits).contains(&bits),
		HashError::XofSizeOutOfRange {
			min_bits,
			max_bits,
			bits
		}
	);
	Ok(())
}

impl<C: ExtendableCompressor> Hasher for XofHasher<C> {
	fn name(&self) -> String {
		self.inner.name()
	}

	fn block_size(&self) -> usize {
		self.inner.block_size()
	}

	fn hash_size(&self) -> usize {
		self.xof_size_in_bytes() as usize
	}

	fn initialize(&mut self) {
		if self.state != XofState::Absorbing {
			trace!(algorithm = %self.inner.name(), from = ?self.state, "xof reinitialized");
		}
		self.inner.reset_state();
		self.state = XofState::Absorbing;
		self.produced = 0;
	}

	fn transform_bytes(&mut self, data: &[u8]) -> Result<(), HashError> {
		ensure!(self.state == XofState::Absorbing, HashError::WriteAfterRead);
		self.inner.update_bytes(data);
		Ok(())
	}

	fn transform_final(&mut self) -> Result<HashResult, HashError> {
		let len = self.hash_size();
		let mut out = vec![0u8; len];
		self.do_output(&mut out, 0, len)?;
		self.initialize();
		Ok(HashResult::new(out))
	}

	fn clone_hasher(&self) -> Box<dyn Hasher> {
		Box::new(self.clone())
	}
}

impl<C: ExtendableCompressor> Xof for XofHasher<C> {
	fn xof_size_in_bits(&self) -> u64 {
		self.inner.compressor().xof_size_in_bits()
	}

	fn set_xof_size_in_bits(&mut self, bits: u64) -> Result<(), HashError> {
		validate_xof_size(self.inner.compressor(), bits)?;
		ensure!(
			self.state == XofState::Absorbing && self.inner.processed_bytes() == 0,
			HashError::XofSizeLocked
		);
		self.inner.compressor_mut().set_xof_size_in_bits(bits);
		self.inner.reset_state();
		Ok(())
	}

	fn do_output(
		&mut self,
		dest: &mut [u8],
		offset: usize,
		length: usize,
	) -> Result<(), HashError> {
		let end = offset.saturating_add(length);
		ensure!(
			end <= dest.len(),
			HashError::OutputBufferTooShort {
				required: end,
				available: dest.len()
			}
		);
		let remaining = self.xof_size_in_bytes() - self.produced;
		ensure!(
			length as u64 <= remaining,
			HashError::OutputLengthExceeded {
				requested: length as u64,
				remaining
			}
		);

		if self.state == XofState::Absorbing {
			self.inner.finish();
			self.state = XofState::Finalized;
			trace!(algorithm = %self.inner.name(), "xof finalized");
		}
		if self.state == XofState::Finalized {
			self.state = XofState::Reading;
			trace!(algorithm = %self.inner.name(), "xof reading");
		}

		self.inner
			.compressor_mut()
			.squeeze(&mut dest[offset..end]);
		self.produced += length as u64;
		Ok(())
	}

	fn clone_xof(&self) -> Box<dyn Xof> {
		Box::new(self.clone())
	}
}
