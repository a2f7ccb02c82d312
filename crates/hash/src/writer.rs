// Copyright 2025 Irreducible Inc.

use std::{cmp::min, io};

use crate::hasher::{HashError, Hasher};

/// Adapter that exposes a [`Hasher`] through [`io::Write`].
///
/// Writes are collected into block-sized chunks before reaching the hasher, so readers can be
/// streamed in with [`io::copy`] without a call per small read. Buffered bytes are forwarded by
/// [`io::Write::flush`] and, as a last resort, when the adapter is dropped. A failure while
/// dropping cannot be reported and the buffered bytes are lost, so call `flush` to observe it.
pub struct HashWriter<'a, H: Hasher + ?Sized> {
	hasher: &'a mut H,
	block: Vec<u8>,
	/// Invariant: `index` is always strictly less than `block.len()`.
	index: usize,
}

impl<'a, H: Hasher + ?Sized> HashWriter<'a, H> {
	pub fn new(hasher: &'a mut H) -> Self {
		let block_size = hasher.block_size().max(1);
		Self {
			hasher,
			block: vec![0; block_size],
			index: 0,
		}
	}

	fn forward(&mut self) -> Result<(), HashError> {
		let pending = self.index;
		self.index = 0;
		self.hasher.transform_bytes(&self.block[..pending])
	}
}

impl<H: Hasher + ?Sized> io::Write for HashWriter<'_, H> {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		let mut rest = buf;
		while !rest.is_empty() {
			let n = min(self.block.len() - self.index, rest.len());
			self.block[self.index..self.index + n].copy_from_slice(&rest[..n]);
			self.index += n;
			rest = &rest[n..];
			if self.index == self.block.len() {
				self.forward().map_err(io::Error::other)?;
			}
		}
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		if self.index > 0 {
			self.forward().map_err(io::Error::other)?;
		}
		Ok(())
	}
}

impl<H: Hasher + ?Sized> Drop for HashWriter<'_, H> {
	fn drop(&mut self) {
		if self.index > 0 {
			// Nowhere to report a failure; the pending bytes are discarded.
			let _ = self.forward();
		}
	}
}
