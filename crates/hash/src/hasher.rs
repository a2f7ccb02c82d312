// Copyright 2025 Irreducible Inc.

use std::fmt;

/// Trait implemented by every hash function in this crate.
///
/// A hasher is a long-lived, reusable object. A computation starts with [`Hasher::initialize`],
/// absorbs any number of byte chunks through [`Hasher::transform_bytes`] and ends with
/// [`Hasher::transform_final`], which also re-initializes the instance so the next computation
/// starts from a clean state.
pub trait Hasher: Send + Sync {
	/// Human-readable identifier of the algorithm and its variant, e.g. `Blake2B_512`.
	fn name(&self) -> String;

	/// Size in bytes of the blocks consumed by the compression function.
	fn block_size(&self) -> usize;

	/// Size in bytes of the value returned by [`Hasher::transform_final`].
	fn hash_size(&self) -> usize;

	/// Resets the state to the one derived from the configuration.
	fn initialize(&mut self);

	/// Absorbs `data` into the running computation.
	fn transform_bytes(&mut self, data: &[u8]) -> Result<(), HashError>;

	/// Pads and finalizes the computation, returning the digest.
	fn transform_final(&mut self) -> Result<HashResult, HashError>;

	/// Deep copy of the hasher, including buffered input and configuration.
	fn clone_hasher(&self) -> Box<dyn Hasher>;

	/// Hashes `data` from a freshly initialized state.
	fn compute_bytes(&mut self, data: &[u8]) -> Result<HashResult, HashError> {
		self.initialize();
		self.transform_bytes(data)?;
		self.transform_final()
	}
}

impl Clone for Box<dyn Hasher> {
	fn clone(&self) -> Self {
		self.clone_hasher()
	}
}

/// Extendable-output function: a hasher whose output length is chosen by the caller.
///
/// Once output has been read with [`Xof::do_output`], absorbing more data fails with
/// [`HashError::WriteAfterRead`] until the instance is initialized again.
pub trait Xof: Hasher {
	fn xof_size_in_bits(&self) -> u64;

	/// Sets the output length. Must be called before any input is absorbed.
	fn set_xof_size_in_bits(&mut self, bits: u64) -> Result<(), HashError>;

	/// Writes the next `length` output bytes into `dest[offset..offset + length]`.
	fn do_output(&mut self, dest: &mut [u8], offset: usize, length: usize)
		-> Result<(), HashError>;

	fn clone_xof(&self) -> Box<dyn Xof>;
}

impl Clone for Box<dyn Xof> {
	fn clone(&self) -> Self {
		self.clone_xof()
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HashError {
	#[error("key of {actual} bytes exceeds the maximum of {max} bytes")]
	InvalidKeyLength { max: usize, actual: usize },
	#[error("salt must be {expected} bytes, got {actual}")]
	InvalidSaltLength { expected: usize, actual: usize },
	#[error("personalization must be {expected} bytes, got {actual}")]
	InvalidPersonalizationLength { expected: usize, actual: usize },
	#[error("invalid tree configuration: {0}")]
	InvalidTreeConfig(&'static str),
	#[error("hash size of {actual} bytes is outside [{min}, {max}]")]
	InvalidHashSize { min: usize, max: usize, actual: usize },
	#[error("XOF size of {bits} bits is not a multiple of 8")]
	XofSizeNotByteAligned { bits: u64 },
	#[error("XOF size of {bits} bits is outside [{min_bits}, {max_bits}]")]
	XofSizeOutOfRange { min_bits: u64, max_bits: u64, bits: u64 },
	#[error("{algorithm} does not support {value}")]
	UnsupportedVariant { algorithm: &'static str, value: u64 },
	#[error("output buffer holds {available} bytes but {required} are required")]
	OutputBufferTooShort { required: usize, available: usize },
	#[error("requested {requested} output bytes but only {remaining} remain")]
	OutputLengthExceeded { requested: u64, remaining: u64 },
	#[error("cannot absorb input after output has been read")]
	WriteAfterRead,
	#[error("XOF size cannot change once the computation has started")]
	XofSizeLocked,
	#[error("unknown hash algorithm: {0}")]
	UnknownAlgorithm(String),
}

/// Digest produced by [`Hasher::transform_final`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct HashResult(Vec<u8>);

impl HashResult {
	pub fn new(bytes: Vec<u8>) -> Self {
		Self(bytes)
	}

	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}

	pub fn into_bytes(self) -> Vec<u8> {
		self.0
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn to_hex(&self) -> String {
		hex::encode(&self.0)
	}

	pub fn to_hex_upper(&self) -> String {
		hex::encode_upper(&self.0)
	}
}

impl From<Vec<u8>> for HashResult {
	fn from(bytes: Vec<u8>) -> Self {
		Self(bytes)
	}
}

impl AsRef<[u8]> for HashResult {
	fn as_ref(&self) -> &[u8] {
		&self.0
	}
}

impl PartialEq<[u8]> for HashResult {
	fn eq(&self, other: &[u8]) -> bool {
		self.0 == other
	}
}

impl<const N: usize> PartialEq<[u8; N]> for HashResult {
	fn eq(&self, other: &[u8; N]) -> bool {
		self.0 == other
	}
}

impl fmt::Display for HashResult {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_hex())
	}
}

impl fmt::Debug for HashResult {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "HashResult({})", self.to_hex())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_hex_rendering() {
		let result = HashResult::new(vec![0x00, 0xab, 0x10, 0xff]);
		assert_eq!(result.to_hex(), "00ab10ff");
		assert_eq!(result.to_hex_upper(), "00AB10FF");
		assert_eq!(result.to_string(), "00ab10ff");
		assert_eq!(format!("{result:?}"), "HashResult(00ab10ff)");
		assert_eq!(result, [0x00, 0xab, 0x10, 0xff]);
	}
}
