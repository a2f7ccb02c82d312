// Copyright 2025 Irreducible Inc.

use std::fmt;

use hashkit_utils::ensure;
use tracing::debug;
use zeroize::Zeroizing;

use super::Variant;
use crate::hasher::HashError;

/// Keying and output parameters of a Blake2 instance.
///
/// Unset fields take their neutral values: maximum digest size, no key, all-zero salt and
/// personalization.
#[derive(Clone, Default)]
pub struct Blake2Config {
	hash_size: Option<usize>,
	key: Zeroizing<Vec<u8>>,
	salt: Vec<u8>,
	personalization: Vec<u8>,
}

impl Blake2Config {
	pub fn new() -> Self {
		Self::default()
	}

	/// Digest size in bytes.
	pub fn with_hash_size(mut self, hash_size: usize) -> Self {
		self.hash_size = Some(hash_size);
		self
	}

	pub fn with_key(mut self, key: &[u8]) -> Self {
		self.key = Zeroizing::new(key.to_vec());
		self
	}

	pub fn with_salt(mut self, salt: &[u8]) -> Self {
		self.salt = salt.to_vec();
		self
	}

	pub fn with_personalization(mut self, personalization: &[u8]) -> Self {
		self.personalization = personalization.to_vec();
		self
	}

	pub fn hash_size(&self) -> Option<usize> {
		self.hash_size
	}

	pub fn key(&self) -> &[u8] {
		&self.key
	}

	pub fn salt(&self) -> &[u8] {
		&self.salt
	}

	pub fn personalization(&self) -> &[u8] {
		&self.personalization
	}
}

impl fmt::Debug for Blake2Config {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Blake2Config")
			.field("hash_size", &self.hash_size)
			.field("key_len", &self.key.len())
			.field("salt", &self.salt)
			.field("personalization", &self.personalization)
			.finish()
	}
}

/// Tree-hashing fields of the parameter block.
///
/// The default is sequential mode: fan-out 1, depth 1, everything else zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blake2TreeConfig {
	/// Children per node, 0 for unlimited.
	pub fanout: u8,
	pub max_depth: u8,
	/// Leaf length in bytes, 0 for unlimited.
	pub leaf_size: u32,
	pub node_offset: u64,
	/// 0 for leaves.
	pub node_depth: u8,
	pub inner_hash_size: u8,
	/// Sets the second finalization flag on the last block.
	pub is_last_node: bool,
}

impl Default for Blake2TreeConfig {
	fn default() -> Self {
		Self {
			fanout: 1,
			max_depth: 1,
			leaf_size: 0,
			node_offset: 0,
			node_depth: 0,
			inner_hash_size: 0,
			is_last_node: false,
		}
	}
}

impl Blake2TreeConfig {
	fn validate<V: Variant>(&self) -> Result<(), HashError> {
		ensure!(self.max_depth >= 1, HashError::InvalidTreeConfig("max depth must be at least 1"));
		ensure!(
			usize::from(self.inner_hash_size) <= V::MAX_HASH_SIZE,
			HashError::InvalidTreeConfig("inner hash size exceeds the digest size limit")
		);
		ensure!(
			self.node_offset <= V::MAX_NODE_OFFSET,
			HashError::InvalidTreeConfig("node offset does not fit the parameter block")
		);
		Ok(())
	}
}

/// Decoded Blake2 parameter block, shared by both word sizes.
///
/// Salt and personalization are stored zero-padded to the larger Blake2B width; only the first
/// `V::SALT_SIZE` bytes are encoded.
#[derive(Debug, Clone, Default)]
pub(crate) struct ParameterBlock {
	pub digest_length: u8,
	pub key_length: u8,
	pub fanout: u8,
	pub max_depth: u8,
	pub leaf_length: u32,
	pub node_offset: u64,
	/// Total output length of a Blake2X computation, 0 otherwise.
	pub xof_length: u32,
	pub node_depth: u8,
	pub inner_length: u8,
	pub salt: [u8; 16],
	pub personalization: [u8; 16],
}

impl ParameterBlock {
	/// Validates `config` and `tree` against the limits of `V`.
	pub fn new<V: Variant>(
		config: &Blake2Config,
		tree: &Blake2TreeConfig,
	) -> Result<Self, HashError> {
		let hash_size = config.hash_size.unwrap_or(V::MAX_HASH_SIZE);
		ensure!(
			(1..=V::MAX_HASH_SIZE).contains(&hash_size),
			HashError::InvalidHashSize {
				min: 1,
				max: V::MAX_HASH_SIZE,
				actual: hash_size
			}
		);
		ensure!(
			config.key.len() <= V::MAX_HASH_SIZE,
			HashError::InvalidKeyLength {
				max: V::MAX_HASH_SIZE,
				actual: config.key.len()
			}
		);
		ensure!(
			config.salt.is_empty() || config.salt.len() == V::SALT_SIZE,
			HashError::InvalidSaltLength {
				expected: V::SALT_SIZE,
				actual: config.salt.len()
			}
		);
		ensure!(
			config.personalization.is_empty() || config.personalization.len() == V::SALT_SIZE,
			HashError::InvalidPersonalizationLength {
				expected: V::SALT_SIZE,
				actual: config.personalization.len()
			}
		);
		tree.validate::<V>()?;

		debug!(
			algorithm = V::NAME,
			hash_size,
			keyed = !config.key.is_empty(),
			?tree,
			"blake2 configuration validated"
		);

		let mut block = Self {
			digest_length: hash_size as u8,
			key_length: config.key.len() as u8,
			fanout: tree.fanout,
			max_depth: tree.max_depth,
			leaf_length: tree.leaf_size,
			node_offset: tree.node_offset,
			xof_length: 0,
			node_depth: tree.node_depth,
			inner_length: tree.inner_hash_size,
			..Default::default()
		};
		block.salt[..config.salt.len()].copy_from_slice(&config.salt);
		block.personalization[..config.personalization.len()]
			.copy_from_slice(&config.personalization);
		Ok(block)
	}

	/// Serializes into the eight-word layout of `V`.
	///
	/// The XOF length shares the node offset field: it occupies the bytes above the low 32 bits.
	pub fn encode<V: Variant>(&self) -> Vec<u8> {
		let mut out = vec![0u8; V::PARAMETER_BLOCK_SIZE];
		out[0] = self.digest_length;
		out[1] = self.key_length;
		out[2] = self.fanout;
		out[3] = self.max_depth;
		out[4..8].copy_from_slice(&self.leaf_length.to_le_bytes());

		let offset = self.node_offset | (u64::from(self.xof_length) << 32);
		let depth_at = 8 + V::NODE_OFFSET_SIZE;
		out[8..depth_at].copy_from_slice(&offset.to_le_bytes()[..V::NODE_OFFSET_SIZE]);
		out[depth_at] = self.node_depth;
		out[depth_at + 1] = self.inner_length;

		let salt_at = V::PARAMETER_BLOCK_SIZE - 2 * V::SALT_SIZE;
		let personalization_at = salt_at + V::SALT_SIZE;
		out[salt_at..personalization_at].copy_from_slice(&self.salt[..V::SALT_SIZE]);
		out[personalization_at..].copy_from_slice(&self.personalization[..V::SALT_SIZE]);
		out
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::blake2::{Blake2b, Blake2s};

	#[test]
	fn test_sequential_blake2b_block() {
		let params = ParameterBlock::new::<Blake2b>(&Blake2Config::new(), &Default::default())
			.unwrap();
		let encoded = params.encode::<Blake2b>();
		assert_eq!(encoded.len(), 64);
		assert_eq!(&encoded[..4], &[64, 0, 1, 1]);
		assert!(encoded[4..].iter().all(|&b| b == 0));
	}

	#[test]
	fn test_blake2s_layout() {
		let config = Blake2Config::new()
			.with_hash_size(20)
			.with_key(b"k")
			.with_salt(b"saltsalt")
			.with_personalization(b"personal");
		let tree = Blake2TreeConfig {
			node_offset: 0x0000_0605_0403_0201,
			node_depth: 7,
			inner_hash_size: 9,
			..Default::default()
		};
		let encoded = ParameterBlock::new::<Blake2s>(&config, &tree)
			.unwrap()
			.encode::<Blake2s>();
		assert_eq!(encoded.len(), 32);
		assert_eq!(&encoded[..4], &[20, 1, 1, 1]);
		assert_eq!(&encoded[8..16], &[1, 2, 3, 4, 5, 6, 7, 9]);
		assert_eq!(&encoded[16..24], b"saltsalt");
		assert_eq!(&encoded[24..], b"personal");
	}

	#[test]
	fn test_rejected_configurations() {
		let tree = Blake2TreeConfig::default();
		assert_eq!(
			ParameterBlock::new::<Blake2s>(&Blake2Config::new().with_hash_size(33), &tree)
				.unwrap_err(),
			HashError::InvalidHashSize {
				min: 1,
				max: 32,
				actual: 33
			}
		);
		assert_eq!(
			ParameterBlock::new::<Blake2b>(&Blake2Config::new().with_key(&[0; 65]), &tree)
				.unwrap_err(),
			HashError::InvalidKeyLength { max: 64, actual: 65 }
		);
		assert_eq!(
			ParameterBlock::new::<Blake2b>(&Blake2Config::new().with_salt(&[0; 8]), &tree)
				.unwrap_err(),
			HashError::InvalidSaltLength {
				expected: 16,
				actual: 8
			}
		);
		assert_eq!(
			ParameterBlock::new::<Blake2s>(
				&Blake2Config::new().with_personalization(&[0; 16]),
				&tree
			)
			.unwrap_err(),
			HashError::InvalidPersonalizationLength {
				expected: 8,
				actual: 16
			}
		);

		let shallow = Blake2TreeConfig {
			max_depth: 0,
			..Default::default()
		};
		assert!(matches!(
			ParameterBlock::new::<Blake2b>(&Blake2Config::new(), &shallow),
			Err(HashError::InvalidTreeConfig(_))
		));
		let far = Blake2TreeConfig {
			node_offset: 1 << 48,
			..Default::default()
		};
		assert!(ParameterBlock::new::<Blake2b>(&Blake2Config::new(), &far).is_ok());
		assert!(matches!(
			ParameterBlock::new::<Blake2s>(&Blake2Config::new(), &far),
			Err(HashError::InvalidTreeConfig(_))
		));
	}
}
