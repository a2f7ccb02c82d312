// Copyright 2025 Irreducible Inc.

//! The Keccak family: SHA-3 and original Keccak digests, SHAKE, cSHAKE and KMAC.

mod encoding;
mod keccak;
mod sponge;

use hashkit_utils::ensure;
pub use sponge::{KeccakSponge, SpongeMode};

use crate::{
	block::BlockHasher,
	hasher::HashError,
	variant::numeric_variant,
	xof::XofHasher,
};

pub type Sha3Hasher = BlockHasher<KeccakSponge>;
pub type ShakeHasher = XofHasher<KeccakSponge>;

numeric_variant! {
	pub enum Sha3Size: bits, "SHA3" {
		Bits224 = 224,
		Bits256 = 256,
		Bits384 = 384,
		Bits512 = 512,
	}
}

numeric_variant! {
	pub enum KeccakSize: bits, "Keccak" {
		Bits224 = 224,
		Bits256 = 256,
		Bits288 = 288,
		Bits384 = 384,
		Bits512 = 512,
	}
}

numeric_variant! {
	/// Security strength of the extendable-output members.
	pub enum SecurityLevel: bits, "Shake" {
		Bits128 = 128,
		Bits256 = 256,
	}
}

pub fn sha3(size: Sha3Size) -> Sha3Hasher {
	let bits = size.bits();
	BlockHasher::new(KeccakSponge::new(SpongeMode::Sha3, bits as usize, u64::from(bits)))
}

/// Keccak as submitted to the SHA-3 competition, before the FIPS 202 domain separation.
pub fn keccak(size: KeccakSize) -> Sha3Hasher {
	let bits = size.bits();
	BlockHasher::new(KeccakSponge::new(SpongeMode::Keccak, bits as usize, u64::from(bits)))
}

pub fn shake(level: SecurityLevel, xof_size_in_bits: u64) -> Result<ShakeHasher, HashError> {
	XofHasher::new(KeccakSponge::new(SpongeMode::Shake, level.bits() as usize, 0), xof_size_in_bits)
}

/// cSHAKE with function name `N` and customization string `S`.
pub fn cshake(
	level: SecurityLevel,
	function_name: &[u8],
	customization: &[u8],
	xof_size_in_bits: u64,
) -> Result<ShakeHasher, HashError> {
	let sponge = KeccakSponge::new(SpongeMode::CShake, level.bits() as usize, 0)
		.with_cshake_prefix(function_name, customization);
	XofHasher::new(sponge, xof_size_in_bits)
}

/// KMAC producing exactly `output_size_in_bits` bits, which are bound into the MAC.
pub fn kmac(
	level: SecurityLevel,
	key: &[u8],
	customization: &[u8],
	output_size_in_bits: u64,
) -> Result<Sha3Hasher, HashError> {
	ensure!(
		output_size_in_bits % 8 == 0,
		HashError::XofSizeNotByteAligned {
			bits: output_size_in_bits
		}
	);
	ensure!(
		output_size_in_bits > 0,
		HashError::InvalidHashSize {
			min: 1,
			max: usize::MAX,
			actual: 0
		}
	);
	let sponge = KeccakSponge::new(SpongeMode::Kmac, level.bits() as usize, output_size_in_bits)
		.with_cshake_prefix(b"KMAC", customization)
		.with_kmac_key(key);
	Ok(BlockHasher::new(sponge))
}

/// KMAC in extendable-output mode, where the output length is not bound into the MAC.
pub fn kmac_xof(
	level: SecurityLevel,
	key: &[u8],
	customization: &[u8],
	xof_size_in_bits: u64,
) -> Result<ShakeHasher, HashError> {
	let sponge = KeccakSponge::new(SpongeMode::KmacXof, level.bits() as usize, 0)
		.with_cshake_prefix(b"KMAC", customization)
		.with_kmac_key(key);
	XofHasher::new(sponge, xof_size_in_bits)
}
