// Copyright 2025 Irreducible Inc.

//! Construction of hashers from their textual names.
//!
//! Names follow the `Name` strings the hashers report, compared without regard to case, so
//! `create(&h.name())` rebuilds an equivalent hasher for every fixed-output algorithm. Keyed
//! constructions (KMAC, keyed Blake2) need more than a name and are only reachable through
//! their module constructors.

use tracing::debug;

use crate::{
	blake2::{blake2b, blake2s, blake2xb, blake2xs, Blake2Config},
	gost3411::{gost3411_2012, Gost3411Size},
	hasher::{HashError, Hasher, Xof},
	haval::{haval, HavalPasses, HavalSize},
	sha0::sha0,
	sha2::{sha2_224, sha2_256, sha2_384, sha2_512, sha2_512_224, sha2_512_256},
	sha3::{cshake, keccak, sha3, shake, KeccakSize, SecurityLevel, Sha3Size},
	tiger::{tiger, tiger2, TigerRounds, TigerSize},
};

/// Builds the fixed-output hasher called `name`.
pub fn create(name: &str) -> Result<Box<dyn Hasher>, HashError> {
	let upper = name.to_ascii_uppercase();
	let parts = upper.split('_').collect::<Vec<_>>();
	let unknown = || HashError::UnknownAlgorithm(name.to_string());
	let number = |part: &str| part.parse::<u32>().map_err(|_| unknown());

	let hasher: Box<dyn Hasher> = match parts.as_slice() {
		["SHA0"] => Box::new(sha0()),
		["SHA2", "224"] => Box::new(sha2_224()),
		["SHA2", "256"] => Box::new(sha2_256()),
		["SHA2", "384"] => Box::new(sha2_384()),
		["SHA2", "512"] => Box::new(sha2_512()),
		["SHA2", "512", "224"] => Box::new(sha2_512_224()),
		["SHA2", "512", "256"] => Box::new(sha2_512_256()),
		["SHA3", bits] => Box::new(sha3(Sha3Size::try_from(number(bits)?)?)),
		["KECCAK", bits] => Box::new(keccak(KeccakSize::try_from(number(bits)?)?)),
		["GOST3411", "2012", bits] => {
			Box::new(gost3411_2012(Gost3411Size::try_from(number(bits)?)?))
		}
		["HAVAL", passes, bits] => Box::new(haval(
			HavalPasses::try_from(number(passes)?)?,
			HavalSize::try_from(number(bits)?)?,
		)),
		["TIGER", rounds, bits] => Box::new(tiger(
			TigerRounds::try_from(number(rounds)?)?,
			TigerSize::try_from(number(bits)?)?,
		)),
		["TIGER2", rounds, bits] => Box::new(tiger2(
			TigerRounds::try_from(number(rounds)?)?,
			TigerSize::try_from(number(bits)?)?,
		)),
		["BLAKE2B", bits] => {
			let config = blake2_config(number(bits)?).ok_or_else(unknown)?;
			Box::new(blake2b(&config)?)
		}
		["BLAKE2S", bits] => {
			let config = blake2_config(number(bits)?).ok_or_else(unknown)?;
			Box::new(blake2s(&config)?)
		}
		_ => return Err(unknown()),
	};

	debug!(requested = name, algorithm = %hasher.name(), "hasher created");
	Ok(hasher)
}

/// Builds the extendable-output function called `name` with the given output length.
///
/// Accepted names are `Shake_128`, `Shake_256`, `CShake_128`, `CShake_256`, `Blake2XB` and
/// `Blake2XS`. cSHAKE is created without function name or customization.
pub fn create_xof(name: &str, xof_size_in_bits: u64) -> Result<Box<dyn Xof>, HashError> {
	let upper = name.to_ascii_uppercase();
	let parts = upper.split('_').collect::<Vec<_>>();
	let unknown = || HashError::UnknownAlgorithm(name.to_string());
	let level = |part: &str| {
		let bits = part.parse::<u32>().map_err(|_| unknown())?;
		SecurityLevel::try_from(bits)
	};

	let xof: Box<dyn Xof> = match parts.as_slice() {
		["SHAKE", bits] => Box::new(shake(level(bits)?, xof_size_in_bits)?),
		["CSHAKE", bits] => Box::new(cshake(level(bits)?, b"", b"", xof_size_in_bits)?),
		["BLAKE2XB"] => Box::new(blake2xb(&Blake2Config::new(), xof_size_in_bits)?),
		["BLAKE2XS"] => Box::new(blake2xs(&Blake2Config::new(), xof_size_in_bits)?),
		_ => return Err(unknown()),
	};

	debug!(requested = name, algorithm = %xof.name(), "xof created");
	Ok(xof)
}

/// Canonical names of the fixed-output hashers [`create`] understands.
///
/// Blake2 accepts any whole-byte digest size; only the common ones are listed.
pub fn names() -> Vec<String> {
	let mut names = vec![
		"SHA0".to_string(),
		"SHA2_224".into(),
		"SHA2_256".into(),
		"SHA2_384".into(),
		"SHA2_512".into(),
		"SHA2_512_224".into(),
		"SHA2_512_256".into(),
	];
	names.extend(Sha3Size::ALL.iter().map(|s| format!("SHA3_{}", s.bits())));
	names.extend(KeccakSize::ALL.iter().map(|s| format!("Keccak_{}", s.bits())));
	names.extend(Gost3411Size::ALL.iter().map(|s| format!("GOST3411_2012_{}", s.bits())));
	for passes in HavalPasses::ALL {
		names.extend(
			HavalSize::ALL
				.iter()
				.map(|s| format!("Haval_{}_{}", passes.passes(), s.bits())),
		);
	}
	for family in ["Tiger", "Tiger2"] {
		for rounds in TigerRounds::ALL {
			names.extend(
				TigerSize::ALL
					.iter()
					.map(|s| format!("{family}_{}_{}", rounds.passes(), s.bits())),
			);
		}
	}
	names.extend([160, 256, 384, 512].map(|bits| format!("Blake2B_{bits}")));
	names.extend([128, 160, 224, 256].map(|bits| format!("Blake2S_{bits}")));
	names
}

/// Whole-byte digest sizes only; range checks are left to the Blake2 configuration.
fn blake2_config(bits: u32) -> Option<Blake2Config> {
	(bits % 8 == 0).then(|| Blake2Config::new().with_hash_size(bits as usize / 8))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_every_name_round_trips() {
		for name in names() {
			let mut hasher = create(&name).unwrap();
			assert_eq!(hasher.name(), name);
			assert_eq!(hasher.compute_bytes(b"abc").unwrap().len(), hasher.hash_size());
		}
	}

	#[test]
	fn test_names_are_case_insensitive() {
		assert_eq!(create("sha2_256").unwrap().name(), "SHA2_256");
		assert_eq!(create("blake2b_256").unwrap().name(), "Blake2B_256");
		assert_eq!(create("TIGER2_5_160").unwrap().name(), "Tiger2_5_160");
	}

	#[test]
	fn test_rejections() {
		assert_eq!(create("MD5").err(), Some(HashError::UnknownAlgorithm("MD5".into())));
		assert_eq!(create("SHA3_x").err(), Some(HashError::UnknownAlgorithm("SHA3_x".into())));
		assert_eq!(
			create("Haval_6_128").err(),
			Some(HashError::UnsupportedVariant {
				algorithm: "Haval passes",
				value: 6
			})
		);
		assert_eq!(
			create("Blake2S_264").err(),
			Some(HashError::InvalidHashSize {
				min: 1,
				max: 32,
				actual: 33
			})
		);
		assert!(matches!(create("Blake2B_100"), Err(HashError::UnknownAlgorithm(_))));
	}

	#[test]
	fn test_xof_creation() {
		let mut xof = create_xof("Shake_256", 128).unwrap();
		assert_eq!(xof.name(), "Shake_256_XOFSizeInBytes_16");
		assert_eq!(xof.xof_size_in_bits(), 128);
		assert_eq!(xof.compute_bytes(b"").unwrap().len(), 16);

		let mut plain = create_xof("shake_128", 256).unwrap();
		let mut custom = create_xof("CShake_128", 256).unwrap();
		assert_eq!(custom.name(), "CShake_128_XOFSizeInBytes_32");
		assert_eq!(plain.compute_bytes(b"abc").unwrap(), custom.compute_bytes(b"abc").unwrap());

		assert_eq!(create_xof("Blake2XS", 800).unwrap().name(), "Blake2XS_XOFSizeInBytes_100");
		assert_eq!(
			create_xof("Shake_128", 12).err(),
			Some(HashError::XofSizeNotByteAligned { bits: 12 })
		);
		assert!(matches!(create_xof("SHA2_256", 256), Err(HashError::UnknownAlgorithm(_))));
	}
}
