// Copyright 2025 Irreducible Inc.

//! SHA-2 (FIPS 180-4).

mod sha256;
mod sha512;
#[cfg(test)]
mod tests;

pub use sha256::{Sha256Compressor, Sha256Variant};
pub use sha512::{Sha512Compressor, Sha512Variant};

use crate::block::BlockHasher;

pub type Sha256Hasher = BlockHasher<Sha256Compressor>;
pub type Sha512Hasher = BlockHasher<Sha512Compressor>;

pub fn sha2_224() -> Sha256Hasher {
	BlockHasher::new(Sha256Compressor::new(Sha256Variant::Sha224))
}

pub fn sha2_256() -> Sha256Hasher {
	BlockHasher::new(Sha256Compressor::new(Sha256Variant::Sha256))
}

pub fn sha2_384() -> Sha512Hasher {
	BlockHasher::new(Sha512Compressor::new(Sha512Variant::Sha384))
}

pub fn sha2_512() -> Sha512Hasher {
	BlockHasher::new(Sha512Compressor::new(Sha512Variant::Sha512))
}

pub fn sha2_512_224() -> Sha512Hasher {
	BlockHasher::new(Sha512Compressor::new(Sha512Variant::Sha512_224))
}

pub fn sha2_512_256() -> Sha512Hasher {
	BlockHasher::new(Sha512Compressor::new(Sha512Variant::Sha512_256))
}
