// Copyright 2025 Irreducible Inc.

use ::sha2::Digest;
use hex_literal::hex;
use proptest::prelude::*;

use super::*;
use crate::hasher::Hasher;

#[test]
fn test_abc_vectors() {
	assert_eq!(
		sha2_224().compute_bytes(b"abc").unwrap(),
		hex!("23097d223405d8228642a477bda255b32aadbce4bda0b3f7e36c9da7")
	);
	assert_eq!(
		sha2_256().compute_bytes(b"abc").unwrap(),
		hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
	);
	assert_eq!(
		sha2_512_256().compute_bytes(b"abc").unwrap(),
		hex!("53048e2681941ef99b2e29b76b4c7dabe4c2d0c634fc6d46e0e2f13107e7af23")
	);
}

#[test]
fn test_length_field_spills_into_extra_block() {
	// 56 bytes leave no room for the 64-bit length in the first block.
	let input = b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq";
	assert_eq!(input.len(), 56);
	assert_eq!(
		sha2_256().compute_bytes(input).unwrap(),
		hex!("248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1")
	);
}

proptest! {
	#[test]
	fn test_sha256_vs_reference(input in prop::collection::vec(any::<u8>(), 0..=300)) {
		let digest = sha2_224().compute_bytes(&input).unwrap();
		prop_assert_eq!(digest.as_bytes(), &::sha2::Sha224::digest(&input)[..]);
		let digest = sha2_256().compute_bytes(&input).unwrap();
		prop_assert_eq!(digest.as_bytes(), &::sha2::Sha256::digest(&input)[..]);
	}

	#[test]
	fn test_sha512_vs_reference(input in prop::collection::vec(any::<u8>(), 0..=600)) {
		let digest = sha2_384().compute_bytes(&input).unwrap();
		prop_assert_eq!(digest.as_bytes(), &::sha2::Sha384::digest(&input)[..]);
		let digest = sha2_512().compute_bytes(&input).unwrap();
		prop_assert_eq!(digest.as_bytes(), &::sha2::Sha512::digest(&input)[..]);
		let digest = sha2_512_224().compute_bytes(&input).unwrap();
		prop_assert_eq!(digest.as_bytes(), &::sha2::Sha512_224::digest(&input)[..]);
		let digest = sha2_512_256().compute_bytes(&input).unwrap();
		prop_assert_eq!(digest.as_bytes(), &::sha2::Sha512_256::digest(&input)[..]);
	}
}
