// Copyright 2025 Irreducible Inc.

use std::io::Write;

use hashkit_hash::{
	factory::{create, create_xof, names},
	sha3::{kmac_xof, SecurityLevel},
	HashError, HashWriter, Hasher, Xof,
};
use hex_literal::hex;
use proptest::prelude::*;
use rand::{rngs::StdRng, RngCore, SeedableRng};

fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
	let mut data = vec![0u8; len];
	StdRng::seed_from_u64(seed).fill_bytes(&mut data);
	data
}

#[test]
fn test_quick_brown_fox_across_families() {
	let message = b"The quick brown fox jumps over the lazy dog";
	let cases: [(&str, &[u8]); 4] = [
		("SHA0", &hex!("b03b401ba92d77666221e843feebf8c561cea5f7")),
		(
			"SHA2_256",
			&hex!("d7a8fbb307d7809469ca9abcb0082e4f8d5651e46d3cdb762d02d0bf37c9e592"),
		),
		(
			"Blake2S_256",
			&hex!("606beeec743ccbeff6cbcdf5d5302aa855c256c29b88c8ed331ea1a6bf3c8812"),
		),
		(
			"SHA3_256",
			&hex!("69070dda01975c8c120c3aada1b282394e7f032fa9cf32f4cb2259a0897dfc04"),
		),
	];
	for (name, expected) in cases {
		let mut hasher = create(name).unwrap();
		assert_eq!(hasher.compute_bytes(message).unwrap().as_bytes(), expected, "{name}");
	}
}

#[test]
fn test_streaming_matches_one_shot_for_every_algorithm() {
	let data = random_bytes(777, 1);
	for name in names() {
		let mut hasher = create(&name).unwrap();
		let expected = hasher.compute_bytes(&data).unwrap();

		let block_size = hasher.block_size();
		for split in [0, 1, block_size - 1, block_size, block_size + 1, data.len()] {
			hasher.transform_bytes(&data[..split]).unwrap();
			hasher.transform_bytes(&[]).unwrap();
			hasher.transform_bytes(&data[split..]).unwrap();
			assert_eq!(hasher.transform_final().unwrap(), expected, "{name} split at {split}");
		}
	}
}

#[test]
fn test_clone_diverges_independently() {
	let prefix = random_bytes(200, 2);
	for name in names() {
		let mut original = create(&name).unwrap();
		original.transform_bytes(&prefix).unwrap();
		let mut copy = original.clone();

		original.transform_bytes(b"left").unwrap();
		copy.transform_bytes(b"right").unwrap();
		let left = original.transform_final().unwrap();
		let right = copy.transform_final().unwrap();
		assert_ne!(left, right, "{name}");

		let mut fresh = create(&name).unwrap();
		let mut message = prefix.clone();
		message.extend_from_slice(b"right");
		assert_eq!(fresh.compute_bytes(&message).unwrap(), right, "{name}");
	}
}

#[test]
fn test_transform_final_reinitializes() {
	for name in names() {
		let mut hasher = create(&name).unwrap();
		hasher.transform_bytes(b"first message").unwrap();
		hasher.transform_final().unwrap();

		hasher.transform_bytes(b"abc").unwrap();
		let reused = hasher.transform_final().unwrap();
		assert_eq!(create(&name).unwrap().compute_bytes(b"abc").unwrap(), reused, "{name}");
	}
}

#[test]
fn test_xof_errors() {
	let mut xof = create_xof("Shake_128", 64).unwrap();
	xof.transform_bytes(b"data").unwrap();
	assert_eq!(xof.set_xof_size_in_bits(128), Err(HashError::XofSizeLocked));

	let mut out = [0u8; 8];
	assert_eq!(
		xof.do_output(&mut out, 4, 5),
		Err(HashError::OutputBufferTooShort {
			required: 9,
			available: 8
		})
	);
	xof.do_output(&mut out, 0, 6).unwrap();
	assert_eq!(xof.transform_bytes(b"more"), Err(HashError::WriteAfterRead));
	assert_eq!(
		xof.do_output(&mut out, 0, 3),
		Err(HashError::OutputLengthExceeded {
			requested: 3,
			remaining: 2
		})
	);

	xof.initialize();
	xof.set_xof_size_in_bits(128).unwrap();
	assert_eq!(xof.name(), "Shake_128_XOFSizeInBytes_16");
	xof.transform_bytes(b"more").unwrap();
}

#[test]
fn test_xof_size_change_before_absorbing() {
	for name in ["Shake_256", "CShake_128", "Blake2XB", "Blake2XS"] {
		let mut xof = create_xof(name, 256).unwrap();
		xof.set_xof_size_in_bits(520).unwrap();
		let resized = xof.compute_bytes(b"abc").unwrap();
		assert_eq!(create_xof(name, 520).unwrap().compute_bytes(b"abc").unwrap(), resized);
	}
}

#[test]
fn test_boxed_xof_clone_mid_output() {
	let mut xof = kmac_xof(SecurityLevel::Bits256, b"key", b"", 8 * 200).unwrap();
	xof.transform_bytes(b"message").unwrap();
	let mut head = [0u8; 50];
	xof.do_output(&mut head, 0, 50).unwrap();

	let boxed: Box<dyn Xof> = Box::new(xof.clone());
	let mut copy = boxed.clone();
	let mut a = [0u8; 150];
	let mut b = [0u8; 150];
	xof.do_output(&mut a, 0, 150).unwrap();
	copy.do_output(&mut b, 0, 150).unwrap();
	assert_eq!(a, b);
}

#[test]
fn test_hash_writer_with_io_copy() {
	let data = random_bytes(10_000, 3);
	for name in ["SHA2_512", "GOST3411_2012_256", "Tiger2_3_192", "Haval_5_256"] {
		let mut hasher = create(name).unwrap();
		let expected = hasher.compute_bytes(&data).unwrap();

		let mut writer = HashWriter::new(hasher.as_mut());
		std::io::copy(&mut &data[..], &mut writer).unwrap();
		writer.flush().unwrap();
		drop(writer);
		assert_eq!(hasher.transform_final().unwrap(), expected, "{name}");
	}
}

proptest! {
	#[test]
	fn test_xof_prefix_property(
		input in prop::collection::vec(any::<u8>(), 0..=300),
		short in 1u64..=64,
		extra in 0u64..=300,
	) {
		for name in ["Shake_128", "Shake_256", "Blake2XB", "Blake2XS"] {
			let long = short + extra;
			let mut a = create_xof(name, short * 8).unwrap();
			let mut b = create_xof(name, long * 8).unwrap();
			let short_out = a.compute_bytes(&input).unwrap();
			let long_out = b.compute_bytes(&input).unwrap();
			// Blake2X binds the output length into every block.
			if name.starts_with("Shake") {
				prop_assert_eq!(short_out.as_bytes(), &long_out.as_bytes()[..short as usize]);
			} else if extra > 0 {
				prop_assert_ne!(short_out.as_bytes(), &long_out.as_bytes()[..short as usize]);
			}
		}
	}

	#[test]
	fn test_piecewise_output_matches_transform_final(
		input in prop::collection::vec(any::<u8>(), 0..=200),
		cuts in prop::collection::vec(0usize..=150, 0..5),
	) {
		for name in ["CShake_256", "Blake2XB"] {
			let mut xof = create_xof(name, 150 * 8).unwrap();
			let expected = xof.compute_bytes(&input).unwrap();

			let mut cuts = cuts.clone();
			cuts.extend([0, 150]);
			cuts.sort_unstable();
			xof.transform_bytes(&input).unwrap();
			let mut out = vec![0u8; 150];
			for window in cuts.windows(2) {
				xof.do_output(&mut out, window[0], window[1] - window[0]).unwrap();
			}
			prop_assert_eq!(expected.as_bytes(), &out[..]);
		}
	}
}
