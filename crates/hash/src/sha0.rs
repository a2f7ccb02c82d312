// Copyright 2025 Irreducible Inc.

//! SHA-0, the withdrawn 1993 predecessor of SHA-1.
//!
//! The message schedule lacks the one-bit rotation SHA-1 added; everything else matches SHA-1.

use hashkit_utils::bytes::{read_u32_be, write_u32_be};

use crate::{
	block::{BlockCompressor, BlockHasher},
	padding::md_pad,
};

const BLOCK_SIZE: usize = 64;

const IV: [u32; 5] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476, 0xc3d2e1f0];

const K: [u32; 4] = [0x5a827999, 0x6ed9eba1, 0x8f1bbcdc, 0xca62c1d6];

#[derive(Clone)]
pub struct Sha0Compressor {
	state: [u32; 5],
}

impl Default for Sha0Compressor {
	fn default() -> Self {
		Self { state: IV }
	}
}

pub type Sha0Hasher = BlockHasher<Sha0Compressor>;

pub fn sha0() -> Sha0Hasher {
	BlockHasher::new(Sha0Compressor::default())
}

impl BlockCompressor for Sha0Compressor {
	fn name(&self) -> String {
		"SHA0".into()
	}

	fn block_size(&self) -> usize {
		BLOCK_SIZE
	}

	fn hash_size(&self) -> usize {
		20
	}

	fn reset(&mut self) {
		self.state = IV;
	}

	fn compress(&mut self, block: &[u8]) {
		compress(&mut self.state, block);
	}

	fn finish(&mut self, tail: &[u8], processed_bytes: u64) {
		let bit_len = processed_bytes.wrapping_mul(8).to_be_bytes();
		md_pad(tail, BLOCK_SIZE, 0x80, &bit_len, |block| compress(&mut self.state, block));
	}

	fn write_digest(&self, out: &mut [u8]) {
		write_u32_be(&self.state, out);
	}
}

fn compress(state: &mut [u32; 5], block: &[u8]) {
	let mut w = [0u32; 80];
	read_u32_be(block, &mut w[..16]);
	for t in 16..80 {
		w[t] = w[t - 3] ^ w[t - 8] ^ w[t - 14] ^ w[t - 16];
	}

	let [mut a, mut b, mut c, mut d, mut e] = *state;
	for (t, &wt) in w.iter().enumerate() {
		let f = match t / 20 {
			0 => (b & c) | (!b & d),
			2 => (b & c) | (b & d) | (c & d),
			_ => b ^ c ^ d,
		};
		let temp = a
			.rotate_left(5)
			.wrapping_add(f)
			.wrapping_add(e)
			.wrapping_add(K[t / 20])
			.wrapping_add(wt);
		e = d;
		d = c;
		c = b.rotate_left(30);
		b = a;
		a = temp;
	}

	for (word, v) in state.iter_mut().zip([a, b, c, d, e]) {
		*word = word.wrapping_add(v);
	}
}

#[cfg(test)]
mod tests {
	use hex_literal::hex;

	use super::*;
	use crate::hasher::Hasher;

	#[test]
	fn test_known_answers() {
		let mut hasher = sha0();
		assert_eq!(
			hasher.compute_bytes(b"").unwrap(),
			hex!("f96cea198ad1dd5617ac084a3d92c6107708c0ef")
		);
		assert_eq!(
			hasher.compute_bytes(b"abc").unwrap(),
			hex!("0164b8a914cd2a5e74c4f7ff082c4d97f1edf880")
		);
		assert_eq!(
			hasher
				.compute_bytes(b"The quick brown fox jumps over the lazy dog")
				.unwrap(),
			hex!("b03b401ba92d77666221e843feebf8c561cea5f7")
		);
	}

	#[test]
	fn test_multi_block() {
		let mut hasher = sha0();
		for chunk in [b"a".repeat(1), b"a".repeat(63), b"a".repeat(936)] {
			hasher.transform_bytes(&chunk).unwrap();
		}
		assert_eq!(
			hasher.transform_final().unwrap(),
			hex!("8a14112b4ba0c9544d50e2b7d06cdcbbf122824c")
		);
	}
}
