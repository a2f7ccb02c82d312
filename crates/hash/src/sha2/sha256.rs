// Copyright 2025 Irreducible Inc.

use hashkit_utils::bytes::{read_u32_be, write_u32_be};

use crate::{block::BlockCompressor, padding::md_pad};

const BLOCK_SIZE: usize = 64;

const K: [u32; 64] = [
	0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5, 0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5,
	0xd807aa98, 0x12835b01, 0x243185be, 0x550c7dc3, 0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174,
	0xe49b69c1, 0xefbe4786, 0x0fc19dc6, 0x240ca1cc, 0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da,
	0x983e5152, 0xa831c66d, 0xb00327c8, 0xbf597fc7, 0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967,
	0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13, 0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85,
	0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3, 0xd192e819, 0xd6990624, 0xf40e3585, 0x106aa070,
	0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5, 0x391c0cb3, 0x4ed8aa4a, 0x5b9cca4f, 0x682e6ff3,
	0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208, 0x90befffa, 0xa4506ceb, 0xbef9a3f7, 0xc67178f2,
];

const IV_224: [u32; 8] = [
	0xc1059ed8, 0x367cd507, 0x3070dd17, 0xf70e5939, 0xffc00b31, 0x68581511, 0x64f98fa7, 0xbefa4fa4,
];

const IV_256: [u32; 8] = [
	0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sha256Variant {
	Sha224,
	Sha256,
}

/// SHA-224 and SHA-256, which share the 32-bit compression function and differ in IV and
/// digest length.
#[derive(Clone)]
pub struct Sha256Compressor {
	variant: Sha256Variant,
	state: [u32; 8],
}

impl Sha256Compressor {
	pub fn new(variant: Sha256Variant) -> Self {
		let mut compressor = Self {
			variant,
			state: [0; 8],
		};
		compressor.reset();
		compressor
	}
}

impl BlockCompressor for Sha256Compressor {
	fn name(&self) -> String {
		match self.variant {
			Sha256Variant::Sha224 => "SHA2_224".into(),
			Sha256Variant::Sha256 => "SHA2_256".into(),
		}
	}

	fn block_size(&self) -> usize {
		BLOCK_SIZE
	}

	fn hash_size(&self) -> usize {
		match self.variant {
			Sha256Variant::Sha224 => 28,
			Sha256Variant::Sha256 => 32,
		}
	}

	fn reset(&mut self) {
		self.state = match self.variant {
			Sha256Variant::Sha224 => IV_224,
			Sha256Variant::Sha256 => IV_256,
		};
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

#[inline]
fn compress(state: &mut [u32; 8], block: &[u8]) {
	let mut w = [0u32; 64];
	read_u32_be(block, &mut w[..16]);
	for t in 16..64 {
		let s0 = w[t - 15].rotate_right(7) ^ w[t - 15].rotate_right(18) ^ (w[t - 15] >> 3);
		let s1 = w[t - 2].rotate_right(17) ^ w[t - 2].rotate_right(19) ^ (w[t - 2] >> 10);
		w[t] = w[t - 16]
			.wrapping_add(s0)
			.wrapping_add(w[t - 7])
			.wrapping_add(s1);
	}

	let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;
	for t in 0..64 {
		let s1 = e.rotate_right(6) ^ e.rotate_right(11) ^ e.rotate_right(25);
		let ch = (e & f) ^ (!e & g);
		let t1 = h
			.wrapping_add(s1)
			.wrapping_add(ch)
			.wrapping_add(K[t])
			.wrapping_add(w[t]);
		let s0 = a.rotate_right(2) ^ a.rotate_right(13) ^ a.rotate_right(22);
		let maj = (a & b) ^ (a & c) ^ (b & c);
		let t2 = s0.wrapping_add(maj);

		h = g;
		g = f;
		f = e;
		e = d.wrapping_add(t1);
		d = c;
		c = b;
		b = a;
		a = t1.wrapping_add(t2);
	}

	for (word, v) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
		*word = word.wrapping_add(v);
	}
}
