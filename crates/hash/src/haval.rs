// Copyright 2025 Irreducible Inc.

//! HAVAL with 3, 4 or 5 passes and 128 to 256-bit output.

use hashkit_utils::bytes::{read_u32_le, write_u32_le};

use crate::{
	block::{BlockCompressor, BlockHasher},
	padding::md_pad,
	variant::numeric_variant,
};

const BLOCK_SIZE: usize = 128;

const VERSION: u8 = 1;

// The fractional part of π supplies the IV (first eight words) and the additive constants of
// passes 2 to 5 (the following 128 words).
const IV: [u32; 8] = [
	0x243f6a88, 0x85a308d3, 0x13198a2e, 0x03707344, 0xa4093822, 0x299f31d0, 0x082efa98, 0xec4e6c89,
];

const K: [u32; 128] = [
	0x452821e6, 0x38d01377, 0xbe5466cf, 0x34e90c6c, 0xc0ac29b7, 0xc97c50dd, 0x3f84d5b5, 0xb5470917,
	0x9216d5d9, 0x8979fb1b, 0xd1310ba6, 0x98dfb5ac, 0x2ffd72db, 0xd01adfb7, 0xb8e1afed, 0x6a267e96,
	0xba7c9045, 0xf12c7f99, 0x24a19947, 0xb3916cf7, 0x0801f2e2, 0x858efc16, 0x636920d8, 0x71574e69,
	0xa458fea3, 0xf4933d7e, 0x0d95748f, 0x728eb658, 0x718bcd58, 0x82154aee, 0x7b54a41d, 0xc25a59b5,
	0x9c30d539, 0x2af26013, 0xc5d1b023, 0x286085f0, 0xca417918, 0xb8db38ef, 0x8e79dcb0, 0x603a180e,
	0x6c9e0e8b, 0xb01e8a3e, 0xd71577c1, 0xbd314b27, 0x78af2fda, 0x55605c60, 0xe65525f3, 0xaa55ab94,
	0x57489862, 0x63e81440, 0x55ca396a, 0x2aab10b6, 0xb4cc5c34, 0x1141e8ce, 0xa15486af, 0x7c72e993,
	0xb3ee1411, 0x636fbc2a, 0x2ba9c55d, 0x741831f6, 0xce5c3e16, 0x9b87931e, 0xafd6ba33, 0x6c24cf5c,
	0x7a325381, 0x28958677, 0x3b8f4898, 0x6b4bb9af, 0xc4bfe81b, 0x66282193, 0x61d809cc, 0xfb21a991,
	0x487cac60, 0x5dec8032, 0xef845d5d, 0xe98575b1, 0xdc262302, 0xeb651b88, 0x23893e81, 0xd396acc5,
	0x0f6d6ff3, 0x83f44239, 0x2e0b4482, 0xa4842004, 0x69c8f04a, 0x9e1f9b5e, 0x21c66842, 0xf6e96c9a,
	0x670c9c61, 0xabd388f0, 0x6a51a0d2, 0xd8542f68, 0x960fa728, 0xab5133a3, 0x6eef0b6c, 0x137a3be4,
	0xba3bf050, 0x7efb2a98, 0xa1f1651d, 0x39af0176, 0x66ca593e, 0x82430e88, 0x8cee8619, 0x456f9fb4,
	0x7d84a5c3, 0x3b8b5ebe, 0xe06f75d8, 0x85c12073, 0x401a449f, 0x56c16aa6, 0x4ed3aa62, 0x363f7706,
	0x1bfedf72, 0x429b023d, 0x37d0d724, 0xd00a1248, 0xdb0fead3, 0x49f1c09b, 0x075372c9, 0x80991b7b,
	0x25d479d8, 0xf6e8def7, 0xe3fe501a, 0xb6794c3b, 0x976ce0bd, 0x04c006ba, 0xc1a94fb6, 0x409f60c4,
];

/// Message word order of passes 2 to 5; pass 1 reads the words in order.
const WORD_ORDER: [[usize; 32]; 4] = [
	[
		5, 14, 26, 18, 11, 28, 7, 16, 0, 23, 20, 22, 1, 10, 4, 8, 30, 3, 21, 9, 17, 24, 29, 6, 19,
		12, 15, 13, 2, 25, 31, 27,
	],
	[
		19, 9, 4, 20, 28, 17, 8, 22, 29, 14, 25, 12, 24, 30, 16, 26, 31, 15, 7, 3, 1, 0, 18, 27, 13,
		6, 21, 10, 23, 11, 5, 2,
	],
	[
		24, 4, 0, 14, 2, 7, 28, 23, 26, 6, 30, 20, 18, 25, 19, 3, 22, 11, 31, 21, 8, 27, 12, 9, 1,
		29, 5, 15, 17, 10, 16, 13,
	],
	[
		27, 3, 21, 26, 17, 11, 20, 29, 19, 0, 12, 7, 13, 8, 31, 10, 5, 9, 14, 30, 18, 6, 28, 24, 2,
		23, 16, 22, 4, 1, 25, 15,
	],
];

numeric_variant! {
	pub enum HavalPasses: passes, "Haval passes" {
		Three = 3,
		Four = 4,
		Five = 5,
	}
}

numeric_variant! {
	pub enum HavalSize: bits, "Haval" {
		Bits128 = 128,
		Bits160 = 160,
		Bits192 = 192,
		Bits224 = 224,
		Bits256 = 256,
	}
}

type BooleanFn = fn([u32; 7]) -> u32;

// Arguments are (x6, x5, x4, x3, x2, x1, x0).
fn f1([x6, x5, x4, x3, x2, x1, x0]: [u32; 7]) -> u32 {
	(x1 & (x0 ^ x4)) ^ (x2 & x5) ^ (x3 & x6) ^ x0
}

fn f2([x6, x5, x4, x3, x2, x1, x0]: [u32; 7]) -> u32 {
	(x2 & ((x1 & !x3) ^ (x4 & x5) ^ x6 ^ x0)) ^ (x4 & (x1 ^ x5)) ^ (x3 & x5) ^ x0
}

fn f3([x6, x5, x4, x3, x2, x1, x0]: [u32; 7]) -> u32 {
	(x3 & ((x1 & x2) ^ x6 ^ x0)) ^ (x1 & x4) ^ (x2 & x5) ^ x0
}

fn f4([x6, x5, x4, x3, x2, x1, x0]: [u32; 7]) -> u32 {
	(x4 & ((x5 & !x2) ^ (x3 & !x6) ^ x1 ^ x6 ^ x0)) ^ (x3 & ((x1 & x2) ^ x5 ^ x6)) ^ (x2 & x6) ^ x0
}

fn f5([x6, x5, x4, x3, x2, x1, x0]: [u32; 7]) -> u32 {
	(x0 & ((x1 & x2 & x3) ^ !x5)) ^ (x1 & x4) ^ (x2 & x5) ^ (x3 & x6)
}

const FUNCTIONS: [BooleanFn; 5] = [f1, f2, f3, f4, f5];

/// For each pass, the register fed to each argument of the boolean function, as the `j` of
/// `x_j`. The permutations differ with the number of passes.
const PERMUTATIONS_3: [[usize; 7]; 3] = [
	[1, 0, 3, 5, 6, 2, 4],
	[4, 2, 1, 0, 5, 3, 6],
	[6, 1, 2, 3, 4, 5, 0],
];

const PERMUTATIONS_4: [[usize; 7]; 4] = [
	[2, 6, 1, 4, 5, 3, 0],
	[3, 5, 2, 0, 1, 6, 4],
	[1, 4, 3, 6, 0, 2, 5],
	[6, 4, 0, 5, 2, 1, 3],
];

const PERMUTATIONS_5: [[usize; 7]; 5] = [
	[3, 4, 1, 0, 5, 2, 6],
	[6, 2, 1, 0, 3, 4, 5],
	[2, 6, 0, 4, 3, 1, 5],
	[1, 5, 3, 2, 0, 4, 6],
	[2, 5, 0, 6, 4, 3, 1],
];

#[derive(Clone)]
pub struct HavalCompressor {
	passes: HavalPasses,
	size: HavalSize,
	state: [u32; 8],
}

pub type HavalHasher = BlockHasher<HavalCompressor>;

pub fn haval(passes: HavalPasses, size: HavalSize) -> HavalHasher {
	BlockHasher::new(HavalCompressor::new(passes, size))
}

impl HavalCompressor {
	pub fn new(passes: HavalPasses, size: HavalSize) -> Self {
		Self {
			passes,
			size,
			state: IV,
		}
	}

	fn permutations(&self) -> &'static [[usize; 7]] {
		match self.passes {
			HavalPasses::Three => &PERMUTATIONS_3,
			HavalPasses::Four => &PERMUTATIONS_4,
			HavalPasses::Five => &PERMUTATIONS_5,
		}
	}

	fn transform_block(&mut self, block: &[u8]) {
		let mut w = [0u32; 32];
		read_u32_le(block, &mut w);

		let mut t = self.state;
		for (pass, perm) in self.permutations().iter().enumerate() {
			let f = FUNCTIONS[pass];
			for i in 0..32 {
				// Register x_j of step i lives at t[(j - i) mod 8].
				let reg = |j: usize| (j + 32 - i) % 8;
				let args = perm.map(|j| t[reg(j)]);
				let (word, constant) = match pass {
					0 => (w[i], 0),
					_ => (w[WORD_ORDER[pass - 1][i]], K[32 * (pass - 1) + i]),
				};
				t[reg(7)] = f(args)
					.rotate_right(7)
					.wrapping_add(t[reg(7)].rotate_right(11))
					.wrapping_add(word)
					.wrapping_add(constant);
			}
		}

		for (s, v) in self.state.iter_mut().zip(t) {
			*s = s.wrapping_add(v);
		}
	}

	/// Folds the eight state words into the requested digest size.
	fn tailored(&self) -> [u32; 8] {
		let mut d = self.state;
		match self.size {
			HavalSize::Bits128 => {
				let t = (d[7] & 0x000000ff)
					| (d[6] & 0xff000000)
					| (d[5] & 0x00ff0000)
					| (d[4] & 0x0000ff00);
				d[0] = d[0].wrapping_add(t.rotate_right(8));
				let t = (d[7] & 0x0000ff00)
					| (d[6] & 0x000000ff)
					| (d[5] & 0xff000000)
					| (d[4] & 0x00ff0000);
				d[1] = d[1].wrapping_add(t.rotate_right(16));
				let t = (d[7] & 0x00ff0000)
					| (d[6] & 0x0000ff00)
					| (d[5] & 0x000000ff)
					| (d[4] & 0xff000000);
				d[2] = d[2].wrapping_add(t.rotate_right(24));
				let t = (d[7] & 0xff000000)
					| (d[6] & 0x00ff0000)
					| (d[5] & 0x0000ff00)
					| (d[4] & 0x000000ff);
				d[3] = d[3].wrapping_add(t);
			}
			HavalSize::Bits160 => {
				let t = (d[7] & 0x3f) | (d[6] & (0x7f << 25)) | (d[5] & (0x3f << 19));
				d[0] = d[0].wrapping_add(t.rotate_right(19));
				let t = (d[7] & (0x3f << 6)) | (d[6] & 0x3f) | (d[5] & (0x7f << 25));
				d[1] = d[1].wrapping_add(t.rotate_right(25));
				let t = (d[7] & (0x7f << 12)) | (d[6] & (0x3f << 6)) | (d[5] & 0x3f);
				d[2] = d[2].wrapping_add(t);
				let t = (d[7] & (0x3f << 19)) | (d[6] & (0x7f << 12)) | (d[5] & (0x3f << 6));
				d[3] = d[3].wrapping_add(t >> 6);
				let t = (d[7] & (0x7f << 25)) | (d[6] & (0x3f << 19)) | (d[5] & (0x7f << 12));
				d[4] = d[4].wrapping_add(t >> 12);
			}
			HavalSize::Bits192 => {
				let t = (d[7] & 0x1f) | (d[6] & (0x3f << 26));
				d[0] = d[0].wrapping_add(t.rotate_right(26));
				let t = (d[7] & (0x1f << 5)) | (d[6] & 0x1f);
				d[1] = d[1].wrapping_add(t);
				let t = (d[7] & (0x3f << 10)) | (d[6] & (0x1f << 5));
				d[2] = d[2].wrapping_add(t >> 5);
				let t = (d[7] & (0x1f << 16)) | (d[6] & (0x3f << 10));
				d[3] = d[3].wrapping_add(t >> 10);
				let t = (d[7] & (0x1f << 21)) | (d[6] & (0x1f << 16));
				d[4] = d[4].wrapping_add(t >> 16);
				let t = (d[7] & (0x3f << 26)) | (d[6] & (0x1f << 21));
				d[5] = d[5].wrapping_add(t >> 21);
			}
			HavalSize::Bits224 => {
				d[0] = d[0].wrapping_add((d[7] >> 27) & 0x1f);
				d[1] = d[1].wrapping_add((d[7] >> 22) & 0x1f);
				d[2] = d[2].wrapping_add((d[7] >> 18) & 0x0f);
				d[3] = d[3].wrapping_add((d[7] >> 13) & 0x1f);
				d[4] = d[4].wrapping_add((d[7] >> 9) & 0x0f);
				d[5] = d[5].wrapping_add((d[7] >> 4) & 0x1f);
				d[6] = d[6].wrapping_add(d[7] & 0x0f);
			}
			HavalSize::Bits256 => {}
		}
		d
	}
}

impl BlockCompressor for HavalCompressor {
	fn name(&self) -> String {
		format!("Haval_{}_{}", self.passes.passes(), self.size.bits())
	}

	fn block_size(&self) -> usize {
		BLOCK_SIZE
	}

	fn hash_size(&self) -> usize {
		self.size.bits() as usize / 8
	}

	fn reset(&mut self) {
		self.state = IV;
	}

	fn compress(&mut self, block: &[u8]) {
		self.transform_block(block);
	}

	fn finish(&mut self, tail: &[u8], processed_bytes: u64) {
		let bits = self.size.bits();
		let mut trailer = [0u8; 10];
		trailer[0] = (((bits & 0x3) as u8) << 6) | ((self.passes.passes() as u8) << 3) | VERSION;
		trailer[1] = (bits >> 2) as u8;
		trailer[2..].copy_from_slice(&processed_bytes.wrapping_mul(8).to_le_bytes());

		md_pad(tail, BLOCK_SIZE, 0x01, &trailer, |block| self.transform_block(block));
	}

	fn write_digest(&self, out: &mut [u8]) {
		write_u32_le(&self.tailored(), out);
	}
}

#[cfg(test)]
mod tests {
	use hex_literal::hex;

	use super::*;
	use crate::hasher::Hasher;

	fn empty_digest(passes: HavalPasses, size: HavalSize) -> Vec<u8> {
		haval(passes, size).compute_bytes(b"").unwrap().into_bytes()
	}

	#[test]
	fn test_constants_from_pi() {
		assert_eq!(IV[0], 0x243f6a88);
		assert_eq!(IV[7], 0xec4e6c89);
		assert_eq!(K[0], 0x452821e6);
	}

	#[test]
	fn test_three_pass_empty() {
		use HavalSize::*;
		let expected: [(HavalSize, &[u8]); 5] = [
			(Bits128, &hex!("c68f39913f901f3ddf44c707357a7d70")),
			(Bits160, &hex!("d353c3ae22a25401d257643836d7231a9a95f953")),
			(Bits192, &hex!("e9c48d7903eaf2a91c5b350151efcb175c0fc82de2289a4e")),
			(Bits224, &hex!("c5aae9d47bffcaaf84a8c6e7ccacd60a0dd1932be7b1a192b9214b6d")),
			(Bits256, &hex!("4f6938531f0bc8991f62da7bbd6f7de3fad44562b8c6f4ebf146d5b4e46f7c17")),
		];
		for (size, digest) in expected {
			assert_eq!(empty_digest(HavalPasses::Three, size), digest, "{size:?}");
		}
	}

	#[test]
	fn test_four_pass_empty() {
		use HavalSize::*;
		let expected: [(HavalSize, &[u8]); 5] = [
			(Bits128, &hex!("ee6bbf4d6a46a679b3a856c88538bb98")),
			(Bits160, &hex!("1d33aae1be4146dbaaca0b6e70d7a11f10801525")),
			(Bits192, &hex!("4a8372945afa55c7dead800311272523ca19d42ea47b72da")),
			(Bits224, &hex!("3e56243275b3b81561750550e36fcd676ad2f5dd9e15f2e89e6ed78e")),
			(Bits256, &hex!("c92b2e23091e80e375dadce26982482d197b1a2521be82da819f8ca2c579b99b")),
		];
		for (size, digest) in expected {
			assert_eq!(empty_digest(HavalPasses::Four, size), digest, "{size:?}");
		}
	}

	#[test]
	fn test_five_pass_empty() {
		use HavalSize::*;
		let expected: [(HavalSize, &[u8]); 5] = [
			(Bits128, &hex!("184b8482a0c050dca54b59c7f05bf5dd")),
			(Bits160, &hex!("255158cfc1eed1a7be7c55ddd64d9790415b933b")),
			(Bits192, &hex!("4839d0626f95935e17ee2fc4509387bbe2cc46cb382ffe85")),
			(Bits224, &hex!("4a0513c032754f5582a758d35917ac9adf3854219b39e3ac77d1837e")),
			(Bits256, &hex!("be417bb4dd5cfb76c7126f4f8eeb1553a449039307b1a3cd451dbfdc0fbbe330")),
		];
		for (size, digest) in expected {
			assert_eq!(empty_digest(HavalPasses::Five, size), digest, "{size:?}");
		}
	}

	#[test]
	fn test_single_byte() {
		let mut hasher = haval(HavalPasses::Three, HavalSize::Bits128);
		assert_eq!(hasher.name(), "Haval_3_128");
		assert_eq!(hasher.compute_bytes(b"a").unwrap(), hex!("0cd40739683e15f01ca5dbceef4059f1"));
	}

	#[test]
	fn test_multi_block_input() {
		// 250 bytes: one full block, then a tail too long for the trailer.
		let message = b"1234567890".repeat(25);
		assert_eq!(
			haval(HavalPasses::Three, HavalSize::Bits128)
				.compute_bytes(&message)
				.unwrap(),
			hex!("9ba09d01aa45b73dc7c217d9524889c6")
		);
		assert_eq!(
			haval(HavalPasses::Four, HavalSize::Bits192)
				.compute_bytes(&message)
				.unwrap(),
			hex!("02c4fce292a21279bc3593570c3010486b769279df8ab54f")
		);
		assert_eq!(
			haval(HavalPasses::Five, HavalSize::Bits256)
				.compute_bytes(&message)
				.unwrap(),
			hex!("d9df3982684b454f63539234a4afe8ee65a5d2a9fb5abae342d623369ab17990")
		);
	}
}
