// Copyright 2025 Irreducible Inc.

//! Tiger and Tiger2 with 3, 4 or 5 passes.
//!
//! The two variants differ only in the first padding byte. The four S-boxes are not embedded;
//! they are regenerated on first use with the designers' published procedure, which yields the
//! reference tables exactly.

use hashkit_utils::bytes::{read_u64_le, write_u64_le};
use lazy_static::lazy_static;

use crate::{
	block::{BlockCompressor, BlockHasher},
	padding::md_pad,
	variant::numeric_variant,
};

const BLOCK_SIZE: usize = 64;

const IV: [u64; 3] = [0x0123456789abcdef, 0xfedcba9876543210, 0xf096a5b4c3b2e187];

const SBOX_SEED: &[u8; 64] = b"Tiger - A Fast New Hash Function, by Ross Anderson and Eli Biham";

const SBOX_GENERATION_PASSES: usize = 5;

lazy_static! {
	/// S-boxes t1 to t4, stored back to back.
	static ref SBOXES: Box<[u64; 1024]> = generate_sboxes();
}

numeric_variant! {
	/// Number of passes over each block (three is the original design).
	pub enum TigerRounds: passes, "Tiger rounds" {
		Three = 3,
		Four = 4,
		Five = 5,
	}
}

numeric_variant! {
	pub enum TigerSize: bits, "Tiger" {
		Bits128 = 128,
		Bits160 = 160,
		Bits192 = 192,
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TigerPadding {
	/// Original Tiger, padding starts with `0x01`.
	Tiger,
	/// Tiger2, padding starts with `0x80` as in MD5 and SHA.
	Tiger2,
}

impl TigerPadding {
	fn marker(self) -> u8 {
		match self {
			Self::Tiger => 0x01,
			Self::Tiger2 => 0x80,
		}
	}
}

#[derive(Clone)]
pub struct TigerCompressor {
	padding: TigerPadding,
	rounds: TigerRounds,
	size: TigerSize,
	state: [u64; 3],
}

pub type TigerHasher = BlockHasher<TigerCompressor>;

pub fn tiger(rounds: TigerRounds, size: TigerSize) -> TigerHasher {
	BlockHasher::new(TigerCompressor::new(TigerPadding::Tiger, rounds, size))
}

pub fn tiger2(rounds: TigerRounds, size: TigerSize) -> TigerHasher {
	BlockHasher::new(TigerCompressor::new(TigerPadding::Tiger2, rounds, size))
}

impl TigerCompressor {
	pub fn new(padding: TigerPadding, rounds: TigerRounds, size: TigerSize) -> Self {
		Self {
			padding,
			rounds,
			size,
			state: IV,
		}
	}

	fn transform_block(&mut self, block: &[u8]) {
		let mut x = [0u64; 8];
		read_u64_le(block, &mut x);
		compress(&SBOXES, &mut self.state, x, self.rounds.passes() as usize);
	}
}

impl BlockCompressor for TigerCompressor {
	fn name(&self) -> String {
		let family = match self.padding {
			TigerPadding::Tiger => "Tiger",
			TigerPadding::Tiger2 => "Tiger2",
		};
		format!("{family}_{}_{}", self.rounds.passes(), self.size.bits())
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
		let bit_len = processed_bytes.wrapping_mul(8).to_le_bytes();
		md_pad(tail, BLOCK_SIZE, self.padding.marker(), &bit_len, |block| {
			self.transform_block(block)
		});
	}

	fn write_digest(&self, out: &mut [u8]) {
		write_u64_le(&self.state, out);
	}
}

#[inline]
fn round(s: &[u64; 1024], a: &mut u64, b: &mut u64, c: &mut u64, x: u64, mul: u64) {
	*c ^= x;
	let i = c.to_le_bytes().map(usize::from);
	*a = a.wrapping_sub(s[i[0]] ^ s[256 + i[2]] ^ s[512 + i[4]] ^ s[768 + i[6]]);
	*b = b.wrapping_add(s[768 + i[1]] ^ s[512 + i[3]] ^ s[256 + i[5]] ^ s[i[7]]);
	*b = b.wrapping_mul(mul);
}

fn pass(s: &[u64; 1024], a: &mut u64, b: &mut u64, c: &mut u64, x: &[u64; 8], mul: u64) {
	round(s, a, b, c, x[0], mul);
	round(s, b, c, a, x[1], mul);
	round(s, c, a, b, x[2], mul);
	round(s, a, b, c, x[3], mul);
	round(s, b, c, a, x[4], mul);
	round(s, c, a, b, x[5], mul);
	round(s, a, b, c, x[6], mul);
	round(s, b, c, a, x[7], mul);
}

fn key_schedule(x: &mut [u64; 8]) {
	x[0] = x[0].wrapping_sub(x[7] ^ 0xa5a5a5a5a5a5a5a5);
	x[1] ^= x[0];
	x[2] = x[2].wrapping_add(x[1]);
	x[3] = x[3].wrapping_sub(x[2] ^ (!x[1] << 19));
	x[4] ^= x[3];
	x[5] = x[5].wrapping_add(x[4]);
	x[6] = x[6].wrapping_sub(x[5] ^ (!x[4] >> 23));
	x[7] ^= x[6];
	x[0] = x[0].wrapping_add(x[7]);
	x[1] = x[1].wrapping_sub(x[0] ^ (!x[7] << 19));
	x[2] ^= x[1];
	x[3] = x[3].wrapping_add(x[2]);
	x[4] = x[4].wrapping_sub(x[3] ^ (!x[2] >> 23));
	x[5] ^= x[4];
	x[6] = x[6].wrapping_add(x[5]);
	x[7] = x[7].wrapping_sub(x[6] ^ 0x0123456789abcdef);
}

fn compress(s: &[u64; 1024], state: &mut [u64; 3], mut x: [u64; 8], passes: usize) {
	let [mut a, mut b, mut c] = *state;

	pass(s, &mut a, &mut b, &mut c, &x, 5);
	key_schedule(&mut x);
	pass(s, &mut c, &mut a, &mut b, &x, 7);
	key_schedule(&mut x);
	pass(s, &mut b, &mut c, &mut a, &x, 9);
	for _ in 3..passes {
		key_schedule(&mut x);
		pass(s, &mut a, &mut b, &mut c, &x, 9);
		(a, b, c) = (c, a, b);
	}

	state[0] ^= a;
	state[1] = b.wrapping_sub(state[1]);
	state[2] = c.wrapping_add(state[2]);
}

fn swap_byte(table: &mut [u64; 1024], x: usize, y: usize, col: usize) {
	let mask = 0xffu64 << (8 * col);
	let (bx, by) = (table[x] & mask, table[y] & mask);
	table[x] = (table[x] & !mask) | by;
	table[y] = (table[y] & !mask) | bx;
}

fn generate_sboxes() -> Box<[u64; 1024]> {
	let mut table = Box::new([0u64; 1024]);
	for (i, entry) in table.iter_mut().enumerate() {
		*entry = (i as u64 & 0xff) * 0x0101010101010101;
	}

	let mut seed = [0u64; 8];
	read_u64_le(SBOX_SEED, &mut seed);

	let mut state = IV;
	let mut abc = 2;
	for _ in 0..SBOX_GENERATION_PASSES {
		for i in 0..256 {
			for sb in (0..1024).step_by(256) {
				abc += 1;
				if abc == 3 {
					abc = 0;
					compress(&table, &mut state, seed, 3);
				}
				for col in 0..8 {
					let j = sb + ((state[abc] >> (8 * col)) & 0xff) as usize;
					swap_byte(&mut table, sb + i, j, col);
				}
			}
		}
	}
	table
}

#[cfg(test)]
mod tests {
	use hex_literal::hex;

	use super::*;
	use crate::hasher::Hasher;

	#[test]
	fn test_generated_sboxes() {
		// Leading entries of t1 and t4 from the reference tables.
		assert_eq!(SBOXES[0], 0x02aab17cf7e90c5e);
		assert_eq!(SBOXES[1], 0xac424b03e243a8ec);
		assert_eq!(SBOXES[768], 0x5b0e608526323c55);
	}

	#[test]
	fn test_tiger2_empty() {
		let mut hasher = tiger2(TigerRounds::Three, TigerSize::Bits192);
		assert_eq!(hasher.name(), "Tiger2_3_192");
		assert_eq!(
			hasher.compute_bytes(b"").unwrap(),
			hex!("4441be75f6018773c206c22745374b924aa8313fef919f41")
		);
		assert_eq!(
			tiger2(TigerRounds::Three, TigerSize::Bits128)
				.compute_bytes(b"")
				.unwrap(),
			hex!("4441be75f6018773c206c22745374b92")
		);
	}

	#[test]
	fn test_tiger2_abc() {
		assert_eq!(
			tiger2(TigerRounds::Three, TigerSize::Bits192)
				.compute_bytes(b"abc")
				.unwrap(),
			hex!("f68d7bc5af4b43a06e048d7829560d4a9415658bb0b1f3bf")
		);
	}

	#[test]
	fn test_extra_passes() {
		assert_eq!(
			tiger2(TigerRounds::Four, TigerSize::Bits192)
				.compute_bytes(b"")
				.unwrap(),
			hex!("6a7201a47aac2065913811175553489add0f8b99e65a0955")
		);
		assert_eq!(
			tiger2(TigerRounds::Five, TigerSize::Bits192)
				.compute_bytes(b"")
				.unwrap(),
			hex!("61c657cc0c3c147ed90779b36a1e811f1d27f406e3f37010")
		);
	}

	#[test]
	fn test_original_tiger_padding() {
		let mut hasher = tiger(TigerRounds::Three, TigerSize::Bits192);
		assert_eq!(hasher.name(), "Tiger_3_192");
		assert_eq!(
			hasher.compute_bytes(b"").unwrap(),
			hex!("3293ac630c13f0245f92bbb1766e16167a4e58492dde73f3")
		);
	}

	#[test]
	fn test_multi_block_inputs() {
		let designers = b"Tiger - A Fast New Hash Function, by Ross Anderson and Eli Biham";
		assert_eq!(designers.len(), BLOCK_SIZE);
		assert_eq!(
			tiger(TigerRounds::Three, TigerSize::Bits192)
				.compute_bytes(designers)
				.unwrap(),
			hex!("8a866829040a410c729ad23f5ada711603b3cdd357e4c15e")
		);

		let mut hasher = tiger2(TigerRounds::Three, TigerSize::Bits192);
		for _ in 0..25 {
			hasher.transform_bytes(b"1234567890").unwrap();
		}
		assert_eq!(
			hasher.transform_final().unwrap(),
			hex!("64174be357e8b7226da17e1f37dc7e18708ba0ac802eaa1d")
		);
	}
}
