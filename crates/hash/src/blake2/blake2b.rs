// Copyright 2025 Irreducible Inc.

use hashkit_utils::bytes::{read_u64_le, write_u64_le};

use super::{Variant, SIGMA};

const IV: [u64; 8] = [
	0x6a09e667f3bcc908,
	0xbb67ae8584caa73b,
	0x3c6ef372fe94f82b,
	0xa54ff53a5f1d36f1,
	0x510e527fade682d1,
	0x9b05688c2b3e6c1f,
	0x1f83d9abfb41bd6b,
	0x5be0cd19137e2179,
];

const ROUNDS: usize = 12;

/// 64-bit Blake2 for 64-bit platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blake2b;

impl Variant for Blake2b {
	type State = [u64; 8];

	const NAME: &'static str = "Blake2B";
	const XOF_NAME: &'static str = "Blake2XB";
	const BLOCK_SIZE: usize = 128;
	const MAX_HASH_SIZE: usize = 64;
	const SALT_SIZE: usize = 16;
	const PARAMETER_BLOCK_SIZE: usize = 64;
	const NODE_OFFSET_SIZE: usize = 8;
	const MAX_NODE_OFFSET: u64 = u64::MAX;
	const MAX_XOF_SIZE: u64 = 0xffff_fffe;

	fn initial_state(parameter_block: &[u8]) -> Self::State {
		let mut state = [0u64; 8];
		read_u64_le(parameter_block, &mut state);
		for (word, iv) in state.iter_mut().zip(IV) {
			*word ^= iv;
		}
		state
	}

	fn compress(
		state: &mut Self::State,
		block: &[u8],
		counter: u128,
		last_block: bool,
		last_node: bool,
	) {
		let mut m = [0u64; 16];
		read_u64_le(block, &mut m);

		let mut v = [0u64; 16];
		v[..8].copy_from_slice(&state[..]);
		v[8..].copy_from_slice(&IV);
		v[12] ^= counter as u64;
		v[13] ^= (counter >> 64) as u64;
		if last_block {
			v[14] = !v[14];
		}
		if last_node {
			v[15] = !v[15];
		}

		for round in 0..ROUNDS {
			let s = &SIGMA[round % 10];
			g(&mut v, 0, 4, 8, 12, m[s[0]], m[s[1]]);
			g(&mut v, 1, 5, 9, 13, m[s[2]], m[s[3]]);
			g(&mut v, 2, 6, 10, 14, m[s[4]], m[s[5]]);
			g(&mut v, 3, 7, 11, 15, m[s[6]], m[s[7]]);
			g(&mut v, 0, 5, 10, 15, m[s[8]], m[s[9]]);
			g(&mut v, 1, 6, 11, 12, m[s[10]], m[s[11]]);
			g(&mut v, 2, 7, 8, 13, m[s[12]], m[s[13]]);
			g(&mut v, 3, 4, 9, 14, m[s[14]], m[s[15]]);
		}

		for (i, word) in state.iter_mut().enumerate() {
			*word ^= v[i] ^ v[i + 8];
		}
	}

	fn write_state(state: &Self::State, out: &mut [u8]) {
		write_u64_le(state, out);
	}
}

#[inline(always)]
fn g(v: &mut [u64; 16], a: usize, b: usize, c: usize, d: usize, x: u64, y: u64) {
	v[a] = v[a].wrapping_add(v[b]).wrapping_add(x);
	v[d] = (v[d] ^ v[a]).rotate_right(32);
	v[c] = v[c].wrapping_add(v[d]);
	v[b] = (v[b] ^ v[c]).rotate_right(24);
	v[a] = v[a].wrapping_add(v[b]).wrapping_add(y);
	v[d] = (v[d] ^ v[a]).rotate_right(16);
	v[c] = v[c].wrapping_add(v[d]);
	v[b] = (v[b] ^ v[c]).rotate_right(63);
}
