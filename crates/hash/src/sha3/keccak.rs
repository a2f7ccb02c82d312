// Copyright 2025 Irreducible Inc.

const ROUND_CONSTANTS: [u64; 24] = [
	0x0000000000000001, 0x0000000000008082, 0x800000000000808a, 0x8000000080008000,
	0x000000000000808b, 0x0000000080000001, 0x8000000080008081, 0x8000000000008009,
	0x000000000000008a, 0x0000000000000088, 0x0000000080008009, 0x000000008000000a,
	0x000000008000808b, 0x800000000000008b, 0x8000000000008089, 0x8000000000008003,
	0x8000000000008002, 0x8000000000000080, 0x000000000000800a, 0x800000008000000a,
	0x8000000080008081, 0x8000000000008080, 0x0000000080000001, 0x8000000080008008,
];

// Rotation offsets and lane destinations of the combined rho and pi steps, following the
// cycle that starts at lane 1.
const RHO: [u32; 24] = [
	1, 3, 6, 10, 15, 21, 28, 36, 45, 55, 2, 14, 27, 41, 56, 8, 25, 43, 62, 18, 39, 61, 20, 44,
];
const PI: [usize; 24] = [
	10, 7, 11, 17, 18, 3, 5, 16, 8, 21, 24, 4, 15, 23, 19, 13, 12, 2, 20, 14, 22, 9, 6, 1,
];

/// Keccak-f[1600]. Lane `(x, y)` lives at index `x + 5 * y`.
pub(crate) fn keccak_f1600(a: &mut [u64; 25]) {
	for rc in ROUND_CONSTANTS {
		// θ
		let mut c = [0u64; 5];
		for x in 0..5 {
			c[x] = a[x] ^ a[x + 5] ^ a[x + 10] ^ a[x + 15] ^ a[x + 20];
		}
		for x in 0..5 {
			let d = c[(x + 4) % 5] ^ c[(x + 1) % 5].rotate_left(1);
			for y in 0..5 {
				a[5 * y + x] ^= d;
			}
		}

		// ρ and π
		let mut carry = a[1];
		for (&dest, &rot) in PI.iter().zip(&RHO) {
			let next = a[dest];
			a[dest] = carry.rotate_left(rot);
			carry = next;
		}

		// χ
		for y in 0..5 {
			let row = [a[5 * y], a[5 * y + 1], a[5 * y + 2], a[5 * y + 3], a[5 * y + 4]];
			for x in 0..5 {
				a[5 * y + x] = row[x] ^ (!row[(x + 1) % 5] & row[(x + 2) % 5]);
			}
		}

		// ι
		a[0] ^= rc;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_permutation_of_zero_state() {
		// First lanes of Keccak-f[1600] applied once to the all-zero state.
		let mut state = [0u64; 25];
		keccak_f1600(&mut state);
		assert_eq!(state[0], 0xf1258f7940e1dde7);
		assert_eq!(state[1], 0x84d5ccf933c0478a);
		assert_eq!(state[24], 0xeaf1ff7b5ceca249);
	}
}
