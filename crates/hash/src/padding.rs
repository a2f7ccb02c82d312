// Copyright 2025 Irreducible Inc.

use zeroize::Zeroizing;

/// Merkle–Damgård strengthening.
///
/// Appends `marker` to `tail`, zero-fills and places `length_field` at the very end of the last
/// block, spilling into a second block when the field does not fit. Each resulting block is
/// handed to `compress`.
pub(crate) fn md_pad(
	tail: &[u8],
	block_size: usize,
	marker: u8,
	length_field: &[u8],
	mut compress: impl FnMut(&[u8]),
) {
	debug_assert!(tail.len() < block_size);
	debug_assert!(length_field.len() < block_size);

	let padded_len = if tail.len() + 1 + length_field.len() <= block_size {
		block_size
	} else {
		2 * block_size
	};

	let mut padded = Zeroizing::new(vec![0u8; padded_len]);
	padded[..tail.len()].copy_from_slice(tail);
	padded[tail.len()] = marker;
	padded[padded_len - length_field.len()..].copy_from_slice(length_field);

	for block in padded.chunks_exact(block_size) {
		compress(block);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn collect(tail: &[u8], length_field: &[u8]) -> Vec<Vec<u8>> {
		let mut blocks = Vec::new();
		md_pad(tail, 8, 0x80, length_field, |b| blocks.push(b.to_vec()));
		blocks
	}

	#[test]
	fn test_single_block() {
		assert_eq!(collect(b"ab", &[0x10, 0x00]), vec![vec![b'a', b'b', 0x80, 0, 0, 0, 0x10, 0]]);
		assert_eq!(
			collect(b"abcde", &[0x28, 0x00]),
			vec![vec![b'a', b'b', b'c', b'd', b'e', 0x80, 0x28, 0]]
		);
	}

	#[test]
	fn test_spills_into_second_block() {
		let blocks = collect(b"abcdef", &[0x30, 0x00]);
		assert_eq!(blocks.len(), 2);
		assert_eq!(blocks[0], vec![b'a', b'b', b'c', b'd', b'e', b'f', 0x80, 0]);
		assert_eq!(blocks[1], vec![0, 0, 0, 0, 0, 0, 0x30, 0]);
	}
}
