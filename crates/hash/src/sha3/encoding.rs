// Copyright 2025 Irreducible Inc.

//! Integer and string encodings of NIST SP 800-185.

fn encode_integer(value: u64) -> ([u8; 8], usize) {
	let bytes = value.to_be_bytes();
	let skip = bytes[..7].iter().take_while(|&&b| b == 0).count();
	(bytes, skip)
}

pub(crate) fn left_encode(value: u64) -> Vec<u8> {
	let (bytes, skip) = encode_integer(value);
	let mut out = Vec::with_capacity(9 - skip);
	out.push((8 - skip) as u8);
	out.extend_from_slice(&bytes[skip..]);
	out
}

pub(crate) fn right_encode(value: u64) -> Vec<u8> {
	let (bytes, skip) = encode_integer(value);
	let mut out = Vec::with_capacity(9 - skip);
	out.extend_from_slice(&bytes[skip..]);
	out.push((8 - skip) as u8);
	out
}

pub(crate) fn encode_string(s: &[u8]) -> Vec<u8> {
	let mut out = left_encode((s.len() as u64).wrapping_mul(8));
	out.extend_from_slice(s);
	out
}

/// Prefixes `x` with the encoded width `w` and zero-pads the result to a multiple of `w`.
pub(crate) fn bytepad(x: &[u8], w: usize) -> Vec<u8> {
	let mut out = left_encode(w as u64);
	out.extend_from_slice(x);
	let padded_len = out.len().div_ceil(w) * w;
	out.resize(padded_len, 0);
	out
}
