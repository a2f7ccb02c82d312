// Copyright 2025 Irreducible Inc.

//! Bounds-checked conversions between byte strings and machine words.

macro_rules! impl_word_codec {
	($word:ty, $read:ident, $write:ident, $from:ident, $to:ident, $order:literal) => {
		#[doc = concat!(
			"Decodes `dst.len()` ", $order, " `", stringify!($word),
			"` words from the start of `src`."
		)]
		///
		/// # Panics
		///
		/// Panics if `src` is shorter than the words requested.
		#[inline]
		pub fn $read(src: &[u8], dst: &mut [$word]) {
			const N: usize = std::mem::size_of::<$word>();
			assert!(src.len() >= dst.len() * N, "source too short for {} words", dst.len());
			for (word, chunk) in dst.iter_mut().zip(src.chunks_exact(N)) {
				*word = <$word>::$from(chunk.try_into().expect("chunk has word size"));
			}
		}

		#[doc = concat!("Encodes `src` as ", $order, " bytes into `dst`.")]
		///
		/// Writing stops when either side runs out, so a short `dst` receives a truncated
		/// encoding.
		#[inline]
		pub fn $write(src: &[$word], dst: &mut [u8]) {
			const N: usize = std::mem::size_of::<$word>();
			for (chunk, word) in dst.chunks_mut(N).zip(src) {
				let len = chunk.len();
				chunk.copy_from_slice(&word.$to()[..len]);
			}
		}
	};
}

impl_word_codec!(u32, read_u32_le, write_u32_le, from_le_bytes, to_le_bytes, "little-endian");
impl_word_codec!(u32, read_u32_be, write_u32_be, from_be_bytes, to_be_bytes, "big-endian");
impl_word_codec!(u64, read_u64_le, write_u64_le, from_le_bytes, to_le_bytes, "little-endian");
impl_word_codec!(u64, read_u64_be, write_u64_be, from_be_bytes, to_be_bytes, "big-endian");

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_read_words() {
		let bytes = [1u8, 2, 3, 4, 5, 6, 7, 8];

		let mut le = [0u32; 2];
		read_u32_le(&bytes, &mut le);
		assert_eq!(le, [0x04030201, 0x08070605]);

		let mut be = [0u32; 2];
		read_u32_be(&bytes, &mut be);
		assert_eq!(be, [0x01020304, 0x05060708]);

		let mut wide = [0u64; 1];
		read_u64_le(&bytes, &mut wide);
		assert_eq!(wide, [0x0807060504030201]);
		read_u64_be(&bytes, &mut wide);
		assert_eq!(wide, [0x0102030405060708]);
	}

	#[test]
	fn test_truncated_write() {
		let mut out = [0u8; 6];
		write_u32_be(&[0x01020304, 0x05060708], &mut out);
		assert_eq!(out, [1, 2, 3, 4, 5, 6]);

		let mut out = [0u8; 3];
		write_u64_le(&[0x0807060504030201], &mut out);
		assert_eq!(out, [1, 2, 3]);
	}

	#[test]
	#[should_panic]
	fn test_short_source_panics() {
		let mut words = [0u64; 2];
		read_u64_le(&[0u8; 15], &mut words);
	}
}
