// Copyright 2025 Irreducible Inc.

use hashkit_utils::bytes::write_u64_le;
use zeroize::{Zeroize, Zeroizing};

use super::{
	encoding::{bytepad, encode_string, right_encode},
	keccak::keccak_f1600,
};
use crate::{block::BlockCompressor, xof::ExtendableCompressor};

const STATE_BYTES: usize = 200;

/// Which member of the Keccak family a sponge computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpongeMode {
	/// Original Keccak submission padding.
	Keccak,
	Sha3,
	Shake,
	CShake,
	Kmac,
	KmacXof,
}

/// Keccak-f[1600] sponge shared by SHA-3, Keccak, SHAKE, cSHAKE and KMAC.
#[derive(Clone)]
pub struct KeccakSponge {
	mode: SpongeMode,
	/// Digest size for the fixed-output modes, security strength for the others.
	bits: usize,
	rate: usize,
	output_bits: u64,
	state: [u64; 25],
	squeeze_offset: usize,
	preamble: Zeroizing<Vec<u8>>,
}

impl KeccakSponge {
	pub(crate) fn new(mode: SpongeMode, bits: usize, output_bits: u64) -> Self {
		Self {
			mode,
			bits,
			rate: STATE_BYTES - 2 * bits / 8,
			output_bits,
			state: [0; 25],
			squeeze_offset: 0,
			preamble: Zeroizing::new(Vec::new()),
		}
	}

	/// cSHAKE prefix `bytepad(encode_string(N) || encode_string(S), rate)`.
	///
	/// With both strings empty cSHAKE is defined to be plain SHAKE, so no prefix is kept.
	pub(crate) fn with_cshake_prefix(mut self, function_name: &[u8], customization: &[u8]) -> Self {
		if function_name.is_empty() && customization.is_empty() {
			self.preamble = Zeroizing::new(Vec::new());
		} else {
			let mut names = encode_string(function_name);
			names.extend_from_slice(&encode_string(customization));
			self.preamble = Zeroizing::new(bytepad(&names, self.rate));
		}
		self
	}

	/// Appends the KMAC key block `bytepad(encode_string(K), rate)` after the cSHAKE prefix.
	pub(crate) fn with_kmac_key(mut self, key: &[u8]) -> Self {
		let encoded_key = Zeroizing::new(encode_string(key));
		let key_block = Zeroizing::new(bytepad(&encoded_key, self.rate));
		self.preamble.extend_from_slice(&key_block);
		self
	}

	pub fn mode(&self) -> SpongeMode {
		self.mode
	}

	fn domain_suffix(&self) -> u8 {
		match self.mode {
			SpongeMode::Keccak => 0x01,
			SpongeMode::Sha3 => 0x06,
			SpongeMode::Shake => 0x1f,
			SpongeMode::CShake if self.preamble.is_empty() => 0x1f,
			SpongeMode::CShake | SpongeMode::Kmac | SpongeMode::KmacXof => 0x04,
		}
	}

	fn absorb_block(&mut self, block: &[u8]) {
		for (lane, chunk) in self.state.iter_mut().zip(block.chunks_exact(8)) {
			*lane ^= u64::from_le_bytes(chunk.try_into().expect("chunk is 8 bytes"));
		}
		keccak_f1600(&mut self.state);
	}
}

/// Copies output out of the rate portion of `state`, permuting whenever it is exhausted.
fn squeeze_into(state: &mut [u64; 25], rate: usize, offset: &mut usize, mut out: &mut [u8]) {
	let mut bytes = Zeroizing::new([0u8; STATE_BYTES]);
	write_u64_le(&state[..], &mut bytes[..]);
	while !out.is_empty() {
		if *offset == rate {
			keccak_f1600(state);
			write_u64_le(&state[..], &mut bytes[..]);
			*offset = 0;
		}
		let n = out.len().min(rate - *offset);
		out[..n].copy_from_slice(&bytes[*offset..*offset + n]);
		out = &mut out[n..];
		*offset += n;
	}
}

impl BlockCompressor for KeccakSponge {
	fn name(&self) -> String {
		let bytes = self.output_bits / 8;
		let bits = self.bits;
		match self.mode {
			SpongeMode::Keccak => format!("Keccak_{bits}"),
			SpongeMode::Sha3 => format!("SHA3_{bits}"),
			SpongeMode::Shake => format!("Shake_{bits}_XOFSizeInBytes_{bytes}"),
			SpongeMode::CShake => format!("CShake_{bits}_XOFSizeInBytes_{bytes}"),
			SpongeMode::Kmac => format!("KMAC_{bits}_OutputSizeInBytes_{bytes}"),
			SpongeMode::KmacXof => format!("KMACXOF_{bits}_XOFSizeInBytes_{bytes}"),
		}
	}

	fn block_size(&self) -> usize {
		self.rate
	}

	fn hash_size(&self) -> usize {
		(self.output_bits / 8) as usize
	}

	fn reset(&mut self) {
		self.state.zeroize();
		self.squeeze_offset = 0;
	}

	fn preamble(&self) -> &[u8] {
		&self.preamble
	}

	fn compress(&mut self, block: &[u8]) {
		self.absorb_block(block);
	}

	fn finish(&mut self, tail: &[u8], _processed_bytes: u64) {
		let mut last = Zeroizing::new(tail.to_vec());
		match self.mode {
			SpongeMode::Kmac => last.extend_from_slice(&right_encode(self.output_bits)),
			SpongeMode::KmacXof => last.extend_from_slice(&right_encode(0)),
			_ => {}
		}

		let rate = self.rate;
		let full_blocks = last.len() / rate;
		for block in last.chunks_exact(rate) {
			self.absorb_block(block);
		}

		let mut padded = Zeroizing::new(vec![0u8; rate]);
		let rest = &last[full_blocks * rate..];
		padded[..rest.len()].copy_from_slice(rest);
		padded[rest.len()] ^= self.domain_suffix();
		padded[rate - 1] ^= 0x80;
		self.absorb_block(&padded);
		self.squeeze_offset = 0;
	}

	fn write_digest(&self, out: &mut [u8]) {
		let mut state = self.state;
		let mut offset = self.squeeze_offset;
		squeeze_into(&mut state, self.rate, &mut offset, out);
		state.zeroize();
	}
}

impl ExtendableCompressor for KeccakSponge {
	fn xof_bits_range(&self) -> (u64, u64) {
		(8, u64::MAX & !7)
	}

	fn xof_size_in_bits(&self) -> u64 {
		self.output_bits
	}

	fn set_xof_size_in_bits(&mut self, bits: u64) {
		self.output_bits = bits;
	}

	fn squeeze(&mut self, out: &mut [u8]) {
		squeeze_into(&mut self.state, self.rate, &mut self.squeeze_offset, out);
	}
}

impl Drop for KeccakSponge {
	fn drop(&mut self) {
		self.state.zeroize();
	}
}
