// Copyright 2025 Irreducible Inc.

use std::{
	fs::File,
	io::{self, BufReader, Read, Write},
	path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use hashkit_hash::{
	factory::{create, create_xof, names},
	HashResult, HashWriter, Hasher,
};
use hashkit_utils::{env::boolean_env_flag_set, tracing::init_tracing};
use tracing::{debug, info};

/// Print checksums of files, or of standard input when no file is given.
#[derive(Debug, Parser)]
#[command(name = "hashsum")]
struct Args {
	/// Algorithm name, e.g. SHA2_256, Tiger2_3_192 or Blake2B_512. Case does not matter.
	#[arg(short, long, default_value = "SHA2_256")]
	algorithm: String,
	/// Output length in bits, for the extendable-output algorithms Shake_128, Shake_256,
	/// CShake_128, CShake_256, Blake2XB and Blake2XS.
	#[arg(long)]
	xof_bits: Option<u64>,
	/// List the fixed-output algorithm names and exit.
	#[arg(long)]
	list: bool,
	/// Files to hash. `-` stands for standard input.
	files: Vec<PathBuf>,
}

fn main() -> Result<()> {
	let args = Args::parse();

	init_tracing();

	if args.list {
		for name in names() {
			println!("{name}");
		}
		return Ok(());
	}

	let uppercase = boolean_env_flag_set("HASHKIT_UPPERCASE");
	match args.xof_bits {
		Some(bits) => {
			let mut xof = create_xof(&args.algorithm, bits)
				.with_context(|| format!("cannot create XOF {}", args.algorithm))?;
			hash_inputs(xof.as_mut(), &args.files, uppercase)
		}
		None => {
			let mut hasher = create(&args.algorithm)
				.with_context(|| format!("cannot create hasher {}", args.algorithm))?;
			hash_inputs(hasher.as_mut(), &args.files, uppercase)
		}
	}
}

fn hash_inputs<H: Hasher + ?Sized>(
	hasher: &mut H,
	files: &[PathBuf],
	uppercase: bool,
) -> Result<()> {
	info!(algorithm = %hasher.name(), inputs = files.len().max(1), "hashing");

	let stdin_only = [PathBuf::from("-")];
	let files = if files.is_empty() { &stdin_only[..] } else { files };

	let stdout = io::stdout();
	let mut out = stdout.lock();
	for path in files {
		let digest = if path == Path::new("-") {
			digest_reader(hasher, io::stdin().lock()).context("failed to hash standard input")?
		} else {
			let file = File::open(path)
				.with_context(|| format!("cannot open {}", path.display()))?;
			digest_reader(hasher, BufReader::new(file))
				.with_context(|| format!("failed to hash {}", path.display()))?
		};
		debug!(path = %path.display(), bytes = digest.len(), "digest computed");

		let hex = if uppercase {
			digest.to_hex_upper()
		} else {
			digest.to_hex()
		};
		writeln!(out, "{hex}  {}", path.display())?;
	}
	Ok(())
}

/// Streams `reader` through a freshly initialized `hasher`.
fn digest_reader<H: Hasher + ?Sized>(hasher: &mut H, mut reader: impl Read) -> Result<HashResult> {
	hasher.initialize();
	let mut writer = HashWriter::new(&mut *hasher);
	io::copy(&mut reader, &mut writer)?;
	writer.flush()?;
	drop(writer);
	Ok(hasher.transform_final()?)
}

#[cfg(test)]
mod tests {
	use std::io::Cursor;

	use clap::CommandFactory;

	use super::*;

	#[test]
	fn test_args_are_consistent() {
		Args::command().debug_assert();
	}

	#[test]
	fn test_digest_reader_matches_compute_bytes() {
		let data = vec![0xa5u8; 5000];
		let mut hasher = create("Haval_4_160").unwrap();
		let expected = hasher.compute_bytes(&data).unwrap();

		hasher.transform_bytes(b"leftover input is discarded").unwrap();
		let streamed = digest_reader(hasher.as_mut(), Cursor::new(&data)).unwrap();
		assert_eq!(streamed, expected);
	}

	#[test]
	fn test_digest_reader_with_xof() {
		let mut xof = create_xof("Shake_256", 8 * 48).unwrap();
		let expected = xof.compute_bytes(b"abc").unwrap();
		let streamed = digest_reader(xof.as_mut(), Cursor::new(b"abc")).unwrap();
		assert_eq!(streamed.len(), 48);
		assert_eq!(streamed, expected);
	}
}
