// Copyright 2025 Irreducible Inc.

//! Early-return helpers for functions returning `Result`.
//!
//! With the `bail_panic` feature enabled both macros panic instead of returning, which makes it
//! easy to get a backtrace pointing at the first failed check.

#[cfg(feature = "bail_panic")]
#[macro_export]
macro_rules! bail {
	($err:expr) => {
		panic!("{}", $err);
	};
}

/// Returns early with the given error, converted with `Into`.
#[cfg(not(feature = "bail_panic"))]
#[macro_export]
macro_rules! bail {
	($err:expr) => {
		return Err($err.into());
	};
}

/// Returns early with the given error unless the condition holds.
#[macro_export]
macro_rules! ensure {
	($cond:expr, $err:expr) => {
		if !$cond {
			$crate::bail!($err);
		}
	};
}

#[cfg(all(test, not(feature = "bail_panic")))]
mod tests {
	#[derive(Debug, PartialEq, Eq)]
	struct TooLong(usize);

	fn check_len(data: &[u8]) -> Result<usize, TooLong> {
		ensure!(data.len() <= 4, TooLong(data.len()));
		Ok(data.len())
	}

	fn always_fails() -> Result<(), TooLong> {
		bail!(TooLong(0));
	}

	#[test]
	fn test_ensure() {
		assert_eq!(check_len(b"abcd"), Ok(4));
		assert_eq!(check_len(b"abcde"), Err(TooLong(5)));
	}

	#[test]
	fn test_bail() {
		assert_eq!(always_fails(), Err(TooLong(0)));
	}
}
