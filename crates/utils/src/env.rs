// Copyright 2025 Irreducible Inc.

const TRUTHY: [&str; 4] = ["1", "on", "true", "yes"];

/// Read boolean flag from the environment variable.
///
/// Any of `1`, `on`, `true` or `yes` (in any letter case) counts as set.
pub fn boolean_env_flag_set(flag: &str) -> bool {
	match std::env::var(flag) {
		Ok(val) => is_truthy(&val),
		Err(_) => false,
	}
}

fn is_truthy(val: &str) -> bool {
	let val = val.trim();
	TRUTHY.iter().any(|t| t.eq_ignore_ascii_case(val))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_truthy_values() {
		for val in ["1", "on", "ON", "True", "yes", " YES "] {
			assert!(is_truthy(val), "{val}");
		}
		for val in ["", "0", "off", "no", "nope"] {
			assert!(!is_truthy(val), "{val}");
		}
	}

	#[test]
	fn test_missing_flag() {
		assert!(!boolean_env_flag_set("HASHKIT_TEST_FLAG_THAT_IS_NEVER_SET"));
	}
}
