// Copyright 2025 Irreducible Inc.

/// Declares a closed set of numeric algorithm parameters (digest sizes, pass counts).
///
/// The generated enum converts from `u32` with [`HashError::UnsupportedVariant`] on values
/// outside the set.
///
/// [`HashError::UnsupportedVariant`]: crate::hasher::HashError::UnsupportedVariant
macro_rules! numeric_variant {
	(
		$(#[$meta:meta])*
		pub enum $name:ident : $accessor:ident, $algorithm:literal {
			$($variant:ident = $value:literal),+ $(,)?
		}
	) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
		pub enum $name {
			$($variant),+
		}

		impl $name {
			pub const ALL: &'static [$name] = &[$(Self::$variant),+];

			pub const fn $accessor(self) -> u32 {
				match self {
					$(Self::$variant => $value),+
				}
			}
		}

		impl TryFrom<u32> for $name {
			type Error = $crate::hasher::HashError;

			fn try_from(value: u32) -> Result<Self, Self::Error> {
				match value {
					$($value => Ok(Self::$variant),)+
					_ => Err($crate::hasher::HashError::UnsupportedVariant {
						algorithm: $algorithm,
						value: u64::from(value),
					}),
				}
			}
		}
	};
}

pub(crate) use numeric_variant;

#[cfg(test)]
mod tests {
	use crate::hasher::HashError;

	numeric_variant! {
		pub enum Width: bits, "Test" {
			Narrow = 8,
			Wide = 16,
		}
	}

	#[test]
	fn test_conversion() {
		assert_eq!(Width::try_from(16), Ok(Width::Wide));
		assert_eq!(Width::Narrow.bits(), 8);
		assert_eq!(Width::ALL, &[Width::Narrow, Width::Wide]);
		assert_eq!(
			Width::try_from(12),
			Err(HashError::UnsupportedVariant {
				algorithm: "Test",
				value: 12
			})
		);
	}
}
