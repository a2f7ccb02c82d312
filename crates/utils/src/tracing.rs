// Copyright 2025 Irreducible Inc.

/// Installs the global tracing subscriber used by the binaries.
///
/// The filter is taken from `RUST_LOG` and falls back to `warn`. Events are written to stderr so
/// they never interleave with digests printed on stdout. Calling this more than once is harmless.
pub fn init_tracing() {
	use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

	let _ = tracing_subscriber::registry()
		.with(filter)
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.try_init();
}
