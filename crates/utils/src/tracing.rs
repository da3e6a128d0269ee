// Copyright 2025 Irreducible Inc.

use tracing_subscriber::{
	fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use crate::env::boolean_env_flag_set;

/// Environment flag that additionally logs the closing of every span with its busy time.
pub const SPAN_TIMINGS_FLAG: &str = "KUPYNA_SPAN_TIMINGS";

const DEFAULT_DIRECTIVES: &str = "info";

/// Installs a global `fmt` subscriber writing to stderr.
///
/// Verbosity follows `RUST_LOG` and falls back to `info`. Calling this more than once, or after
/// another subscriber was installed, leaves the existing subscriber in place.
pub fn init_tracing() {
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
	let span_events = if boolean_env_flag_set(SPAN_TIMINGS_FLAG) {
		FmtSpan::CLOSE
	} else {
		FmtSpan::NONE
	};

	let _ = tracing_subscriber::registry()
		.with(filter)
		.with(
			tracing_subscriber::fmt::layer()
				.with_writer(std::io::stderr)
				.with_span_events(span_events),
		)
		.try_init();
}
