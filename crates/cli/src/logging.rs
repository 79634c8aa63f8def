use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

use crate::config::Profile;

/// Default filter when `RUST_LOG` is not set.
///
/// 0 = info for aum crates, warn for dependencies
/// 1 (-v) = debug for aum crates
/// 2+ (-vv) = debug for everything
pub fn default_filter(verbosity: u8, profile: Profile) -> &'static str {
	match (verbosity, profile) {
		(0, Profile::Development) | (1, _) => "warn,aum=debug",
		(0, _) => "warn,aum=info",
		_ => "debug",
	}
}

pub fn init_logging(verbosity: u8, profile: Profile) {
	let filter = default_filter(verbosity, profile);
	let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

	let stderr = std::io::stderr.with_max_level(tracing::Level::TRACE);

	tracing_subscriber::fmt()
		.with_env_filter(env_filter)
		.with_writer(stderr)
		.with_target(false)
		.with_level(true)
		.compact()
		.init();
}
