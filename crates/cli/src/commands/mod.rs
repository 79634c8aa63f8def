//! Command implementations and dispatch.

pub mod plan;
pub mod rename;
pub mod run;

use std::time::Instant;

use serde::Serialize;

use crate::cli::Commands;
use crate::config::Config;
use crate::error::Result;
use crate::output::{OutputFormat, ResultBuilder, TextSummary, print_result};

/// Runs `command` against `config` and prints its result.
pub async fn dispatch(command: Commands, config: &Config, format: OutputFormat) -> Result<()> {
	let started = Instant::now();
	config.log_summary();
	if command.needs_hub() {
		config.require_unlock_endpoints()?;
	}

	match command {
		Commands::Run => emit(command, run::execute(config, true).await?, format, started),
		Commands::Unlock => emit(command, run::execute(config, false).await?, format, started),
		Commands::Rename => emit(command, rename::execute(config)?, format, started),
		Commands::Plan => emit(command, plan::execute(config)?, format, started),
		Commands::Config => emit(command, config.clone(), format, started),
	}
	Ok(())
}

fn emit<T: Serialize + TextSummary>(command: Commands, data: T, format: OutputFormat, started: Instant) {
	let result = ResultBuilder::new(command.name()).started_at(started).data(data).build();
	print_result(&result, format);
}
