use std::process::ExitCode;

use aum_cli::{
	cli::Cli,
	commands,
	config::{self, Config, ProcessEnv, Profile},
	error::{CliError, Result},
	logging,
	output::{self, OutputFormat, ResultBuilder},
};
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
	let cli = Cli::parse();
	let format = cli.format;
	let command = cli.action().name();

	match run(cli).await {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			handle_error(&err, command, format);
			ExitCode::from(err.exit_code() as u8)
		}
	}
}

async fn run(cli: Cli) -> Result<()> {
	let loaded = config::load_env_files(cli.env_file.as_deref())?;

	let (profile, _) = Profile::resolve(&ProcessEnv);
	logging::init_logging(cli.verbose, profile);
	for path in &loaded {
		tracing::debug!(target = "aum", path = %path.display(), "loaded env file");
	}

	let config = Config::from_env(&ProcessEnv)?;
	commands::dispatch(cli.action(), &config, cli.format).await
}

fn handle_error(err: &CliError, command: &str, format: OutputFormat) {
	let cmd_error = err.to_command_error();

	output::print_error_stderr(&cmd_error);

	if format == OutputFormat::Json {
		let result: output::CommandResult<()> = ResultBuilder::new(command).error(cmd_error).build();
		output::print_result(&result, format);
	}
}
