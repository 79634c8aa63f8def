use std::path::PathBuf;

use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[cfg(test)]
mod tests;

#[derive(Parser, Debug)]
#[command(name = "aum")]
#[command(about = "Unlock a music library through an unlock web service on a remote browser")]
#[command(version)]
#[command(styles = cli_styles())]
pub struct Cli {
	/// Increase verbosity (-v debug for aum, -vv debug for everything)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Output format
	#[arg(short = 'f', long, global = true, value_enum, default_value = "text")]
	pub format: OutputFormat,

	/// Load variables from this file instead of searching for `.env`
	#[arg(long, global = true, value_name = "FILE")]
	pub env_file: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Option<Commands>,
}

impl Cli {
	/// The requested command; `run` when none was given.
	pub fn action(&self) -> Commands {
		self.command.unwrap_or(Commands::Run)
	}
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
	/// Unlock, delete originals, then strip substrings from names (default)
	Run,
	/// Unlock and delete originals without renaming
	Unlock,
	/// Strip the configured substrings from library filenames
	Rename,
	/// Show the batches an unlock would submit
	Plan,
	/// Show the effective configuration
	Config,
}

impl Commands {
	pub fn name(self) -> &'static str {
		match self {
			Commands::Run => "run",
			Commands::Unlock => "unlock",
			Commands::Rename => "rename",
			Commands::Plan => "plan",
			Commands::Config => "config",
		}
	}

	/// Whether the command talks to the hub.
	pub fn needs_hub(self) -> bool {
		matches!(self, Commands::Run | Commands::Unlock)
	}
}

/// Cargo-like help colors.
fn cli_styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Green.on_default().bold())
		.usage(AnsiColor::Green.on_default().bold())
		.literal(AnsiColor::Cyan.on_default())
		.placeholder(AnsiColor::Cyan.on_default())
}
