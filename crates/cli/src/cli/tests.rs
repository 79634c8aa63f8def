use std::path::PathBuf;

use clap::Parser;

use super::*;

#[test]
fn no_subcommand_means_run() {
	let cli = Cli::try_parse_from(["aum"]).unwrap();
	assert_eq!(cli.command, None);
	assert_eq!(cli.action(), Commands::Run);
	assert_eq!(cli.format, OutputFormat::Text);
	assert_eq!(cli.verbose, 0);
}

#[test]
fn global_flags_after_subcommand() {
	let cli = Cli::try_parse_from(["aum", "plan", "-vv", "--format", "json", "--env-file", "dev.env"]).unwrap();
	assert_eq!(cli.action(), Commands::Plan);
	assert_eq!(cli.verbose, 2);
	assert_eq!(cli.format, OutputFormat::Json);
	assert_eq!(cli.env_file, Some(PathBuf::from("dev.env")));
}

#[test]
fn only_unlocking_commands_need_hub() {
	assert!(Commands::Run.needs_hub());
	assert!(Commands::Unlock.needs_hub());
	assert!(!Commands::Rename.needs_hub());
	assert!(!Commands::Plan.needs_hub());
	assert!(!Commands::Config.needs_hub());
}

#[test]
fn unknown_format_rejected() {
	assert!(Cli::try_parse_from(["aum", "-f", "yaml"]).is_err());
}
