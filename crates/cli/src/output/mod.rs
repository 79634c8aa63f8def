//! Structured output envelope for all CLI commands.
//!
//! ## Output Contract
//!
//! With `--format json` every command prints one envelope on stdout:
//!
//! ```json
//! {
//!   "schemaVersion": 1,
//!   "ok": true,
//!   "command": "run",
//!   "data": { ... },
//!   "timings": { "durationMs": 1234 }
//! }
//! ```
//!
//! On failure `data` is replaced by `error` with a `code`, a `message` and
//! optional `details`. Text output is a short human summary of `data`.

#[cfg(test)]
mod tests;

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use aum::{PipelineReport, Rename};
use serde::Serialize;

use crate::config::Config;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
	/// Human-readable summary
	#[default]
	Text,
	/// JSON envelope
	Json,
}

impl std::fmt::Display for OutputFormat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			OutputFormat::Text => write!(f, "text"),
			OutputFormat::Json => write!(f, "json"),
		}
	}
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult<T: Serialize> {
	pub schema_version: u32,
	pub ok: bool,
	pub command: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<T>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<CommandError>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub timings: Option<Timings>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandError {
	pub code: ErrorCode,
	pub message: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<serde_json::Value>,
}

/// Standardized error codes for programmatic handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
	/// Missing or invalid configuration
	ConfigError,
	/// Invalid parameter for the requested operation
	InvalidInput,
	/// A page element could not be located
	SelectorNotFound,
	/// A wait or poll deadline elapsed
	Timeout,
	/// Hub transport or protocol failure
	SessionError,
	/// Filesystem failure
	IoError,
	InternalError,
}

impl std::fmt::Display for ErrorCode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ErrorCode::ConfigError => write!(f, "CONFIG_ERROR"),
			ErrorCode::InvalidInput => write!(f, "INVALID_INPUT"),
			ErrorCode::SelectorNotFound => write!(f, "SELECTOR_NOT_FOUND"),
			ErrorCode::Timeout => write!(f, "TIMEOUT"),
			ErrorCode::SessionError => write!(f, "SESSION_ERROR"),
			ErrorCode::IoError => write!(f, "IO_ERROR"),
			ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
		}
	}
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timings {
	pub duration_ms: u64,
}

impl From<Duration> for Timings {
	fn from(duration: Duration) -> Self {
		Timings {
			duration_ms: duration.as_millis() as u64,
		}
	}
}

/// Builder for constructing command results
pub struct ResultBuilder<T: Serialize> {
	command: String,
	data: Option<T>,
	error: Option<CommandError>,
	start_time: Instant,
}

impl<T: Serialize> ResultBuilder<T> {
	pub fn new(command: impl Into<String>) -> Self {
		Self {
			command: command.into(),
			data: None,
			error: None,
			start_time: Instant::now(),
		}
	}

	/// Starts timing from `start` instead of now.
	pub fn started_at(mut self, start: Instant) -> Self {
		self.start_time = start;
		self
	}

	pub fn data(mut self, data: T) -> Self {
		self.data = Some(data);
		self
	}

	pub fn error(mut self, error: CommandError) -> Self {
		self.error = Some(error);
		self
	}

	pub fn build(self) -> CommandResult<T> {
		let ok = self.error.is_none() && self.data.is_some();
		CommandResult {
			schema_version: SCHEMA_VERSION,
			ok,
			command: self.command,
			data: self.data,
			error: self.error,
			timings: Some(Timings::from(self.start_time.elapsed())),
		}
	}
}

/// Human-readable rendering of command data.
pub trait TextSummary {
	fn write_text(&self, out: &mut dyn Write) -> io::Result<()>;
}

impl TextSummary for () {
	fn write_text(&self, _out: &mut dyn Write) -> io::Result<()> {
		Ok(())
	}
}

/// Print a command result to stdout in the specified format
pub fn print_result<T: Serialize + TextSummary>(result: &CommandResult<T>, format: OutputFormat) {
	match format {
		OutputFormat::Json => {
			if let Ok(json) = serde_json::to_string_pretty(result) {
				println!("{json}");
			}
		}
		OutputFormat::Text => {
			let mut stdout = io::stdout().lock();
			if let Some(ref data) = result.data {
				let _ = data.write_text(&mut stdout);
			}
		}
	}
}

/// Print an error to stderr in human-readable format
pub fn print_error_stderr(error: &CommandError) {
	eprintln!("Error [{}]: {}", error.code, error.message);
}

/// Result of `run` and `unlock`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineData {
	#[serde(flatten)]
	pub report: PipelineReport,
}

impl TextSummary for PipelineData {
	fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
		let report = &self.report;
		writeln!(out, "Locked files found: {}", report.discovered)?;
		for batch in &report.unlock.batches {
			writeln!(
				out,
				"Batch {}: {} submitted, {} unlocked",
				batch.index + 1,
				batch.originals.len(),
				batch.unlocked.len()
			)?;
			for path in &batch.unlocked {
				writeln!(out, "  {}", path.display())?;
			}
		}
		writeln!(out, "Originals deleted: {}", report.deleted.len())?;
		write_renames(out, &report.renamed)
	}
}

/// Result of `rename`.
#[derive(Debug, Serialize)]
pub struct RenameData {
	pub renamed: Vec<Rename>,
}

impl TextSummary for RenameData {
	fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
		write_renames(out, &self.renamed)
	}
}

fn write_renames(out: &mut dyn Write, renames: &[Rename]) -> io::Result<()> {
	writeln!(out, "Files renamed: {}", renames.len())?;
	for rename in renames {
		writeln!(out, "  {} -> {}", rename.from.display(), rename.to.display())?;
	}
	Ok(())
}

/// Result of `plan`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanData {
	pub patch_size: String,
	pub batches: Vec<Vec<PathBuf>>,
}

impl TextSummary for PlanData {
	fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
		writeln!(out, "Patch size: {}", self.patch_size)?;
		if self.batches.is_empty() {
			return writeln!(out, "No locked files.");
		}
		for (i, batch) in self.batches.iter().enumerate() {
			writeln!(out, "Batch {} ({} files):", i + 1, batch.len())?;
			for path in batch {
				writeln!(out, "  {}", path.display())?;
			}
		}
		Ok(())
	}
}

impl TextSummary for Config {
	fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
		fn or_none<T: std::fmt::Display>(v: Option<T>) -> String {
			v.map_or_else(|| "none".to_string(), |v| v.to_string())
		}

		writeln!(out, "profile            {}", self.profile)?;
		writeln!(out, "selenium hub       {}", or_none(self.hub_url.as_ref()))?;
		writeln!(out, "unlock service     {}", or_none(self.service_url.as_ref()))?;
		writeln!(out, "patch size         {}", self.patch_size)?;
		writeln!(out, "music dir          {}", self.music_dir.display())?;
		writeln!(out, "download dir       {}", self.download_dir.display())?;
		writeln!(out, "locked suffixes    {}", self.locked_suffixes)?;
		writeln!(out, "unlocked suffixes  {}", self.unlocked_suffixes)?;
		writeln!(out, "removing           {}", self.removing_substrings.join(";"))?;
		writeln!(out, "headless           {}", self.headless)?;
		writeln!(out, "file transfer      {}", self.file_transfer)?;
		writeln!(out, "poll interval      {:?}", self.poll_interval)?;
		writeln!(out, "poll deadline      {}", or_none(self.poll_deadline.map(|d| format!("{d:?}"))))?;
		writeln!(out, "element wait       {:?}", self.element_wait)
	}
}
