use thiserror::Error;

use crate::config::ConfigError;
use crate::output::{CommandError, ErrorCode};

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
	#[error(transparent)]
	Config(#[from] ConfigError),

	#[error(transparent)]
	Unlock(#[from] aum::Error),

	#[error(transparent)]
	Hub(#[from] aum_runtime::Error),

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),

	#[error(transparent)]
	Anyhow(#[from] anyhow::Error),
}

impl CliError {
	/// Process exit status for this error.
	pub fn exit_code(&self) -> i32 {
		match self {
			CliError::Config(_) => 2,
			_ => 1,
		}
	}

	/// Convert this error to a CommandError for structured output
	pub fn to_command_error(&self) -> CommandError {
		let (code, details) = match self {
			CliError::Config(_) => (ErrorCode::ConfigError, None),
			CliError::Unlock(err) => match err {
				aum::Error::InvalidParameter(_) | aum::Error::MissingSetting(_) => (ErrorCode::InvalidInput, None),
				aum::Error::ElementNotFound { locator } => (
					ErrorCode::SelectorNotFound,
					Some(serde_json::json!({ "locator": locator })),
				),
				aum::Error::Timeout { ms, condition } => (
					ErrorCode::Timeout,
					Some(serde_json::json!({ "timeoutMs": ms, "condition": condition })),
				),
				aum::Error::Browser(_) => (ErrorCode::SessionError, None),
				aum::Error::Filesystem { path, .. } => (ErrorCode::IoError, Some(serde_json::json!({ "path": path }))),
			},
			CliError::Hub(_) => (ErrorCode::SessionError, None),
			CliError::Io(_) => (ErrorCode::IoError, None),
			CliError::Json(_) | CliError::Anyhow(_) => (ErrorCode::InternalError, None),
		};

		CommandError {
			code,
			message: self.to_string(),
			details,
		}
	}
}
