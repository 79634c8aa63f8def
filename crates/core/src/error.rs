//! Error types for the unlock engine.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
	/// A constructor argument is out of range (e.g. a negative patch size).
	#[error("invalid parameter: {0}")]
	InvalidParameter(String),

	/// A setting required by the requested operation is absent.
	#[error("missing setting: {0}")]
	MissingSetting(&'static str),

	/// The browser could not locate an element.
	#[error("element not found: {locator}")]
	ElementNotFound { locator: String },

	/// A bounded wait or poll deadline elapsed.
	#[error("timeout after {ms}ms waiting for: {condition}")]
	Timeout { ms: u64, condition: String },

	/// Transport or protocol failure of the browser backend.
	#[error("browser error: {0}")]
	Browser(String),

	/// Filesystem operation failed on `path`.
	#[error("filesystem error at {}: {source}", path.display())]
	Filesystem {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

impl Error {
	pub(crate) fn negative_patch_size(size: i64) -> Self {
		Self::InvalidParameter(format!("patch size must be non-negative (value: {size})"))
	}

	pub(crate) fn fs(path: &Path, source: std::io::Error) -> Self {
		Self::Filesystem {
			path: path.to_path_buf(),
			source,
		}
	}
}
