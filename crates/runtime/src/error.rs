//! Error types for the hub runtime.

use std::path::PathBuf;

use aum_protocol::{ErrorCode, WireError};
use thiserror::Error;

/// Result type alias for runtime operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to a WebDriver hub.
#[derive(Debug, Error)]
pub enum Error {
	/// The hub URL could not be parsed or joined.
	#[error("Invalid hub URL '{url}': {reason}")]
	InvalidUrl { url: String, reason: String },

	/// HTTP transport failure (connection refused, reset, body read).
	#[error("Transport error: {0}")]
	Transport(#[from] reqwest::Error),

	/// The hub answered with a status and a body that is not a WebDriver error.
	#[error("Unexpected HTTP {status} from hub: {body}")]
	UnexpectedStatus { status: u16, body: String },

	/// No element matched the locator.
	#[error("No such element: {0}")]
	NoSuchElement(String),

	/// The element reference no longer points into the live DOM.
	#[error("Stale element reference: {0}")]
	StaleElement(String),

	/// Timeout waiting for an element or a remote operation.
	#[error("Timeout: {0}")]
	Timeout(String),

	/// The session was closed or never existed on the hub.
	#[error("Session closed: {0}")]
	SessionClosed(String),

	/// Any other W3C error code.
	#[error("WebDriver error '{code}': {message}")]
	WebDriver { code: String, message: String },

	/// A local file could not be read for upload.
	#[error("Failed to read upload {}: {source}", path.display())]
	Upload {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// Failed to pack a file into the transfer archive.
	#[error("Archive error: {0}")]
	Archive(#[from] zip::result::ZipError),

	/// I/O error.
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// JSON serialization/deserialization error.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

impl From<WireError> for Error {
	fn from(wire: WireError) -> Self {
		match wire.code() {
			ErrorCode::NoSuchElement => Self::NoSuchElement(wire.message),
			ErrorCode::StaleElementReference => Self::StaleElement(wire.message),
			ErrorCode::Timeout => Self::Timeout(wire.message),
			ErrorCode::InvalidSessionId => Self::SessionClosed(wire.message),
			ErrorCode::Other => Self::WebDriver {
				code: wire.error,
				message: wire.message,
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn wire(code: &str) -> WireError {
		WireError {
			error: code.to_string(),
			message: "detail".to_string(),
			stacktrace: String::new(),
		}
	}

	#[test]
	fn wire_errors_map_to_variants() {
		assert!(matches!(Error::from(wire("no such element")), Error::NoSuchElement(_)));
		assert!(matches!(Error::from(wire("stale element reference")), Error::StaleElement(_)));
		assert!(matches!(Error::from(wire("timeout")), Error::Timeout(_)));
		assert!(matches!(Error::from(wire("invalid session id")), Error::SessionClosed(_)));
	}

	#[test]
	fn unknown_wire_error_keeps_code() {
		let err = Error::from(wire("element not interactable"));
		assert_eq!(err.to_string(), "WebDriver error 'element not interactable': detail");
	}
}
