//! Response envelopes.
//!
//! Every WebDriver response wraps its payload in `{"value": ...}`. Failures
//! use the same envelope with an error object as the value.

use serde::{Deserialize, Serialize};

/// Successful response wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
	pub value: T,
}

/// Error payload carried in the `value` of a failed response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireError {
	/// W3C error code, e.g. `no such element`.
	pub error: String,
	#[serde(default)]
	pub message: String,
	#[serde(default)]
	pub stacktrace: String,
}

/// Well-known W3C error codes the client distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
	NoSuchElement,
	StaleElementReference,
	Timeout,
	InvalidSessionId,
	Other,
}

impl ErrorCode {
	pub fn parse(code: &str) -> Self {
		match code {
			"no such element" => Self::NoSuchElement,
			"stale element reference" => Self::StaleElementReference,
			"timeout" | "script timeout" => Self::Timeout,
			"invalid session id" => Self::InvalidSessionId,
			_ => Self::Other,
		}
	}
}

impl WireError {
	pub fn code(&self) -> ErrorCode {
		ErrorCode::parse(&self.error)
	}
}
