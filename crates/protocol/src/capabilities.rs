//! New-session capabilities.

use serde::{Deserialize, Serialize};

/// Body of `POST /session`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSession {
	pub capabilities: CapabilitiesRequest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilitiesRequest {
	pub always_match: Capabilities,
}

/// Browser capabilities requested from the hub.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
	pub browser_name: String,
	#[serde(rename = "moz:firefoxOptions", skip_serializing_if = "Option::is_none")]
	pub firefox_options: Option<FirefoxOptions>,
}

/// Firefox-specific launch options.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FirefoxOptions {
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub args: Vec<String>,
}

impl NewSession {
	/// Capabilities for a Firefox session, optionally headless.
	pub fn firefox(headless: bool) -> Self {
		let args = if headless { vec!["-headless".to_string()] } else { Vec::new() };
		Self {
			capabilities: CapabilitiesRequest {
				always_match: Capabilities {
					browser_name: "firefox".to_string(),
					firefox_options: Some(FirefoxOptions { args }),
				},
			},
		}
	}
}

/// `value` of a successful `POST /session` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCreated {
	pub session_id: String,
	#[serde(default)]
	pub capabilities: serde_json::Value,
}
