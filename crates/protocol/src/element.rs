//! Web element references.

use serde::{Deserialize, Serialize};

/// JSON key under which W3C WebDriver identifies a web element.
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4ba18d6ad4d4";

/// Opaque reference to an element inside one WebDriver session.
///
/// References go stale once the page replaces the node; the remote end then
/// answers with `stale element reference`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementRef {
	#[serde(rename = "element-6066-11e4-a52e-4ba18d6ad4d4")]
	pub id: String,
}

impl ElementRef {
	pub fn new(id: impl Into<String>) -> Self {
		Self { id: id.into() }
	}

	pub fn id(&self) -> &str {
		&self.id
	}
}

/// Body of `POST /session/{id}/element/{element}/value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendKeys {
	pub text: String,
}

/// Body of `POST /session/{id}/url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigate {
	pub url: String,
}

/// Body of Selenium's `POST /session/{id}/se/file` extension.
///
/// `file` is a base64-encoded zip archive holding exactly one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadFile {
	pub file: String,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn element_ref_uses_w3c_key() {
		let element: ElementRef = serde_json::from_value(serde_json::json!({ ELEMENT_KEY: "abc-1" })).unwrap();
		assert_eq!(element.id(), "abc-1");

		let json = serde_json::to_value(&element).unwrap();
		assert_eq!(json[ELEMENT_KEY], "abc-1");
	}
}
