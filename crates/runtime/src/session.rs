//! [`Session`] - one browser session on a remote hub.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use aum_protocol::{ElementRef, Locator, Navigate, SendKeys, UploadFile};
use serde_json::Value;
use tracing::{debug, info};

use crate::connection::Connection;
use crate::error::{Error, Result};
use crate::hub::{Hub, SessionOptions};
use crate::upload::pack_file;

const ELEMENT_POLL: Duration = Duration::from_millis(250);

/// A live WebDriver session.
///
/// Element lookups without a wait fail immediately with
/// [`Error::NoSuchElement`]; [`Session::wait_for_element`] retries until the
/// configured element wait elapses.
#[derive(Debug, Clone)]
pub struct Session {
	connection: Arc<Connection>,
	id: String,
	hub: Hub,
	file_transfer: bool,
	element_wait: Duration,
}

impl Session {
	pub(crate) fn new(connection: Arc<Connection>, id: String, hub: Hub, options: &SessionOptions) -> Self {
		Self {
			connection,
			id,
			hub,
			file_transfer: options.file_transfer,
			element_wait: options.element_wait,
		}
	}

	pub fn id(&self) -> &str {
		&self.id
	}

	pub fn hub(&self) -> &Hub {
		&self.hub
	}

	/// Download directory of the hub's browser.
	pub fn download_dir(&self) -> &Path {
		self.hub.download_dir()
	}

	fn path(&self, rest: &str) -> String {
		format!("session/{}/{}", self.id, rest)
	}

	pub async fn goto(&self, url: &str) -> Result<()> {
		debug!(target = "aum", url, "navigating");
		self.connection.post(&self.path("url"), &Navigate { url: url.to_string() }).await?;
		Ok(())
	}

	pub async fn find_element(&self, locator: &Locator) -> Result<ElementRef> {
		let value = self.connection.post(&self.path("element"), &locator.to_query()).await?;
		Ok(serde_json::from_value(value)?)
	}

	pub async fn find_elements(&self, locator: &Locator) -> Result<Vec<ElementRef>> {
		let value = self.connection.post(&self.path("elements"), &locator.to_query()).await?;
		Ok(serde_json::from_value(value)?)
	}

	pub async fn find_element_from(&self, parent: &ElementRef, locator: &Locator) -> Result<ElementRef> {
		let path = self.path(&format!("element/{}/element", parent.id()));
		let value = self.connection.post(&path, &locator.to_query()).await?;
		Ok(serde_json::from_value(value)?)
	}

	pub async fn find_elements_from(&self, parent: &ElementRef, locator: &Locator) -> Result<Vec<ElementRef>> {
		let path = self.path(&format!("element/{}/elements", parent.id()));
		let value = self.connection.post(&path, &locator.to_query()).await?;
		Ok(serde_json::from_value(value)?)
	}

	/// Polls for an element until it is present or the element wait elapses.
	pub async fn wait_for_element(&self, locator: &Locator) -> Result<ElementRef> {
		// a wait too long to represent never expires
		let deadline = tokio::time::Instant::now().checked_add(self.element_wait);

		loop {
			match self.find_element(locator).await {
				Ok(element) => return Ok(element),
				Err(Error::NoSuchElement(_)) if deadline.is_none_or(|d| tokio::time::Instant::now() < d) => {
					tokio::time::sleep(ELEMENT_POLL).await;
				}
				Err(Error::NoSuchElement(_)) => {
					return Err(Error::Timeout(format!(
						"element {locator} not present after {}ms",
						self.element_wait.as_millis()
					)));
				}
				Err(err) => return Err(err),
			}
		}
	}

	pub async fn click(&self, element: &ElementRef) -> Result<()> {
		let path = self.path(&format!("element/{}/click", element.id()));
		self.connection.post(&path, &serde_json::json!({})).await?;
		Ok(())
	}

	pub async fn text(&self, element: &ElementRef) -> Result<String> {
		let value = self.connection.get(&self.path(&format!("element/{}/text", element.id()))).await?;
		match value {
			Value::String(text) => Ok(text),
			Value::Null => Ok(String::new()),
			other => Ok(other.to_string()),
		}
	}

	pub async fn send_keys(&self, element: &ElementRef, text: &str) -> Result<()> {
		let path = self.path(&format!("element/{}/value", element.id()));
		self.connection.post(&path, &SendKeys { text: text.to_string() }).await?;
		Ok(())
	}

	/// Transfers one local file to the hub and returns its remote path.
	pub async fn upload_file(&self, file: &Path) -> Result<String> {
		let payload = UploadFile { file: pack_file(file)? };
		let value = self.connection.post(&self.path("se/file"), &payload).await?;
		match value {
			Value::String(remote) => Ok(remote),
			other => Err(Error::WebDriver {
				code: "invalid upload response".to_string(),
				message: other.to_string(),
			}),
		}
	}

	/// Submits `files` to a file input as one newline-joined path list.
	///
	/// With file transfer enabled each file is first copied to the hub and the
	/// remote paths are submitted instead of the local ones.
	pub async fn upload_files(&self, input: &ElementRef, files: &[PathBuf]) -> Result<()> {
		let mut paths = Vec::with_capacity(files.len());
		for file in files {
			if self.file_transfer {
				paths.push(self.upload_file(file).await?);
			} else {
				paths.push(file.to_string_lossy().into_owned());
			}
		}

		debug!(target = "aum", files = paths.len(), transfer = self.file_transfer, "submitting upload");
		self.send_keys(input, &paths.join("\n")).await
	}

	/// Ends the session on the hub.
	pub async fn quit(&self) -> Result<()> {
		self.connection.delete(&format!("session/{}", self.id)).await?;
		info!(target = "aum", session = %self.id, "browser session closed");
		Ok(())
	}
}
