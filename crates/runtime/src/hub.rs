//! Remote hub description and session creation.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use aum_protocol::{NewSession, SessionCreated};
use tracing::info;

use crate::connection::Connection;
use crate::error::Result;
use crate::session::Session;

/// A Selenium hub and the directory its browser downloads into.
///
/// `download_dir` is the path of the browser's download folder as seen from
/// this machine (typically a shared volume mounted into the hub's node).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hub {
	url: String,
	download_dir: PathBuf,
}

/// Options applied when opening a session on a [`Hub`].
#[derive(Debug, Clone)]
pub struct SessionOptions {
	/// Launch the browser without a visible window.
	pub headless: bool,
	/// Transfer uploaded files to the hub instead of sending local paths.
	pub file_transfer: bool,
	/// Upper bound for [`Session::wait_for_element`].
	pub element_wait: Duration,
	/// Upper bound for a single HTTP exchange with the hub.
	pub request_timeout: Duration,
}

impl Default for SessionOptions {
	fn default() -> Self {
		Self {
			headless: true,
			file_transfer: true,
			element_wait: Duration::from_secs(10),
			request_timeout: Duration::from_secs(300),
		}
	}
}

impl Hub {
	pub fn new(url: impl Into<String>, download_dir: impl Into<PathBuf>) -> Self {
		Self {
			url: url.into(),
			download_dir: download_dir.into(),
		}
	}

	pub fn url(&self) -> &str {
		&self.url
	}

	pub fn download_dir(&self) -> &Path {
		&self.download_dir
	}

	/// Opens a new Firefox session on the hub.
	///
	/// # Errors
	///
	/// Returns [`Error::InvalidUrl`](crate::Error::InvalidUrl) for a malformed
	/// hub URL and transport or WebDriver errors when the hub refuses the
	/// session.
	pub async fn connect(&self, options: &SessionOptions) -> Result<Session> {
		let connection = Connection::new(&self.url, options.request_timeout)?;
		let value = connection.post("session", &NewSession::firefox(options.headless)).await?;
		let created: SessionCreated = serde_json::from_value(value)?;

		info!(
			target = "aum",
			hub = %self.url,
			session = %created.session_id,
			headless = options.headless,
			"browser session opened"
		);

		Ok(Session::new(Arc::new(connection), created.session_id, self.clone(), options))
	}
}
