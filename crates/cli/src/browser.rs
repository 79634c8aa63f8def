//! [`HubBrowser`] - the unlock engine's view of a WebDriver hub session.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use aum::{BrowserSession, Locator};
use aum_protocol::ElementRef;
use aum_runtime::Session;

pub struct HubBrowser {
	session: Session,
	element_wait: Duration,
}

impl HubBrowser {
	/// `element_wait` is the bound the session applies to element lookups.
	pub fn new(session: Session, element_wait: Duration) -> Self {
		Self { session, element_wait }
	}

	fn map_err(&self, err: aum_runtime::Error, locator: Option<&Locator>) -> aum::Error {
		to_engine_error(err, locator, self.element_wait)
	}

	/// Ends the remote session.
	pub async fn quit(self) -> aum_runtime::Result<()> {
		self.session.quit().await
	}
}

/// Maps hub failures onto the engine's error kinds.
fn to_engine_error(err: aum_runtime::Error, locator: Option<&Locator>, waited: Duration) -> aum::Error {
	match err {
		aum_runtime::Error::NoSuchElement(message) => aum::Error::ElementNotFound {
			locator: locator.map_or(message, ToString::to_string),
		},
		aum_runtime::Error::Timeout(condition) => aum::Error::Timeout {
			ms: waited.as_millis() as u64,
			condition,
		},
		other => aum::Error::Browser(other.to_string()),
	}
}

#[async_trait]
impl BrowserSession for HubBrowser {
	type Element = ElementRef;

	async fn goto(&self, url: &str) -> aum::Result<()> {
		self.session.goto(url).await.map_err(|e| self.map_err(e, None))
	}

	async fn wait_for(&self, locator: &Locator) -> aum::Result<ElementRef> {
		self.session.wait_for_element(locator).await.map_err(|e| self.map_err(e, Some(locator)))
	}

	async fn find(&self, locator: &Locator) -> aum::Result<ElementRef> {
		self.session.find_element(locator).await.map_err(|e| self.map_err(e, Some(locator)))
	}

	async fn find_all(&self, locator: &Locator) -> aum::Result<Vec<ElementRef>> {
		self.session.find_elements(locator).await.map_err(|e| self.map_err(e, Some(locator)))
	}

	async fn find_within(&self, parent: &ElementRef, locator: &Locator) -> aum::Result<ElementRef> {
		self.session
			.find_element_from(parent, locator)
			.await
			.map_err(|e| self.map_err(e, Some(locator)))
	}

	async fn find_all_within(&self, parent: &ElementRef, locator: &Locator) -> aum::Result<Vec<ElementRef>> {
		self.session
			.find_elements_from(parent, locator)
			.await
			.map_err(|e| self.map_err(e, Some(locator)))
	}

	async fn click(&self, element: &ElementRef) -> aum::Result<()> {
		self.session.click(element).await.map_err(|e| self.map_err(e, None))
	}

	async fn text(&self, element: &ElementRef) -> aum::Result<String> {
		self.session.text(element).await.map_err(|e| self.map_err(e, None))
	}

	async fn upload_files(&self, input: &ElementRef, files: &[PathBuf]) -> aum::Result<()> {
		self.session.upload_files(input, files).await.map_err(|e| self.map_err(e, None))
	}
}
