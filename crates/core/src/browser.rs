//! Browser automation capability consumed by the engine.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::Locator;
use crate::error::Result;

/// A remote browser session the engine can drive.
///
/// Implementations map their own failures onto [`Error`](crate::Error):
/// a failed lookup is [`Error::ElementNotFound`](crate::Error::ElementNotFound),
/// an elapsed bounded wait is [`Error::Timeout`](crate::Error::Timeout) and
/// anything else is [`Error::Browser`](crate::Error::Browser).
#[async_trait]
pub trait BrowserSession: Send + Sync {
	/// Handle to an element of the current page.
	type Element: Clone + Send + Sync;

	async fn goto(&self, url: &str) -> Result<()>;

	/// Locates an element, waiting a bounded time for it to appear.
	async fn wait_for(&self, locator: &Locator) -> Result<Self::Element>;

	/// Locates an element without waiting.
	async fn find(&self, locator: &Locator) -> Result<Self::Element>;

	async fn find_all(&self, locator: &Locator) -> Result<Vec<Self::Element>>;

	async fn find_within(&self, parent: &Self::Element, locator: &Locator) -> Result<Self::Element>;

	async fn find_all_within(&self, parent: &Self::Element, locator: &Locator) -> Result<Vec<Self::Element>>;

	async fn click(&self, element: &Self::Element) -> Result<()>;

	async fn text(&self, element: &Self::Element) -> Result<String>;

	/// Submits local files to a file input as one newline-joined path list.
	async fn upload_files(&self, input: &Self::Element, files: &[PathBuf]) -> Result<()>;
}
