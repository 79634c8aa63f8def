//! `run` and `unlock`: the library pipeline against a hub session.

use anyhow::Context;
use aum::{LibraryPipeline, PipelineReport, UnlockReport};
use tracing::{info, warn};

use crate::browser::HubBrowser;
use crate::config::Config;
use crate::error::Result;
use crate::output::PipelineData;

/// Discovers locked files, unlocks them and deletes the originals, then
/// renames when `rename` is set.
///
/// Expects [`Config::require_unlock_endpoints`] to have passed. The hub is
/// only contacted when there is something to unlock, and the session is
/// closed before any original is deleted.
pub async fn execute(config: &Config, rename: bool) -> Result<PipelineData> {
	let hub = config.hub()?;
	let pipeline = LibraryPipeline::new(config.library_settings())?;

	let files = pipeline.discover()?;
	let discovered = files.len();

	let unlock = if files.is_empty() {
		UnlockReport::default()
	} else {
		let session = hub.connect(&config.session_options()).await?;
		let browser = HubBrowser::new(session, config.element_wait);
		let outcome = pipeline.unlock(&browser, files).await;

		if let Err(err) = browser.quit().await.context("closing hub session") {
			warn!(target = "aum", "{err:#}");
		}
		outcome?
	};

	let deleted = pipeline.delete_originals(&unlock)?;
	let renamed = if rename { pipeline.rename()? } else { Vec::new() };

	info!(target = "aum", unlocked = unlock.unlocked_count(), renamed = renamed.len(), "done");
	Ok(PipelineData {
		report: PipelineReport {
			discovered,
			unlock,
			deleted,
			renamed,
		},
	})
}
