//! [`BatchUnlocker`] - runs every batch through one broker and relocates
//! the results into the music library.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::broker::{BrokerOptions, UnlockBroker};
use crate::browser::BrowserSession;
use crate::error::Result;
use crate::filter::SuffixSet;
use crate::planner::{Batches, PatchSize};
use crate::relocate::move_into;

/// Everything the orchestrator needs besides the browser.
#[derive(Debug, Clone)]
pub struct UnlockSettings {
	pub service_url: String,
	pub download_dir: PathBuf,
	pub music_dir: PathBuf,
	pub unlocked_suffixes: SuffixSet,
	/// Files per batch; 0 uploads everything at once.
	pub patch_size: i64,
	pub broker: BrokerOptions,
}

/// Result of one completed batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
	pub index: usize,
	/// Locked files submitted in this batch.
	pub originals: Vec<PathBuf>,
	/// Unlocked files now in the music directory.
	pub unlocked: Vec<PathBuf>,
}

/// Outcome of [`BatchUnlocker::unlock_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UnlockReport {
	pub batches: Vec<BatchOutcome>,
}

impl UnlockReport {
	/// Originals of every completed batch.
	pub fn originals(&self) -> impl Iterator<Item = &Path> {
		self.batches.iter().flat_map(|b| b.originals.iter().map(PathBuf::as_path))
	}

	pub fn unlocked_count(&self) -> usize {
		self.batches.iter().map(|b| b.unlocked.len()).sum()
	}
}

/// Sequences batches through a single [`UnlockBroker`].
///
/// Batches run strictly one after another on the same session. A failed
/// relocation leaves already-moved files in the library and the rest in the
/// download directory.
pub struct BatchUnlocker<'s, S: BrowserSession> {
	session: &'s S,
	service_url: String,
	download_dir: PathBuf,
	music_dir: PathBuf,
	unlocked_suffixes: SuffixSet,
	patch_size: PatchSize,
	broker: BrokerOptions,
}

impl<'s, S: BrowserSession> BatchUnlocker<'s, S> {
	/// # Errors
	///
	/// Returns [`Error::InvalidParameter`](crate::Error::InvalidParameter) for a
	/// negative patch size.
	pub fn new(session: &'s S, settings: UnlockSettings) -> Result<Self> {
		let patch_size = PatchSize::new(settings.patch_size)?;
		Ok(Self {
			session,
			service_url: settings.service_url,
			download_dir: settings.download_dir,
			music_dir: settings.music_dir,
			unlocked_suffixes: settings.unlocked_suffixes,
			patch_size,
			broker: settings.broker,
		})
	}

	pub fn patch_size(&self) -> PatchSize {
		self.patch_size
	}

	/// Unlocks `files` batch by batch and moves the results into the library.
	///
	/// Repeated paths are processed once. With nothing to unlock the browser
	/// is left untouched.
	pub async fn unlock_all<I>(&self, files: I) -> Result<UnlockReport>
	where
		I: IntoIterator<Item = PathBuf>,
	{
		let mut seen = HashSet::new();
		let unique = files.into_iter().filter(move |f| seen.insert(f.clone()));
		let mut batches = Batches::new(unique, self.patch_size).filter(|b| !b.is_empty()).peekable();

		if batches.peek().is_none() {
			info!(target = "aum", "no locked files to unlock");
			return Ok(UnlockReport::default());
		}

		info!(target = "aum", url = %self.service_url, patch_size = %self.patch_size, "opening unlock service");
		self.session.goto(&self.service_url).await?;

		let mut broker = UnlockBroker::new(self.session, &self.download_dir, self.unlocked_suffixes.clone(), self.broker.clone());
		let mut report = UnlockReport::default();

		for (index, batch) in batches.enumerate() {
			info!(target = "aum", batch = index + 1, files = batch.len(), "unlocking batch");
			let names = broker.run_cycle(batch.clone()).await?;

			debug!(target = "aum", batch = index + 1, "moving unlocked files into music directory");
			let unlocked = self.relocate(&names)?;

			report.batches.push(BatchOutcome {
				index,
				originals: batch,
				unlocked,
			});
		}

		info!(
			target = "aum",
			batches = report.batches.len(),
			files = report.unlocked_count(),
			"unlock complete"
		);
		Ok(report)
	}

	fn relocate(&self, names: &[String]) -> Result<Vec<PathBuf>> {
		names
			.iter()
			.map(|name| move_into(&self.download_dir.join(name), &self.music_dir))
			.collect()
	}
}
