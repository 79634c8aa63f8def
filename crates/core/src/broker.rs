//! [`UnlockBroker`] - one browser session's upload/unlock/download/clear cycle.
//!
//! The broker correlates two independently paced systems: the service page,
//! which declares the results it will produce, and the download directory,
//! where those results eventually land. Rows of the preview table are
//! projected to [`DownloadRow`] stems and matched against filenames as they
//! appear.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::browser::BrowserSession;
use crate::error::Result;
use crate::filter::{SuffixSet, filter_by_stems, filter_by_suffixes, list_files, stem_of};
use crate::poll::PollPolicy;
use crate::selectors::ServiceSelectors;

/// Where the broker is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrokerPhase {
	#[default]
	Idle,
	Uploading,
	AwaitingUnlock,
	Downloading,
	Clearing,
}

impl std::fmt::Display for BrokerPhase {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Idle => write!(f, "idle"),
			Self::Uploading => write!(f, "uploading"),
			Self::AwaitingUnlock => write!(f, "awaiting-unlock"),
			Self::Downloading => write!(f, "downloading"),
			Self::Clearing => write!(f, "clearing"),
		}
	}
}

/// One result row of the service's preview table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DownloadRow {
	pub title: String,
	pub artist: String,
}

impl DownloadRow {
	pub const SEPARATOR: &'static str = " - ";

	/// Filename stem the service gives the downloaded file.
	pub fn stem(&self) -> String {
		format!("{}{}{}", self.artist, Self::SEPARATOR, self.title)
	}
}

/// Tunables shared by every cycle of a broker.
#[derive(Debug, Clone, Default)]
pub struct BrokerOptions {
	pub selectors: ServiceSelectors,
	pub poll: PollPolicy,
}

/// Drives the unlock service through one cycle per batch.
///
/// The in-flight set belongs to this instance alone and is emptied by
/// [`UnlockBroker::clear_all`]. Between cycles the broker is
/// [`BrokerPhase::Idle`] and can be reused for the next batch.
pub struct UnlockBroker<'s, S: BrowserSession> {
	session: &'s S,
	download_dir: PathBuf,
	unlocked_suffixes: SuffixSet,
	selectors: ServiceSelectors,
	poll: PollPolicy,
	in_flight: HashSet<PathBuf>,
	/// Preview table, looked up on first count and dropped on clear.
	table: Option<S::Element>,
	phase: BrokerPhase,
}

impl<'s, S: BrowserSession> UnlockBroker<'s, S> {
	/// Creates a broker for a session already showing the unlock service.
	pub fn new(session: &'s S, download_dir: impl Into<PathBuf>, unlocked_suffixes: SuffixSet, options: BrokerOptions) -> Self {
		Self {
			session,
			download_dir: download_dir.into(),
			unlocked_suffixes,
			selectors: options.selectors,
			poll: options.poll,
			in_flight: HashSet::new(),
			table: None,
			phase: BrokerPhase::Idle,
		}
	}

	pub fn phase(&self) -> BrokerPhase {
		self.phase
	}

	/// Files uploaded and not yet cleared.
	pub fn in_flight(&self) -> &HashSet<PathBuf> {
		&self.in_flight
	}

	pub fn download_dir(&self) -> &Path {
		&self.download_dir
	}

	/// Uploads the files that are not already in flight.
	///
	/// Returns how many files were submitted; an empty delta touches nothing.
	pub async fn upload<I>(&mut self, files: I) -> Result<usize>
	where
		I: IntoIterator<Item = PathBuf>,
	{
		let mut seen = HashSet::new();
		let delta: Vec<PathBuf> = files
			.into_iter()
			.filter(|f| !self.in_flight.contains(f) && seen.insert(f.clone()))
			.collect();

		if delta.is_empty() {
			debug!(target = "aum", "nothing new to upload");
			return Ok(0);
		}

		self.phase = BrokerPhase::Uploading;
		let input = self.session.wait_for(&self.selectors.upload_input).await?;
		self.session.upload_files(&input, &delta).await?;
		info!(target = "aum", files = delta.len(), "uploading");

		let submitted = delta.len();
		self.in_flight.extend(delta);
		Ok(submitted)
	}

	/// Waits until every in-flight file shows as finished.
	pub async fn await_unlock(&mut self) -> Result<()> {
		self.phase = BrokerPhase::AwaitingUnlock;
		let expected = self.in_flight.len();
		let clock = self.poll.start("unlock to finish");

		let mut finished = self.count_unlocked().await?;
		while finished < expected {
			debug!(target = "aum", finished, expected, "waiting for unlock");
			clock.tick().await?;
			finished = self.count_unlocked().await?;
		}

		info!(target = "aum", files = expected, "unlock finished");
		Ok(())
	}

	/// Triggers "download all" and waits for every declared result to land.
	///
	/// Returns the names of the matched files inside the download directory.
	/// Rows sharing a stem collapse into one expected file.
	pub async fn download_all(&mut self) -> Result<Vec<String>> {
		self.phase = BrokerPhase::Downloading;
		let button = self.session.wait_for(&self.selectors.download_all).await?;
		self.session.click(&button).await?;
		info!(target = "aum", "downloading");

		let mut pending = self.expected_stems().await?;
		let clock = self.poll.start("downloads to land");
		let mut unlocked = Vec::with_capacity(pending.len());

		loop {
			for (stem, name) in self.scan_downloads(&pending)? {
				if pending.remove(&stem) {
					debug!(target = "aum", file = %name, "download landed");
					unlocked.push(name);
				}
			}

			if pending.is_empty() {
				break;
			}

			info!(target = "aum", left = pending.len(), "waiting for downloads");
			clock.tick().await?;
		}

		info!(target = "aum", files = unlocked.len(), "download finished");
		Ok(unlocked)
	}

	/// Triggers "clear all" and waits for the preview table to empty.
	pub async fn clear_all(&mut self) -> Result<()> {
		self.phase = BrokerPhase::Clearing;
		let button = self.session.wait_for(&self.selectors.clear_all).await?;
		self.session.click(&button).await?;
		self.in_flight.clear();

		let clock = self.poll.start("preview table to clear");
		while self.count_unlocked().await? > 0 {
			clock.tick().await?;
		}

		// the page may rebuild the table for the next batch
		self.table = None;
		self.phase = BrokerPhase::Idle;
		debug!(target = "aum", "preview table cleared");
		Ok(())
	}

	/// Runs a full cycle for one batch and returns the downloaded file names.
	pub async fn run_cycle(&mut self, batch: Vec<PathBuf>) -> Result<Vec<String>> {
		self.upload(batch).await?;
		self.await_unlock().await?;
		let names = self.download_all().await?;
		self.clear_all().await?;
		Ok(names)
	}

	/// Reads the result rows currently shown in the preview table.
	pub async fn read_rows(&self) -> Result<Vec<DownloadRow>> {
		let rows = self.session.find_all(&self.selectors.result_rows).await?;

		let mut out = Vec::with_capacity(rows.len());
		for row in &rows {
			let title = self.session.find_within(row, &self.selectors.title_cell).await?;
			let artist = self.session.find_within(row, &self.selectors.artist_cell).await?;
			out.push(DownloadRow {
				title: self.session.text(&title).await?,
				artist: self.session.text(&artist).await?,
			});
		}
		Ok(out)
	}

	async fn expected_stems(&self) -> Result<HashSet<String>> {
		let mut stems = HashSet::new();
		for row in self.read_rows().await? {
			let stem = row.stem();
			if !stems.insert(stem) {
				warn!(target = "aum", stem = %row.stem(), "several results share one name; expecting a single file");
			}
		}
		Ok(stems)
	}

	/// Lists landed files whose stem is pending and whose suffix is unlocked.
	fn scan_downloads(&self, pending: &HashSet<String>) -> Result<Vec<(String, String)>> {
		let files = list_files(&self.download_dir)?;
		let landed = filter_by_suffixes(filter_by_stems(files, pending), &self.unlocked_suffixes)
			.filter(|path| !has_partial_sibling(path))
			.filter_map(|path| {
				let stem = stem_of(&path)?.to_string();
				let name = path.file_name()?.to_str()?.to_string();
				Some((stem, name))
			})
			.collect();
		Ok(landed)
	}

	async fn count_unlocked(&mut self) -> Result<usize> {
		let table = match self.table.clone() {
			Some(table) => table,
			None => {
				let table = self.session.find(&self.selectors.preview_table).await?;
				self.table = Some(table.clone());
				table
			}
		};

		let finished = self.session.find_all_within(&table, &self.selectors.finished_indicator).await?;
		Ok(finished.len())
	}
}

/// Browsers create the final file before writing to `<name>.part`.
fn has_partial_sibling(path: &Path) -> bool {
	let mut partial = path.as_os_str().to_owned();
	partial.push(".part");
	Path::new(&partial).exists()
}
