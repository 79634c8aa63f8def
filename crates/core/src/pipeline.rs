//! [`LibraryPipeline`] - the end-to-end pass over a music library.
//!
//! Phases run strictly in order and each runs to completion before the next
//! starts. The first error stops the pipeline, so originals are only deleted
//! once every batch has been unlocked and relocated.

use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::broker::BrokerOptions;
use crate::browser::BrowserSession;
use crate::error::{Error, Result};
use crate::filter::{SuffixSet, filter_by_suffixes, list_files};
use crate::orchestrator::{BatchUnlocker, UnlockReport, UnlockSettings};
use crate::planner::PatchSize;
use crate::relocate::remove_if_exists;
use crate::sanitize::{FilenameSanitizer, Rename};

/// Library layout and unlock parameters.
#[derive(Debug, Clone)]
pub struct LibrarySettings {
	pub music_dir: PathBuf,
	pub download_dir: PathBuf,
	/// Required only by the unlock phase.
	pub service_url: Option<String>,
	pub locked_suffixes: SuffixSet,
	pub unlocked_suffixes: SuffixSet,
	pub removing_substrings: Vec<String>,
	pub patch_size: i64,
	pub broker: BrokerOptions,
}

/// A pipeline phase, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
	Discover,
	Unlock,
	Delete,
	Rename,
}

impl std::fmt::Display for Phase {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Discover => write!(f, "discover"),
			Self::Unlock => write!(f, "unlock"),
			Self::Delete => write!(f, "delete"),
			Self::Rename => write!(f, "rename"),
		}
	}
}

/// What a pipeline run did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
	pub discovered: usize,
	pub unlock: UnlockReport,
	pub deleted: Vec<PathBuf>,
	pub renamed: Vec<Rename>,
}

pub struct LibraryPipeline {
	settings: LibrarySettings,
	sanitizer: FilenameSanitizer,
}

impl LibraryPipeline {
	/// # Errors
	///
	/// Returns [`Error::InvalidParameter`] for a negative patch size.
	pub fn new(settings: LibrarySettings) -> Result<Self> {
		PatchSize::new(settings.patch_size)?;
		let sanitizer = FilenameSanitizer::new(settings.removing_substrings.iter().cloned());
		Ok(Self { settings, sanitizer })
	}

	pub fn settings(&self) -> &LibrarySettings {
		&self.settings
	}

	/// Locked files directly inside the music directory, sorted by path.
	pub fn discover(&self) -> Result<Vec<PathBuf>> {
		enter(Phase::Discover);
		let files = list_files(&self.settings.music_dir)?;
		let locked: Vec<PathBuf> = filter_by_suffixes(files, &self.settings.locked_suffixes).collect();
		info!(target = "aum", files = locked.len(), suffixes = %self.settings.locked_suffixes, "found locked files");
		Ok(locked)
	}

	/// Unlocks `files` through the service and relocates the results.
	///
	/// # Errors
	///
	/// Returns [`Error::MissingSetting`] when no service URL is configured.
	pub async fn unlock<S: BrowserSession>(&self, session: &S, files: Vec<PathBuf>) -> Result<UnlockReport> {
		enter(Phase::Unlock);
		let service_url = self
			.settings
			.service_url
			.clone()
			.ok_or(Error::MissingSetting("unlock service URL"))?;

		let unlocker = BatchUnlocker::new(
			session,
			UnlockSettings {
				service_url,
				download_dir: self.settings.download_dir.clone(),
				music_dir: self.settings.music_dir.clone(),
				unlocked_suffixes: self.settings.unlocked_suffixes.clone(),
				patch_size: self.settings.patch_size,
				broker: self.settings.broker.clone(),
			},
		)?;
		unlocker.unlock_all(files).await
	}

	/// Deletes the originals of every completed batch.
	pub fn delete_originals(&self, report: &UnlockReport) -> Result<Vec<PathBuf>> {
		enter(Phase::Delete);
		let mut deleted = Vec::new();
		for original in report.originals() {
			if remove_if_exists(original)? {
				deleted.push(original.to_path_buf());
			}
		}
		info!(target = "aum", files = deleted.len(), "deleted originals");
		Ok(deleted)
	}

	/// Strips the configured substrings from library filenames.
	pub fn rename(&self) -> Result<Vec<Rename>> {
		enter(Phase::Rename);
		self.sanitizer.sanitize_dir(&self.settings.music_dir)
	}

	/// Discover, unlock and delete; no renaming.
	pub async fn run_unlock<S: BrowserSession>(&self, session: &S) -> Result<PipelineReport> {
		let files = self.discover()?;
		let discovered = files.len();
		let unlock = self.unlock(session, files).await?;
		let deleted = self.delete_originals(&unlock)?;
		Ok(PipelineReport {
			discovered,
			unlock,
			deleted,
			renamed: Vec::new(),
		})
	}

	/// Runs every phase in order.
	pub async fn run<S: BrowserSession>(&self, session: &S) -> Result<PipelineReport> {
		let mut report = self.run_unlock(session).await?;
		report.renamed = self.rename()?;
		Ok(report)
	}
}

fn enter(phase: Phase) {
	info!(target = "aum", %phase, "phase");
}

#[cfg(test)]
mod tests {
	use super::*;

	fn settings(music: &std::path::Path) -> LibrarySettings {
		LibrarySettings {
			music_dir: music.to_path_buf(),
			download_dir: music.to_path_buf(),
			service_url: None,
			locked_suffixes: SuffixSet::new(["ncm", ".qmc0"]),
			unlocked_suffixes: SuffixSet::new(["mp3"]),
			removing_substrings: vec![],
			patch_size: 0,
			broker: BrokerOptions::default(),
		}
	}

	#[test]
	fn negative_patch_size_rejected() {
		let dir = tempfile::tempdir().unwrap();
		let mut s = settings(dir.path());
		s.patch_size = -1;
		let err = LibraryPipeline::new(s).err().unwrap();
		assert!(err.to_string().contains("patch size must be non-negative (value: -1)"));
	}

	#[test]
	fn discover_is_flat_filtered_and_sorted() {
		let dir = tempfile::tempdir().unwrap();
		for name in ["b.ncm", "a.qmc0", "c.mp3", "d.NCM"] {
			std::fs::write(dir.path().join(name), b"").unwrap();
		}
		std::fs::create_dir(dir.path().join("sub.ncm")).unwrap();

		let pipeline = LibraryPipeline::new(settings(dir.path())).unwrap();
		assert_eq!(
			pipeline.discover().unwrap(),
			vec![dir.path().join("a.qmc0"), dir.path().join("b.ncm")]
		);
	}

	#[test]
	fn delete_tolerates_missing_originals() {
		let dir = tempfile::tempdir().unwrap();
		let kept = dir.path().join("a.ncm");
		std::fs::write(&kept, b"").unwrap();

		let report = UnlockReport {
			batches: vec![crate::BatchOutcome {
				index: 0,
				originals: vec![kept.clone(), dir.path().join("gone.ncm")],
				unlocked: vec![],
			}],
		};
		let pipeline = LibraryPipeline::new(settings(dir.path())).unwrap();
		assert_eq!(pipeline.delete_originals(&report).unwrap(), vec![kept.clone()]);
		assert!(!kept.exists());
	}
}
