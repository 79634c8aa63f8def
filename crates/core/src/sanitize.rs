//! Substring removal over library filenames.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::filter::list_files;

/// A rename performed by [`FilenameSanitizer::sanitize_dir`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rename {
	pub from: PathBuf,
	pub to: PathBuf,
}

/// Strips configured substrings from file stems.
///
/// Substrings are removed in the order given, repeatedly, until the stem
/// contains none of them. A sanitized name is therefore left unchanged by a
/// second pass.
#[derive(Debug, Clone, Default)]
pub struct FilenameSanitizer {
	substrings: Vec<String>,
}

impl FilenameSanitizer {
	pub fn new<I, S>(substrings: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut unique: Vec<String> = Vec::new();
		for s in substrings.into_iter().map(Into::into) {
			if !s.is_empty() && !unique.contains(&s) {
				unique.push(s);
			}
		}
		Self { substrings: unique }
	}

	pub fn is_empty(&self) -> bool {
		self.substrings.is_empty()
	}

	pub fn substrings(&self) -> &[String] {
		&self.substrings
	}

	/// New file name for `path`, or `None` when it needs no change.
	///
	/// The extension is kept as is. A stem that would become empty is left
	/// alone.
	pub fn sanitized_name(&self, path: &Path) -> Option<String> {
		let stem = path.file_stem()?.to_str()?;

		let mut cleaned = stem.to_string();
		while let Some(found) = self.substrings.iter().find(|s| cleaned.contains(s.as_str())) {
			cleaned = cleaned.replace(found.as_str(), "");
		}
		if cleaned == stem || cleaned.is_empty() {
			return None;
		}

		match path.extension().and_then(|e| e.to_str()) {
			Some(ext) => Some(format!("{cleaned}.{ext}")),
			None => Some(cleaned),
		}
	}

	/// Renames every regular file in `dir` whose stem contains a substring.
	///
	/// Each file is renamed at most once. Targets that already exist are
	/// skipped.
	pub fn sanitize_dir(&self, dir: &Path) -> Result<Vec<Rename>> {
		if self.is_empty() {
			debug!(target = "aum", "no substrings configured; skipping rename");
			return Ok(Vec::new());
		}

		let mut renames = Vec::new();
		for from in list_files(dir)? {
			let Some(name) = self.sanitized_name(&from) else {
				continue;
			};

			let to = dir.join(name);
			if to.exists() {
				warn!(target = "aum", from = %from.display(), to = %to.display(), "rename target exists; skipping");
				continue;
			}

			std::fs::rename(&from, &to).map_err(|e| Error::fs(&from, e))?;
			debug!(target = "aum", from = %from.display(), to = %to.display(), "renamed");
			renames.push(Rename { from, to });
		}

		info!(target = "aum", files = renames.len(), "renaming finished");
		Ok(renames)
	}
}
