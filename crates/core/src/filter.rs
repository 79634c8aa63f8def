//! Directory listing and path filters by suffix and stem.

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Set of file suffixes compared against a path's last extension.
///
/// Entries are stored without a leading dot, so `.ncm` and `ncm` are the same
/// suffix. Empty entries are discarded. Matching is case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuffixSet(BTreeSet<String>);

impl SuffixSet {
	pub fn new<I, S>(suffixes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		Self(
			suffixes
				.into_iter()
				.map(|s| s.as_ref().trim_start_matches('.').to_string())
				.filter(|s| !s.is_empty())
				.collect(),
		)
	}

	pub fn contains(&self, suffix: &str) -> bool {
		self.0.contains(suffix.trim_start_matches('.'))
	}

	/// Returns true if the last extension of `path` is in the set.
	pub fn matches(&self, path: &Path) -> bool {
		path.extension().and_then(|e| e.to_str()).is_some_and(|e| self.0.contains(e))
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}
}

impl<S: AsRef<str>> FromIterator<S> for SuffixSet {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		Self::new(iter)
	}
}

impl std::fmt::Display for SuffixSet {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let joined = self.0.iter().map(|s| format!(".{s}")).collect::<Vec<_>>().join(", ");
		write!(f, "{{{joined}}}")
	}
}

/// File stem of `path` as UTF-8, if it has one.
pub fn stem_of(path: &Path) -> Option<&str> {
	path.file_stem().and_then(|s| s.to_str())
}

/// Keeps paths whose last extension is in `suffixes`.
pub fn filter_by_suffixes<'a, I>(paths: I, suffixes: &'a SuffixSet) -> impl Iterator<Item = PathBuf> + 'a
where
	I: IntoIterator<Item = PathBuf>,
	I::IntoIter: 'a,
{
	paths.into_iter().filter(move |p| suffixes.matches(p))
}

/// Keeps paths whose stem is in `stems`.
pub fn filter_by_stems<'a, I>(paths: I, stems: &'a HashSet<String>) -> impl Iterator<Item = PathBuf> + 'a
where
	I: IntoIterator<Item = PathBuf>,
	I::IntoIter: 'a,
{
	paths.into_iter().filter(move |p| stem_of(p).is_some_and(|s| stems.contains(s)))
}

/// Lists the regular files directly inside `dir`, sorted by path.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
	let entries = std::fs::read_dir(dir).map_err(|e| Error::fs(dir, e))?;

	let mut files = Vec::new();
	for entry in entries {
		let entry = entry.map_err(|e| Error::fs(dir, e))?;
		let file_type = entry.file_type().map_err(|e| Error::fs(&entry.path(), e))?;
		if file_type.is_file() {
			files.push(entry.path());
		}
	}

	files.sort();
	Ok(files)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn suffix_set_ignores_leading_dots_and_empties() {
		let set = SuffixSet::new([".ncm", "qmc0", "", "."]);
		assert_eq!(set.len(), 2);
		assert!(set.contains("ncm"));
		assert!(set.contains(".qmc0"));
	}

	#[test]
	fn suffix_set_matches_last_extension_only() {
		let set = SuffixSet::new(["mp3"]);
		assert!(set.matches(Path::new("/d/song.mp3")));
		assert!(!set.matches(Path::new("/d/song.mp3.part")));
		assert!(!set.matches(Path::new("/d/song.MP3")));
		assert!(!set.matches(Path::new("/d/mp3")));
	}

	#[test]
	fn filters_compose() {
		let paths = vec![
			PathBuf::from("/d/A - x.mp3"),
			PathBuf::from("/d/A - x.flac"),
			PathBuf::from("/d/A - y.mp3"),
			PathBuf::from("/d/B - z.mp3"),
		];
		let stems: HashSet<String> = ["A - x", "B - z"].iter().map(|s| s.to_string()).collect();
		let suffixes = SuffixSet::new(["mp3"]);

		let kept: Vec<PathBuf> = filter_by_suffixes(filter_by_stems(paths, &stems), &suffixes).collect();
		assert_eq!(kept, vec![PathBuf::from("/d/A - x.mp3"), PathBuf::from("/d/B - z.mp3")]);
	}

	#[test]
	fn list_files_skips_directories() {
		let dir = tempfile::tempdir().unwrap();
		std::fs::write(dir.path().join("b.ncm"), b"").unwrap();
		std::fs::write(dir.path().join("a.ncm"), b"").unwrap();
		std::fs::create_dir(dir.path().join("nested.ncm")).unwrap();

		let files = list_files(dir.path()).unwrap();
		assert_eq!(files, vec![dir.path().join("a.ncm"), dir.path().join("b.ncm")]);
	}

	#[test]
	fn list_files_reports_missing_dir() {
		let err = list_files(Path::new("/no/such/dir")).unwrap_err();
		assert!(matches!(err, Error::Filesystem { .. }));
	}
}
