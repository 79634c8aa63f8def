//! Moving and deleting library files.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Moves `src` into `dest_dir` under the same name and returns the new path.
///
/// An existing file of that name is replaced. Moves across filesystems fall
/// back to copy-then-remove.
pub fn move_into(src: &Path, dest_dir: &Path) -> Result<PathBuf> {
	let name = src
		.file_name()
		.ok_or_else(|| Error::fs(src, std::io::Error::new(ErrorKind::InvalidInput, "path has no file name")))?;
	let dest = dest_dir.join(name);

	match std::fs::rename(src, &dest) {
		Ok(()) => Ok(dest),
		Err(err) if err.kind() == ErrorKind::CrossesDevices => {
			std::fs::copy(src, &dest).map_err(|e| Error::fs(&dest, e))?;
			std::fs::remove_file(src).map_err(|e| Error::fs(src, e))?;
			Ok(dest)
		}
		Err(err) => Err(Error::fs(src, err)),
	}
}

/// Deletes `path`, treating an already-absent file as success.
///
/// Returns whether a file was actually removed.
pub fn remove_if_exists(path: &Path) -> Result<bool> {
	match std::fs::remove_file(path) {
		Ok(()) => Ok(true),
		Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
		Err(err) => Err(Error::fs(path, err)),
	}
}
