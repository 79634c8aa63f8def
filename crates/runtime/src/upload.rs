//! Packing local files for transfer to a remote hub.
//!
//! Selenium's `/se/file` endpoint accepts a base64-encoded zip archive with
//! exactly one entry and answers with the path it was unpacked to on the
//! browser's machine.

use std::io::{Cursor, Write};
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{Error, Result};

/// Reads `path` and returns the `/se/file` payload for it.
pub fn pack_file(path: &Path) -> Result<String> {
	let bytes = std::fs::read(path).map_err(|source| Error::Upload {
		path: path.to_path_buf(),
		source,
	})?;

	let name = path
		.file_name()
		.map(|n| n.to_string_lossy().into_owned())
		.ok_or_else(|| Error::Upload {
			path: path.to_path_buf(),
			source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
		})?;

	// audio payloads barely compress; store keeps packing cheap
	let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
	let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
	writer.start_file(name, options)?;
	writer.write_all(&bytes)?;
	let archive = writer.finish()?.into_inner();

	Ok(STANDARD.encode(archive))
}

#[cfg(test)]
mod tests {
	use std::io::Read;

	use super::*;

	#[test]
	fn packed_file_is_single_entry_zip() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("song.ncm");
		std::fs::write(&path, b"locked bytes").unwrap();

		let payload = pack_file(&path).unwrap();
		let archive_bytes = STANDARD.decode(payload).unwrap();
		let mut archive = zip::ZipArchive::new(Cursor::new(archive_bytes)).unwrap();
		assert_eq!(archive.len(), 1);

		let mut entry = archive.by_index(0).unwrap();
		assert_eq!(entry.name(), "song.ncm");
		let mut content = Vec::new();
		entry.read_to_end(&mut content).unwrap();
		assert_eq!(content, b"locked bytes");
	}

	#[test]
	fn missing_file_reports_path() {
		let err = pack_file(Path::new("/definitely/not/here.ncm")).unwrap_err();
		assert!(err.to_string().contains("here.ncm"));
	}
}
