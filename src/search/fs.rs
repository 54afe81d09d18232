use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;

/// One child of a listed directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListedEntry {
	pub name: OsString,
	pub is_dir: bool,
}

impl ListedEntry {
	pub fn new(name: impl Into<OsString>, is_dir: bool) -> Self {
		Self {
			name: name.into(),
			is_dir,
		}
	}
}

/// Abstraction over the directory listing used by the walker.
///
/// Implementations can fabricate directory trees for tests or instrument the
/// calls; the OS-backed [`OsLister`] is used everywhere else.
pub trait DirLister: Send + Sync + 'static {
	/// List the immediate children of `dir` in whatever order the backend
	/// yields them.
	fn list(&self, dir: &Path) -> io::Result<Vec<ListedEntry>>;
}

/// Lists directories through [`std::fs::read_dir`].
///
/// Entries are classified by their own file type, so a symlink to a
/// directory is reported as a non-directory and never descended into.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsLister;

impl DirLister for OsLister {
	fn list(&self, dir: &Path) -> io::Result<Vec<ListedEntry>> {
		let mut entries = Vec::new();
		for entry in fs::read_dir(dir)? {
			// Entries can vanish between the listing and the stat.
			let Ok(entry) = entry else {
				continue;
			};
			let is_dir = entry.file_type().is_ok_and(|kind| kind.is_dir());
			entries.push(ListedEntry {
				name: entry.file_name(),
				is_dir,
			});
		}
		Ok(entries)
	}
}

#[cfg(test)]
mod tests {
	use std::fs::{self, File};

	use tempfile::tempdir;

	use super::*;

	#[test]
	fn os_lister_reports_files_and_directories() {
		let dir = tempdir().expect("tempdir");
		File::create(dir.path().join("notes.txt")).expect("file");
		fs::create_dir(dir.path().join("src")).expect("dir");

		let mut entries = OsLister.list(dir.path()).expect("list");
		entries.sort_by(|a, b| a.name.cmp(&b.name));

		assert_eq!(
			entries,
			vec![
				ListedEntry::new("notes.txt", false),
				ListedEntry::new("src", true),
			]
		);
	}

	#[test]
	fn missing_directory_is_an_error() {
		let dir = tempdir().expect("tempdir");
		assert!(OsLister.list(&dir.path().join("gone")).is_err());
	}
}
