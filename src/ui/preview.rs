//! File previews loaded off the UI thread.
//!
//! PDFs are converted with the external `pdftotext` tool; everything else is
//! read as (lossy) UTF-8 text. A single worker thread owns the
//! [`Highlighter`] and turns the text into styled lines.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use log::warn;
use ratatui::text::Line;

use super::highlight::{Highlighter, plain_lines};
use crate::search::EventSink;
use crate::{Error, Result};

/// Shown in place of the content when a file cannot be read.
pub const UNREADABLE: &str = "Unable to open file";

/// Delivered once a preview has been read and highlighted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewLoaded {
	pub path: PathBuf,
	pub lines: Vec<Line<'static>>,
}

/// Read the text to preview for `path`.
pub fn read_preview(path: &Path) -> Result<String> {
	let is_pdf = path
		.extension()
		.is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
	if is_pdf {
		return pdf_to_text(path);
	}

	let bytes = fs::read(path).map_err(|source| Error::Preview {
		path: path.to_path_buf(),
		source,
	})?;
	Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn pdf_to_text(path: &Path) -> Result<String> {
	let output = Command::new("pdftotext")
		.arg(path)
		.arg("-")
		.output()
		.map_err(|source| Error::Preview {
			path: path.to_path_buf(),
			source,
		})?;

	if !output.status.success() {
		let stderr = String::from_utf8_lossy(&output.stderr);
		let reason = match stderr.trim() {
			"" => output.status.to_string(),
			message => message.to_string(),
		};
		return Err(Error::PdfToText {
			path: path.to_path_buf(),
			reason,
		});
	}

	Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Handle to the background preview thread.
///
/// Answers go to the sink given to [`spawn`](Self::spawn). Requests that
/// queue up while a file is loading are collapsed into the newest one. The
/// thread exits once the handle is dropped.
pub struct PreviewWorker {
	requests: Sender<PathBuf>,
}

impl PreviewWorker {
	pub fn spawn(sink: impl EventSink<PreviewLoaded>) -> Result<Self> {
		let (requests, pending) = mpsc::channel();
		thread::Builder::new()
			.name("seek-preview".into())
			.spawn(move || worker_loop(&pending, &sink))?;
		Ok(Self { requests })
	}

	/// Queue `path` for loading.
	pub fn request(&self, path: PathBuf) {
		if self.requests.send(path).is_err() {
			warn!("preview worker is gone");
		}
	}
}

fn worker_loop(pending: &Receiver<PathBuf>, sink: &impl EventSink<PreviewLoaded>) {
	let highlighter = Highlighter::new();

	while let Ok(mut path) = pending.recv() {
		// Only the newest request is worth answering.
		while let Ok(newer) = pending.try_recv() {
			path = newer;
		}

		let lines = match read_preview(&path) {
			Ok(content) => highlighter.highlight(&path, &content),
			Err(err) => {
				warn!("{err}");
				plain_lines(UNREADABLE)
			}
		};
		if !sink.deliver(PreviewLoaded { path, lines }) {
			break;
		}
	}
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use tempfile::tempdir;

	use super::*;

	fn text(lines: &[Line<'_>]) -> Vec<String> {
		lines.iter().map(ToString::to_string).collect()
	}

	#[test]
	fn text_files_are_read_lossily() {
		let dir = tempdir().expect("tempdir");
		let path = dir.path().join("notes.txt");
		fs::write(&path, b"hello \xff world").expect("write");

		let content = read_preview(&path).expect("preview");
		assert!(content.starts_with("hello "));
		assert!(content.ends_with(" world"));
	}

	#[test]
	fn missing_files_report_the_path() {
		let dir = tempdir().expect("tempdir");
		let path = dir.path().join("gone.txt");

		let err = read_preview(&path).expect_err("missing file");
		assert!(matches!(err, Error::Preview { .. }));
		assert!(err.to_string().contains("gone.txt"));
	}

	#[test]
	fn worker_falls_back_to_placeholder() {
		let dir = tempdir().expect("tempdir");
		let path = dir.path().join("gone.txt");
		let (tx, rx) = mpsc::channel::<PreviewLoaded>();

		let worker = PreviewWorker::spawn(tx).expect("worker");
		worker.request(path.clone());
		let loaded = rx.recv_timeout(Duration::from_secs(10)).expect("loaded");
		assert_eq!(loaded.path, path);
		assert_eq!(text(&loaded.lines), vec![UNREADABLE.to_string()]);
	}

	#[test]
	fn worker_highlights_source_files() {
		let dir = tempdir().expect("tempdir");
		let path = dir.path().join("lib.rs");
		fs::write(&path, "pub fn answer() -> u32 {\n\t42\n}\n").expect("write");
		let (tx, rx) = mpsc::channel::<PreviewLoaded>();

		let worker = PreviewWorker::spawn(tx).expect("worker");
		worker.request(path.clone());
		let loaded = rx.recv_timeout(Duration::from_secs(10)).expect("loaded");

		let rendered = text(&loaded.lines);
		assert!(rendered[0].contains("pub fn answer()"));
		assert!(rendered[1].contains("42"));
		assert!(
			loaded
				.lines
				.iter()
				.flat_map(|line| &line.spans)
				.any(|span| span.style.fg.is_some())
		);
	}
}
