use std::io;
use std::path::PathBuf;

/// Errors surfaced by the `seek` library.
///
/// The search core itself never fails once running; these cover setup,
/// the terminal front end and file previews.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("I/O error: {0}")]
	Io(#[from] io::Error),

	#[error("failed to build traversal thread pool: {0}")]
	ThreadPool(#[from] rayon::ThreadPoolBuildError),

	#[error("unable to determine project directories for seek")]
	ProjectDirs,

	#[error("failed to install logger: {0}")]
	Logger(#[from] log::SetLoggerError),

	#[error("unable to read {}: {source}", path.display())]
	Preview {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("pdftotext failed for {}: {reason}", path.display())]
	PdfToText { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
