//! Logger setup.
//!
//! The interactive UI owns the terminal, so its log output goes to a file in
//! the cache directory. Headless runs log to stderr. The filter is read from
//! `SEEK_LOG` and defaults to `warn`.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use env_logger::{Builder, Env, Target};

use crate::{Result, app_dirs};

const FILTER_ENV: &str = "SEEK_LOG";
const DEFAULT_FILTER: &str = "warn";
const LOG_FILE: &str = "seek.log";

/// Where log records are written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogTarget {
	Stderr,
	File(PathBuf),
}

impl LogTarget {
	/// `seek.log` inside the cache directory.
	pub fn cache_file() -> Result<Self> {
		Ok(Self::File(app_dirs::get_cache_dir()?.join(LOG_FILE)))
	}
}

/// Install the global logger. Call once, before any search starts.
pub fn initialize(target: LogTarget) -> Result<()> {
	let mut builder = Builder::from_env(Env::default().filter_or(FILTER_ENV, DEFAULT_FILTER));
	match target {
		LogTarget::Stderr => {
			builder.target(Target::Stderr);
		}
		LogTarget::File(path) => {
			if let Some(parent) = path.parent() {
				fs::create_dir_all(parent)?;
			}
			let file = OpenOptions::new().create(true).append(true).open(&path)?;
			builder.target(Target::Pipe(Box::new(file)));
		}
	}
	builder.try_init()?;
	Ok(())
}
