use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use seek::search::SearchOptions;
use seek::ui::UiConfig;

use super::util::display_root;

/// Application-ready configuration derived from files, environment and flags.
#[derive(Debug)]
pub struct ResolvedConfig {
	pub root: PathBuf,
	pub search: SearchOptions,
	pub debounce: Duration,
	pub initial_query: String,
	pub max_query_len: usize,
}

impl ResolvedConfig {
	/// Write a human readable summary of the effective configuration.
	///
	/// The binary sends this to stderr so that stdout stays reserved for
	/// search output.
	pub fn write_summary(&self, out: &mut impl Write) -> io::Result<()> {
		writeln!(out, "Effective configuration:")?;
		writeln!(out, "  Root: {}", display_root(&self.root))?;
		writeln!(out, "  Result cap: {}", self.search.result_cap)?;
		writeln!(out, "  Concurrency cap: {}", self.search.concurrency_cap)?;
		match self.search.threads {
			Some(threads) => writeln!(out, "  Threads: {threads}")?,
			None => writeln!(out, "  Threads: (auto)")?,
		}
		writeln!(out, "  Debounce: {} ms", self.debounce.as_millis())?;
		if self.search.ignored_dirs.is_empty() {
			writeln!(out, "  Ignored directories: (none)")?;
		} else {
			writeln!(
				out,
				"  Ignored directories: {}",
				self.search.ignored_dirs.join(", ")
			)?;
		}
		writeln!(out, "  Max query length: {}", self.max_query_len)?;
		if !self.initial_query.is_empty() {
			writeln!(out, "  Initial query: {}", self.initial_query)?;
		}
		Ok(())
	}

	/// Settings for the interactive front end.
	#[must_use]
	pub fn ui_config(&self) -> UiConfig {
		UiConfig {
			root: self.root.clone(),
			search: self.search.clone(),
			debounce: self.debounce,
			initial_query: self.initial_query.clone(),
			max_query_len: self.max_query_len,
		}
	}
}
