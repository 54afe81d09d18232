use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

use seek::search::{DEFAULT_DEBOUNCE, SearchOptions};
use seek::ui::DEFAULT_MAX_QUERY_LEN;

use crate::cli::CliArgs;

use super::resolved::ResolvedConfig;
use super::util::sanitize_dir_names;

/// Mirror of the configuration file before CLI overrides and validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
	search: SearchSection,
	ui: UiSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SearchSection {
	root: Option<PathBuf>,
	result_cap: Option<usize>,
	concurrency_cap: Option<usize>,
	threads: Option<usize>,
	debounce_ms: Option<u64>,
	ignored_dirs: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct UiSection {
	initial_query: Option<String>,
	max_query_len: Option<usize>,
}

impl RawConfig {
	/// Apply CLI overrides on top of the values read from files and the
	/// environment.
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(root) = cli.root.clone() {
			self.search.root = Some(root);
		}
		if let Some(value) = cli.result_cap {
			self.search.result_cap = Some(value);
		}
		if let Some(value) = cli.concurrency_cap {
			self.search.concurrency_cap = Some(value);
		}
		if let Some(value) = cli.threads {
			self.search.threads = Some(value);
		}
		if let Some(value) = cli.debounce_ms {
			self.search.debounce_ms = Some(value);
		}
		if let Some(value) = &cli.ignored_dirs {
			self.search.ignored_dirs = Some(value.clone());
		}
		if let Some(query) = cli.initial_query.clone() {
			self.ui.initial_query = Some(query);
		}
	}

	/// Validate the raw values and fill in defaults.
	pub(super) fn resolve(self) -> Result<ResolvedConfig> {
		let mut root = match self.search.root {
			Some(path) => path,
			None => env::current_dir().context("failed to determine working directory")?,
		};
		if root.is_relative() {
			root = env::current_dir()
				.context("failed to resolve current directory for root")?
				.join(root);
		}
		root = fs::canonicalize(&root)
			.with_context(|| format!("failed to canonicalize search root {}", root.display()))?;

		let metadata = fs::metadata(&root)
			.with_context(|| format!("failed to inspect search root {}", root.display()))?;
		ensure!(metadata.is_dir(), "search root must be a directory");

		let defaults = SearchOptions::default();
		let search = SearchOptions {
			result_cap: self.search.result_cap.unwrap_or(defaults.result_cap),
			concurrency_cap: self
				.search
				.concurrency_cap
				.unwrap_or(defaults.concurrency_cap),
			threads: self.search.threads,
			ignored_dirs: self
				.search
				.ignored_dirs
				.map(sanitize_dir_names)
				.unwrap_or(defaults.ignored_dirs),
		};
		ensure!(search.result_cap > 0, "result-cap must be greater than zero");
		ensure!(
			search.concurrency_cap > 0,
			"concurrency-cap must be greater than zero"
		);
		if let Some(threads) = search.threads {
			ensure!(threads > 0, "threads must be greater than zero");
		}

		let debounce = self
			.search
			.debounce_ms
			.map_or(DEFAULT_DEBOUNCE, Duration::from_millis);
		let max_query_len = self.ui.max_query_len.unwrap_or(DEFAULT_MAX_QUERY_LEN);
		ensure!(max_query_len > 0, "max_query_len must be greater than zero");

		Ok(ResolvedConfig {
			root,
			search,
			debounce,
			initial_query: self.ui.initial_query.unwrap_or_default(),
			max_query_len,
		})
	}
}
