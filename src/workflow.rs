use std::path::PathBuf;
use std::sync::mpsc;

use anyhow::{Context, Result, bail};
use log::debug;
use serde::Serialize;

use seek::{SearchEvent, SearchSession};

use crate::settings::ResolvedConfig;

/// Matches collected by a single headless search.
#[derive(Debug, Serialize)]
pub(crate) struct HeadlessOutcome {
	pub(crate) query: String,
	pub(crate) root: String,
	pub(crate) total: usize,
	pub(crate) matches: Vec<String>,
}

/// Runs one search to completion without the terminal UI.
pub(crate) struct SearchWorkflow {
	root: PathBuf,
	session: SearchSession,
	events: mpsc::Receiver<SearchEvent>,
}

impl SearchWorkflow {
	pub(crate) fn from_config(config: &ResolvedConfig) -> Result<Self> {
		let (tx, events) = mpsc::channel();
		let session =
			SearchSession::new(&config.search, tx).context("failed to create search session")?;
		Ok(Self {
			root: config.root.clone(),
			session,
			events,
		})
	}

	/// Search for `query` and block until its summary arrives.
	pub(crate) fn run(self, query: &str) -> Result<HeadlessOutcome> {
		let mut outcome = HeadlessOutcome {
			query: query.to_string(),
			root: self.root.display().to_string(),
			total: 0,
			matches: Vec::new(),
		};
		let Some(id) = self.session.start(&self.root, query) else {
			return Ok(outcome);
		};

		loop {
			match self.events.recv() {
				Ok(event) if event.id() != id => {
					debug!("ignoring event for search {}", event.id());
				}
				Ok(SearchEvent::Match { path, .. }) => {
					outcome.matches.push(path.display().to_string());
				}
				Ok(SearchEvent::Finished { total, .. }) => {
					outcome.total = total;
					return Ok(outcome);
				}
				Err(_) => bail!("search {id} ended without a summary"),
			}
		}
	}
}
