use std::path::{Path, PathBuf};

use log::debug;

use super::debounce::{DebounceClock, DebounceFired, DebounceToken, Debouncer};
use super::events::SearchId;
use super::session::SearchSession;

/// Glues the debouncer to the session for one root directory.
///
/// Query edits go through [`on_query_changed`](Self::on_query_changed); the
/// consumer feeds the resulting [`DebounceFired`] events back through
/// [`on_debounce_fired`](Self::on_debounce_fired), which starts a search only
/// if no newer edit has happened since.
pub struct SearchController {
	root: PathBuf,
	session: SearchSession,
	debouncer: Debouncer,
	clock: DebounceClock,
}

impl SearchController {
	pub fn new(root: impl Into<PathBuf>, session: SearchSession, debouncer: Debouncer) -> Self {
		Self {
			root: root.into(),
			session,
			debouncer,
			clock: DebounceClock::new(),
		}
	}

	#[must_use]
	pub fn root(&self) -> &Path {
		&self.root
	}

	#[must_use]
	pub fn session(&self) -> &SearchSession {
		&self.session
	}

	/// Record an edit of the query.
	///
	/// A new token is minted either way, so any pending firing becomes stale.
	/// An empty query abandons the live search immediately and schedules
	/// nothing.
	pub fn on_query_changed(&mut self, query: &str) -> DebounceToken {
		let token = self.clock.mint();
		if query.is_empty() {
			self.session.cancel_current();
		} else {
			self.debouncer.schedule(query.to_string(), token);
		}
		token
	}

	/// Start the search for a debounce firing if it is still the latest edit.
	pub fn on_debounce_fired(&mut self, fired: DebounceFired) -> Option<SearchId> {
		if !self.clock.is_current(fired.token) {
			debug!("ignoring stale debounce token {}", fired.token.get());
			return None;
		}
		self.session.start(&self.root, &fired.query)
	}

	/// Start a search right away, skipping the debounce delay.
	pub fn start_now(&mut self, query: &str) -> Option<SearchId> {
		self.clock.mint();
		self.session.start(&self.root, query)
	}

	pub fn cancel_current(&self) {
		self.session.cancel_current();
	}
}
