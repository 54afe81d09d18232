use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use log::{debug, info};
use parking_lot::Mutex;

use super::SearchOptions;
use super::cancel::CancellationToken;
use super::events::{EventSink, SearchEvent, SearchId};
use super::fs::{DirLister, OsLister};
use super::matcher::QueryPattern;
use super::walker::Walker;
use crate::Result;

struct ActiveSearch {
	id: SearchId,
	cancel: CancellationToken,
}

#[derive(Default)]
struct SessionState {
	last_id: SearchId,
	active: Option<ActiveSearch>,
}

/// Owns "the current search".
///
/// Starting a search cancels the previous one, mints the next [`SearchId`]
/// and installs a fresh [`CancellationToken`] under one lock, so the token a
/// walk observes always belongs to its own generation. Walks run on a
/// background thread; the previous generation is not waited for.
pub struct SearchSession {
	state: Mutex<SessionState>,
	walker: Arc<Walker>,
	sink: Arc<dyn EventSink<SearchEvent>>,
}

impl SearchSession {
	/// Create a session that lists directories through the operating system.
	pub fn new(options: &SearchOptions, sink: impl EventSink<SearchEvent>) -> Result<Self> {
		Self::with_lister(options, Arc::new(OsLister), sink)
	}

	pub fn with_lister(
		options: &SearchOptions,
		lister: Arc<dyn DirLister>,
		sink: impl EventSink<SearchEvent>,
	) -> Result<Self> {
		Ok(Self {
			state: Mutex::new(SessionState::default()),
			walker: Arc::new(Walker::new(options, lister)?),
			sink: Arc::new(sink),
		})
	}

	#[must_use]
	pub fn result_cap(&self) -> usize {
		self.walker.result_cap()
	}

	/// Identifier of the live search, if any.
	#[must_use]
	pub fn current(&self) -> Option<SearchId> {
		self.state.lock().active.as_ref().map(|active| active.id)
	}

	/// Cancel the live search, if there is one. Safe to call repeatedly.
	pub fn cancel_current(&self) {
		let mut state = self.state.lock();
		Self::cancel_locked(&mut state);
	}

	fn cancel_locked(state: &mut SessionState) {
		if let Some(active) = state.active.take() {
			debug!("cancelling search {}", active.id);
			active.cancel.cancel();
		}
	}

	/// Start searching `root` for `query` and return the new generation's
	/// identifier straight away.
	///
	/// An empty query starts nothing: no identifier is minted and no summary
	/// will be sent.
	pub fn start(&self, root: &Path, query: &str) -> Option<SearchId> {
		if query.is_empty() {
			return None;
		}

		let (id, cancel) = {
			let mut state = self.state.lock();
			Self::cancel_locked(&mut state);
			let id = state.last_id.next();
			let cancel = CancellationToken::new();
			state.last_id = id;
			state.active = Some(ActiveSearch {
				id,
				cancel: cancel.clone(),
			});
			(id, cancel)
		};

		info!("search {id} started for {query:?} in {}", root.display());

		let walker = Arc::clone(&self.walker);
		let sink = Arc::clone(&self.sink);
		let root = root.to_path_buf();
		let pattern = QueryPattern::new(query);
		thread::spawn(move || {
			let started = Instant::now();
			let report = walker.walk(&root, &pattern, &cancel, |path| {
				sink.deliver(SearchEvent::Match { id, path });
			});
			let total = report.matched.min(walker.result_cap());
			info!(
				"search {id} finished total={total} raw={} dirs={} unreadable={} cancelled={} elapsed_ms={}",
				report.matched,
				report.listed,
				report.unreadable,
				report.cancelled,
				started.elapsed().as_millis(),
			);
			sink.deliver(SearchEvent::Finished { id, total });
		});

		Some(id)
	}
}

impl Drop for SearchSession {
	fn drop(&mut self) {
		self.cancel_current();
	}
}

#[cfg(test)]
mod tests {
	use std::fs::{self, File};
	use std::sync::mpsc;
	use std::time::Duration;

	use tempfile::tempdir;

	use super::*;

	const WAIT: Duration = Duration::from_secs(5);

	fn session() -> (SearchSession, mpsc::Receiver<SearchEvent>) {
		let (tx, rx) = mpsc::channel();
		let session = SearchSession::new(&SearchOptions::default(), tx).expect("session");
		(session, rx)
	}

	#[test]
	fn empty_query_starts_nothing() {
		let (session, rx) = session();
		let dir = tempdir().expect("tempdir");

		assert_eq!(session.start(dir.path(), ""), None);
		assert_eq!(session.current(), None);
		assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
	}

	#[test]
	fn identifiers_increase_per_started_search() {
		let (session, _rx) = session();
		let dir = tempdir().expect("tempdir");

		let first = session.start(dir.path(), "a").expect("first");
		session.start(dir.path(), "");
		let second = session.start(dir.path(), "ab").expect("second");

		assert_eq!(first.get() + 1, second.get());
		assert_eq!(session.current(), Some(second));
	}

	#[test]
	fn cancel_current_is_idempotent() {
		let (session, _rx) = session();
		session.cancel_current();
		session.cancel_current();

		let dir = tempdir().expect("tempdir");
		session.start(dir.path(), "x").expect("search");
		session.cancel_current();
		session.cancel_current();
		assert_eq!(session.current(), None);
	}

	#[test]
	fn every_started_search_gets_one_summary() {
		let (session, rx) = session();
		let dir = tempdir().expect("tempdir");
		fs::create_dir(dir.path().join("src")).expect("dir");
		File::create(dir.path().join("src/lib.rs")).expect("file");

		let first = session.start(dir.path(), "lib").expect("first");
		let second = session.start(dir.path(), "lib").expect("second");

		let mut finished = Vec::new();
		while finished.len() < 2 {
			match rx.recv_timeout(WAIT).expect("event") {
				SearchEvent::Finished { id, .. } => finished.push(id),
				SearchEvent::Match { .. } => {}
			}
		}
		finished.sort_by_key(|id| id.get());
		assert_eq!(finished, vec![first, second]);
		assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
	}
}
