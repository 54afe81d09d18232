use std::path::PathBuf;

use log::debug;

use super::events::{SearchEvent, SearchId};

/// Consumer-side view of the generation currently on screen.
///
/// Events tagged with any other generation are dropped, so stragglers from a
/// superseded search never reach the rendered list.
#[derive(Debug)]
pub struct ResultSet {
	current: Option<SearchId>,
	paths: Vec<PathBuf>,
	total: Option<usize>,
	cap: usize,
}

impl ResultSet {
	#[must_use]
	pub fn new(cap: usize) -> Self {
		Self {
			current: None,
			paths: Vec::new(),
			total: None,
			cap,
		}
	}

	/// Adopt `id` as the generation to display and drop previous results.
	pub fn begin(&mut self, id: SearchId) {
		self.current = Some(id);
		self.paths.clear();
		self.total = None;
	}

	/// Forget the current generation entirely, e.g. when the query is cleared.
	pub fn clear(&mut self) {
		self.current = None;
		self.paths.clear();
		self.total = None;
	}

	/// Apply an event. Returns `false` when it belonged to another generation.
	pub fn apply(&mut self, event: SearchEvent) -> bool {
		if Some(event.id()) != self.current {
			debug!("dropping stale event for search {}", event.id());
			return false;
		}

		match event {
			SearchEvent::Match { path, .. } => {
				if self.paths.len() < self.cap {
					self.paths.push(path);
				}
			}
			SearchEvent::Finished { total, .. } => {
				self.total = Some(total.min(self.cap));
			}
		}
		true
	}

	#[must_use]
	pub fn current(&self) -> Option<SearchId> {
		self.current
	}

	#[must_use]
	pub fn paths(&self) -> &[PathBuf] {
		&self.paths
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.paths.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.paths.is_empty()
	}

	/// Final count reported by the summary, once it has arrived.
	#[must_use]
	pub fn total(&self) -> Option<usize> {
		self.total
	}

	/// `true` while a generation is adopted but its summary has not arrived.
	#[must_use]
	pub fn is_searching(&self) -> bool {
		self.current.is_some() && self.total.is_none()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn matched(id: u64, path: &str) -> SearchEvent {
		SearchEvent::Match {
			id: SearchId::new(id),
			path: PathBuf::from(path),
		}
	}

	fn finished(id: u64, total: usize) -> SearchEvent {
		SearchEvent::Finished {
			id: SearchId::new(id),
			total,
		}
	}

	#[test]
	fn events_without_an_adopted_generation_are_dropped() {
		let mut results = ResultSet::new(10);
		assert!(!results.apply(matched(1, "a")));
		assert!(results.is_empty());
		assert!(!results.is_searching());
	}

	#[test]
	fn stale_generation_is_ignored_after_a_newer_one_starts() {
		let mut results = ResultSet::new(10);
		results.begin(SearchId::new(1));
		assert!(results.apply(matched(1, "old")));

		results.begin(SearchId::new(2));
		assert!(!results.apply(matched(1, "late")));
		assert!(!results.apply(finished(1, 1)));
		assert!(results.apply(matched(2, "new")));

		assert_eq!(results.paths(), &[PathBuf::from("new")]);
		assert!(results.is_searching());
		assert!(results.apply(finished(2, 1)));
		assert_eq!(results.total(), Some(1));
		assert!(!results.is_searching());
	}

	#[test]
	fn totals_and_paths_are_clamped_to_the_cap() {
		let mut results = ResultSet::new(2);
		results.begin(SearchId::new(3));
		for path in ["a", "b", "c"] {
			results.apply(matched(3, path));
		}
		results.apply(finished(3, 5));

		assert_eq!(results.len(), 2);
		assert_eq!(results.total(), Some(2));
	}

	#[test]
	fn clear_forgets_the_generation() {
		let mut results = ResultSet::new(5);
		results.begin(SearchId::new(4));
		results.apply(matched(4, "a"));
		results.clear();

		assert_eq!(results.current(), None);
		assert!(results.is_empty());
		assert!(!results.apply(finished(4, 1)));
	}
}
