//! Concurrent directory traversal with streamed name matching.
//!
//! Every directory is its own unit of work on the walker's thread pool. A
//! unit lists its directory, tests each child's name, emits matches straight
//! away and dispatches child directories as new units instead of recursing.
//! The listing call is the only part bounded by the [`ListingGate`].

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use log::debug;
use rayon::{Scope, ThreadPool, ThreadPoolBuilder};

use super::SearchOptions;
use super::cancel::CancellationToken;
use super::fs::DirLister;
use super::gate::ListingGate;
use super::matcher::QueryPattern;
use crate::Result;

/// Counters collected while a walk runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WalkReport {
	/// Raw number of name matches. Concurrent units may push this past the
	/// result cap; only the first `result_cap` were emitted.
	pub matched: usize,
	pub listed: usize,
	pub unreadable: usize,
	pub cancelled: bool,
}

/// Shared traversal machinery. One walker serves every search of a session,
/// so the listing gate bounds listings across overlapping generations too.
pub struct Walker {
	lister: Arc<dyn DirLister>,
	gate: ListingGate,
	pool: ThreadPool,
	ignored: HashSet<String>,
	result_cap: usize,
}

impl Walker {
	pub fn new(options: &SearchOptions, lister: Arc<dyn DirLister>) -> Result<Self> {
		let threads = options
			.threads
			.unwrap_or_else(|| default_threads(options.concurrency_cap));
		let pool = ThreadPoolBuilder::new()
			.num_threads(threads)
			.thread_name(|index| format!("seek-walk-{index}"))
			.build()?;

		Ok(Self {
			lister,
			gate: ListingGate::new(options.concurrency_cap),
			pool,
			ignored: options.ignored_dirs.iter().cloned().collect(),
			result_cap: options.result_cap,
		})
	}

	#[must_use]
	pub fn result_cap(&self) -> usize {
		self.result_cap
	}

	#[must_use]
	pub fn is_ignored(&self, name: &str) -> bool {
		self.ignored.contains(name)
	}

	/// Walk `root`, calling `on_match` for each matching path as soon as it is
	/// found. Blocks until every dispatched unit has finished or observed
	/// cancellation.
	pub fn walk<F>(
		&self,
		root: &Path,
		pattern: &QueryPattern,
		cancel: &CancellationToken,
		on_match: F,
	) -> WalkReport
	where
		F: Fn(PathBuf) + Sync,
	{
		let traversal = Traversal {
			walker: self,
			pattern,
			cancel,
			on_match,
			matched: AtomicUsize::new(0),
			listed: AtomicUsize::new(0),
			unreadable: AtomicUsize::new(0),
		};

		self.pool.scope(|scope| {
			let _ = traversal.expand(scope, root.to_path_buf());
		});

		WalkReport {
			matched: traversal.matched.into_inner(),
			listed: traversal.listed.into_inner(),
			unreadable: traversal.unreadable.into_inner(),
			cancelled: cancel.is_cancelled(),
		}
	}
}

fn default_threads(concurrency_cap: usize) -> usize {
	let cores = thread::available_parallelism().map_or(4, usize::from);
	(cores * 2).clamp(1, concurrency_cap.max(1))
}

struct Traversal<'w, F> {
	walker: &'w Walker,
	pattern: &'w QueryPattern,
	cancel: &'w CancellationToken,
	on_match: F,
	matched: AtomicUsize,
	listed: AtomicUsize,
	unreadable: AtomicUsize,
}

impl<F> Traversal<'_, F>
where
	F: Fn(PathBuf) + Sync,
{
	fn expand<'s>(&'s self, scope: &Scope<'s>, dir: PathBuf) -> Option<()> {
		self.checkpoint()?;

		let listing = {
			let _permit = self.walker.gate.acquire();
			self.walker.lister.list(&dir)
		};
		let entries = match listing {
			Ok(entries) => entries,
			Err(err) => {
				self.unreadable.fetch_add(1, Ordering::Relaxed);
				debug!("skipping unreadable directory {}: {err}", dir.display());
				return None;
			}
		};
		self.listed.fetch_add(1, Ordering::Relaxed);

		for entry in entries {
			self.checkpoint()?;

			let name = entry.name.to_string_lossy();
			if name.starts_with('.') {
				continue;
			}

			let path = dir.join(&entry.name);
			if entry.is_dir {
				if self.walker.is_ignored(&name) {
					continue;
				}
				let child = path.clone();
				scope.spawn(move |scope| {
					let _ = self.expand(scope, child);
				});
			}

			if self.pattern.matches(&name) {
				self.record(path);
			}
		}

		Some(())
	}

	/// `None` once the search was cancelled or the cap has been reached.
	fn checkpoint(&self) -> Option<()> {
		self.cancel.live()?;
		(self.matched.load(Ordering::Acquire) < self.walker.result_cap).then_some(())
	}

	fn record(&self, path: PathBuf) {
		let count = self.matched.fetch_add(1, Ordering::AcqRel) + 1;
		if count <= self.walker.result_cap {
			(self.on_match)(path);
		}
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;
	use std::io;
	use std::sync::Mutex;

	use super::*;
	use crate::search::fs::ListedEntry;

	/// In-memory tree keyed by directory path.
	#[derive(Default)]
	struct FakeTree {
		dirs: HashMap<PathBuf, Vec<ListedEntry>>,
	}

	impl FakeTree {
		fn dir(mut self, path: &str, entries: &[(&str, bool)]) -> Self {
			let entries = entries
				.iter()
				.map(|(name, is_dir)| ListedEntry::new(*name, *is_dir))
				.collect();
			self.dirs.insert(PathBuf::from(path), entries);
			self
		}
	}

	impl DirLister for FakeTree {
		fn list(&self, dir: &Path) -> io::Result<Vec<ListedEntry>> {
			self.dirs
				.get(dir)
				.cloned()
				.ok_or_else(|| io::Error::from(io::ErrorKind::PermissionDenied))
		}
	}

	fn walker(tree: FakeTree, result_cap: usize) -> Walker {
		let options = SearchOptions {
			result_cap,
			threads: Some(4),
			..SearchOptions::default()
		};
		Walker::new(&options, Arc::new(tree)).expect("walker")
	}

	fn collect(walker: &Walker, root: &str, query: &str) -> (Vec<PathBuf>, WalkReport) {
		let found = Mutex::new(Vec::new());
		let report = walker.walk(
			Path::new(root),
			&QueryPattern::new(query),
			&CancellationToken::new(),
			|path| found.lock().unwrap().push(path),
		);
		let mut found = found.into_inner().unwrap();
		found.sort();
		(found, report)
	}

	#[test]
	fn hidden_and_ignored_entries_are_pruned() {
		let tree = FakeTree::default()
			.dir(
				"root",
				&[
					("a.txt", false),
					("b", true),
					(".git", true),
					("node_modules", true),
					(".config.c", false),
				],
			)
			.dir("root/b", &[("c.txt", false)])
			.dir("root/.git", &[("c.txt", false)])
			.dir("root/node_modules", &[("c.txt", false)]);

		let (found, report) = collect(&walker(tree, 150), "root", "c");
		assert_eq!(found, vec![PathBuf::from("root/b/c.txt")]);
		assert_eq!(report.matched, 1);
		assert_eq!(report.listed, 2);
	}

	#[test]
	fn directories_are_matched_by_name_too() {
		let tree = FakeTree::default()
			.dir("root", &[("docs", true)])
			.dir("root/docs", &[("guide.md", false)]);

		let (found, _) = collect(&walker(tree, 150), "root", "doc");
		assert_eq!(found, vec![PathBuf::from("root/docs")]);
	}

	#[test]
	fn unreadable_directories_are_skipped() {
		let tree = FakeTree::default()
			.dir("root", &[("locked", true), ("open", true)])
			.dir("root/open", &[("key.pem", false)]);

		let (found, report) = collect(&walker(tree, 150), "root", "key");
		assert_eq!(found, vec![PathBuf::from("root/open/key.pem")]);
		assert_eq!(report.unreadable, 1);
	}

	#[test]
	fn emitted_matches_never_exceed_cap() {
		let names: Vec<String> = (0..40).map(|i| format!("match-{i}.rs")).collect();
		let mut tree = FakeTree::default();
		let mut root = Vec::new();
		for sub in 0..8 {
			let dir = format!("root/d{sub}");
			let entries: Vec<(&str, bool)> = names.iter().map(|n| (n.as_str(), false)).collect();
			tree = tree.dir(&dir, &entries);
			root.push((format!("d{sub}"), true));
		}
		let root: Vec<(&str, bool)> = root.iter().map(|(n, d)| (n.as_str(), *d)).collect();
		let tree = tree.dir("root", &root);

		let (found, report) = collect(&walker(tree, 25), "root", "match");
		assert_eq!(found.len(), 25);
		assert!(report.matched >= 25);
	}

	/// Wide tree whose lister cancels the walk on a chosen listing call.
	struct CancellingTree {
		cancel: CancellationToken,
		cancel_on_call: usize,
		calls: AtomicUsize,
	}

	impl CancellingTree {
		const WIDTH: usize = 200;

		fn new(cancel: &CancellationToken, cancel_on_call: usize) -> Arc<Self> {
			Arc::new(Self {
				cancel: cancel.clone(),
				cancel_on_call,
				calls: AtomicUsize::new(0),
			})
		}
	}

	impl DirLister for CancellingTree {
		fn list(&self, dir: &Path) -> io::Result<Vec<ListedEntry>> {
			let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
			if call == self.cancel_on_call {
				self.cancel.cancel();
			}
			if dir == Path::new("root") {
				Ok((0..Self::WIDTH)
					.map(|i| ListedEntry::new(format!("d{i}"), true))
					.collect())
			} else {
				Ok(vec![ListedEntry::new("leaf.txt", false)])
			}
		}
	}

	fn walk_cancelling(cancel_on_call: usize) -> (Arc<CancellingTree>, usize, WalkReport) {
		let cancel = CancellationToken::new();
		let tree = CancellingTree::new(&cancel, cancel_on_call);
		let options = SearchOptions {
			threads: Some(4),
			..SearchOptions::default()
		};
		let lister: Arc<dyn DirLister> = tree.clone();
		let walker = Walker::new(&options, lister).expect("walker");

		let emitted = AtomicUsize::new(0);
		let report = walker.walk(
			Path::new("root"),
			&QueryPattern::new("leaf"),
			&cancel,
			|_| {
				emitted.fetch_add(1, Ordering::SeqCst);
			},
		);
		(tree, emitted.into_inner(), report)
	}

	#[test]
	fn cancelling_during_the_root_listing_dispatches_nothing() {
		let (tree, emitted, report) = walk_cancelling(1);

		assert_eq!(tree.calls.load(Ordering::SeqCst), 1);
		assert_eq!(emitted, 0);
		assert_eq!(report.listed, 1);
		assert!(report.cancelled);
	}

	#[test]
	fn cancelling_mid_walk_stops_further_listings() {
		let (tree, emitted, report) = walk_cancelling(10);

		// Units that passed their checkpoint before the cancel may still list,
		// at most one per pool thread.
		let calls = tree.calls.load(Ordering::SeqCst);
		assert!(calls >= 10);
		assert!(calls <= 10 + 4, "listed {calls} directories after cancelling");
		assert!(emitted < calls);
		assert_eq!(report.matched, emitted);
		assert!(report.cancelled);
	}

	#[test]
	fn cancelled_token_stops_before_listing() {
		let tree = FakeTree::default().dir("root", &[("c.txt", false)]);
		let walker = walker(tree, 150);
		let cancel = CancellationToken::new();
		cancel.cancel();

		let report = walker.walk(
			Path::new("root"),
			&QueryPattern::new("c"),
			&cancel,
			|_| panic!("no matches after cancellation"),
		);
		assert_eq!(report.listed, 0);
		assert!(report.cancelled);
	}
}
