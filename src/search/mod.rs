//! Incremental name search over a directory tree.
//!
//! Keystrokes pass through the [`Debouncer`], surviving queries start a new
//! generation on the [`SearchSession`], and the session's [`Walker`] streams
//! tagged [`SearchEvent`]s back to the consumer, which keeps only the ones for
//! the generation it is currently showing (see [`ResultSet`]).

mod cancel;
mod controller;
mod debounce;
mod events;
mod fs;
mod gate;
pub mod matcher;
mod results;
mod session;
mod walker;

use std::time::Duration;

pub use cancel::CancellationToken;
pub use controller::SearchController;
pub use debounce::{DebounceClock, DebounceFired, DebounceToken, Debouncer};
pub use events::{EventSink, SearchEvent, SearchId};
pub use fs::{DirLister, ListedEntry, OsLister};
pub use gate::{ListingGate, ListingPermit};
pub use matcher::{QueryPattern, matches};
pub use results::ResultSet;
pub use session::SearchSession;
pub use walker::{WalkReport, Walker};

/// Maximum number of matches reported for a single search.
pub const DEFAULT_RESULT_CAP: usize = 150;
/// Maximum number of directory listings running at once.
pub const DEFAULT_CONCURRENCY_CAP: usize = 50;
/// Quiet period after the last keystroke before a search starts.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(150);

/// Directory names that are never descended into.
pub const DEFAULT_IGNORED_DIRS: &[&str] = &[
	".git",
	"node_modules",
	".svn",
	".hg",
	"vendor",
	"__pycache__",
	".cache",
	".vscode",
	".idea",
	"target",
	"build",
	"dist",
];

/// Tunables for a [`SearchSession`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOptions {
	pub result_cap: usize,
	pub concurrency_cap: usize,
	/// Worker threads for the traversal pool. `None` picks a value from the
	/// available parallelism, bounded by `concurrency_cap`.
	pub threads: Option<usize>,
	pub ignored_dirs: Vec<String>,
}

impl Default for SearchOptions {
	fn default() -> Self {
		Self {
			result_cap: DEFAULT_RESULT_CAP,
			concurrency_cap: DEFAULT_CONCURRENCY_CAP,
			threads: None,
			ignored_dirs: DEFAULT_IGNORED_DIRS.iter().map(|name| (*name).to_string()).collect(),
		}
	}
}
