//! Terminal front end for `seek`.
//!
//! [`App`] owns the search controller and the on-screen state; [`run`] drives
//! it with a ratatui event loop. Keystrokes, search results, debounce firings
//! and preview loads all arrive on one [`AppEvent`] channel.

mod event;
mod format;
mod highlight;
mod input;
mod preview;
mod render;
mod runtime;
mod state;
mod theme;

use std::path::PathBuf;
use std::time::Duration;

pub use event::AppEvent;
pub use format::format_result_path;
pub use input::QueryInput;
pub use highlight::{Highlighter, MAX_PREVIEW_LINES};
pub use preview::{PreviewLoaded, PreviewWorker, UNREADABLE, read_preview};
pub use runtime::run;
pub use state::{App, Flow};
pub use theme::Theme;

use crate::search::{DEFAULT_DEBOUNCE, SearchOptions};

/// Longest query the input accepts.
pub const DEFAULT_MAX_QUERY_LEN: usize = 64;
/// Number of result rows visible at once.
pub const VISIBLE_RESULTS: usize = 15;

/// Settings for an interactive session.
#[derive(Clone, Debug)]
pub struct UiConfig {
	pub root: PathBuf,
	pub search: SearchOptions,
	pub debounce: Duration,
	pub initial_query: String,
	pub max_query_len: usize,
}

impl UiConfig {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self {
			root: root.into(),
			search: SearchOptions::default(),
			debounce: DEFAULT_DEBOUNCE,
			initial_query: String::new(),
			max_query_len: DEFAULT_MAX_QUERY_LEN,
		}
	}
}
