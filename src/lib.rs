//! Incremental fuzzy file-name search.
//!
//! The [`search`] module holds the engine: a concurrent, cancellable walker
//! that streams matches tagged with the generation that produced them. The
//! [`ui`] module is a small terminal front end built on top of it.

pub mod app_dirs;
mod error;
pub mod logging;
pub mod search;
pub mod ui;

pub use error::{Error, Result};
pub use search::{
	DebounceFired, Debouncer, EventSink, ResultSet, SearchController, SearchEvent, SearchId,
	SearchOptions, SearchSession,
};
pub use ui::{UiConfig, run};
