use ratatui::crossterm::event::Event;

use super::preview::PreviewLoaded;
use crate::search::{DebounceFired, SearchEvent};

/// Everything the UI loop reacts to, funnelled through one channel.
#[derive(Debug)]
pub enum AppEvent {
	Input(Event),
	Search(SearchEvent),
	Debounce(DebounceFired),
	Preview(PreviewLoaded),
}

impl From<Event> for AppEvent {
	fn from(event: Event) -> Self {
		Self::Input(event)
	}
}

impl From<SearchEvent> for AppEvent {
	fn from(event: SearchEvent) -> Self {
		Self::Search(event)
	}
}

impl From<DebounceFired> for AppEvent {
	fn from(fired: DebounceFired) -> Self {
		Self::Debounce(fired)
	}
}

impl From<PreviewLoaded> for AppEvent {
	fn from(loaded: PreviewLoaded) -> Self {
		Self::Preview(loaded)
	}
}
