//! Delayed delivery of query changes.
//!
//! The [`Debouncer`] knows nothing about staleness: it hands every scheduled
//! query back after the delay. The caller mints a [`DebounceToken`] per
//! keystroke with a [`DebounceClock`] and lets a firing through only when its
//! token is still the latest one.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use super::events::EventSink;

/// Per-keystroke tag, independent from search identifiers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DebounceToken(u64);

impl DebounceToken {
	#[must_use]
	pub const fn get(self) -> u64 {
		self.0
	}
}

/// Emitted once the debounce delay for a keystroke has elapsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DebounceFired {
	pub query: String,
	pub token: DebounceToken,
}

/// Mints tokens and remembers the most recent one.
#[derive(Debug, Default)]
pub struct DebounceClock {
	latest: DebounceToken,
}

impl DebounceClock {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	pub fn mint(&mut self) -> DebounceToken {
		self.latest = DebounceToken(self.latest.0.wrapping_add(1));
		self.latest
	}

	#[must_use]
	pub fn is_current(&self, token: DebounceToken) -> bool {
		token == self.latest
	}
}

/// Fixed-delay timer that reports back through an [`EventSink`].
pub struct Debouncer {
	delay: Duration,
	sink: Arc<dyn EventSink<DebounceFired>>,
}

impl Debouncer {
	pub fn new(delay: Duration, sink: impl EventSink<DebounceFired>) -> Self {
		Self {
			delay,
			sink: Arc::new(sink),
		}
	}

	/// Deliver `query` tagged with `token` once the delay has elapsed.
	pub fn schedule(&self, query: String, token: DebounceToken) {
		let delay = self.delay;
		let sink = Arc::clone(&self.sink);
		thread::spawn(move || {
			thread::sleep(delay);
			sink.deliver(DebounceFired { query, token });
		});
	}
}
