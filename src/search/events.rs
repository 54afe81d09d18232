use std::fmt;
use std::path::PathBuf;
use std::sync::mpsc::Sender;

/// Identifies which search produced a message.
///
/// Identifiers are minted by [`SearchSession`](super::SearchSession) in
/// increasing order. Consumers compare them for equality only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SearchId(u64);

impl SearchId {
	#[must_use]
	pub const fn new(raw: u64) -> Self {
		Self(raw)
	}

	#[must_use]
	pub const fn get(self) -> u64 {
		self.0
	}

	pub(crate) fn next(self) -> Self {
		Self(self.0.wrapping_add(1))
	}
}

impl fmt::Display for SearchId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Messages streamed from a running search to its consumer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchEvent {
	/// A path whose name matched the query.
	Match { id: SearchId, path: PathBuf },
	/// Terminal message; sent exactly once per started search after every
	/// match it will ever emit.
	Finished { id: SearchId, total: usize },
}

impl SearchEvent {
	#[must_use]
	pub fn id(&self) -> SearchId {
		match self {
			Self::Match { id, .. } | Self::Finished { id, .. } => *id,
		}
	}
}

/// Destination for events produced on background threads.
///
/// `deliver` may be called from any walker unit concurrently. It returns
/// `false` once the consumer has gone away.
pub trait EventSink<E>: Send + Sync + 'static {
	fn deliver(&self, event: E) -> bool;
}

impl<T, E> EventSink<E> for Sender<T>
where
	T: From<E> + Send + 'static,
{
	fn deliver(&self, event: E) -> bool {
		self.send(T::from(event)).is_ok()
	}
}
