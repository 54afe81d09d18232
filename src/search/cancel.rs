//! Cooperative cancellation for in-flight searches.
//!
//! A [`CancellationToken`] is cloned into every traversal unit of a search.
//! Units poll it at their checkpoints; nothing is interrupted forcibly, so a
//! unit that is mid-listing finishes that call before it notices.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag that flips once and stays flipped.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
	cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Request cancellation. Calling this more than once has no further effect.
	pub fn cancel(&self) {
		self.cancelled.store(true, Ordering::Release);
	}

	#[inline]
	#[must_use]
	pub fn is_cancelled(&self) -> bool {
		self.cancelled.load(Ordering::Acquire)
	}

	/// Returns `Some(())` while the token is live and `None` once cancelled,
	/// so checkpoints can bail out with `?`.
	#[inline]
	pub fn live(&self) -> Option<()> {
		if self.is_cancelled() { None } else { Some(()) }
	}
}
