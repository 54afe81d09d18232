use parking_lot::{Condvar, Mutex};

/// Counting semaphore that bounds how many directory listings run at once.
///
/// The gate only covers the listing call itself. Matching and dispatching
/// child directories happen after the permit has been dropped.
#[derive(Debug)]
pub struct ListingGate {
	available: Mutex<usize>,
	released: Condvar,
}

impl ListingGate {
	/// Create a gate with `capacity` permits. A capacity of zero is bumped to
	/// one so that walks can always make progress.
	#[must_use]
	pub fn new(capacity: usize) -> Self {
		Self {
			available: Mutex::new(capacity.max(1)),
			released: Condvar::new(),
		}
	}

	/// Block until a permit is free. The permit is returned when dropped.
	pub fn acquire(&self) -> ListingPermit<'_> {
		let mut available = self.available.lock();
		while *available == 0 {
			self.released.wait(&mut available);
		}
		*available -= 1;
		ListingPermit { gate: self }
	}

	fn release(&self) {
		let mut available = self.available.lock();
		*available += 1;
		self.released.notify_one();
	}
}

/// RAII guard for one slot of a [`ListingGate`].
#[must_use = "dropping the permit immediately releases the slot"]
pub struct ListingPermit<'a> {
	gate: &'a ListingGate,
}

impl Drop for ListingPermit<'_> {
	fn drop(&mut self) {
		self.gate.release();
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;
	use std::sync::atomic::{AtomicUsize, Ordering};
	use std::thread;
	use std::time::Duration;

	use super::*;

	#[test]
	fn zero_capacity_is_clamped() {
		let gate = ListingGate::new(0);
		assert_eq!(*gate.available.lock(), 1);
		drop(gate.acquire());
	}

	#[test]
	fn permits_are_returned_on_drop() {
		let gate = ListingGate::new(1);
		drop(gate.acquire());
		drop(gate.acquire());
		assert_eq!(*gate.available.lock(), 1);
	}

	#[test]
	fn concurrent_holders_never_exceed_capacity() {
		let gate = Arc::new(ListingGate::new(3));
		let active = Arc::new(AtomicUsize::new(0));
		let peak = Arc::new(AtomicUsize::new(0));

		let handles: Vec<_> = (0..16)
			.map(|_| {
				let gate = Arc::clone(&gate);
				let active = Arc::clone(&active);
				let peak = Arc::clone(&peak);
				thread::spawn(move || {
					let _permit = gate.acquire();
					let now = active.fetch_add(1, Ordering::SeqCst) + 1;
					peak.fetch_max(now, Ordering::SeqCst);
					thread::sleep(Duration::from_millis(5));
					active.fetch_sub(1, Ordering::SeqCst);
				})
			})
			.collect();
		for handle in handles {
			handle.join().unwrap();
		}

		assert!(peak.load(Ordering::SeqCst) <= 3);
		assert_eq!(*gate.available.lock(), 3);
	}
}
