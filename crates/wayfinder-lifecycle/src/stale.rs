//! Staleness guard for overlapping async work.
//!
//! Every async render or fetch takes a ticket with [`StaleGuard::begin`]
//! before it starts and checks [`StaleGuard::is_current`] right before it
//! commits anything visible. A request started earlier may resolve after
//! one started later; only the holder of the latest ticket may commit.
//! Stale results are dropped silently, without error or retry.
//!
//! ```
//! use wayfinder_lifecycle::StaleGuard;
//!
//! let guard = StaleGuard::new();
//! let first = guard.begin();
//! let second = guard.begin();
//!
//! assert!(!guard.is_current(first));
//! assert!(guard.is_current(second));
//! ```

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Ticket issued by [`StaleGuard::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
	/// Raw ticket value.
	pub fn get(self) -> u64 {
		self.0
	}
}

impl fmt::Display for Generation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Per-scope monotonic ticket counter.
///
/// Clones share the counter, so a clone moved into a spawned task observes
/// tickets issued afterwards by the view that spawned it.
#[derive(Debug, Clone, Default)]
pub struct StaleGuard {
	latest: Rc<Cell<Option<u64>>>,
}

impl StaleGuard {
	/// Creates a guard with no ticket issued yet.
	pub fn new() -> Self {
		Self::default()
	}

	/// Issues the next ticket: 0 on a fresh guard, then +1 per call.
	pub fn begin(&self) -> Generation {
		let next = self.latest.get().map_or(0, |latest| latest + 1);
		self.latest.set(Some(next));
		Generation(next)
	}

	/// Returns `true` iff `ticket` is the one most recently issued.
	pub fn is_current(&self, ticket: Generation) -> bool {
		self.latest.get() == Some(ticket.0)
	}

	/// The most recently issued ticket, if any.
	pub fn latest(&self) -> Option<Generation> {
		self.latest.get().map(Generation)
	}

	/// Runs `commit` only if `ticket` is still current.
	pub fn commit<R>(&self, ticket: Generation, commit: impl FnOnce() -> R) -> Option<R> {
		if self.is_current(ticket) {
			Some(commit())
		} else {
			tracing::trace!(
				generation = ticket.0,
				latest = ?self.latest.get(),
				"discarding stale result"
			);
			None
		}
	}

	/// Makes every outstanding ticket stale without starting new work.
	pub fn invalidate(&self) {
		self.begin();
	}
}
