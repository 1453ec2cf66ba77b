//! View teardown.
//!
//! A handler that mounts a view hands back whatever must be released when
//! the view is unmounted. The shapes a handler may return (a single
//! callback, a collection, a nested set) are resolved into the [`Teardown`]
//! variant once, when the handler returns, and never inspected again.
//!
//! ## Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use wayfinder_lifecycle::{Teardown, TeardownSet};
//!
//! let released = Rc::new(Cell::new(0));
//! let set = TeardownSet::new();
//!
//! for _ in 0..3 {
//!     let released = released.clone();
//!     set.add(Teardown::from_fn(move || released.set(released.get() + 1)));
//! }
//!
//! let report = set.dispose();
//! assert!(report.is_clean());
//! assert_eq!(released.get(), 3);
//!
//! // Disposal is idempotent
//! assert_eq!(set.dispose().invoked(), 0);
//! assert_eq!(released.get(), 3);
//! ```

use crate::error::DisposeReport;
use crate::panic::catch_panic;
use crate::subscription::{Subscribable, Unsubscribe};
use std::cell::RefCell;
use std::fmt::{self, Display};
use std::rc::Rc;
use tokio::task::AbortHandle;

type DisposeFn = Box<dyn FnOnce() -> Result<(), String>>;

/// Disposer of an unmounted view.
pub enum Teardown {
	/// Nothing to release.
	Noop,
	/// A single disposal callback.
	Callback(DisposeFn),
	/// Disposers run in order.
	Collection(Vec<Teardown>),
	/// A shared set, disposed at most once across all its owners.
	Set(TeardownSet),
}

impl fmt::Debug for Teardown {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Noop => f.write_str("Noop"),
			Self::Callback(_) => f.write_str("Callback(..)"),
			Self::Collection(items) => f.debug_tuple("Collection").field(items).finish(),
			Self::Set(set) => f.debug_tuple("Set").field(set).finish(),
		}
	}
}

impl Default for Teardown {
	fn default() -> Self {
		Self::Noop
	}
}

impl Teardown {
	/// Wraps an infallible disposal callback.
	pub fn from_fn<F>(f: F) -> Self
	where
		F: FnOnce() + 'static,
	{
		Self::Callback(Box::new(move || {
			f();
			Ok::<(), String>(())
		}))
	}

	/// Wraps a disposal callback that may fail.
	///
	/// The error is rendered with `Display` and collected into the
	/// [`DisposeReport`]; it never stops the remaining disposers.
	pub fn try_from_fn<F, E>(f: F) -> Self
	where
		F: FnOnce() -> Result<(), E> + 'static,
		E: Display,
	{
		Self::Callback(Box::new(move || f().map_err(|e| e.to_string())))
	}

	/// Builds a collection from anything convertible into teardowns.
	pub fn collection<I, T>(items: I) -> Self
	where
		I: IntoIterator<Item = T>,
		T: Into<Teardown>,
	{
		Self::Collection(items.into_iter().map(Into::into).collect())
	}

	/// Returns `true` if disposing this teardown would do nothing.
	pub fn is_noop(&self) -> bool {
		match self {
			Self::Noop => true,
			Self::Collection(items) => items.iter().all(Teardown::is_noop),
			_ => false,
		}
	}

	/// Runs every contained disposer exactly once.
	pub fn dispose(self) -> DisposeReport {
		let mut report = DisposeReport::default();
		self.dispose_into(&mut report);
		report
	}

	fn dispose_into(self, report: &mut DisposeReport) {
		match self {
			Self::Noop => {}
			Self::Callback(f) => report.record(catch_panic(f).and_then(|outcome| outcome)),
			Self::Collection(items) => {
				for item in items {
					item.dispose_into(report);
				}
			}
			Self::Set(set) => report.merge(set.dispose()),
		}
	}
}

impl From<()> for Teardown {
	fn from(_: ()) -> Self {
		Self::Noop
	}
}

impl From<TeardownSet> for Teardown {
	fn from(set: TeardownSet) -> Self {
		Self::Set(set)
	}
}

impl From<Vec<Teardown>> for Teardown {
	fn from(items: Vec<Teardown>) -> Self {
		Self::Collection(items)
	}
}

impl From<Unsubscribe> for Teardown {
	fn from(unsubscribe: Unsubscribe) -> Self {
		Self::from_fn(move || unsubscribe.unsubscribe())
	}
}

impl From<AbortHandle> for Teardown {
	fn from(handle: AbortHandle) -> Self {
		Self::from_fn(move || handle.abort())
	}
}

impl<T: Into<Teardown>> From<Option<T>> for Teardown {
	fn from(value: Option<T>) -> Self {
		value.map(Into::into).unwrap_or_default()
	}
}

/// Ordered, shareable collection of teardowns owned by one view.
///
/// Clones share the same entries. [`dispose`](Self::dispose) runs every
/// entry once in registration order; later calls do nothing. Entries added
/// after disposal are disposed immediately, so late registrations from
/// async setup code are never leaked.
#[derive(Clone, Default)]
pub struct TeardownSet {
	inner: Rc<RefCell<TeardownSetInner>>,
}

#[derive(Default)]
struct TeardownSetInner {
	entries: Vec<Teardown>,
	disposed: bool,
}

impl fmt::Debug for TeardownSet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let inner = self.inner.borrow();
		f.debug_struct("TeardownSet")
			.field("entries", &inner.entries.len())
			.field("disposed", &inner.disposed)
			.finish()
	}
}

impl TeardownSet {
	/// Creates an empty set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a set holding a single teardown of any supported shape.
	pub fn from_teardown(teardown: impl Into<Teardown>) -> Self {
		let set = Self::new();
		set.add(teardown);
		set
	}

	/// Registers another teardown.
	///
	/// If the set was already disposed, the teardown is disposed right away.
	pub fn add(&self, teardown: impl Into<Teardown>) {
		let teardown = teardown.into();
		let rejected = {
			let mut inner = self.inner.borrow_mut();
			if inner.disposed {
				Some(teardown)
			} else {
				inner.entries.push(teardown);
				None
			}
		};

		if let Some(teardown) = rejected {
			tracing::trace!("teardown registered after disposal; releasing immediately");
			teardown.dispose();
		}
	}

	/// Subscribes to an external source and releases the subscription on
	/// disposal.
	pub fn track<T, S, F>(&self, source: &S, callback: F)
	where
		S: Subscribable<T> + ?Sized,
		F: FnMut(&T) + 'static,
		T: 'static,
	{
		self.add(source.subscribe(Box::new(callback)));
	}

	/// Aborts a spawned task on disposal.
	pub fn abort_on_dispose(&self, handle: AbortHandle) {
		self.add(handle);
	}

	/// Number of pending entries.
	pub fn len(&self) -> usize {
		self.inner.borrow().entries.len()
	}

	/// Returns `true` if no entries are pending.
	pub fn is_empty(&self) -> bool {
		self.inner.borrow().entries.is_empty()
	}

	/// Returns `true` once [`dispose`](Self::dispose) has run.
	pub fn is_disposed(&self) -> bool {
		self.inner.borrow().disposed
	}

	/// Disposes every entry exactly once.
	pub fn dispose(&self) -> DisposeReport {
		let entries = {
			let mut inner = self.inner.borrow_mut();
			if inner.disposed {
				return DisposeReport::default();
			}
			inner.disposed = true;
			std::mem::take(&mut inner.entries)
		};

		Teardown::Collection(entries).dispose()
	}
}
