//! The contract of external reactive data sources.
//!
//! Data clients consumed by views expose `subscribe(callback) ->
//! unsubscribe`. Views register the returned [`Unsubscribe`] in their
//! [`TeardownSet`](crate::TeardownSet) (see
//! [`TeardownSet::track`](crate::TeardownSet::track)) so the subscription is
//! released on navigation.

use std::fmt;

/// Releases one subscription.
pub struct Unsubscribe(Box<dyn FnOnce()>);

impl Unsubscribe {
	/// Wraps the release function handed out by a data source.
	pub fn new<F>(f: F) -> Self
	where
		F: FnOnce() + 'static,
	{
		Self(Box::new(f))
	}

	/// Releases the subscription.
	pub fn unsubscribe(self) {
		(self.0)()
	}
}

impl fmt::Debug for Unsubscribe {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("Unsubscribe(..)")
	}
}

/// A value source that pushes updates to subscribers.
pub trait Subscribable<T> {
	/// Registers `callback` for updates until the returned handle is used.
	fn subscribe(&self, callback: Box<dyn FnMut(&T)>) -> Unsubscribe;
}
