//! Location indicator abstraction.
//!
//! The router reads the current path from a [`Location`] and writes it back
//! when navigating. Writing never re-enters the router: a host signals the
//! change through a [`LocationChanges`] stream that
//! [`Router::listen`](crate::Router::listen) drains.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tokio::sync::mpsc;

/// Hash-style location indicator.
pub trait Location {
	/// Current indicator, including the leading `#` if any.
	fn hash(&self) -> String;

	/// Points the indicator at `path`.
	fn set_hash(&self, path: &str);
}

/// Extracts the route path from a hash indicator.
///
/// Strips one leading `#`; an empty remainder becomes `default_path`.
pub fn path_from_hash(hash: &str, default_path: &str) -> String {
	let path = hash.strip_prefix('#').unwrap_or(hash);
	if path.is_empty() {
		default_path.to_string()
	} else {
		path.to_string()
	}
}

/// Receiving half of a location's change signal.
#[derive(Debug)]
pub struct LocationChanges {
	receiver: mpsc::UnboundedReceiver<()>,
}

impl LocationChanges {
	/// Creates a linked sender/stream pair for custom [`Location`]s.
	pub fn channel() -> (LocationNotifier, Self) {
		let (sender, receiver) = mpsc::unbounded_channel();
		(LocationNotifier { sender }, Self { receiver })
	}

	/// Waits for the next change. Returns `None` once the location is gone.
	pub async fn next(&mut self) -> Option<()> {
		self.receiver.recv().await
	}

	/// Returns a pending change without waiting.
	pub fn try_next(&mut self) -> Option<()> {
		self.receiver.try_recv().ok()
	}
}

/// Sending half of a location's change signal.
#[derive(Debug, Clone)]
pub struct LocationNotifier {
	sender: mpsc::UnboundedSender<()>,
}

impl LocationNotifier {
	/// Signals that the location changed.
	pub fn notify(&self) {
		if self.sender.send(()).is_err() {
			tracing::trace!("location change dropped; no listener");
		}
	}
}

/// In-memory [`Location`] for hosts without a browser and for tests.
///
/// Setting the hash to its current value emits no change, matching the
/// `hashchange` behaviour of browsers.
#[derive(Debug)]
pub struct MemoryLocation {
	hash: RefCell<String>,
	notifier: LocationNotifier,
}

impl MemoryLocation {
	/// Creates a location starting at `initial` (with or without `#`).
	pub fn new(initial: &str) -> (Rc<Self>, LocationChanges) {
		let (notifier, changes) = LocationChanges::channel();
		let hash = if initial.is_empty() || initial.starts_with('#') {
			initial.to_string()
		} else {
			format!("#{initial}")
		};

		let location = Rc::new(Self {
			hash: RefCell::new(hash),
			notifier,
		});
		(location, changes)
	}

	/// Simulates the user editing the address bar.
	///
	/// Unlike [`set_hash`](Location::set_hash), `hash` is stored as given.
	pub fn replace_hash(&self, hash: &str) {
		let changed = {
			let mut current = self.hash.borrow_mut();
			if *current == hash {
				false
			} else {
				*current = hash.to_string();
				true
			}
		};
		if changed {
			self.notifier.notify();
		}
	}
}

impl Location for MemoryLocation {
	fn hash(&self) -> String {
		self.hash.borrow().clone()
	}

	fn set_hash(&self, path: &str) {
		self.replace_hash(&format!("#{path}"));
	}
}

impl fmt::Display for MemoryLocation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.hash.borrow())
	}
}
