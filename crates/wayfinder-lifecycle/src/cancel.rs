//! Cancellation collector for superseded async operations.
//!
//! A [`CancellationCollector`] tracks the single in-flight operation of one
//! input (a search box, a list filter). Starting a new operation cancels
//! the previous one by running every callback the previous operation
//! registered through its [`CancelRegistrar`].
//!
//! Cancellation is advisory: the superseded work may still complete
//! afterwards, so its result must also pass a
//! [`StaleGuard`](crate::StaleGuard) check before it is committed.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use wayfinder_lifecycle::CancellationCollector;
//!
//! let collector = CancellationCollector::new();
//! let aborted = Rc::new(Cell::new(false));
//!
//! let first = collector.request_start();
//! let flag = aborted.clone();
//! first.on_cancelled(move || flag.set(true));
//!
//! let _second = collector.request_start();
//! assert!(aborted.get());
//! assert!(first.is_cancelled());
//! ```

use crate::panic::catch_panic;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

type CancelFn = Box<dyn FnOnce()>;

struct Operation {
	id: u64,
	callbacks: RefCell<Vec<CancelFn>>,
	cancelled: Cell<bool>,
}

impl Operation {
	fn cancel(&self) {
		if self.cancelled.replace(true) {
			return;
		}

		let callbacks = std::mem::take(&mut *self.callbacks.borrow_mut());
		tracing::trace!(
			operation = self.id,
			callbacks = callbacks.len(),
			"cancelling superseded operation"
		);
		for callback in callbacks {
			if let Err(message) = catch_panic(callback) {
				tracing::warn!(operation = self.id, %message, "cancel callback panicked");
			}
		}
	}
}

/// Registration handle of one operation started by
/// [`CancellationCollector::request_start`].
#[derive(Clone)]
pub struct CancelRegistrar {
	operation: Rc<Operation>,
}

impl fmt::Debug for CancelRegistrar {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CancelRegistrar")
			.field("id", &self.operation.id)
			.field("cancelled", &self.operation.cancelled.get())
			.field("callbacks", &self.operation.callbacks.borrow().len())
			.finish()
	}
}

impl CancelRegistrar {
	/// Registers a callback run when this operation is superseded.
	///
	/// If the operation was already cancelled the callback runs immediately.
	/// Either way it runs at most once.
	pub fn on_cancelled<F>(&self, callback: F)
	where
		F: FnOnce() + 'static,
	{
		if self.operation.cancelled.get() {
			callback();
		} else {
			self.operation.callbacks.borrow_mut().push(Box::new(callback));
		}
	}

	/// Returns `true` once a newer operation superseded this one.
	pub fn is_cancelled(&self) -> bool {
		self.operation.cancelled.get()
	}
}

/// Holds the cancel callback of the current in-flight operation.
///
/// Exactly one cancel callback is held at any time; `None` in the slot
/// stands for the initial no-op.
#[derive(Default)]
pub struct CancellationCollector {
	current: RefCell<Option<Rc<Operation>>>,
	next_id: Cell<u64>,
}

impl fmt::Debug for CancellationCollector {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CancellationCollector")
			.field("pending", &self.has_pending())
			.finish()
	}
}

impl CancellationCollector {
	/// Creates a collector whose current cancel is a no-op.
	pub fn new() -> Self {
		Self::default()
	}

	/// Starts a new operation, cancelling the previous one.
	///
	/// The new operation is installed before the previous one's callbacks
	/// run, so a callback that inspects the collector sees the new state.
	/// All of the previous operation's callbacks have run by the time this
	/// returns, before anything can be registered on the new operation.
	pub fn request_start(&self) -> CancelRegistrar {
		let id = self.next_id.get();
		self.next_id.set(id + 1);

		let operation = Rc::new(Operation {
			id,
			callbacks: RefCell::new(Vec::new()),
			cancelled: Cell::new(false),
		});
		let previous = self.current.replace(Some(Rc::clone(&operation)));

		if let Some(previous) = previous {
			previous.cancel();
		}

		CancelRegistrar { operation }
	}

	/// Marks `registrar`'s operation as completed.
	///
	/// If it is still the current operation, the current cancel is reset to
	/// the no-op so a later start does not cancel finished work.
	pub fn finish(&self, registrar: &CancelRegistrar) {
		let mut current = self.current.borrow_mut();
		if current
			.as_ref()
			.is_some_and(|op| Rc::ptr_eq(op, &registrar.operation))
		{
			*current = None;
		}
	}

	/// Cancels the current operation without starting a new one.
	pub fn cancel_current(&self) {
		let current = self.current.borrow_mut().take();
		if let Some(operation) = current {
			operation.cancel();
		}
	}

	/// Returns `true` while an unfinished, uncancelled operation is current.
	pub fn has_pending(&self) -> bool {
		self.current.borrow().is_some()
	}
}
