//! Trailing-edge debounce on the tokio local executor.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Delays a callback until input has been quiet for a fixed period.
///
/// Every [`call`](Self::call) restarts the timer; only the value of the
/// last call reaches the callback. There is no leading-edge call and no
/// maximum wait.
///
/// # Panics
///
/// [`call`](Self::call) spawns with [`tokio::task::spawn_local`] and panics
/// outside a [`tokio::task::LocalSet`].
pub struct Debouncer<T> {
	delay: Duration,
	callback: Rc<dyn Fn(T)>,
	pending: RefCell<Option<JoinHandle<()>>>,
}

impl<T> fmt::Debug for Debouncer<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Debouncer")
			.field("delay", &self.delay)
			.field("pending", &self.is_pending())
			.finish()
	}
}

impl<T: 'static> Debouncer<T> {
	/// Creates a debouncer invoking `callback` `delay` after the last call.
	pub fn new<F>(delay: Duration, callback: F) -> Self
	where
		F: Fn(T) + 'static,
	{
		Self {
			delay,
			callback: Rc::new(callback),
			pending: RefCell::new(None),
		}
	}

	/// Schedules `value`, replacing any value still waiting.
	pub fn call(&self, value: T) {
		self.cancel();

		let callback = Rc::clone(&self.callback);
		let delay = self.delay;
		let handle = tokio::task::spawn_local(async move {
			tokio::time::sleep(delay).await;
			callback(value);
		});
		*self.pending.borrow_mut() = Some(handle);
	}

	/// Drops the waiting value, if any.
	pub fn cancel(&self) {
		if let Some(handle) = self.pending.borrow_mut().take() {
			handle.abort();
		}
	}
}

impl<T> Debouncer<T> {
	/// The configured quiet period.
	pub fn delay(&self) -> Duration {
		self.delay
	}

	/// Returns `true` while a value is waiting for the timer.
	pub fn is_pending(&self) -> bool {
		self.pending
			.borrow()
			.as_ref()
			.is_some_and(|handle| !handle.is_finished())
	}
}

impl<T> Drop for Debouncer<T> {
	fn drop(&mut self) {
		if let Some(handle) = self.pending.get_mut().take() {
			handle.abort();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tokio::task::LocalSet;

	const DELAY: Duration = Duration::from_millis(200);

	fn recorder() -> (Rc<RefCell<Vec<u32>>>, impl Fn(u32) + 'static) {
		let calls = Rc::new(RefCell::new(Vec::new()));
		let sink = calls.clone();
		(calls, move |value: u32| sink.borrow_mut().push(value))
	}

	#[tokio::test(start_paused = true)]
	async fn test_fires_once_after_quiet_period() {
		LocalSet::new()
			.run_until(async {
				let (calls, sink) = recorder();
				let debouncer = Debouncer::new(DELAY, sink);

				debouncer.call(1);
				tokio::time::sleep(Duration::from_millis(199)).await;
				assert!(calls.borrow().is_empty());
				assert!(debouncer.is_pending());

				tokio::time::sleep(Duration::from_millis(2)).await;
				assert_eq!(*calls.borrow(), vec![1]);
				assert!(!debouncer.is_pending());
			})
			.await;
	}

	#[tokio::test(start_paused = true)]
	async fn test_each_call_resets_timer() {
		LocalSet::new()
			.run_until(async {
				let (calls, sink) = recorder();
				let debouncer = Debouncer::new(DELAY, sink);

				// Keystrokes every 150ms never let the timer expire
				for value in 1..=5 {
					debouncer.call(value);
					tokio::time::sleep(Duration::from_millis(150)).await;
				}
				assert!(calls.borrow().is_empty());

				tokio::time::sleep(Duration::from_millis(60)).await;
				assert_eq!(*calls.borrow(), vec![5]);
			})
			.await;
	}

	#[tokio::test(start_paused = true)]
	async fn test_cancel_drops_pending_value() {
		LocalSet::new()
			.run_until(async {
				let (calls, sink) = recorder();
				let debouncer = Debouncer::new(DELAY, sink);

				debouncer.call(9);
				debouncer.cancel();
				tokio::time::sleep(DELAY * 2).await;
				assert!(calls.borrow().is_empty());
			})
			.await;
	}

	#[tokio::test(start_paused = true)]
	async fn test_drop_aborts_pending_value() {
		LocalSet::new()
			.run_until(async {
				let (calls, sink) = recorder();
				{
					let debouncer = Debouncer::new(DELAY, sink);
					debouncer.call(3);
				}
				tokio::time::sleep(DELAY * 2).await;
				assert!(calls.borrow().is_empty());
			})
			.await;
	}
}
