//! Panic isolation for user callbacks.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Runs `f`, converting a panic into an `Err` carrying the panic message.
///
/// Handlers and disposers are user code; a panic in one of them must not
/// unwind through the router or skip the remaining disposers.
pub fn catch_panic<R>(f: impl FnOnce() -> R) -> Result<R, String> {
	catch_unwind(AssertUnwindSafe(f)).map_err(panic_message)
}

pub(crate) fn panic_message(payload: Box<dyn Any + Send>) -> String {
	if let Some(message) = payload.downcast_ref::<&str>() {
		(*message).to_string()
	} else if let Some(message) = payload.downcast_ref::<String>() {
		message.clone()
	} else {
		"panic".to_string()
	}
}
