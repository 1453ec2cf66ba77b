//! Route handler trait and handler return values.

use crate::navigator::Navigator;
use crate::pattern::RouteParams;
use std::fmt::Display;
use wayfinder_lifecycle::{Teardown, TeardownSet};

/// Value a route handler may return after mounting its view.
///
/// Resolved once into a [`Teardown`] when the handler returns. An `Err`
/// marks the handler as failed; its message is reported through the
/// router's notice sink and no teardown is registered.
pub trait HandlerOutput {
	/// Converts the return value into the view's teardown.
	fn into_teardown(self) -> Result<Teardown, String>;
}

impl HandlerOutput for () {
	fn into_teardown(self) -> Result<Teardown, String> {
		Ok(Teardown::Noop)
	}
}

impl HandlerOutput for Teardown {
	fn into_teardown(self) -> Result<Teardown, String> {
		Ok(self)
	}
}

impl HandlerOutput for TeardownSet {
	fn into_teardown(self) -> Result<Teardown, String> {
		Ok(Teardown::Set(self))
	}
}

impl HandlerOutput for Vec<Teardown> {
	fn into_teardown(self) -> Result<Teardown, String> {
		Ok(Teardown::Collection(self))
	}
}

impl<T, E> HandlerOutput for Result<T, E>
where
	T: HandlerOutput,
	E: Display,
{
	fn into_teardown(self) -> Result<Teardown, String> {
		self.map_err(|e| e.to_string())?.into_teardown()
	}
}

/// Trait for mounting the view of a matched route.
///
/// Implemented for every `Fn(&Navigator, &RouteParams) -> O` closure whose
/// output is a [`HandlerOutput`].
pub trait RouteHandler {
	/// Mounts the view, returning its teardown or the failure message.
	fn handle(&self, navigator: &Navigator, params: &RouteParams) -> Result<Teardown, String>;
}

impl<F, O> RouteHandler for F
where
	F: Fn(&Navigator, &RouteParams) -> O,
	O: HandlerOutput,
{
	fn handle(&self, navigator: &Navigator, params: &RouteParams) -> Result<Teardown, String> {
		self(navigator, params).into_teardown()
	}
}
