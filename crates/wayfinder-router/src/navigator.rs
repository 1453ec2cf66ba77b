//! Programmatic navigation handle.

use crate::error::{Result, RouterError};
use crate::location::Location;
use crate::table::RouteTable;
use std::fmt::{self, Display};
use std::rc::Rc;

/// Cheap clone handle that navigates by route name.
///
/// Handlers receive one so views can link to other routes. Navigating only
/// updates the location; the router mounts the new view when it processes
/// the resulting change signal, never from inside `navigate`.
#[derive(Clone)]
pub struct Navigator {
	table: Rc<RouteTable>,
	location: Rc<dyn Location>,
}

impl fmt::Debug for Navigator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Navigator")
			.field("routes", &self.table.len())
			.field("location", &self.location.hash())
			.finish()
	}
}

impl Navigator {
	pub(crate) fn new(table: Rc<RouteTable>, location: Rc<dyn Location>) -> Self {
		Self { table, location }
	}

	/// Builds the path of route `name` without navigating.
	///
	/// Each `(key, value)` replaces the first `:key` in the route pattern.
	/// Unused entries are ignored and unfilled placeholders stay as written.
	///
	/// # Errors
	///
	/// [`RouterError::RouteNotFound`] if no route carries `name`.
	pub fn path_for<I, K, V>(&self, name: &str, params: I) -> Result<String>
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: Display,
	{
		let route = self
			.table
			.lookup(name)
			.ok_or_else(|| RouterError::RouteNotFound(name.to_string()))?;
		Ok(route.pattern().substitute(params))
	}

	/// Points the location at route `name`, returning the new path.
	///
	/// # Examples
	///
	/// ```
	/// use wayfinder_router::{Location, MemoryLocation, RouteDefinition, Router};
	///
	/// let (location, _changes) = MemoryLocation::new("#/");
	/// let router = Router::builder()
	///     .route(RouteDefinition::new("room", "/room/:slug", |_, _| {}))
	///     .build(location.clone())
	///     .unwrap();
	///
	/// router.navigator().navigate("room", [("slug", "general")]).unwrap();
	/// assert_eq!(location.hash(), "#/room/general");
	/// ```
	///
	/// # Errors
	///
	/// [`RouterError::RouteNotFound`] if no route carries `name`; the
	/// location is left unchanged.
	pub fn navigate<I, K, V>(&self, name: &str, params: I) -> Result<String>
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: Display,
	{
		let path = self.path_for(name, params)?;
		tracing::debug!(route = name, %path, "navigating");
		self.location.set_hash(&path);
		Ok(path)
	}

	/// Navigates to a route without parameters.
	pub fn navigate_to(&self, name: &str) -> Result<String> {
		self.navigate(name, std::iter::empty::<(&str, &str)>())
	}

	/// Returns `true` if a route is registered under `name`.
	pub fn has_route(&self, name: &str) -> bool {
		self.table.lookup(name).is_some()
	}
}
