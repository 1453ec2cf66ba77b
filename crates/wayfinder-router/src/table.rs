//! Route registration and matching.

use crate::error::RouteTableError;
use crate::handler::{HandlerOutput, RouteHandler};
use crate::navigator::Navigator;
use crate::pattern::{RoutePattern, RouteParams};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// A route as registered by the application, before compilation.
pub struct RouteDefinition {
	name: String,
	pattern: String,
	handler: Rc<dyn RouteHandler>,
}

impl RouteDefinition {
	/// Creates a route definition.
	///
	/// # Examples
	///
	/// ```
	/// use wayfinder_router::RouteDefinition;
	///
	/// let room = RouteDefinition::new("room", "/room/:slug", |_nav, params| {
	///     assert!(params.get("slug").is_some());
	/// });
	/// assert_eq!(room.name(), "room");
	/// ```
	pub fn new<F, O>(name: impl Into<String>, pattern: impl Into<String>, handler: F) -> Self
	where
		F: Fn(&Navigator, &RouteParams) -> O + 'static,
		O: HandlerOutput,
	{
		Self {
			name: name.into(),
			pattern: pattern.into(),
			handler: Rc::new(handler),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn pattern(&self) -> &str {
		&self.pattern
	}
}

impl fmt::Debug for RouteDefinition {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RouteDefinition")
			.field("name", &self.name)
			.field("pattern", &self.pattern)
			.finish_non_exhaustive()
	}
}

/// A registered route with its compiled matcher.
pub struct CompiledRoute {
	name: String,
	pattern: RoutePattern,
	handler: Rc<dyn RouteHandler>,
}

impl CompiledRoute {
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn pattern(&self) -> &RoutePattern {
		&self.pattern
	}

	pub(crate) fn handler(&self) -> Rc<dyn RouteHandler> {
		Rc::clone(&self.handler)
	}
}

impl fmt::Debug for CompiledRoute {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CompiledRoute")
			.field("name", &self.name)
			.field("pattern", &self.pattern.pattern())
			.finish_non_exhaustive()
	}
}

/// Result of a successful match.
#[derive(Debug, Clone)]
pub struct RouteMatch {
	/// The first route accepting the path.
	pub route: Rc<CompiledRoute>,
	/// Parameters captured from the path.
	pub params: RouteParams,
}

/// Immutable, ordered list of compiled routes.
///
/// Built once at startup; registration order decides which route wins when
/// several patterns accept the same path.
#[derive(Debug, Default)]
pub struct RouteTable {
	routes: Vec<Rc<CompiledRoute>>,
	named_routes: HashMap<String, usize>,
}

impl RouteTable {
	/// Compiles every definition, keeping registration order.
	///
	/// # Errors
	///
	/// Fails on the first duplicate route name or invalid pattern.
	pub fn new<I>(definitions: I) -> Result<Self, RouteTableError>
	where
		I: IntoIterator<Item = RouteDefinition>,
	{
		let mut table = Self::default();

		for definition in definitions {
			if table.named_routes.contains_key(&definition.name) {
				return Err(RouteTableError::DuplicateName(definition.name));
			}

			let pattern = RoutePattern::compile(&definition.pattern).map_err(|source| {
				RouteTableError::InvalidPattern {
					route: definition.name.clone(),
					source,
				}
			})?;

			tracing::trace!(route = %definition.name, pattern = %pattern, "registered route");
			table
				.named_routes
				.insert(definition.name.clone(), table.routes.len());
			table.routes.push(Rc::new(CompiledRoute {
				name: definition.name,
				pattern,
				handler: definition.handler,
			}));
		}

		Ok(table)
	}

	/// Returns the first route, in registration order, accepting `path`.
	pub fn match_path(&self, path: &str) -> Option<RouteMatch> {
		self.routes.iter().find_map(|route| {
			route.pattern.matches(path).map(|params| RouteMatch {
				route: Rc::clone(route),
				params,
			})
		})
	}

	/// Looks up a route by name.
	pub fn lookup(&self, name: &str) -> Option<&Rc<CompiledRoute>> {
		self.named_routes.get(name).map(|&index| &self.routes[index])
	}

	/// Route names in registration order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.routes.iter().map(|route| route.name.as_str())
	}

	pub fn len(&self) -> usize {
		self.routes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}
}
