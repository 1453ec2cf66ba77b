//! Route dispatch and the mounted-view slot.

use crate::error::{RouteTableError, RouterError};
use crate::location::{Location, LocationChanges, path_from_hash};
use crate::navigator::Navigator;
use crate::notice::{Notice, log_notice};
use crate::pattern::RouteParams;
use crate::table::{RouteDefinition, RouteMatch, RouteTable};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use wayfinder_conf::NavigationSettings;
use wayfinder_lifecycle::{Teardown, catch_panic};

type NoticeFn = Box<dyn Fn(&Notice)>;

/// What a call to [`Router::route`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
	/// The matched route's view is mounted.
	Mounted {
		route: String,
		params: RouteParams,
	},
	/// The matched route's handler failed; no view is mounted.
	HandlerFailed { route: String },
	/// No route accepted the path; the previous view is untouched.
	Unmatched { path: String },
}

struct MountedView {
	route: String,
	teardown: Teardown,
}

/// Hash router owning the teardown of the currently mounted view.
///
/// The router is owned by the application's composition root. Every
/// location change goes through [`route`](Self::route), which disposes the
/// outgoing view completely before the incoming handler runs.
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use wayfinder_lifecycle::Teardown;
/// use wayfinder_router::{MemoryLocation, RouteDefinition, RouteOutcome, Router};
///
/// let left_home = Rc::new(Cell::new(false));
/// let flag = left_home.clone();
///
/// let (location, _changes) = MemoryLocation::new("#/");
/// let router = Router::builder()
///     .route(RouteDefinition::new("home", "/", move |_, _| {
///         let flag = flag.clone();
///         Teardown::from_fn(move || flag.set(true))
///     }))
///     .route(RouteDefinition::new("room", "/room/:slug", |_, _| {}))
///     .build(location.clone())
///     .unwrap();
///
/// router.route();
/// router.navigator().navigate("room", [("slug", "general")]).unwrap();
/// let outcome = router.route();
///
/// assert!(matches!(outcome, RouteOutcome::Mounted { ref route, .. } if route == "room"));
/// assert!(left_home.get());
/// ```
pub struct Router {
	table: Rc<RouteTable>,
	location: Rc<dyn Location>,
	navigator: Navigator,
	mounted: RefCell<Option<MountedView>>,
	on_notice: NoticeFn,
	default_path: String,
}

impl fmt::Debug for Router {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Router")
			.field("routes", &self.table.len())
			.field("current_route", &self.current_route())
			.field("default_path", &self.default_path)
			.finish_non_exhaustive()
	}
}

impl Router {
	/// Starts building a router.
	pub fn builder() -> RouterBuilder {
		RouterBuilder::new()
	}

	/// Mounts the view for the current location.
	///
	/// On a match, the mounted view's teardown is disposed first, then the
	/// matched handler runs. A handler that returns an error or panics
	/// leaves no view mounted and is reported as [`RouterError::Handler`].
	/// Without a match, [`RouterError::NoMatch`] is reported and the
	/// mounted view stays.
	pub fn route(&self) -> RouteOutcome {
		let path = self.current_path();

		let Some(RouteMatch { route, params }) = self.table.match_path(&path) else {
			self.notify(Notice::warning(RouterError::NoMatch(path.clone())));
			return RouteOutcome::Unmatched { path };
		};

		// Take the outgoing view before disposing so disposers may navigate
		let outgoing = self.mounted.borrow_mut().take();
		if let Some(view) = outgoing {
			self.dispose_view(view);
		}

		let name = route.name().to_string();
		tracing::debug!(route = %name, %path, "mounting view");

		let handler = route.handler();
		let navigator = self.navigator.clone();
		let outcome = catch_panic(|| handler.handle(&navigator, &params)).and_then(|result| result);

		match outcome {
			Ok(teardown) => {
				let mut mounted = self.mounted.borrow_mut();
				debug_assert!(mounted.is_none(), "view slot refilled while the handler ran");
				*mounted = Some(MountedView {
					route: name.clone(),
					teardown,
				});
				RouteOutcome::Mounted {
					route: name,
					params,
				}
			}
			Err(message) => {
				self.notify(Notice::error(RouterError::Handler {
					route: name.clone(),
					message,
				}));
				RouteOutcome::HandlerFailed { route: name }
			}
		}
	}

	/// Navigates by route name; see [`Navigator::navigate`].
	pub fn navigate<I, K, V>(&self, name: &str, params: I) -> crate::Result<String>
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: fmt::Display,
	{
		self.navigator.navigate(name, params)
	}

	/// Handle for navigating by route name.
	pub fn navigator(&self) -> &Navigator {
		&self.navigator
	}

	/// The compiled route table.
	pub fn table(&self) -> &RouteTable {
		&self.table
	}

	/// Name of the mounted route, if a view is mounted.
	pub fn current_route(&self) -> Option<String> {
		self.mounted.borrow().as_ref().map(|view| view.route.clone())
	}

	/// Path read from the location, with an empty hash mapped to the
	/// default path.
	pub fn current_path(&self) -> String {
		path_from_hash(&self.location.hash(), &self.default_path)
	}

	/// Disposes the mounted view, if any. Returns `true` if one was mounted.
	pub fn unmount(&self) -> bool {
		let outgoing = self.mounted.borrow_mut().take();
		match outgoing {
			Some(view) => {
				self.dispose_view(view);
				true
			}
			None => false,
		}
	}

	/// Routes once for every location change until the location is gone.
	pub async fn listen(&self, mut changes: LocationChanges) {
		while changes.next().await.is_some() {
			self.route();
		}
		tracing::debug!("location closed; router stopped listening");
	}

	/// Mounts the current location, then [`listen`](Self::listen)s.
	pub async fn run(&self, changes: LocationChanges) {
		self.route();
		self.listen(changes).await;
	}

	fn dispose_view(&self, view: MountedView) {
		tracing::debug!(route = %view.route, "unmounting view");
		let report = view.teardown.dispose();
		for failure in report.into_failures() {
			self.notify(Notice::error(RouterError::Teardown {
				route: view.route.clone(),
				source: failure,
			}));
		}
	}

	fn notify(&self, notice: Notice) {
		(self.on_notice)(&notice);
	}
}

/// Builder for [`Router`].
pub struct RouterBuilder {
	definitions: Vec<RouteDefinition>,
	on_notice: Option<NoticeFn>,
	default_path: String,
	log_notices: bool,
}

impl fmt::Debug for RouterBuilder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RouterBuilder")
			.field("definitions", &self.definitions)
			.field("default_path", &self.default_path)
			.field("log_notices", &self.log_notices)
			.finish_non_exhaustive()
	}
}

impl Default for RouterBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl RouterBuilder {
	pub fn new() -> Self {
		let settings = NavigationSettings::default();
		Self {
			definitions: Vec::new(),
			on_notice: None,
			default_path: settings.default_path,
			log_notices: settings.logging.notices,
		}
	}

	/// Registers a route. Earlier routes win over later ones.
	pub fn route(mut self, definition: RouteDefinition) -> Self {
		self.definitions.push(definition);
		self
	}

	/// Registers several routes in order.
	pub fn routes<I>(mut self, definitions: I) -> Self
	where
		I: IntoIterator<Item = RouteDefinition>,
	{
		self.definitions.extend(definitions);
		self
	}

	/// Sets the notification channel for unmatched paths and failures.
	///
	/// Replaces the default sink, which logs through `tracing`.
	pub fn on_unmatched<F>(mut self, sink: F) -> Self
	where
		F: Fn(&Notice) + 'static,
	{
		self.on_notice = Some(Box::new(sink));
		self
	}

	/// Path routed when the location is empty.
	pub fn default_path(mut self, path: impl Into<String>) -> Self {
		self.default_path = path.into();
		self
	}

	/// Applies the default path and notice logging from settings.
	///
	/// The default path is checked by [`build`](Self::build).
	pub fn with_settings(mut self, settings: &NavigationSettings) -> Self {
		self.default_path = settings.default_path.clone();
		self.log_notices = settings.logging.notices;
		self
	}

	/// Compiles the routes and binds the router to `location`.
	///
	/// # Errors
	///
	/// Fails on a duplicate route name, an invalid pattern, or a default
	/// path without a leading `/`.
	pub fn build(self, location: Rc<dyn Location>) -> Result<Router, RouteTableError> {
		if !self.default_path.starts_with('/') {
			return Err(RouteTableError::InvalidDefaultPath(self.default_path));
		}

		let table = Rc::new(RouteTable::new(self.definitions)?);
		let navigator = Navigator::new(Rc::clone(&table), Rc::clone(&location));

		let on_notice: NoticeFn = match self.on_notice {
			Some(sink) => sink,
			None if self.log_notices => Box::new(log_notice),
			None => Box::new(|_: &Notice| {}),
		};

		tracing::debug!(
			routes = table.len(),
			default_path = %self.default_path,
			"router built"
		);

		Ok(Router {
			table,
			location,
			navigator,
			mounted: RefCell::new(None),
			on_notice,
			default_path: self.default_path,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::location::MemoryLocation;
	use rstest::rstest;
	use std::cell::Cell;
	use wayfinder_lifecycle::TeardownSet;

	type Notices = Rc<RefCell<Vec<Notice>>>;

	fn build(routes: Vec<RouteDefinition>, hash: &str) -> (Router, Rc<MemoryLocation>, Notices) {
		let notices: Notices = Rc::new(RefCell::new(Vec::new()));
		let sink = notices.clone();
		let (location, _changes) = MemoryLocation::new(hash);
		let router = Router::builder()
			.routes(routes)
			.on_unmatched(move |notice| sink.borrow_mut().push(notice.clone()))
			.build(location.clone())
			.unwrap();
		(router, location, notices)
	}

	#[rstest]
	fn test_empty_hash_routes_default_path() {
		let (router, _location, _notices) = build(
			vec![RouteDefinition::new("home", "/", |_: &Navigator, _: &RouteParams| {})],
			"",
		);
		assert_eq!(router.current_path(), "/");
		assert!(matches!(router.route(), RouteOutcome::Mounted { .. }));
		assert_eq!(router.current_route().as_deref(), Some("home"));
	}

	#[rstest]
	fn test_default_path_from_settings() {
		let mut settings = NavigationSettings::default();
		settings.default_path = "/lobby".to_string();
		let (location, _changes) = MemoryLocation::new("");
		let router = Router::builder()
			.route(RouteDefinition::new(
				"lobby",
				"/lobby",
				|_: &Navigator, _: &RouteParams| {},
			))
			.with_settings(&settings)
			.build(location)
			.unwrap();

		assert_eq!(router.current_path(), "/lobby");
		assert_eq!(router.current_route(), None);
		router.route();
		assert_eq!(router.current_route().as_deref(), Some("lobby"));
	}

	#[rstest]
	fn test_teardown_failures_are_reported_and_navigation_proceeds() {
		let (router, location, notices) = build(
			vec![
				RouteDefinition::new("list", "/", |_: &Navigator, _: &RouteParams| {
					let set = TeardownSet::new();
					set.add(Teardown::try_from_fn(|| Err::<(), _>("socket closed")));
					set
				}),
				RouteDefinition::new("room", "/room/:slug", |_: &Navigator, _: &RouteParams| {}),
			],
			"#/",
		);

		router.route();
		location.set_hash("/room/general");
		let outcome = router.route();

		assert!(matches!(outcome, RouteOutcome::Mounted { .. }));
		let notices = notices.borrow();
		assert_eq!(notices.len(), 1);
		assert_eq!(notices[0].kind, crate::NoticeKind::Error);
		assert!(matches!(
			&notices[0].error,
			RouterError::Teardown { route, source } if route == "list" && source.index == 0
		));
	}

	#[rstest]
	fn test_unmount_disposes_current_view() {
		let released = Rc::new(Cell::new(0));
		let counter = released.clone();
		let (router, _location, _notices) = build(
			vec![RouteDefinition::new(
				"home",
				"/",
				move |_: &Navigator, _: &RouteParams| {
					let counter = counter.clone();
					Teardown::from_fn(move || counter.set(counter.get() + 1))
				},
			)],
			"#/",
		);

		router.route();
		assert!(router.unmount());
		assert!(!router.unmount());
		assert_eq!(released.get(), 1);
		assert_eq!(router.current_route(), None);
	}

	#[rstest]
	fn test_handler_may_navigate_during_setup() {
		let (router, location, _notices) = build(
			vec![
				RouteDefinition::new("legacy", "/old", |nav: &Navigator, _: &RouteParams| {
					nav.navigate_to("home")
						.map(|_| ())
				}),
				RouteDefinition::new("home", "/", |_: &Navigator, _: &RouteParams| {}),
			],
			"#/old",
		);

		assert!(matches!(router.route(), RouteOutcome::Mounted { .. }));
		assert_eq!(location.hash(), "#/");
		router.route();
		assert_eq!(router.current_route().as_deref(), Some("home"));
	}

	#[rstest]
	fn test_build_rejects_duplicate_names() {
		let (location, _changes) = MemoryLocation::new("#/");
		let result = Router::builder()
			.route(RouteDefinition::new("home", "/", |_: &Navigator, _: &RouteParams| {}))
			.route(RouteDefinition::new("home", "/home", |_: &Navigator, _: &RouteParams| {}))
			.build(location);
		assert!(matches!(result, Err(RouteTableError::DuplicateName(name)) if name == "home"));
	}

	#[rstest]
	#[case::from_settings(true)]
	#[case::from_builder(false)]
	fn test_build_rejects_relative_default_path(#[case] via_settings: bool) {
		let (location, _changes) = MemoryLocation::new("");
		let builder = Router::builder()
			.route(RouteDefinition::new("home", "/home", |_: &Navigator, _: &RouteParams| {}));
		let builder = if via_settings {
			let mut settings = NavigationSettings::default();
			settings.default_path = "home".to_string();
			builder.with_settings(&settings)
		} else {
			builder.default_path("home")
		};

		let result = builder.build(location);
		assert!(matches!(result, Err(RouteTableError::InvalidDefaultPath(path)) if path == "home"));
	}
}
