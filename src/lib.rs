//! # Wayfinder
//!
//! Hash-driven client-side routing with composable view teardown and
//! race-safe async lifecycle helpers for single-threaded UI event loops.
//!
//! A [`Router`] maps the location indicator to named routes; every
//! transition disposes the outgoing view's [`Teardown`] before the next
//! handler runs. Views keep their asynchronous work in order with a
//! [`StaleGuard`] and a [`CancellationCollector`], or with the
//! [`SuggestionController`] that composes both behind a debounce.
//!
//! ## Feature Flags
//!
//! - `minimal` - Router and lifecycle primitives
//! - `full` (default) - Everything, including settings loading
//! - `router` - The hash router
//! - `conf` - TOML and environment settings
//!
//! ## Quick Example
//!
//! ```rust
//! use wayfinder::prelude::*;
//!
//! let (location, _changes) = MemoryLocation::new("#/");
//! let router = Router::builder()
//!     .route(RouteDefinition::new("home", "/", |_, _| {
//!         let view = TeardownSet::new();
//!         view.add(Teardown::from_fn(|| println!("leaving home")));
//!         view
//!     }))
//!     .route(RouteDefinition::new("room", "/room/:slug", |_, _| {}))
//!     .build(location)
//!     .unwrap();
//!
//! router.route();
//! router.navigate("room", [("slug", "general")]).unwrap();
//! router.route();
//! assert_eq!(router.current_route().as_deref(), Some("room"));
//! ```
//!
//! Hosts drive routing from location changes with
//! [`Router::run`](crate::router::Router::run) inside a
//! `tokio::task::LocalSet`.

#[cfg(feature = "conf")]
pub mod conf;
pub mod lifecycle;
#[cfg(feature = "router")]
pub mod router;

pub use wayfinder_lifecycle::{
	CancelRegistrar, CancellationCollector, Debouncer, DisposeReport, Generation, StaleGuard,
	Subscribable, SuggestionController, Suggestions, Teardown, TeardownError, TeardownSet,
	Unsubscribe,
};

#[cfg(feature = "router")]
pub use wayfinder_router::{
	Location, MemoryLocation, Navigator, Notice, NoticeKind, RouteDefinition, RouteOutcome,
	RouteParams, Router, RouterError,
};

#[cfg(feature = "conf")]
pub use wayfinder_conf::{NavigationSettings, SettingsError, SuggestionSettings};

/// Commonly used types
pub mod prelude {
	pub use crate::{
		CancelRegistrar, CancellationCollector, StaleGuard, SuggestionController, Suggestions,
		Teardown, TeardownSet,
	};

	#[cfg(feature = "router")]
	pub use crate::{
		Location, MemoryLocation, Navigator, Notice, NoticeKind, RouteDefinition, RouteOutcome,
		RouteParams, Router, RouterError,
	};

	#[cfg(feature = "conf")]
	pub use crate::NavigationSettings;
}
