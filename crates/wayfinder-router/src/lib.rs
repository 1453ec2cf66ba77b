//! Hash-location router with named routes and per-view teardown.
//!
//! Routes are registered once, in order, as a name, a `:name` path pattern
//! and a handler. On every location change the [`Router`] matches the path
//! against the routes (first match wins), disposes the teardown of the
//! view it mounted previously, and runs the matched handler. Whatever the
//! handler returns becomes the new view's [`Teardown`].
//!
//! ## Architecture
//!
//! - [`RoutePattern`]: anchored matcher compiled from a `:name` template
//! - [`RouteTable`]: immutable ordered route list with lookup by name
//! - [`Navigator`]: builds paths by name and writes them to the location
//! - [`Location`]: the location indicator; [`MemoryLocation`] keeps it in
//!   memory and signals changes over a [`LocationChanges`] channel
//! - [`Router`]: owns the mounted view and reports [`Notice`]s
//!
//! ## Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use wayfinder_router::{MemoryLocation, NoticeKind, RouteDefinition, Router};
//!
//! let notices = Rc::new(RefCell::new(Vec::new()));
//! let sink = notices.clone();
//!
//! let (location, _changes) = MemoryLocation::new("#/unknown/path");
//! let router = Router::builder()
//!     .route(RouteDefinition::new("home", "/", |_, _| {}))
//!     .on_unmatched(move |notice| sink.borrow_mut().push(notice.clone()))
//!     .build(location)
//!     .unwrap();
//!
//! router.route();
//! assert_eq!(notices.borrow()[0].kind, NoticeKind::Warning);
//! assert_eq!(
//!     notices.borrow()[0].message(),
//!     "No route matched for path: /unknown/path"
//! );
//! ```
//!
//! [`Teardown`]: wayfinder_lifecycle::Teardown

pub mod error;
pub mod handler;
pub mod location;
pub mod navigator;
pub mod notice;
pub mod pattern;
pub mod router;
pub mod table;

pub use error::{PatternError, Result, RouteTableError, RouterError};
pub use handler::{HandlerOutput, RouteHandler};
pub use location::{Location, LocationChanges, LocationNotifier, MemoryLocation, path_from_hash};
pub use navigator::Navigator;
pub use notice::{Notice, NoticeKind, log_notice};
pub use pattern::{MAX_PATH_SEGMENTS, MAX_PATTERN_LENGTH, RouteParams, RoutePattern};
pub use router::{RouteOutcome, Router, RouterBuilder};
pub use table::{CompiledRoute, RouteDefinition, RouteMatch, RouteTable};
