//! Hash-location routing
//!
//! This module provides access to wayfinder-router.
//!
//! ## Example
//!
//! ```rust
//! use wayfinder::router::{MemoryLocation, RouteDefinition, Router};
//!
//! let (location, _changes) = MemoryLocation::new("#/room/general");
//! let router = Router::builder()
//!     .route(RouteDefinition::new("home", "/", |_, _| {}))
//!     .route(RouteDefinition::new("room", "/room/:slug", |_, params| {
//!         assert_eq!(params.get("slug"), Some("general"));
//!     }))
//!     .build(location)
//!     .unwrap();
//!
//! router.route();
//! assert_eq!(router.current_route().as_deref(), Some("room"));
//! ```

pub use wayfinder_router::*;
