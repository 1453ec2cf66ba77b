//! View lifecycle primitives
//!
//! This module provides access to wayfinder-lifecycle: teardown sets,
//! staleness guards, cancellation collectors and debounced suggestion
//! lookups.

pub use wayfinder_lifecycle::*;
