//! Lifecycle primitives for views driven by a single-threaded event loop.
//!
//! A view mounted by the router owns resources (subscriptions, timers,
//! spawned tasks) that must be released when the user navigates away, and
//! it usually runs asynchronous work whose results may arrive out of order.
//! This crate provides the pieces used to keep both under control:
//!
//! - [`Teardown`] / [`TeardownSet`]: disposers released exactly once, with
//!   per-callback failure isolation
//! - [`StaleGuard`]: monotonic tickets that detect superseded async results
//! - [`CancellationCollector`]: advisory cancellation of the previous
//!   in-flight operation when a new one starts
//! - [`Debouncer`]: trailing-edge debounce on the tokio local executor
//! - [`SuggestionController`]: debounced, cancellable, race-safe lookups
//!   composed from the above
//! - [`Subscribable`]: the `subscribe(callback) -> unsubscribe` contract of
//!   external reactive data sources
//!
//! All types are `!Send`; async pieces expect to run inside a
//! [`tokio::task::LocalSet`].

pub mod cancel;
pub mod debounce;
pub mod error;
pub mod panic;
pub mod stale;
pub mod subscription;
pub mod suggest;
pub mod teardown;

pub use cancel::{CancelRegistrar, CancellationCollector};
pub use debounce::Debouncer;
pub use error::{DisposeReport, TeardownError};
pub use panic::catch_panic;
pub use stale::{Generation, StaleGuard};
pub use subscription::{Subscribable, Unsubscribe};
pub use suggest::{SuggestionController, SuggestionControllerBuilder, Suggestions};
pub use teardown::{Teardown, TeardownSet};
