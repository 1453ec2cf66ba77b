//! Debounced, cancellable suggestion lookups.
//!
//! [`SuggestionController`] drives an autocomplete input: keystrokes are
//! debounced, each lookup cancels the previous one through a
//! [`CancellationCollector`], and results are committed only while their
//! [`StaleGuard`] ticket is current. The controller renders nothing itself;
//! it reports [`Suggestions`] to a sink supplied by the view.
//!
//! ## Example
//!
//! ```ignore
//! use wayfinder_lifecycle::{SuggestionController, Suggestions};
//!
//! let members = SuggestionController::builder(move |query, cancel| {
//!     let client = client.clone();
//!     async move { client.search_members(&query, cancel).await }
//! })
//! .build(move |update| match update {
//!     Suggestions::Show(entries) => dropdown.show(entries),
//!     Suggestions::Clear => dropdown.hide(),
//! });
//!
//! members.input("ali");
//! ```

use crate::cancel::{CancelRegistrar, CancellationCollector};
use crate::debounce::Debouncer;
use crate::panic::{catch_panic, panic_message};
use crate::stale::StaleGuard;
use std::fmt::Display;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::time::Duration;
use wayfinder_conf::SuggestionSettings;

/// Quiet period before a lookup starts.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

type FetchFuture<T> = Pin<Box<dyn Future<Output = Result<Vec<T>, String>>>>;
type FetchFn<T> = Box<dyn Fn(String, CancelRegistrar) -> FetchFuture<T>>;
type SinkFn<T> = Box<dyn Fn(Suggestions<T>)>;

/// Update reported to the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestions<T> {
	/// Entries of the latest lookup (never empty).
	Show(Vec<T>),
	/// Hide the suggestion list.
	Clear,
}

struct LookupState<T> {
	fetch: FetchFn<T>,
	sink: SinkFn<T>,
	cancellation: CancellationCollector,
	guard: StaleGuard,
	min_query_len: usize,
}

impl<T: 'static> LookupState<T> {
	fn clear(&self) {
		self.cancellation.cancel_current();
		self.guard.invalidate();
		(self.sink)(Suggestions::Clear);
	}

	fn lookup(self: &Rc<Self>, raw: String) {
		let query = raw.trim();
		if query.chars().count() < self.min_query_len {
			self.clear();
			return;
		}

		let registrar = self.cancellation.request_start();
		let ticket = self.guard.begin();
		tracing::trace!(%query, generation = %ticket, "starting suggestion lookup");
		let fetch: FetchFuture<T> =
			match catch_panic(|| (self.fetch)(query.to_string(), registrar.clone())) {
				Ok(fetch) => fetch,
				Err(message) => Box::pin(std::future::ready(Err(message))),
			};

		let state = Rc::clone(self);
		tokio::task::spawn_local(async move {
			// A panicking fetch is reported like a failed one
			let outcome = match tokio::task::spawn_local(fetch).await {
				Ok(outcome) => outcome,
				Err(error) if error.is_panic() => Err(panic_message(error.into_panic())),
				Err(error) => Err(error.to_string()),
			};
			state.guard.commit(ticket, || {
				state.cancellation.finish(&registrar);
				match outcome {
					Ok(entries) if entries.is_empty() => (state.sink)(Suggestions::Clear),
					Ok(entries) => (state.sink)(Suggestions::Show(entries)),
					Err(message) => {
						tracing::warn!(%message, "suggestion lookup failed");
						(state.sink)(Suggestions::Clear);
					}
				}
			});
		});
	}
}

/// Autocomplete driver composed of a [`Debouncer`], a
/// [`CancellationCollector`] and a [`StaleGuard`].
///
/// # Panics
///
/// Lookups are spawned with [`tokio::task::spawn_local`]; the controller
/// must be used inside a [`tokio::task::LocalSet`].
pub struct SuggestionController<T> {
	state: Rc<LookupState<T>>,
	debouncer: Debouncer<String>,
}

impl<T: 'static> SuggestionController<T> {
	/// Starts building a controller around an async `fetch` function.
	///
	/// `fetch` receives the trimmed query and the lookup's
	/// [`CancelRegistrar`], on which it should register the abort of its
	/// request.
	pub fn builder<F, Fut, E>(fetch: F) -> SuggestionControllerBuilder<T>
	where
		F: Fn(String, CancelRegistrar) -> Fut + 'static,
		Fut: Future<Output = Result<Vec<T>, E>> + 'static,
		E: Display + 'static,
	{
		let fetch: FetchFn<T> = Box::new(move |query, registrar| {
			let future = fetch(query, registrar);
			let boxed: FetchFuture<T> =
				Box::pin(async move { future.await.map_err(|e| e.to_string()) });
			boxed
		});

		SuggestionControllerBuilder {
			fetch,
			delay: DEFAULT_DEBOUNCE,
			min_query_len: 1,
		}
	}

	/// Feeds the raw input value; the lookup starts after the quiet period.
	pub fn input(&self, raw: &str) {
		self.debouncer.call(raw.to_string());
	}

	/// Runs a lookup right away, skipping the debounce.
	pub fn lookup_now(&self, raw: &str) {
		self.debouncer.cancel();
		self.state.lookup(raw.to_string());
	}

	/// Hides the suggestions and abandons pending and in-flight lookups.
	pub fn dismiss(&self) {
		self.debouncer.cancel();
		self.state.clear();
	}

	/// Returns `true` while a lookup is in flight.
	pub fn is_fetching(&self) -> bool {
		self.state.cancellation.has_pending()
	}
}

impl<T> Drop for SuggestionController<T> {
	fn drop(&mut self) {
		self.state.cancellation.cancel_current();
		self.state.guard.invalidate();
	}
}

/// Builder for [`SuggestionController`].
pub struct SuggestionControllerBuilder<T> {
	fetch: FetchFn<T>,
	delay: Duration,
	min_query_len: usize,
}

impl<T: 'static> SuggestionControllerBuilder<T> {
	/// Sets the debounce quiet period.
	pub fn debounce(mut self, delay: Duration) -> Self {
		self.delay = delay;
		self
	}

	/// Sets the shortest trimmed query that triggers a lookup.
	pub fn min_query_len(mut self, len: usize) -> Self {
		self.min_query_len = len.max(1);
		self
	}

	/// Applies configured timing.
	pub fn with_settings(self, settings: &SuggestionSettings) -> Self {
		self.debounce(settings.debounce())
			.min_query_len(settings.min_query_len)
	}

	/// Finishes the controller; `sink` receives every [`Suggestions`] update.
	pub fn build<S>(self, sink: S) -> SuggestionController<T>
	where
		S: Fn(Suggestions<T>) + 'static,
	{
		let state = Rc::new(LookupState {
			fetch: self.fetch,
			sink: Box::new(sink),
			cancellation: CancellationCollector::new(),
			guard: StaleGuard::new(),
			min_query_len: self.min_query_len,
		});

		let debounced = Rc::clone(&state);
		let debouncer = Debouncer::new(self.delay, move |raw: String| debounced.lookup(raw));

		SuggestionController { state, debouncer }
	}
}
