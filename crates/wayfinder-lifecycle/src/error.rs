//! Error types for teardown disposal.

use thiserror::Error;

/// A disposal callback that failed (returned an error or panicked).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("teardown callback #{index} failed: {message}")]
pub struct TeardownError {
	/// Position of the callback in disposal order.
	pub index: usize,
	/// Error or panic message.
	pub message: String,
}

/// Outcome of disposing a [`Teardown`](crate::Teardown) or
/// [`TeardownSet`](crate::TeardownSet).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisposeReport {
	invoked: usize,
	failures: Vec<TeardownError>,
}

impl DisposeReport {
	/// Number of callbacks invoked, failed ones included.
	pub fn invoked(&self) -> usize {
		self.invoked
	}

	/// Failures collected during disposal.
	pub fn failures(&self) -> &[TeardownError] {
		&self.failures
	}

	/// Consumes the report, returning its failures.
	pub fn into_failures(self) -> Vec<TeardownError> {
		self.failures
	}

	/// Returns `true` when every callback completed.
	pub fn is_clean(&self) -> bool {
		self.failures.is_empty()
	}

	pub(crate) fn record(&mut self, outcome: Result<(), String>) {
		let index = self.invoked;
		self.invoked += 1;
		if let Err(message) = outcome {
			tracing::warn!(index, %message, "teardown callback failed");
			self.failures.push(TeardownError { index, message });
		}
	}

	pub(crate) fn merge(&mut self, other: DisposeReport) {
		let offset = self.invoked;
		self.invoked += other.invoked;
		self.failures
			.extend(other.failures.into_iter().map(|mut failure| {
				failure.index += offset;
				failure
			}));
	}
}
