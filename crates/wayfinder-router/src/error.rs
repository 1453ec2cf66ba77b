//! Error types for routing.

use thiserror::Error;
use wayfinder_lifecycle::TeardownError;

/// Failure while compiling a single route pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
	/// The pattern string is longer than the allowed maximum.
	#[error("pattern length {length} exceeds maximum allowed length of {max} bytes")]
	TooLong {
		/// Length of the rejected pattern in bytes.
		length: usize,
		/// Maximum allowed length in bytes.
		max: usize,
	},

	/// The pattern has more `/`-separated segments than allowed.
	#[error("pattern has {segments} path segments, exceeding maximum of {max}")]
	TooManySegments {
		/// Segment count of the rejected pattern.
		segments: usize,
		/// Maximum allowed segment count.
		max: usize,
	},

	/// A `:` is not followed by a parameter name.
	#[error("empty placeholder name at byte {position}")]
	EmptyPlaceholder {
		/// Byte offset of the `:`.
		position: usize,
	},

	/// The same placeholder name appears twice.
	#[error("duplicate placeholder `:{0}`")]
	DuplicatePlaceholder(String),

	/// The generated matcher is not a valid regular expression.
	#[error("failed to compile pattern regex: {0}")]
	Regex(String),

	/// Literal text in the pattern introduced capture groups of its own.
	#[error("pattern compiles to {groups} capture groups but declares {placeholders} placeholders")]
	GroupMismatch {
		/// Capture groups in the compiled matcher.
		groups: usize,
		/// Placeholders declared in the pattern.
		placeholders: usize,
	},
}

/// Failure while building a [`RouteTable`](crate::RouteTable).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTableError {
	/// Two routes share a name.
	#[error("duplicate route name \"{0}\"")]
	DuplicateName(String),

	/// A route's pattern failed to compile.
	#[error("invalid pattern for route \"{route}\": {source}")]
	InvalidPattern {
		/// Name of the offending route.
		route: String,
		/// Compilation failure.
		#[source]
		source: PatternError,
	},

	/// The default path is not an absolute path.
	#[error("default path must start with '/', got \"{0}\"")]
	InvalidDefaultPath(String),
}

/// Errors surfaced by navigation and dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
	/// `navigate` was asked for a name no route carries.
	#[error("Route with name \"{0}\" not found")]
	RouteNotFound(String),

	/// No route accepts the current location.
	#[error("No route matched for path: {0}")]
	NoMatch(String),

	/// A handler failed (returned an error or panicked) during setup.
	#[error("Error in route ({route}) handler: {message}")]
	Handler {
		/// Name of the route whose handler failed.
		route: String,
		/// Error or panic message.
		message: String,
	},

	/// A teardown callback of the outgoing view failed.
	#[error("Error tearing down route ({route}): {source}")]
	Teardown {
		/// Name of the route being unmounted.
		route: String,
		/// The failed callback.
		#[source]
		source: TeardownError,
	},
}

/// Result type for navigation.
pub type Result<T> = std::result::Result<T, RouterError>;
