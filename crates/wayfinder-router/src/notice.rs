//! Notices reported by the router.

use crate::error::RouterError;
use std::fmt;

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
	/// A handler or teardown failed.
	Error,
	/// The location matched no route.
	Warning,
}

impl fmt::Display for NoticeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Error => f.write_str("error"),
			Self::Warning => f.write_str("warning"),
		}
	}
}

/// One message on the router's notification channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
	pub kind: NoticeKind,
	pub error: RouterError,
}

impl Notice {
	pub fn error(error: RouterError) -> Self {
		Self {
			kind: NoticeKind::Error,
			error,
		}
	}

	pub fn warning(error: RouterError) -> Self {
		Self {
			kind: NoticeKind::Warning,
			error,
		}
	}

	/// Human readable message.
	pub fn message(&self) -> String {
		self.error.to_string()
	}
}

impl fmt::Display for Notice {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[{}] {}", self.kind, self.error)
	}
}

/// Default sink: emits notices as `tracing` events.
pub fn log_notice(notice: &Notice) {
	match notice.kind {
		NoticeKind::Error => tracing::error!(error = %notice.error, "router error"),
		NoticeKind::Warning => tracing::warn!(error = %notice.error, "router warning"),
	}
}
