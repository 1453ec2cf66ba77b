//! Navigation settings
//!
//! Mirrors the knobs the router and the suggestion controller expose:
//! the path used when the location hash is empty, the debounce delay of
//! suggestion lookups, and whether router notices are logged.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable overriding [`NavigationSettings::default_path`].
pub const ENV_DEFAULT_PATH: &str = "WAYFINDER_DEFAULT_PATH";

/// Environment variable overriding [`SuggestionSettings::debounce_ms`].
pub const ENV_DEBOUNCE_MS: &str = "WAYFINDER_DEBOUNCE_MS";

/// Top-level settings
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationSettings {
	/// Path routed when the location hash is empty
	#[serde(default = "default_path")]
	pub default_path: String,

	/// Suggestion lookup timing
	#[serde(default)]
	pub suggestion: SuggestionSettings,

	/// Logging configuration
	#[serde(default)]
	pub logging: LoggingSettings,
}

fn default_path() -> String {
	"/".to_string()
}

impl Default for NavigationSettings {
	fn default() -> Self {
		Self {
			default_path: default_path(),
			suggestion: SuggestionSettings::default(),
			logging: LoggingSettings::default(),
		}
	}
}

impl NavigationSettings {
	/// Create new settings with defaults
	pub fn new() -> Self {
		Self::default()
	}

	/// Parse settings from a TOML document.
	pub fn from_toml_str(contents: &str) -> Result<Self, SettingsError> {
		toml::from_str(contents)
			.map_err(|e| SettingsError::ParseError(format!("TOML parse error: {}", e)))
	}

	/// Load settings from a `.toml` file.
	pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
		let path = path.into();
		if path.extension().and_then(|s| s.to_str()) != Some("toml") {
			return Err(SettingsError::UnsupportedFormat(format!(
				"{} (supported formats: .toml)",
				path.display()
			)));
		}

		let contents = std::fs::read_to_string(&path).map_err(|e| {
			SettingsError::FileError(format!("Failed to read {}: {}", path.display(), e))
		})?;

		let settings = Self::from_toml_str(&contents)?;
		tracing::debug!(path = %path.display(), "loaded navigation settings");
		Ok(settings)
	}

	/// Start from defaults and apply environment overrides.
	pub fn from_env() -> Result<Self, SettingsError> {
		Self::default().with_env_overrides()
	}

	/// Apply `WAYFINDER_*` environment overrides on top of these settings.
	pub fn with_env_overrides(mut self) -> Result<Self, SettingsError> {
		if let Ok(path) = std::env::var(ENV_DEFAULT_PATH) {
			self.default_path = path;
		}

		if let Ok(raw) = std::env::var(ENV_DEBOUNCE_MS) {
			self.suggestion.debounce_ms = raw.trim().parse().map_err(|e| {
				SettingsError::ParseError(format!("{}={:?}: {}", ENV_DEBOUNCE_MS, raw, e))
			})?;
		}

		Ok(self)
	}

	/// Validate settings
	pub fn validate(&self) -> Result<(), SettingsError> {
		if !self.default_path.starts_with('/') {
			return Err(SettingsError::ValidationError(format!(
				"default_path must start with '/', got {:?}",
				self.default_path
			)));
		}

		if self.suggestion.min_query_len == 0 {
			return Err(SettingsError::ValidationError(
				"suggestion.min_query_len must be at least 1".to_string(),
			));
		}

		Ok(())
	}
}

/// Suggestion lookup settings
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionSettings {
	/// Trailing-edge debounce delay in milliseconds
	pub debounce_ms: u64,
	/// Shortest trimmed query that triggers a lookup
	pub min_query_len: usize,
}

impl Default for SuggestionSettings {
	fn default() -> Self {
		Self {
			debounce_ms: 200,
			min_query_len: 1,
		}
	}
}

impl SuggestionSettings {
	/// Debounce delay as a [`Duration`].
	pub fn debounce(&self) -> Duration {
		Duration::from_millis(self.debounce_ms)
	}
}

/// Logging settings
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
	/// Whether the default notice sink emits `tracing` events
	pub notices: bool,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self { notices: true }
	}
}

/// Settings errors
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("File error: {0}")]
	FileError(String),

	#[error("Parse error: {0}")]
	ParseError(String),

	#[error("Validation error: {0}")]
	ValidationError(String),

	#[error("Unsupported format: {0}")]
	UnsupportedFormat(String),
}
