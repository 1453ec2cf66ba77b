//! Configuration for wayfinder.
//!
//! Settings are plain serde structs loaded from TOML, optionally overridden
//! from the environment, and validated before use.
//!
//! ## Example
//!
//! ```
//! use wayfinder_conf::NavigationSettings;
//!
//! let settings = NavigationSettings::from_toml_str(
//!     r#"
//!     default_path = "/"
//!
//!     [suggestion]
//!     debounce_ms = 300
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(settings.suggestion.debounce_ms, 300);
//! ```

pub mod settings;

pub use settings::{
	LoggingSettings, NavigationSettings, SettingsError, SuggestionSettings,
};

/// Result type for settings operations
pub type Result<T> = std::result::Result<T, SettingsError>;
