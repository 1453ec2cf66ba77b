//! Route pattern compilation.
//!
//! A pattern is a `/`-separated template of literal text and `:name`
//! placeholders, e.g. `/room/:slug`. Each placeholder captures one
//! non-empty path segment. Matching is anchored to the whole path.

use crate::error::PatternError;
use std::fmt;

/// Maximum allowed length for a route pattern string in bytes.
pub const MAX_PATTERN_LENGTH: usize = 1024;

/// Maximum allowed number of path segments in a route pattern.
pub const MAX_PATH_SEGMENTS: usize = 32;

/// Maximum allowed size for a compiled route matcher (in bytes).
const MAX_REGEX_SIZE: usize = 1 << 20; // 1 MiB

/// Parameters extracted from a matched path, in placeholder order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
	entries: Vec<(String, String)>,
}

impl RouteParams {
	/// Creates an empty parameter list.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the value captured for `name`.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.entries
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_str())
	}

	/// Iterates over `(name, value)` pairs in placeholder order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries
			.iter()
			.map(|(key, value)| (key.as_str(), value.as_str()))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl<K, V> FromIterator<(K, V)> for RouteParams
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			entries: iter
				.into_iter()
				.map(|(key, value)| (key.into(), value.into()))
				.collect(),
		}
	}
}

/// A compiled route pattern.
///
/// Literal text is copied into the matcher as written, so regex
/// metacharacters in a pattern keep their regex meaning. Patterns that
/// would introduce extra capture groups this way are rejected.
#[derive(Debug, Clone)]
pub struct RoutePattern {
	/// The pattern as written.
	pattern: String,
	/// Compiled, anchored matcher.
	regex: regex::Regex,
	/// Placeholder names in declaration order.
	param_names: Vec<String>,
}

impl RoutePattern {
	/// Compiles a `:name` pattern.
	///
	/// # Errors
	///
	/// - the pattern exceeds [`MAX_PATTERN_LENGTH`] bytes or
	///   [`MAX_PATH_SEGMENTS`] segments
	/// - a placeholder has no name, or a name is used twice
	/// - the generated matcher does not compile, or compiles to a different
	///   number of capture groups than there are placeholders
	pub fn compile(pattern: &str) -> Result<Self, PatternError> {
		if pattern.len() > MAX_PATTERN_LENGTH {
			return Err(PatternError::TooLong {
				length: pattern.len(),
				max: MAX_PATTERN_LENGTH,
			});
		}

		let segments = pattern.split('/').count();
		if segments > MAX_PATH_SEGMENTS {
			return Err(PatternError::TooManySegments {
				segments,
				max: MAX_PATH_SEGMENTS,
			});
		}

		let (regex_str, param_names) = Self::compile_pattern(pattern)?;

		let regex = regex::RegexBuilder::new(&regex_str)
			.size_limit(MAX_REGEX_SIZE)
			.build()
			.map_err(|e| PatternError::Regex(e.to_string()))?;

		// Group 0 is the whole match
		let groups = regex.captures_len() - 1;
		if groups != param_names.len() {
			return Err(PatternError::GroupMismatch {
				groups,
				placeholders: param_names.len(),
			});
		}

		Ok(Self {
			pattern: pattern.to_string(),
			regex,
			param_names,
		})
	}

	/// Translates the template into an anchored regex and collects
	/// placeholder names.
	fn compile_pattern(pattern: &str) -> Result<(String, Vec<String>), PatternError> {
		// Group the body so top-level `|` in literal text stays anchored
		let mut regex_str = String::from("^(?:");
		let mut param_names: Vec<String> = Vec::new();
		let mut chars = pattern.char_indices().peekable();

		while let Some((position, c)) = chars.next() {
			if c != ':' {
				regex_str.push(c);
				continue;
			}

			let mut name = String::new();
			while let Some(&(_, next)) = chars.peek() {
				if next == '/' {
					break;
				}
				name.push(next);
				chars.next();
			}

			if name.is_empty() {
				return Err(PatternError::EmptyPlaceholder { position });
			}
			if param_names.contains(&name) {
				return Err(PatternError::DuplicatePlaceholder(name));
			}

			regex_str.push_str("([^/]+)");
			param_names.push(name);
		}

		regex_str.push_str(")$");
		Ok((regex_str, param_names))
	}

	/// Returns the pattern as written.
	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// Returns the placeholder names in declaration order.
	pub fn param_names(&self) -> &[String] {
		&self.param_names
	}

	/// Matches the whole `path`, returning the captured parameters.
	pub fn matches(&self, path: &str) -> Option<RouteParams> {
		let caps = self.regex.captures(path)?;
		Some(
			self.param_names
				.iter()
				.enumerate()
				.filter_map(|(i, name)| {
					caps.get(i + 1)
						.map(|m| (name.clone(), m.as_str().to_string()))
				})
				.collect(),
		)
	}

	/// Checks if this pattern accepts the given path.
	pub fn is_match(&self, path: &str) -> bool {
		self.regex.is_match(path)
	}

	/// Builds a concrete path by textual substitution.
	///
	/// For each `(key, value)` in iteration order the first occurrence of
	/// `:key` is replaced with `value`. Entries without a matching token are
	/// ignored; tokens without a matching entry stay in the path as written.
	/// Because substitution is textual, `:id` also matches the start of
	/// `:idx`.
	pub fn substitute<I, K, V>(&self, params: I) -> String
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: fmt::Display,
	{
		let mut path = self.pattern.clone();
		for (key, value) in params {
			path = path.replacen(&format!(":{}", key.as_ref()), &value.to_string(), 1);
		}

		let unresolved: Vec<&str> = self
			.param_names
			.iter()
			.filter(|name| path.contains(&format!(":{name}")))
			.map(String::as_str)
			.collect();
		if !unresolved.is_empty() {
			tracing::debug!(
				pattern = %self.pattern,
				%path,
				?unresolved,
				"placeholders left unsubstituted"
			);
		}

		path
	}
}

impl PartialEq for RoutePattern {
	fn eq(&self, other: &Self) -> bool {
		self.pattern == other.pattern
	}
}

impl Eq for RoutePattern {}

impl fmt::Display for RoutePattern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.pattern)
	}
}
