use crate::error::{Delimiter, EmptyDelimiter};

/// The default tag that opens a macro occurrence.
pub const DEFAULT_START_TAG: &str = "${";

/// The default tag that closes a macro occurrence.
pub const DEFAULT_END_TAG: &str = "}";

/// The configuration used to compile templates.
///
/// A configuration holds the set of known macro names and the tags that surround them.
/// Only known names are recognized as macros: `${other}` is left as literal text if `other` is not a known name.
///
/// # Example
/// ```
/// # use mson::Config;
/// let config = Config::new(["name", "id"]).with_delimiters("{{", "}}");
/// assert_eq!(config.start_tag(), "{{");
/// assert_eq!(config.end_tag(), "}}");
/// assert_eq!(config.macro_names().iter().collect::<Vec<_>>(), ["name", "id"]);
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
	#[cfg_attr(feature = "serde", serde(rename = "macros"))]
	macro_names: MacroNames,

	#[cfg_attr(feature = "serde", serde(default = "default_start_tag"))]
	start_tag: String,

	#[cfg_attr(feature = "serde", serde(default = "default_end_tag"))]
	end_tag: String,
}

#[cfg(feature = "serde")]
fn default_start_tag() -> String {
	DEFAULT_START_TAG.into()
}

#[cfg(feature = "serde")]
fn default_end_tag() -> String {
	DEFAULT_END_TAG.into()
}

impl Default for Config {
	fn default() -> Self {
		Self {
			macro_names: MacroNames::default(),
			start_tag: DEFAULT_START_TAG.into(),
			end_tag: DEFAULT_END_TAG.into(),
		}
	}
}

impl Config {
	/// Create a configuration for the given macro names with the default tags.
	pub fn new<I, S>(macro_names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			macro_names: macro_names.into_iter().collect(),
			..Self::default()
		}
	}

	/// Use a different tag to open macro occurrences.
	#[must_use]
	pub fn with_start_tag(mut self, start_tag: impl Into<String>) -> Self {
		self.start_tag = start_tag.into();
		self
	}

	/// Use a different tag to close macro occurrences.
	#[must_use]
	pub fn with_end_tag(mut self, end_tag: impl Into<String>) -> Self {
		self.end_tag = end_tag.into();
		self
	}

	/// Use different tags to open and close macro occurrences.
	#[must_use]
	pub fn with_delimiters(self, start_tag: impl Into<String>, end_tag: impl Into<String>) -> Self {
		self.with_start_tag(start_tag).with_end_tag(end_tag)
	}

	/// Get the tag that opens a macro occurrence.
	#[inline]
	pub fn start_tag(&self) -> &str {
		&self.start_tag
	}

	/// Get the tag that closes a macro occurrence.
	#[inline]
	pub fn end_tag(&self) -> &str {
		&self.end_tag
	}

	/// Get the known macro names.
	#[inline]
	pub fn macro_names(&self) -> &MacroNames {
		&self.macro_names
	}

	/// Check that the configuration can be used to compile templates.
	pub(crate) fn validate(&self) -> Result<(), EmptyDelimiter> {
		if self.start_tag.is_empty() {
			return Err(EmptyDelimiter { delimiter: Delimiter::Start });
		}
		if self.end_tag.is_empty() {
			return Err(EmptyDelimiter { delimiter: Delimiter::End });
		}
		Ok(())
	}
}

/// A set of macro names.
///
/// Names are kept in the order in which they are matched against a template:
/// longer names first, and names of equal length in lexicographical order.
/// When one name is a prefix of another, the longest name followed by an end tag wins.
///
/// Empty names are ignored.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<String>", into = "Vec<String>"))]
pub struct MacroNames {
	names: Vec<String>,
}

impl MacroNames {
	/// Iterate over the names in match order.
	pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
		self.names.iter().map(String::as_str)
	}

	/// Check if the set contains the given name.
	pub fn contains(&self, name: &str) -> bool {
		self.names.iter().any(|x| x == name)
	}

	/// Get the number of names in the set.
	pub fn len(&self) -> usize {
		self.names.len()
	}

	/// Check if the set is empty.
	pub fn is_empty(&self) -> bool {
		self.names.is_empty()
	}
}

impl<S: Into<String>> FromIterator<S> for MacroNames {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		let mut names: Vec<String> = iter.into_iter().map(Into::into).filter(|x| !x.is_empty()).collect();
		names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
		names.dedup();
		Self { names }
	}
}

impl From<Vec<String>> for MacroNames {
	#[inline]
	fn from(other: Vec<String>) -> Self {
		other.into_iter().collect()
	}
}

impl From<MacroNames> for Vec<String> {
	#[inline]
	fn from(other: MacroNames) -> Self {
		other.names
	}
}
