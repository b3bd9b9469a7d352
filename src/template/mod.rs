use crate::error::{ExpandError, ParseError};
use crate::{Config, MacroValues};

mod raw;

pub use raw::{MacroCode, MAX_MACRO_COUNT};

/// Where a macro occurrence sits in the JSON document.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Context {
	/// Inside a string literal: the value must be escaped as string content.
	String,

	/// An unquoted object key or a bare value: the value is inserted as a raw token.
	Raw,
}

impl Context {
	/// Check if the macro occurrence sits inside a string literal.
	#[inline]
	pub fn is_string(self) -> bool {
		self == Self::String
	}
}

/// A macro occurrence in a compiled template.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct MacroRef<'a> {
	name: &'a str,
	position: usize,
	code: MacroCode,
	context: Context,
}

impl<'a> MacroRef<'a> {
	/// The name of the macro.
	#[inline]
	pub fn name(&self) -> &'a str {
		self.name
	}

	/// The byte offset of the start tag of the occurrence in the template.
	#[inline]
	pub fn position(&self) -> usize {
		self.position
	}

	/// The code that stood in for the occurrence while the template was classified.
	#[inline]
	pub fn code(&self) -> MacroCode {
		self.code
	}

	/// The context the occurrence was classified in.
	#[inline]
	pub fn context(&self) -> Context {
		self.context
	}
}

/// A compiled JSON template that borrows the source string.
///
/// You can compile the template once and call [`Self::expand()`] multiple times.
/// This is generally more efficient than calling [`expand()`][crate::expand] multiple times on the same string.
///
/// This template borrows the source string.
/// You can use [`TemplateBuf`] if you need a template that owns the source string.
#[derive(Clone)]
pub struct Template<'a> {
	source: &'a str,
	raw: raw::Template,
}

impl std::fmt::Debug for Template<'_> {
	#[inline]
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("Template").field(&self.source).finish()
	}
}

impl<'a> Template<'a> {
	/// Compile a template from a string slice.
	///
	/// Every occurrence of a known macro name between the start and end tag of the configuration
	/// is replaced by a unique number, and the result is parsed as JSON
	/// (with unquoted object keys allowed) to find out which occurrences sit inside a string literal.
	///
	/// Occurrences of unknown names are left alone as literal text.
	/// A template without any macro occurrence is not checked for JSON syntax.
	#[inline]
	pub fn new(source: &'a str, config: &Config) -> Result<Self, ParseError> {
		Ok(Self {
			source,
			raw: raw::Template::parse(source, config)?,
		})
	}

	/// Get the original source string.
	#[inline]
	pub fn source(&self) -> &'a str {
		self.source
	}

	/// Get the configuration the template was compiled with.
	#[inline]
	pub fn config(&self) -> &Config {
		self.raw.config()
	}

	/// Get the source with every macro occurrence replaced by its code.
	///
	/// This is the document that was parsed to classify the macro occurrences.
	#[inline]
	pub fn encoded_source(&self) -> &str {
		self.raw.encoded()
	}

	/// Iterate over the macro occurrences in order of appearance.
	#[inline]
	pub fn macros(&self) -> impl Iterator<Item = MacroRef<'_>> + '_ {
		self.raw.macros(self.source)
	}

	/// Expand the template.
	///
	/// Every macro occurrence is replaced by the value from the value source,
	/// rendered for string context or raw context as classified.
	///
	/// You can pass a [`HashMap`][std::collections::HashMap] or [`BTreeMap`][std::collections::BTreeMap] with values that implement [`Display`][std::fmt::Display],
	/// a [`serde_json::Map`], or any other [`MacroValues`] implementation.
	#[inline]
	pub fn expand<M>(&self, values: &M) -> Result<String, ExpandError>
	where
		M: MacroValues + ?Sized,
	{
		self.raw.expand_to_string(self.source, values)
	}
}

/// A compiled JSON template that owns the source string.
///
/// You can compile the template once and call [`Self::expand()`] multiple times.
///
/// This template owns the source string.
/// If you do not need ownership, you can also use [`Template`] to borrow it instead.
#[derive(Clone)]
pub struct TemplateBuf {
	source: String,
	raw: raw::Template,
}

impl std::fmt::Debug for TemplateBuf {
	#[inline]
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("TemplateBuf").field(&self.source).finish()
	}
}

impl TemplateBuf {
	/// Compile a template from a string.
	///
	/// This takes ownership of the string.
	/// See [`Template::new()`] for the details of compilation.
	#[inline]
	pub fn from_string(source: String, config: &Config) -> Result<Self, ParseError> {
		let raw = raw::Template::parse(&source, config)?;
		Ok(Self { source, raw })
	}

	/// Get the original source string.
	#[inline]
	pub fn source(&self) -> &str {
		&self.source
	}

	/// Borrow the template as a [`Template`].
	#[inline]
	pub fn as_template(&self) -> Template<'_> {
		self.into()
	}

	/// Consume the template to get the original source string.
	#[inline]
	pub fn into_source(self) -> String {
		self.source
	}

	/// Get the configuration the template was compiled with.
	#[inline]
	pub fn config(&self) -> &Config {
		self.raw.config()
	}

	/// Get the source with every macro occurrence replaced by its code.
	#[inline]
	pub fn encoded_source(&self) -> &str {
		self.raw.encoded()
	}

	/// Iterate over the macro occurrences in order of appearance.
	#[inline]
	pub fn macros(&self) -> impl Iterator<Item = MacroRef<'_>> + '_ {
		self.raw.macros(&self.source)
	}

	/// Expand the template.
	///
	/// See [`Template::expand()`].
	#[inline]
	pub fn expand<M>(&self, values: &M) -> Result<String, ExpandError>
	where
		M: MacroValues + ?Sized,
	{
		self.raw.expand_to_string(&self.source, values)
	}
}

impl<'a> From<&'a TemplateBuf> for Template<'a> {
	#[inline]
	fn from(other: &'a TemplateBuf) -> Self {
		Self {
			source: &other.source,
			raw: other.raw.clone(),
		}
	}
}

impl From<&Template<'_>> for TemplateBuf {
	#[inline]
	fn from(other: &Template<'_>) -> Self {
		other.clone().into()
	}
}

impl From<Template<'_>> for TemplateBuf {
	#[inline]
	fn from(other: Template<'_>) -> Self {
		Self {
			source: other.source.into(),
			raw: other.raw,
		}
	}
}
