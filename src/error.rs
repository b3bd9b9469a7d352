//! Module containing error details.

/// An error that can occur while compiling or expanding a template.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub enum Error {
	/// The template could not be compiled.
	Parse(ParseError),

	/// The template could not be expanded.
	Expand(ExpandError),
}

impl From<ParseError> for Error {
	#[inline]
	fn from(other: ParseError) -> Self {
		Self::Parse(other)
	}
}

impl From<ExpandError> for Error {
	#[inline]
	fn from(other: ExpandError) -> Self {
		Self::Expand(other)
	}
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
	#[inline]
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::Parse(e) => e.fmt(f),
			Self::Expand(e) => e.fmt(f),
		}
	}
}

impl Error {
	/// Get the range in the source text that contains the error.
	///
	/// Returns [`None`] for errors that are not tied to a location in the template.
	#[inline]
	pub fn source_range(&self) -> Option<std::ops::Range<usize>> {
		match self {
			Self::Parse(e) => e.source_range(),
			Self::Expand(e) => Some(e.source_range()),
		}
	}

	/// Write source highlighting for the error location.
	///
	/// See [`ParseError::write_source_highlighting()`].
	pub fn write_source_highlighting(&self, f: &mut impl std::fmt::Write, source: &str) -> std::fmt::Result {
		match self.source_range() {
			Some(range) => write_source_highlighting(f, source, range),
			None => Ok(()),
		}
	}

	/// Get source highlighting for the error location as a string.
	pub fn source_highlighting(&self, source: &str) -> String {
		let mut output = String::new();
		// Writing to a `String` never fails.
		let _ = self.write_source_highlighting(&mut output, source);
		output
	}
}

/// An error that can occur while compiling a template.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub enum ParseError {
	/// The start or end tag of the configuration is empty.
	EmptyDelimiter(EmptyDelimiter),

	/// The template is not JSON once macros are replaced: an unexpected character was found.
	UnexpectedCharacter(UnexpectedCharacter),

	/// The template is not JSON once macros are replaced: the input ended too soon.
	UnexpectedEnd(UnexpectedEnd),

	/// The template contains more macro occurrences than can be given a unique code.
	TooManyMacros(TooManyMacros),
}

impl From<EmptyDelimiter> for ParseError {
	#[inline]
	fn from(other: EmptyDelimiter) -> Self {
		Self::EmptyDelimiter(other)
	}
}

impl From<UnexpectedCharacter> for ParseError {
	#[inline]
	fn from(other: UnexpectedCharacter) -> Self {
		Self::UnexpectedCharacter(other)
	}
}

impl From<UnexpectedEnd> for ParseError {
	#[inline]
	fn from(other: UnexpectedEnd) -> Self {
		Self::UnexpectedEnd(other)
	}
}

impl From<TooManyMacros> for ParseError {
	#[inline]
	fn from(other: TooManyMacros) -> Self {
		Self::TooManyMacros(other)
	}
}

impl std::error::Error for ParseError {}

impl std::fmt::Display for ParseError {
	#[inline]
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::EmptyDelimiter(e) => e.fmt(f),
			Self::UnexpectedCharacter(e) => e.fmt(f),
			Self::UnexpectedEnd(e) => e.fmt(f),
			Self::TooManyMacros(e) => e.fmt(f),
		}
	}
}

impl ParseError {
	/// Get the range in the source text that contains the error.
	///
	/// Returns [`None`] for configuration errors, which are not tied to a location in the template.
	pub fn source_range(&self) -> Option<std::ops::Range<usize>> {
		let (start, len) = match self {
			Self::EmptyDelimiter(_) => return None,
			Self::UnexpectedCharacter(e) => (e.position, e.character.len_utf8()),
			Self::UnexpectedEnd(e) => (e.position, 0),
			Self::TooManyMacros(e) => (e.position, 1),
		};
		Some(start..start + len)
	}

	/// Get the line of source that contains the error.
	///
	/// Returns an empty string for errors without a location.
	///
	/// # Panics
	/// May panic if the source text is not the original source that contains the error.
	pub fn source_line<'a>(&self, source: &'a str) -> &'a str {
		match self.source_range() {
			Some(range) => &source[line_start(source, range.start)..line_end(source, range.start)],
			None => "",
		}
	}

	/// Write source highlighting for the error location.
	///
	/// The highlighting ends with a newline.
	///
	/// Note: this function doesn't print anything if the source line exceeds 60 characters in width,
	/// or if the error is not tied to a location in the template.
	/// For more control over this behaviour, consider using [`Self::source_range()`] and [`Self::source_line()`] instead.
	pub fn write_source_highlighting(&self, f: &mut impl std::fmt::Write, source: &str) -> std::fmt::Result {
		match self.source_range() {
			Some(range) => write_source_highlighting(f, source, range),
			None => Ok(()),
		}
	}

	/// Get source highlighting for the error location as a string.
	///
	/// The highlighting ends with a newline.
	pub fn source_highlighting(&self, source: &str) -> String {
		let mut output = String::new();
		// Writing to a `String` never fails.
		let _ = self.write_source_highlighting(&mut output, source);
		output
	}
}

/// Which delimiter of a [`Config`][crate::Config] was meant.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Delimiter {
	/// The tag that opens a macro occurrence, `${` by default.
	Start,

	/// The tag that closes a macro occurrence, `}` by default.
	End,
}

/// The start or end tag of the configuration is empty.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct EmptyDelimiter {
	/// The delimiter that is empty.
	pub delimiter: Delimiter,
}

impl std::error::Error for EmptyDelimiter {}

impl std::fmt::Display for EmptyDelimiter {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self.delimiter {
			Delimiter::Start => write!(f, "Empty macro start tag"),
			Delimiter::End => write!(f, "Empty macro end tag"),
		}
	}
}

/// The template contains an unexpected character once macros are replaced by their codes.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct UnexpectedCharacter {
	/// The byte offset within the template where the error occurs.
	///
	/// If the offending token is a macro occurrence, this points to the start of the macro.
	pub position: usize,

	/// The unexpected character in the template.
	pub character: char,

	/// A human readable message about what was expected instead.
	pub expected: ExpectedCharacter,
}

impl std::error::Error for UnexpectedCharacter {}

impl std::fmt::Display for UnexpectedCharacter {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "Unexpected character: {:?}, expected {}", self.character, self.expected.message())
	}
}

/// The template ends before the JSON document it describes is complete.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct UnexpectedEnd {
	/// The byte offset of the end of the template.
	pub position: usize,

	/// A human readable message about what was expected instead.
	pub expected: ExpectedCharacter,
}

impl std::error::Error for UnexpectedEnd {}

impl std::fmt::Display for UnexpectedEnd {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "Unexpected end of input, expected {}", self.expected.message())
	}
}

/// A struct to describe what was expected instead of the unexpected character.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct ExpectedCharacter {
	/// A human readable message to describe what is expected.
	pub(crate) message: &'static str,
}

impl ExpectedCharacter {
	/// Get a human readable message to describe what was expected.
	pub fn message(&self) -> &str {
		self.message
	}
}

/// The template contains more macro occurrences than can be given a unique code.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct TooManyMacros {
	/// The byte offset of the first macro occurrence that could not be given a code.
	pub position: usize,

	/// The maximum number of macro occurrences in a single template.
	pub limit: u64,
}

impl std::error::Error for TooManyMacros {}

impl std::fmt::Display for TooManyMacros {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "Too many macro occurrences, a template can contain at most {}", self.limit)
	}
}

/// An error that can occur while expanding a template.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub enum ExpandError {
	/// The template contains a macro that has no value in the value source.
	NoSuchMacro(NoSuchMacro),
}

impl From<NoSuchMacro> for ExpandError {
	#[inline]
	fn from(other: NoSuchMacro) -> Self {
		Self::NoSuchMacro(other)
	}
}

impl std::error::Error for ExpandError {}

impl std::fmt::Display for ExpandError {
	#[inline]
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::NoSuchMacro(e) => e.fmt(f),
		}
	}
}

impl ExpandError {
	/// Get the range in the source text that contains the error.
	pub fn source_range(&self) -> std::ops::Range<usize> {
		match self {
			Self::NoSuchMacro(e) => e.position..e.position + e.name.len(),
		}
	}

	/// Write source highlighting for the error location.
	///
	/// The highlighting ends with a newline.
	///
	/// Note: this function doesn't print anything if the source line exceeds 60 characters in width.
	pub fn write_source_highlighting(&self, f: &mut impl std::fmt::Write, source: &str) -> std::fmt::Result {
		write_source_highlighting(f, source, self.source_range())
	}

	/// Get source highlighting for the error location as a string.
	///
	/// The highlighting ends with a newline.
	pub fn source_highlighting(&self, source: &str) -> String {
		let mut output = String::new();
		// Writing to a `String` never fails.
		let _ = self.write_source_highlighting(&mut output, source);
		output
	}
}

/// The template contains a macro that has no value in the value source.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct NoSuchMacro {
	/// The byte offset within the template where the error occurs.
	///
	/// This points to the first character of the macro name in the template.
	pub position: usize,

	/// The name of the macro.
	pub name: String,
}

impl std::error::Error for NoSuchMacro {}

impl std::fmt::Display for NoSuchMacro {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "No value for macro: {}", self.name)
	}
}

fn write_source_highlighting(
	f: &mut impl std::fmt::Write,
	source: &str,
	range: std::ops::Range<usize>,
) -> std::fmt::Result {
	use unicode_width::UnicodeWidthStr;

	let start = line_start(source, range.start);
	let end = line_end(source, range.start);
	let line = &source[start..end];
	if line.width() > 60 {
		return Ok(());
	}
	let range = range.start - start..range.end.min(end) - start;
	write!(f, "  {}\n  ", line)?;
	write_underline(f, line, range)?;
	writeln!(f)
}

fn line_start(source: &str, position: usize) -> usize {
	match source[..position].rfind(['\n', '\r']) {
		Some(line_end) => line_end + 1,
		None => 0,
	}
}

fn line_end(source: &str, position: usize) -> usize {
	match source[position..].find(['\n', '\r']) {
		Some(line_end) => position + line_end,
		None => source.len(),
	}
}

fn write_underline(f: &mut impl std::fmt::Write, line: &str, range: std::ops::Range<usize>) -> std::fmt::Result {
	use unicode_width::UnicodeWidthStr;
	let spaces = line[..range.start].width();
	// Point at the end of the input with a single caret.
	let carets = line[range].width().max(1);
	write!(f, "{}", " ".repeat(spaces))?;
	write!(f, "{}", "^".repeat(carets))?;
	Ok(())
}
