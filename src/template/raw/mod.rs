mod classify;
mod code;
mod expand;
mod parse;
mod tree;

pub use code::{CodeAllocator, MacroCode, MAX_MACRO_COUNT};

use super::{Context, MacroRef};
use crate::Config;

/// Raw template that doesn't track the original source.
///
/// Internally, this keeps a bunch of offsets into the original source.
#[derive(Clone)]
pub struct Template {
	/// The individual segments that make up the template, in order of appearance.
	segments: Vec<Segment>,

	/// The source with every macro occurrence replaced by its code.
	///
	/// Only used for classification, but kept for inspection.
	encoded: String,

	/// The configuration used to compile the template.
	config: Config,
}

/// One piece of a compiled template.
#[derive(Clone)]
pub enum Segment {
	/// A literal string to be used verbatim from the original source.
	Literal(Literal),

	/// A macro occurrence to be substituted at expansion time.
	Macro(Macro),
}

/// A literal string to be used verbatim from the original source.
#[derive(Clone)]
pub struct Literal {
	/// The range of the literal in the original source.
	range: std::ops::Range<usize>,
}

/// A macro occurrence to be substituted at expansion time.
#[derive(Clone)]
pub struct Macro {
	/// The range in the source defining the name of the macro.
	///
	/// Used for look-up in the value source at expansion time.
	name: std::ops::Range<usize>,

	/// The position of the start tag of the occurrence in the source.
	position: usize,

	/// The unique code standing in for this occurrence in the encoded document.
	code: MacroCode,

	/// Whether the value must be rendered for a string literal or as a raw token.
	context: Context,
}

impl Template {
	/// Get the configuration the template was compiled with.
	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Get the encoded document used to classify the macro occurrences.
	pub fn encoded(&self) -> &str {
		&self.encoded
	}

	/// Get the literal text of the template if it contains no macro occurrences at all.
	pub fn as_literal<'a>(&self, source: &'a str) -> Option<&'a str> {
		match self.segments.as_slice() {
			[] => Some(""),
			[Segment::Literal(x)] => Some(&source[x.range.clone()]),
			_ => None,
		}
	}

	/// Iterate over all macro occurrences in order of appearance.
	pub fn macros<'a>(&'a self, source: &'a str) -> impl Iterator<Item = MacroRef<'a>> + 'a {
		self.segments.iter().filter_map(move |segment| match segment {
			Segment::Literal(_) => None,
			Segment::Macro(x) => Some(MacroRef {
				name: &source[x.name.clone()],
				position: x.position,
				code: x.code,
				context: x.context,
			}),
		})
	}
}
