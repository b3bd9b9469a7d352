use super::{Macro, Segment, Template};
use crate::error::{self, ExpandError};
use crate::template::Context;
use crate::MacroValues;

/// Common `expand` prototype, e.g., for macro occurrences and templates
pub trait Expand {
	/// Expand into the output string.
	fn expand<M>(&self, output: &mut String, source: &str, values: &M) -> Result<(), ExpandError>
	where
		M: MacroValues + ?Sized;
}

impl Expand for Template {
	/// Expand the template into the output string.
	fn expand<M>(&self, output: &mut String, source: &str, values: &M) -> Result<(), ExpandError>
	where
		M: MacroValues + ?Sized,
	{
		// Expand all segments one by one.
		for segment in &self.segments {
			match segment {
				Segment::Literal(x) => output.push_str(&source[x.range.clone()]),
				Segment::Macro(x) => x.expand(output, source, values)?,
			}
		}
		Ok(())
	}
}

impl Expand for Macro {
	/// Expand the macro occurrence into the output string.
	///
	/// The value is requested in the rendering that matches the context of the occurrence,
	/// and is copied to the output as-is.
	fn expand<M>(&self, output: &mut String, source: &str, values: &M) -> Result<(), ExpandError>
	where
		M: MacroValues + ?Sized,
	{
		let name = &source[self.name.clone()];
		let value = match self.context {
			Context::String => values.in_string(name),
			Context::Raw => values.not_in_string(name),
		};

		match value {
			Some(value) => {
				output.push_str(&value);
				Ok(())
			},
			None => Err(ExpandError::NoSuchMacro(error::NoSuchMacro {
				position: self.name.start,
				name: name.to_owned(),
			})),
		}
	}
}

impl Template {
	/// Expand the template into a new string.
	///
	/// A template without macro occurrences is returned as-is.
	pub fn expand_to_string<M>(&self, source: &str, values: &M) -> Result<String, ExpandError>
	where
		M: MacroValues + ?Sized,
	{
		if let Some(literal) = self.as_literal(source) {
			return Ok(literal.to_owned());
		}

		let mut output = String::with_capacity(source.len() + source.len() / 10);
		Expand::expand(self, &mut output, source, values)?;
		Ok(output)
	}
}
