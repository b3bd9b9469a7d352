use std::collections::HashMap;

use super::tree::{self, Node};
use super::{MacroCode, Segment, Template};
use crate::error::{self, ParseError};
use crate::template::Context;

impl Template {
	/// Classify every macro occurrence as string context or raw context.
	///
	/// The encoded document is parsed as (relaxed) JSON.
	/// Codes that show up as integers or as unquoted object keys were not written inside a string literal.
	/// All other occurrences keep string context.
	pub(super) fn classify(&mut self, source: &str) -> Result<(), ParseError> {
		let codes: HashMap<MacroCode, usize> = self
			.segments
			.iter()
			.enumerate()
			.filter_map(|(index, segment)| match segment {
				Segment::Literal(_) => None,
				Segment::Macro(x) => Some((x.code, index)),
			})
			.collect();

		// Without macros there is nothing to classify, and the template is used verbatim.
		if codes.is_empty() {
			return Ok(());
		}

		let root = tree::parse(&self.encoded).map_err(|e| self.map_syntax_error(source, e))?;

		let mut classifier = Classifier {
			source,
			segments: &self.segments,
			codes: &codes,
			raw: Vec::new(),
		};
		classifier.visit(&root);
		let raw = classifier.raw;

		for index in raw {
			if let Segment::Macro(x) = &mut self.segments[index] {
				log::trace!("macro {:?} at byte {} is used as a raw token", &source[x.name.clone()], x.position);
				x.context = Context::Raw;
			}
		}
		Ok(())
	}

	/// Translate a syntax error in the encoded document to an error in the source.
	fn map_syntax_error(&self, source: &str, error: tree::SyntaxError) -> ParseError {
		let expected = error::ExpectedCharacter {
			message: error.expected,
		};
		let position = self.source_position(source, error.position);
		match (error.found, source[position..].chars().next()) {
			(Some(found), character) => error::UnexpectedCharacter {
				position,
				character: character.unwrap_or(found),
				expected,
			}
			.into(),
			(None, _) => error::UnexpectedEnd {
				position: source.len(),
				expected,
			}
			.into(),
		}
	}

	/// Translate a byte offset in the encoded document to a byte offset in the source.
	///
	/// Offsets inside a code map to the start of the macro occurrence.
	fn source_position(&self, source: &str, encoded_position: usize) -> usize {
		let mut encoded_start = 0;
		for segment in &self.segments {
			let (len, position) = match segment {
				Segment::Literal(x) => (x.range.len(), x.range.start + (encoded_position.saturating_sub(encoded_start))),
				Segment::Macro(x) => (x.code.decimal_len(), x.position),
			};
			if encoded_position < encoded_start + len {
				return position;
			}
			encoded_start += len;
		}
		source.len()
	}
}

/// Walks a parsed encoded document and collects the macro occurrences used as raw tokens.
struct Classifier<'a> {
	source: &'a str,
	segments: &'a [Segment],
	codes: &'a HashMap<MacroCode, usize>,

	/// Indices of the segments in raw context.
	raw: Vec<usize>,
}

impl Classifier<'_> {
	fn visit(&mut self, node: &Node<'_>) {
		match node {
			Node::Object(members) => {
				for (key, value) in members {
					self.visit_key(key);
					self.visit(value);
				}
			},
			Node::Array(items) => {
				for item in items {
					self.visit(item);
				}
			},
			Node::Integer(digits) => {
				if let Some(index) = self.lookup(digits) {
					self.raw.push(index);
				}
			},
			Node::Other => (),
		}
	}

	/// A code used as object key is raw unless the macro occurrence directly follows a quote.
	fn visit_key(&mut self, key: &str) {
		let Some(index) = self.lookup(key) else {
			return;
		};
		if let Segment::Macro(x) = &self.segments[index] {
			let quoted = match self.source[..x.position].chars().next_back() {
				Some(previous) => previous == '"',
				// Nothing precedes the occurrence, which is not a valid key position anyway.
				None => true,
			};
			if !quoted {
				self.raw.push(index);
			}
		}
	}

	/// Find the segment index of the macro occurrence with the given code.
	fn lookup(&self, digits: &str) -> Option<usize> {
		let code = MacroCode::from_digits(digits)?;
		self.codes.get(&code).copied()
	}
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use super::*;
	use crate::template::raw::CodeAllocator;
	use crate::Config;
	use assert2::{assert, check, let_assert};

	use Context::{Raw, String as Str};

	fn contexts(source: &str, config: &Config) -> Vec<Context> {
		let codes = CodeAllocator::with_generator(source, || 31337);
		let_assert!(Ok(template) = Template::parse_with_codes(source, config, codes));
		template.macros(source).map(|x| x.context).collect()
	}

	#[test]
	fn test_string_context() {
		let config = Config::new(["v"]);
		check!(contexts(r#"{"a": "${v}"}"#, &config) == [Str]);
		check!(contexts(r#"{"${v}": 1}"#, &config) == [Str]);
		check!(contexts(r#"["x ${v} y"]"#, &config) == [Str]);
		check!(contexts(r#""${v}""#, &config) == [Str]);
	}

	#[test]
	fn test_raw_context() {
		let config = Config::new(["v"]);
		check!(contexts("${v}", &config) == [Raw]);
		check!(contexts(r#"{"a": ${v}}"#, &config) == [Raw]);
		check!(contexts(r#"[1, ${v}, "x"]"#, &config) == [Raw]);
		check!(contexts(r#"{${v}: "x"}"#, &config) == [Raw]);
		check!(contexts("{\n\t${v}: 1}", &config) == [Raw]);
	}

	#[test]
	fn test_key_and_value() {
		let config = Config::new(["k", "lit"]);
		assert!(contexts(r#"{${k}: ${k}, "lit": 1}"#, &config) == [
			Raw,
			Raw,
		]);
	}

	#[test]
	fn test_mixed() {
		let config = Config::new(["raw", "str"]);
		assert!(contexts(r#"{"a": [${raw}, "${str}"], ${raw}: {"${str}": "${str}${str}"}}"#, &config) == [
			Raw,
			Str,
			Raw,
			Str,
			Str,
			Str,
		]);
	}

	#[test]
	fn test_part_of_larger_token() {
		let config = Config::new(["v"]);
		// The codes merge into a single number that is not a code.
		check!(contexts("[${v}${v}]", &config) == [
			Str,
			Str,
		]);
		// Fractions and negative numbers are never codes.
		check!(contexts("[${v}.5, -${v}]", &config) == [
			Str,
			Str,
		]);
	}

	#[test]
	fn test_literal_numbers_are_not_codes() {
		let config = Config::new(["v"]);
		let source = "[31337000000000, 31337000000001, ${v}]";
		// The first candidate base occurs in the source, so it is rejected.
		let mut candidates = [31337, 4242].into_iter();
		let codes = CodeAllocator::with_generator(source, || candidates.next().unwrap_or(1));
		let_assert!(Ok(template) = Template::parse_with_codes(source, &config, codes));
		assert!(template.encoded() == "[31337000000000, 31337000000001, 4242000000000]");
		let contexts: Vec<_> = template.macros(source).map(|x| x.context).collect();
		assert!(contexts == [Raw]);
	}

	#[test]
	fn test_no_macros_is_not_parsed() {
		let config = Config::new(["v"]);
		let_assert!(Ok(template) = Template::parse("not json at all ${w}", &config));
		assert!(template.as_literal("not json at all ${w}") == Some("not json at all ${w}"));
	}

	#[test]
	fn test_syntax_error_positions() {
		let config = Config::new(["v"]);

		let source = r#"{"a": ${v} "b"}"#;
		let_assert!(Err(ParseError::UnexpectedCharacter(e)) = Template::parse(source, &config));
		assert!(e.position == 11);
		assert!(e.character == '"');
		assert!(e.expected.message() == "a comma (',') or closing brace ('}')");

		let source = r#"["x" ${v}]"#;
		let_assert!(Err(ParseError::UnexpectedCharacter(e)) = Template::parse(source, &config));
		assert!(e.position == 5);
		assert!(e.character == '$');

		let source = r#"{"a": [${v}"#;
		let_assert!(Err(ParseError::UnexpectedEnd(e)) = Template::parse(source, &config));
		assert!(e.position == source.len());
	}
}
