use super::{CodeAllocator, Literal, Macro, Segment, Template, MAX_MACRO_COUNT};
use crate::error::{self, ParseError};
use crate::template::Context;
use crate::Config;

impl Template {
	/// Compile a template from the source text.
	///
	/// This splits the source in literals and macro occurrences,
	/// and classifies every macro occurrence as string context or raw context.
	pub fn parse(source: &str, config: &Config) -> Result<Self, ParseError> {
		Self::parse_with_codes(source, config, CodeAllocator::new(source))
	}

	/// Compile a template using the given code allocator.
	///
	/// The allocator must have been created for the same source text.
	pub fn parse_with_codes(source: &str, config: &Config, mut codes: CodeAllocator) -> Result<Self, ParseError> {
		config.validate()?;

		let segments = tokenize(source, config, &mut codes)?;
		let encoded = encode(source, &segments);
		let mut template = Self {
			segments,
			encoded,
			config: config.clone(),
		};
		template.classify(source)?;

		log::debug!(
			"compiled template of {} bytes into {} segments with {} macro occurrences ({} raw)",
			source.len(),
			template.segments.len(),
			template.macros(source).count(),
			template.macros(source).filter(|x| x.context == Context::Raw).count(),
		);
		Ok(template)
	}
}

/// Split the source into literals and macro occurrences.
///
/// Macro occurrences start out in string context.
fn tokenize(source: &str, config: &Config, codes: &mut CodeAllocator) -> Result<Vec<Segment>, ParseError> {
	// Validated by the caller, so the start tag has a first byte.
	let first_byte = config.start_tag().as_bytes()[0];

	let mut segments = Vec::with_capacity(1);
	let mut literal_start = 0;
	let mut finger = 0;
	while finger < source.len() {
		// The first byte of a UTF-8 sequence never occurs inside another sequence,
		// so every candidate is on a character boundary.
		let candidate = match memchr::memchr(first_byte, &source.as_bytes()[finger..]) {
			Some(x) => finger + x,
			None => break,
		};

		let (name, end) = match match_macro(source, candidate, config) {
			Some(x) => x,
			// Not a known macro, so the start tag is literal text.
			None => {
				finger = candidate + 1;
				continue;
			},
		};

		if literal_start != candidate {
			segments.push(Segment::Literal(Literal {
				range: literal_start..candidate,
			}));
		}

		let code = codes.next_code().ok_or(error::TooManyMacros {
			position: candidate,
			limit: MAX_MACRO_COUNT,
		})?;
		segments.push(Segment::Macro(Macro {
			name,
			position: candidate,
			code,
			context: Context::String,
		}));

		finger = end;
		literal_start = end;
	}

	if literal_start < source.len() {
		segments.push(Segment::Literal(Literal {
			range: literal_start..source.len(),
		}));
	}

	Ok(segments)
}

/// Try to match a macro occurrence at the given position.
///
/// Macro names are tried in the order of [`Config::macro_names()`],
/// which puts longer names first.
///
/// Returns the range of the macro name and the index of the byte after the end tag.
fn match_macro(source: &str, position: usize, config: &Config) -> Option<(std::ops::Range<usize>, usize)> {
	let after_start = source[position..].strip_prefix(config.start_tag())?;
	let name_start = position + config.start_tag().len();

	config.macro_names().iter().find_map(|name| {
		let after_name = after_start.strip_prefix(name)?;
		if !after_name.starts_with(config.end_tag()) {
			return None;
		}
		let name_end = name_start + name.len();
		Some((name_start..name_end, name_end + config.end_tag().len()))
	})
}

/// Build the encoded document: the source with every macro occurrence replaced by its code.
fn encode(source: &str, segments: &[Segment]) -> String {
	let mut encoded = String::with_capacity(source.len() + source.len() / 2);
	for segment in segments {
		match segment {
			Segment::Literal(x) => encoded.push_str(&source[x.range.clone()]),
			Segment::Macro(x) => encoded.push_str(&x.code.to_string()),
		}
	}
	encoded
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use super::*;
	use assert2::{assert, check, let_assert};

	fn codes(source: &str) -> CodeAllocator {
		CodeAllocator::with_generator(source, || 7)
	}

	/// Describe the segments as (is_macro, text) pairs.
	fn describe<'a>(source: &'a str, segments: &[Segment]) -> Vec<(bool, &'a str)> {
		segments.iter()
			.map(|segment| match segment {
				Segment::Literal(x) => (false, &source[x.range.clone()]),
				Segment::Macro(x) => (true, &source[x.name.clone()]),
			})
			.collect()
	}

	#[test]
	fn test_tokenize() {
		let config = Config::new(["a", "bb"]);
		let source = r#"{"x": "${a}", ${bb}: [${a}]}"#;
		let_assert!(Ok(segments) = tokenize(source, &config, &mut codes(source)));
		assert!(describe(source, &segments) == [
			(false, r#"{"x": ""#),
			(true, "a"),
			(false, r#"", "#),
			(true, "bb"),
			(false, ": ["),
			(true, "a"),
			(false, "]}"),
		]);
	}

	#[test]
	fn test_tokenize_positions_and_codes() {
		let config = Config::new(["a"]);
		let source = "[${a},${a}]";
		let_assert!(Ok(segments) = tokenize(source, &config, &mut codes(source)));
		let_assert!([_, Segment::Macro(first), _, Segment::Macro(second), _] = segments.as_slice());
		assert!(first.position == 1);
		assert!(first.name == (3..4));
		assert!(first.code.to_string() == "7000000000");
		assert!(second.position == 6);
		assert!(second.code.to_string() == "7000000001");
	}

	#[test]
	fn test_unknown_names_are_literal() {
		let config = Config::new(["known"]);
		let source = "${unknown} ${known ${ $${known}";
		let_assert!(Ok(segments) = tokenize(source, &config, &mut codes(source)));
		assert!(describe(source, &segments) == [
			(false, "${unknown} ${known ${ $"),
			(true, "known"),
		]);
	}

	#[test]
	fn test_longest_name_wins() {
		let source = "${ab}${a}";
		for config in [Config::new(["a", "ab"]), Config::new(["ab", "a"])] {
			let_assert!(Ok(segments) = tokenize(source, &config, &mut codes(source)));
			check!(describe(source, &segments) == [(true, "ab"), (true, "a")]);
		}

		// Both names are followed by an end tag here.
		let source = "<<a>b>>";
		let config = Config::new(["a", "a>b"]).with_delimiters("<<", ">");
		let_assert!(Ok(segments) = tokenize(source, &config, &mut codes(source)));
		check!(describe(source, &segments) == [(true, "a>b"), (false, ">")]);
	}

	#[test]
	fn test_custom_delimiters() {
		let config = Config::new(["név"]).with_delimiters("«", "»");
		let source = "[«név», ${név}]";
		let_assert!(Ok(segments) = tokenize(source, &config, &mut codes(source)));
		assert!(describe(source, &segments) == [
			(false, "["),
			(true, "név"),
			(false, ", ${név}]"),
		]);
	}

	#[test]
	fn test_encode() {
		let config = Config::new(["k"]);
		let source = r#"{${k}: "${k}"}"#;
		let_assert!(Ok(segments) = tokenize(source, &config, &mut codes(source)));
		assert!(encode(source, &segments) == r#"{7000000000: "7000000001"}"#);
	}

	#[test]
	fn test_empty_delimiters() {
		let config = Config::new(["a"]).with_start_tag("");
		let_assert!(Err(ParseError::EmptyDelimiter(e)) = Template::parse("${a}", &config));
		assert!(e.delimiter == error::Delimiter::Start);

		let config = Config::new(["a"]).with_end_tag("");
		let_assert!(Err(ParseError::EmptyDelimiter(e)) = Template::parse("${a}", &config));
		assert!(e.delimiter == error::Delimiter::End);
	}
}
