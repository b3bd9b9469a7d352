//! JSON templates with context-aware macro expansion.
//!
//! A template is JSON text with macro occurrences like `${name}`.
//! A macro occurrence can sit inside a string literal (`"Hello ${name}!"`),
//! or take the place of a whole token: an object key (`{${key}: 1}`) or a value (`[${list}]`).
//! When a template is compiled, every occurrence is classified automatically,
//! and at expansion time the value is rendered accordingly:
//! escaped as string content inside string literals, and inserted verbatim elsewhere.
//!
//! # Features
//!
//! * Compile once, expand many times with [`Template`] or [`TemplateBuf`].
//! * Configurable start and end tags, `${` and `}` by default.
//! * Only known macro names are expanded, everything else is left alone.
//! * Use maps with [`Display`][std::fmt::Display] values, JSON objects or your own [`MacroValues`] as value source.
//! * Deserialize expanded templates with `serde_json` (optional, requires the `json` feature).
//!
//! # Examples
//!
//! The [`expand()`][expand] function can be used to compile and expand a template in one go.
//!
//! ```
//! # fn main() -> Result<(), mson::Error> {
//! # use std::collections::HashMap;
//! let config = mson::Config::new(["name", "tags"]);
//! let mut values = HashMap::new();
//! values.insert("name", r#"Robert "Bob" Smith"#);
//! values.insert("tags", r#"["admin", "user"]"#);
//! assert_eq!(
//!   mson::expand(r#"{"name": "${name}", "tags": ${tags}}"#, &config, &values)?,
//!   r#"{"name": "Robert \"Bob\" Smith", "tags": ["admin", "user"]}"#,
//! );
//! # Ok(())
//! # }
//! ```
//!
//! A compiled [`Template`] can be expanded many times.
//!
//! ```
//! # fn main() -> Result<(), mson::Error> {
//! let config = mson::Config::new(["key", "value"]);
//! let template = mson::Template::new(r#"{${key}: "${value}"}"#, &config)?;
//! assert_eq!(template.expand(&[("key", r#""a""#), ("value", "1")])?, r#"{"a": "1"}"#);
//! assert_eq!(template.expand(&[("key", r#""b""#), ("value", "2")])?, r#"{"b": "2"}"#);
//! # Ok(())
//! # }
//! ```
#![warn(missing_docs, missing_debug_implementations)]
#![cfg_attr(feature = "doc-cfg", feature(doc_cfg))]

pub mod error;
pub use error::Error;

mod config;
pub use config::*;

pub mod map;
pub use map::*;

mod template;
pub use template::*;

mod features;
#[allow(unused_imports)] // Might be unused if no feature is enabled.
pub use features::*;

/// Compile a template and expand it.
///
/// Macro occurrences have the form `${name}` by default, where `name` is one of the names in the configuration.
/// Occurrences inside string literals get the value escaped as string content,
/// other occurrences get the value inserted verbatim.
///
/// You can pass a [`HashMap`][std::collections::HashMap] or [`BTreeMap`][std::collections::BTreeMap] with values that implement [`Display`][std::fmt::Display],
/// a [`serde_json::Value`] object, or any other [`MacroValues`] implementation as the `values` parameter.
///
/// If you expand the same source more than once, compile a [`Template`] once and call [`Template::expand()`] instead.
pub fn expand<M>(source: &str, config: &Config, values: &M) -> Result<String, Error>
where
	M: MacroValues + ?Sized,
{
	let template = Template::new(source, config)?;
	Ok(template.expand(values)?)
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use std::collections::{BTreeMap, HashMap};
	use assert2::{assert, check, let_assert};
	use super::*;

	#[test]
	fn test_expand() {
		let config = Config::new([
			"asJsonAttrName_asJsonAttrValue",
			"inJsonAttrName_inJsonAttrValue",
		]);
		let source = r#"
			{
				${asJsonAttrName_asJsonAttrValue}: ${asJsonAttrName_asJsonAttrValue},
				"${inJsonAttrName_inJsonAttrValue}": "${inJsonAttrName_inJsonAttrValue}",

				"${notMacro}": "notMacro"
			}
		"#;
		let expected = r#"
			{
				" \"asJsonAttrName_asJsonAttrValue\" ": " \"asJsonAttrName_asJsonAttrValue\" ",
				" \"inJsonAttrName_inJsonAttrValue\" ": " \"inJsonAttrName_inJsonAttrValue\" ",

				"${notMacro}": "notMacro"
			}
		"#;

		let mut values: HashMap<&str, &str> = HashMap::new();
		values.insert("asJsonAttrName_asJsonAttrValue", r#"" \"asJsonAttrName_asJsonAttrValue\" ""#);
		values.insert("inJsonAttrName_inJsonAttrValue", r#" "inJsonAttrName_inJsonAttrValue" "#);

		let_assert!(Ok(expanded) = expand(source, &config, &values));
		assert!(expanded == expected);
	}

	#[test]
	fn test_identity_without_macros() {
		let config = Config::new(["x"]);
		for source in ["", "plain text", r#"{"a": [1, 2.5, "${y}"]}"#, "{ not json", "${x"] {
			let_assert!(Ok(template) = Template::new(source, &config));
			check!(template.expand(&NoValues).as_deref() == Ok(source));
			check!(let Ok(_) = expand(source, &config, &NoValues));
		}
	}

	#[test]
	fn test_single_string_macro() {
		let config = Config::new(["x"]);
		check!(let Ok(r#""hello""#) = expand(r#""${x}""#, &config, &[("x", "hello")]).as_deref());
	}

	#[test]
	fn test_key_and_value_in_any_order() {
		let source = r#"{${k}: ${k}, "lit": 1}"#;
		for config in [Config::new(["k", "lit"]), Config::new(["lit", "k"])] {
			let_assert!(Ok(template) = Template::new(source, &config));
			check!(template.macros().all(|x| x.context() == Context::Raw));
			check!(let Ok(r#"{7: 7, "lit": 1}"#) = template.expand(&[("k", 7)]).as_deref());
		}
	}

	#[test]
	fn test_escaped_value_is_valid_json() {
		let config = Config::new(["v"]);
		let value = r#"value with "quotes""#;
		let_assert!(Ok(expanded) = expand(r#"{"a": "${v}"}"#, &config, &[("v", value)]));
		assert!(expanded == r#"{"a": "value with \"quotes\""}"#);
		let_assert!(Ok(parsed) = serde_json::from_str::<serde_json::Value>(&expanded));
		assert!(parsed["a"] == value);
	}

	#[test]
	fn test_compile_twice() {
		let config = Config::new(["a", "b"]);
		let source = r#"{"x": ${a}, "y": "${b}", ${b}: [${a}, "${a}"]}"#;
		let_assert!(Ok(first) = Template::new(source, &config));
		let_assert!(Ok(second) = Template::new(source, &config));

		let mut values = BTreeMap::new();
		values.insert("a", "1");
		values.insert("b", "\"q\"");
		let_assert!(Ok(first) = first.expand(&values));
		let_assert!(Ok(second) = second.expand(&values));
		assert!(first == second);
		assert!(first == r#"{"x": 1, "y": "\"q\"", "q": [1, "1"]}"#);
	}

	#[test]
	fn test_unknown_name_pass_through() {
		let config = Config::new(["known"]);
		let source = r#"{"a": "${unknown}", "b": ${known}}"#;
		check!(let Ok(r#"{"a": "${unknown}", "b": true}"#) = expand(source, &config, &[("known", true)]).as_deref());
	}

	#[test]
	fn test_numeric_literals_in_template() {
		let config = Config::new(["v"]);
		let source = "[1234567890123456789012345678901234567890, ${v}, 98765432109876543210]";
		let_assert!(Ok(template) = Template::new(source, &config));
		let macros: Vec<_> = template.macros().collect();
		let_assert!([only] = macros.as_slice());
		assert!(!source.contains(&only.code().to_string()));
		check!(let Ok("[1234567890123456789012345678901234567890, 5, 98765432109876543210]") = template.expand(&[("v", 5)]).as_deref());
	}

	#[test]
	fn test_custom_delimiters() {
		let config = Config::new(["name", "n"]).with_delimiters("{{", "}}");
		let source = r#"{"greeting": "Hello {{name}}!", "count": {{n}}, "literal": "${name}"}"#;
		let values = [("name", "\"W\""), ("n", "3")];
		check!(let Ok(r#"{"greeting": "Hello \"W\"!", "count": 3, "literal": "${name}"}"#) = expand(source, &config, &values).as_deref());
	}

	#[test]
	fn test_parse_error() {
		let config = Config::new(["v"]);
		let source = r#"{"a": ${v} "b": 1}"#;
		let_assert!(Err(e) = expand(source, &config, &NoValues));
		assert!(e.to_string() == "Unexpected character: '\"', expected a comma (',') or closing brace ('}')");
		assert!(e.source_highlighting(source) == concat!(
			"  {\"a\": ${v} \"b\": 1}\n",
			"             ^\n",
		));
	}

	#[test]
	fn test_empty_delimiter() {
		let config = Config::new(["v"]).with_end_tag("");
		let_assert!(Err(Error::Parse(e)) = expand("${v}", &config, &NoValues));
		assert!(e.to_string() == "Empty macro end tag");
	}

	#[test]
	fn test_no_such_macro() {
		let config = Config::new(["name"]);
		let source = r#"{"hello": "${name}"}"#;
		let_assert!(Err(e) = expand(source, &config, &NoValues));
		assert!(e.to_string() == "No value for macro: name");
		assert!(e.source_highlighting(source) == concat!(
			"  {\"hello\": \"${name}\"}\n",
			"               ^^^^\n",
		));
	}

	#[test]
	fn test_dyn_macro_values() {
		let mut values = BTreeMap::new();
		values.insert(String::from("aap"), String::from("noot"));
		let values: &dyn MacroValues = &values;

		let config = Config::new(["aap"]);
		let_assert!(Ok(expanded) = expand(r#"["${aap}"]"#, &config, values));
		assert!(expanded == r#"["noot"]"#);
	}

	#[test]
	fn test_shared_between_threads() {
		let config = Config::new(["id"]);
		let template = std::sync::Arc::new(TemplateBuf::from_string(r#"{"id": ${id}, "name": "n${id}"}"#.into(), &config).unwrap());
		let handles: Vec<_> = (0..4)
			.map(|id| {
				let template = template.clone();
				std::thread::spawn(move || template.expand(&[("id", id)]))
			})
			.collect();
		for (id, handle) in handles.into_iter().enumerate() {
			let_assert!(Ok(Ok(expanded)) = handle.join());
			assert!(expanded == format!(r#"{{"id": {id}, "name": "n{id}"}}"#));
		}
	}
}
