use std::borrow::Cow;

use serde_json::{Map, Value};

use super::{escape_json_string, MacroValues};

/// Use the members of a JSON object as macro values.
///
/// In string context, string values are inserted as their (escaped) contents,
/// and other values as the escaped JSON text.
/// In raw context, every value is inserted as JSON text, so strings keep their quotes.
///
/// # Example
/// ```rust
/// # use mson::{Config, Template};
/// let config = Config::new(["key", "value"]);
/// let template = Template::new(r#"{"${key}": ${value}}"#, &config)?;
/// let values = serde_json::json!({
///     "key": "quote\"d",
///     "value": ["a", 1],
/// });
/// assert_eq!(template.expand(&values)?, r#"{"quote\"d": ["a",1]}"#);
/// # Ok::<(), mson::Error>(())
/// ```
impl MacroValues for Map<String, Value> {
	fn in_string(&self, name: &str) -> Option<Cow<'_, str>> {
		let value = match self.get(name)? {
			Value::String(value) => escape_json_string(value),
			other => escape_json_string(&other.to_string()),
		};
		Some(Cow::Owned(value))
	}

	fn not_in_string(&self, name: &str) -> Option<Cow<'_, str>> {
		self.get(name).map(|value| Cow::Owned(value.to_string()))
	}
}

/// Use the members of a JSON object as macro values.
///
/// Values other than objects have no members, and so give no values at all.
/// See the implementation for [`Map`] for the renderings.
impl MacroValues for Value {
	fn in_string(&self, name: &str) -> Option<Cow<'_, str>> {
		self.as_object()?.in_string(name)
	}

	fn not_in_string(&self, name: &str) -> Option<Cow<'_, str>> {
		self.as_object()?.not_in_string(name)
	}
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use super::*;
	use assert2::{check, let_assert};
	use serde_json::json;

	#[test]
	fn test_renderings() {
		let values = json!({
			"text": "a \"b\"",
			"number": 12.5,
			"list": [1, "x"],
			"nothing": null,
		});

		check!(values.in_string("text").as_deref() == Some(r#"a \"b\""#));
		check!(values.not_in_string("text").as_deref() == Some(r#""a \"b\"""#));
		check!(values.in_string("number").as_deref() == Some("12.5"));
		check!(values.not_in_string("number").as_deref() == Some("12.5"));
		check!(values.in_string("list").as_deref() == Some(r#"[1,\"x\"]"#));
		check!(values.not_in_string("list").as_deref() == Some(r#"[1,"x"]"#));
		check!(values.not_in_string("nothing").as_deref() == Some("null"));
		check!(values.in_string("missing") == None);
	}

	#[test]
	fn test_not_an_object() {
		let values = json!(["text"]);
		check!(values.in_string("text") == None);
		check!(values.not_in_string("0") == None);
	}

	#[test]
	fn test_map() {
		let_assert!(Value::Object(map) = json!({"a": true}));
		check!(map.not_in_string("a").as_deref() == Some("true"));
	}
}
