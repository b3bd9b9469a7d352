use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

use crate::config::{DEFAULT_END_TAG, DEFAULT_START_TAG};
use crate::{Config, TemplateBuf};

/// The serialized form of a template: the source and the configuration to compile it with.
#[derive(Serialize)]
#[serde(rename = "TemplateBuf")]
struct TemplateRef<'a> {
	source: &'a str,
	macros: Vec<&'a str>,
	start_tag: &'a str,
	end_tag: &'a str,
}

#[derive(Deserialize)]
#[serde(rename = "TemplateBuf")]
struct TemplateDef {
	source: String,
	macros: Vec<String>,
	#[serde(default = "default_start_tag")]
	start_tag: String,
	#[serde(default = "default_end_tag")]
	end_tag: String,
}

fn default_start_tag() -> String {
	DEFAULT_START_TAG.into()
}

fn default_end_tag() -> String {
	DEFAULT_END_TAG.into()
}

impl Serialize for TemplateBuf {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let config = self.config();
		TemplateRef {
			source: self.source(),
			macros: config.macro_names().iter().collect(),
			start_tag: config.start_tag(),
			end_tag: config.end_tag(),
		}
		.serialize(serializer)
	}
}

impl<'de> Deserialize<'de> for TemplateBuf {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let def = TemplateDef::deserialize(deserializer)?;
		let config = Config::new(def.macros).with_delimiters(def.start_tag, def.end_tag);
		TemplateBuf::from_string(def.source, &config).map_err(D::Error::custom)
	}
}

#[cfg(test)]
mod test {
	use assert2::{assert, let_assert};
	use serde_test::{assert_de_tokens, assert_de_tokens_error, assert_ser_tokens, assert_tokens, Token};

	use crate::{Config, TemplateBuf};

	const SOURCE: &str = r#"{"hello": "${name}"}"#;

	#[test]
	fn config_ser_de() {
		let config = Config::new(["name", "id"]).with_delimiters("<", ">");

		assert_tokens(&config, &[
			Token::Struct { name: "Config", len: 3 },
			Token::Str("macros"),
			Token::Seq { len: Some(2) },
			Token::Str("name"),
			Token::Str("id"),
			Token::SeqEnd,
			Token::Str("start_tag"),
			Token::Str("<"),
			Token::Str("end_tag"),
			Token::Str(">"),
			Token::StructEnd,
		]);
	}

	#[test]
	fn config_de_default_tags() {
		assert_de_tokens(&Config::new(["b", "a"]), &[
			Token::Struct { name: "Config", len: 1 },
			Token::Str("macros"),
			Token::Seq { len: Some(2) },
			Token::Str("a"),
			Token::Str("b"),
			Token::SeqEnd,
			Token::StructEnd,
		]);
	}

	#[test]
	fn template_buf_ser() {
		let_assert!(Ok(template) = TemplateBuf::from_string(SOURCE.into(), &Config::new(["name"])));

		assert_ser_tokens(&template, &[
			Token::Struct { name: "TemplateBuf", len: 4 },
			Token::Str("source"),
			Token::Str(SOURCE),
			Token::Str("macros"),
			Token::Seq { len: Some(1) },
			Token::Str("name"),
			Token::SeqEnd,
			Token::Str("start_tag"),
			Token::Str("${"),
			Token::Str("end_tag"),
			Token::Str("}"),
			Token::StructEnd,
		]);
	}

	#[test]
	fn template_buf_de() {
		let_assert!(Ok(template) = serde_json::from_str::<TemplateBuf>(r#"{
			"source": "{\"hello\": \"${name}\"}",
			"macros": ["name"]
		}"#));
		assert!(template.source() == SOURCE);
		assert!(template.config() == &Config::new(["name"]));
		assert!(template.expand(&[("name", "world")]).as_deref() == Ok(r#"{"hello": "world"}"#));
	}

	#[test]
	fn template_buf_de_invalid_json() {
		assert_de_tokens_error::<TemplateBuf>(
			&[
				Token::Struct { name: "TemplateBuf", len: 2 },
				Token::Str("source"),
				Token::Str("[${name}"),
				Token::Str("macros"),
				Token::Seq { len: Some(1) },
				Token::Str("name"),
				Token::SeqEnd,
				Token::StructEnd,
			],
			"Unexpected end of input, expected a comma (',') or closing bracket (']')",
		);
	}
}
