//! Support for deserializing expanded templates.

use serde::de::DeserializeOwned;

use crate::{Config, MacroValues, Template};

/// Parse a struct from a template, after expanding it.
///
/// The expanded template is parsed with [`serde_json`],
/// so it must be strict JSON after expansion.
pub fn from_template<T, M>(template: &Template<'_>, values: &M) -> Result<T, Error>
where
	T: DeserializeOwned,
	M: MacroValues + ?Sized,
{
	let expanded = template.expand(values).map_err(crate::Error::from)?;
	Ok(serde_json::from_str(&expanded)?)
}

/// Parse a struct from template source, after compiling and expanding it.
///
/// This compiles the template, expands it and parses the result with [`serde_json`].
/// If you need to do this many times for the same source,
/// compile a [`Template`] once and use [`from_template()`] instead.
pub fn from_str<T, M>(source: &str, config: &Config, values: &M) -> Result<T, Error>
where
	T: DeserializeOwned,
	M: MacroValues + ?Sized,
{
	let template = Template::new(source, config).map_err(crate::Error::from)?;
	from_template(&template, values)
}

/// Error for parsing JSON from an expanded template.
#[derive(Debug)]
pub enum Error {
	/// An error occurred while parsing JSON.
	Json(serde_json::Error),

	/// An error occurred while compiling or expanding the template.
	Mson(crate::Error),
}

impl From<serde_json::Error> for Error {
	#[inline]
	fn from(other: serde_json::Error) -> Self {
		Self::Json(other)
	}
}

impl From<crate::Error> for Error {
	#[inline]
	fn from(other: crate::Error) -> Self {
		Self::Mson(other)
	}
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
	#[inline]
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Json(e) => std::fmt::Display::fmt(e, f),
			Self::Mson(e) => std::fmt::Display::fmt(e, f),
		}
	}
}
