//! Value sources for macro expansion.
//!
//! A value source gives two renderings of every macro value:
//! one to splice into a JSON string literal, and one to insert as a raw JSON token.
//! The template decides which one to ask for, and inserts it without further escaping.
//!
//! Maps and lists of key-value pairs with [`Display`] values render both from the display form of the value:
//! escaped as JSON string content for string context, and unchanged for raw context.

use std::borrow::{Borrow, Cow};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::hash::{BuildHasher, Hash};

mod fallback;
pub use fallback::*;

mod fn_map;
pub use fn_map::*;

mod json;

/// Trait for types that can provide values for macros.
pub trait MacroValues {
	/// Get the value of a macro, ready to be spliced into a JSON string literal.
	///
	/// The returned text must already be escaped as JSON string content.
	/// Returns [`None`] if the macro has no value.
	fn in_string(&self, name: &str) -> Option<Cow<'_, str>>;

	/// Get the value of a macro, ready to be inserted as a raw JSON token.
	///
	/// Returns [`None`] if the macro has no value.
	fn not_in_string(&self, name: &str) -> Option<Cow<'_, str>>;
}

/// Escape text as the content of a JSON string literal.
///
/// Quotes, backslashes and control characters are escaped.
/// The surrounding quotes are not included.
///
/// # Example
/// ```
/// assert_eq!(mson::escape_json_string("say \"hi\"\n"), r#"say \"hi\"\n"#);
/// ```
pub fn escape_json_string(text: &str) -> String {
	let quoted = serde_json::Value::from(text).to_string();
	quoted[1..quoted.len() - 1].to_owned()
}

/// Render a value for string context using its display form.
#[inline]
pub(crate) fn display_in_string<V: Display + ?Sized>(value: &V) -> Cow<'static, str> {
	Cow::Owned(escape_json_string(&value.to_string()))
}

/// Render a value for raw context using its display form.
#[inline]
pub(crate) fn display_not_in_string<V: Display + ?Sized>(value: &V) -> Cow<'static, str> {
	Cow::Owned(value.to_string())
}

/// Allow using key-value [`slice`]s as [`MacroValues`].
///
/// # Performance
///
/// For a few key-value pairs, where the keys and values are small,
/// this is should be reasonably performant.
///
/// However, for many numbers of key-value pairs, or when the keys or values are large,
/// you may get better performance from a [`HashMap`] or [`BTreeMap`].
///
/// # Example
/// ```rust
/// # use mson::MacroValues;
/// let contact_info = &[("first_name", "John \"Johnny\""), ("age", "42")];
///
/// assert_eq!(contact_info.in_string("first_name").as_deref(), Some(r#"John \"Johnny\""#));
/// assert_eq!(contact_info.not_in_string("age").as_deref(), Some("42"));
/// assert_eq!(contact_info.in_string("last_name"), None);
/// ```
impl<K, V> MacroValues for [(K, V)]
where
	K: Borrow<str>,
	V: Display,
{
	fn in_string(&self, name: &str) -> Option<Cow<'_, str>> {
		find_pair(self, name).map(display_in_string)
	}

	fn not_in_string(&self, name: &str) -> Option<Cow<'_, str>> {
		find_pair(self, name).map(display_not_in_string)
	}
}

fn find_pair<'a, K: Borrow<str>, V>(pairs: &'a [(K, V)], name: &str) -> Option<&'a V> {
	pairs.iter().find_map(|(k, v)| (k.borrow() == name).then_some(v))
}

/// Allow using key-value [`arrays`](`array`) as [`MacroValues`].
impl<K, V, const N: usize> MacroValues for [(K, V); N]
where
	K: Borrow<str>,
	V: Display,
{
	#[inline(always)]
	fn in_string(&self, name: &str) -> Option<Cow<'_, str>> {
		self.as_slice().in_string(name)
	}

	#[inline(always)]
	fn not_in_string(&self, name: &str) -> Option<Cow<'_, str>> {
		self.as_slice().not_in_string(name)
	}
}

/// Allow using key-value [`Vec`]s as [`MacroValues`].
impl<K, V> MacroValues for Vec<(K, V)>
where
	K: Borrow<str>,
	V: Display,
{
	#[inline(always)]
	fn in_string(&self, name: &str) -> Option<Cow<'_, str>> {
		self.as_slice().in_string(name)
	}

	#[inline(always)]
	fn not_in_string(&self, name: &str) -> Option<Cow<'_, str>> {
		self.as_slice().not_in_string(name)
	}
}

impl<K, V> MacroValues for BTreeMap<K, V>
where
	K: Borrow<str> + Ord,
	V: Display,
{
	#[inline]
	fn in_string(&self, name: &str) -> Option<Cow<'_, str>> {
		self.get(name).map(display_in_string)
	}

	#[inline]
	fn not_in_string(&self, name: &str) -> Option<Cow<'_, str>> {
		self.get(name).map(display_not_in_string)
	}
}

impl<K, V, S> MacroValues for HashMap<K, V, S>
where
	K: Borrow<str> + Hash + Eq,
	V: Display,
	S: BuildHasher,
{
	#[inline]
	fn in_string(&self, name: &str) -> Option<Cow<'_, str>> {
		self.get(name).map(display_in_string)
	}

	#[inline]
	fn not_in_string(&self, name: &str) -> Option<Cow<'_, str>> {
		self.get(name).map(display_not_in_string)
	}
}

impl<T> MacroValues for &'_ T
where
	T: ?Sized + MacroValues,
{
	#[inline(always)]
	fn in_string(&self, name: &str) -> Option<Cow<'_, str>> {
		T::in_string(self, name)
	}

	#[inline(always)]
	fn not_in_string(&self, name: &str) -> Option<Cow<'_, str>> {
		T::not_in_string(self, name)
	}
}

impl<T> MacroValues for std::boxed::Box<T>
where
	T: ?Sized + MacroValues,
{
	#[inline(always)]
	fn in_string(&self, name: &str) -> Option<Cow<'_, str>> {
		T::in_string(self, name)
	}

	#[inline(always)]
	fn not_in_string(&self, name: &str) -> Option<Cow<'_, str>> {
		T::not_in_string(self, name)
	}
}

impl<T> MacroValues for std::rc::Rc<T>
where
	T: ?Sized + MacroValues,
{
	#[inline(always)]
	fn in_string(&self, name: &str) -> Option<Cow<'_, str>> {
		T::in_string(self, name)
	}

	#[inline(always)]
	fn not_in_string(&self, name: &str) -> Option<Cow<'_, str>> {
		T::not_in_string(self, name)
	}
}

impl<T> MacroValues for std::sync::Arc<T>
where
	T: ?Sized + MacroValues,
{
	#[inline(always)]
	fn in_string(&self, name: &str) -> Option<Cow<'_, str>> {
		T::in_string(self, name)
	}

	#[inline(always)]
	fn not_in_string(&self, name: &str) -> Option<Cow<'_, str>> {
		T::not_in_string(self, name)
	}
}

/// A value source that never returns any values.
///
/// Useful to expand templates that are known to contain no macro occurrences.
#[derive(Debug)]
pub struct NoValues;

impl MacroValues for NoValues {
	#[inline]
	fn in_string(&self, _name: &str) -> Option<Cow<'_, str>> {
		None
	}

	#[inline]
	fn not_in_string(&self, _name: &str) -> Option<Cow<'_, str>> {
		None
	}
}

/// A value source that takes values from the environment.
#[derive(Debug)]
pub struct Env;

impl MacroValues for Env {
	#[inline]
	fn in_string(&self, name: &str) -> Option<Cow<'_, str>> {
		std::env::var(name).ok().map(|value| display_in_string(&value))
	}

	#[inline]
	fn not_in_string(&self, name: &str) -> Option<Cow<'_, str>> {
		std::env::var(name).ok().map(Cow::Owned)
	}
}
