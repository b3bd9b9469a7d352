use std::borrow::Cow;
use std::fmt::Display;

use super::{display_in_string, display_not_in_string, MacroValues};

/// [`MacroValues`] produced by [`from_fn()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FnValues<F> {
	func: F,
}

impl<F, V> MacroValues for FnValues<F>
where
	F: Fn(&str) -> Option<V>,
	V: Display,
{
	#[inline]
	fn in_string(&self, name: &str) -> Option<Cow<'_, str>> {
		(self.func)(name).map(|value| display_in_string(&value))
	}

	#[inline]
	fn not_in_string(&self, name: &str) -> Option<Cow<'_, str>> {
		(self.func)(name).map(|value| display_not_in_string(&value))
	}
}

/// Creates a [`MacroValues`] that delegates to the given function.
///
/// Both renderings are derived from the display form of the returned value.
///
/// # Example
/// ```rust
/// # use mson::{from_fn, MacroValues};
/// let contact_info = from_fn(|name| match name {
///     "first_name" => Some("\"John\""),
///     "last_name" => Some("Doe"),
///     _ => None,
/// });
///
/// assert_eq!(contact_info.in_string("first_name").as_deref(), Some(r#"\"John\""#));
/// assert_eq!(contact_info.not_in_string("first_name").as_deref(), Some("\"John\""));
/// assert_eq!(contact_info.in_string("middle_name"), None);
/// ```
pub const fn from_fn<F, V>(func: F) -> FnValues<F>
where
	F: Fn(&str) -> Option<V>,
	V: Display,
{
	FnValues { func }
}
