use std::borrow::Cow;

use super::MacroValues;

/// [`MacroValues`] produced by [`fallback()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FallbackValues<Base, Fallback> {
	base: Base,
	fallback: Fallback,
}

impl<Base, Fallback> MacroValues for FallbackValues<Base, Fallback>
where
	Base: MacroValues,
	Fallback: MacroValues,
{
	fn in_string(&self, name: &str) -> Option<Cow<'_, str>> {
		self.base.in_string(name).or_else(|| self.fallback.in_string(name))
	}

	fn not_in_string(&self, name: &str) -> Option<Cow<'_, str>> {
		self.base.not_in_string(name).or_else(|| self.fallback.not_in_string(name))
	}
}

/// Creates a [`MacroValues`] that will first try to find values in `base`, and then attempt to
/// find values in `fallback`.
///
/// The two sources do not need to have the same value type.
///
/// # Example
/// ```rust
/// # use mson::{fallback, MacroValues};
/// let contact_info = [("first_name", "John"), ("last_name", "Doe")];
/// let with_fallback = fallback(contact_info, [("age", 42)]);
///
/// assert_eq!(with_fallback.in_string("first_name").as_deref(), Some("John"));
/// assert_eq!(with_fallback.not_in_string("age").as_deref(), Some("42"));
/// assert_eq!(with_fallback.in_string("middle_name"), None);
/// ```
pub const fn fallback<Base, Fallback>(base: Base, fallback: Fallback) -> FallbackValues<Base, Fallback> {
	FallbackValues { base, fallback }
}
