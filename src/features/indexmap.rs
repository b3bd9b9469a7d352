use std::borrow::{Borrow, Cow};
use std::fmt::Display;
use std::hash::{BuildHasher, Hash};

use indexmap::IndexMap;

use crate::map::{display_in_string, display_not_in_string};
use crate::MacroValues;

impl<K, V, S> MacroValues for IndexMap<K, V, S>
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
