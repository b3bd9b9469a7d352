/// The maximum number of macro occurrences in a single template.
///
/// This is also the factor by which the random base of a template is scaled,
/// so every code of a template shares the decimal digits of its base.
pub const MAX_MACRO_COUNT: u64 = 1_000_000_000;

/// Number of decimal digits reserved for the offset of a code relative to its base.
const OFFSET_DIGITS: usize = 9;

/// The numeric code standing in for a macro occurrence while a template is classified.
///
/// The numeric value of a code is `base * 1_000_000_000 + offset`.
/// Its decimal form is the decimal form of the base followed by the offset padded to nine digits.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct MacroCode {
	base: u128,
	offset: u64,
}

impl MacroCode {
	/// Interpret a run of decimal digits as a macro code.
	///
	/// Returns [`None`] if the text can not be the decimal form of any code,
	/// for example because it contains something other than digits,
	/// has a leading zero or is too short or too long.
	pub fn from_digits(digits: &str) -> Option<Self> {
		if digits.len() <= OFFSET_DIGITS || !digits.bytes().all(|c| c.is_ascii_digit()) {
			return None;
		}
		let (base, offset) = digits.split_at(digits.len() - OFFSET_DIGITS);
		if base.starts_with('0') {
			return None;
		}
		Some(Self {
			base: base.parse().ok()?,
			offset: offset.parse().ok()?,
		})
	}

	/// Get the number of bytes in the decimal form of the code.
	pub fn decimal_len(&self) -> usize {
		// The base is never zero.
		self.base.checked_ilog10().unwrap_or(0) as usize + 1 + OFFSET_DIGITS
	}
}

impl std::fmt::Display for MacroCode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}{:0width$}", self.base, self.offset, width = OFFSET_DIGITS)
	}
}

/// Hands out the codes for the macro occurrences of one template.
///
/// All codes start with the decimal digits of a random base that does not occur anywhere in the template,
/// so no code can occur in the template either.
#[derive(Debug)]
pub struct CodeAllocator {
	base: u128,
	next_offset: u64,
}

impl CodeAllocator {
	/// Create an allocator for the given template text using a random base.
	pub fn new(text: &str) -> Self {
		Self::with_generator(text, || uuid::Uuid::new_v4().as_u128())
	}

	/// Create an allocator for the given template text, drawing candidate bases from `generate`.
	///
	/// Candidates that are zero or that occur in `text` in decimal form are rejected,
	/// and a new candidate is drawn.
	pub fn with_generator(text: &str, mut generate: impl FnMut() -> u128) -> Self {
		let base = loop {
			let candidate = generate();
			if candidate != 0 && !text.contains(candidate.to_string().as_str()) {
				break candidate;
			}
			log::trace!("macro code base {candidate} can not be used for this template, drawing a new one");
		};
		Self { base, next_offset: 0 }
	}

	/// Get the code for the next macro occurrence.
	///
	/// Returns [`None`] once [`MAX_MACRO_COUNT`] codes have been handed out.
	pub fn next_code(&mut self) -> Option<MacroCode> {
		if self.next_offset >= MAX_MACRO_COUNT {
			return None;
		}
		let code = MacroCode {
			base: self.base,
			offset: self.next_offset,
		};
		self.next_offset += 1;
		Some(code)
	}
}
