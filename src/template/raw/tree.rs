//! A relaxed JSON parser that only keeps what classification needs.
//!
//! Accepts strict JSON plus unquoted object keys.

/// Maximum nesting depth of objects and arrays.
const MAX_DEPTH: usize = 128;

/// A node of a parsed document.
#[derive(Debug, PartialEq, Eq)]
pub enum Node<'a> {
	/// An object with its members in order of appearance.
	///
	/// Keys are kept exactly as written, without quotes and without resolving escape sequences.
	Object(Vec<(&'a str, Node<'a>)>),

	/// An array.
	Array(Vec<Node<'a>>),

	/// An integer without fraction or exponent, kept as written.
	Integer(&'a str),

	/// A string, a number with fraction or exponent, a boolean or null.
	Other,
}

/// A syntax error in the parsed document.
#[derive(Debug, PartialEq, Eq)]
pub struct SyntaxError {
	/// The byte offset in the document where the error occurs.
	pub position: usize,

	/// The character found at `position`, or [`None`] at the end of the document.
	pub found: Option<char>,

	/// A human readable message about what was expected instead.
	pub expected: &'static str,
}

/// Parse a document.
pub fn parse(input: &str) -> Result<Node<'_>, SyntaxError> {
	let mut parser = Parser { input, finger: 0 };
	let root = parser.parse_value(MAX_DEPTH)?;
	parser.skip_whitespace();
	if parser.finger < input.len() {
		return Err(parser.unexpected("end of input"));
	}
	Ok(root)
}

struct Parser<'a> {
	input: &'a str,
	finger: usize,
}

impl<'a> Parser<'a> {
	fn peek(&self) -> Option<u8> {
		self.input.as_bytes().get(self.finger).copied()
	}

	fn skip_whitespace(&mut self) {
		while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
			self.finger += 1;
		}
	}

	fn unexpected(&self, expected: &'static str) -> SyntaxError {
		SyntaxError {
			position: self.finger,
			found: self.input[self.finger..].chars().next(),
			expected,
		}
	}

	/// Consume `byte` after optional whitespace.
	fn expect(&mut self, byte: u8, expected: &'static str) -> Result<(), SyntaxError> {
		self.skip_whitespace();
		if self.peek() == Some(byte) {
			self.finger += 1;
			Ok(())
		} else {
			Err(self.unexpected(expected))
		}
	}

	fn parse_value(&mut self, depth: usize) -> Result<Node<'a>, SyntaxError> {
		self.skip_whitespace();
		match self.peek() {
			Some(b'{') | Some(b'[') if depth == 0 => Err(self.unexpected("less deeply nested data")),
			Some(b'{') => self.parse_object(depth - 1),
			Some(b'[') => self.parse_array(depth - 1),
			Some(b'"') => {
				self.parse_string()?;
				Ok(Node::Other)
			},
			Some(b'-' | b'0'..=b'9') => self.parse_number(),
			Some(b't') => self.parse_word("true"),
			Some(b'f') => self.parse_word("false"),
			Some(b'n') => self.parse_word("null"),
			_ => Err(self.unexpected("a value")),
		}
	}

	fn parse_object(&mut self, depth: usize) -> Result<Node<'a>, SyntaxError> {
		// Opening brace.
		self.finger += 1;
		let mut members = Vec::new();

		self.skip_whitespace();
		if self.peek() == Some(b'}') {
			self.finger += 1;
			return Ok(Node::Object(members));
		}

		loop {
			self.skip_whitespace();
			let key = self.parse_key()?;
			self.expect(b':', "a colon (':')")?;
			let value = self.parse_value(depth)?;
			members.push((key, value));

			self.skip_whitespace();
			match self.peek() {
				Some(b',') => self.finger += 1,
				Some(b'}') => {
					self.finger += 1;
					return Ok(Node::Object(members));
				},
				_ => return Err(self.unexpected("a comma (',') or closing brace ('}')")),
			}
		}
	}

	fn parse_array(&mut self, depth: usize) -> Result<Node<'a>, SyntaxError> {
		// Opening bracket.
		self.finger += 1;
		let mut items = Vec::new();

		self.skip_whitespace();
		if self.peek() == Some(b']') {
			self.finger += 1;
			return Ok(Node::Array(items));
		}

		loop {
			items.push(self.parse_value(depth)?);

			self.skip_whitespace();
			match self.peek() {
				Some(b',') => self.finger += 1,
				Some(b']') => {
					self.finger += 1;
					return Ok(Node::Array(items));
				},
				_ => return Err(self.unexpected("a comma (',') or closing bracket (']')")),
			}
		}
	}

	/// Parse a quoted or unquoted object key.
	fn parse_key(&mut self) -> Result<&'a str, SyntaxError> {
		match self.peek() {
			Some(b'"') => self.parse_string(),
			Some(c) if is_key_byte(c) => {
				let start = self.finger;
				while self.peek().is_some_and(is_key_byte) {
					self.finger += 1;
				}
				Ok(&self.input[start..self.finger])
			},
			_ => Err(self.unexpected("an object key")),
		}
	}

	/// Parse a quoted string and return its contents without resolving escape sequences.
	fn parse_string(&mut self) -> Result<&'a str, SyntaxError> {
		// Opening quote.
		self.finger += 1;
		let start = self.finger;
		loop {
			match self.peek() {
				None => return Err(self.unexpected("a closing quote ('\"')")),
				Some(b'"') => {
					let contents = &self.input[start..self.finger];
					self.finger += 1;
					return Ok(contents);
				},
				Some(b'\\') => {
					self.finger += 1;
					self.parse_escape()?;
				},
				Some(0x00..=0x1F) => return Err(self.unexpected("a closing quote ('\"') or escaped control character")),
				Some(_) => self.finger += 1,
			}
		}
	}

	/// Parse the part of an escape sequence after the backslash.
	fn parse_escape(&mut self) -> Result<(), SyntaxError> {
		match self.peek() {
			Some(b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't') => {
				self.finger += 1;
				Ok(())
			},
			Some(b'u') => {
				self.finger += 1;
				for _ in 0..4 {
					if !self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
						return Err(self.unexpected("a hexadecimal digit"));
					}
					self.finger += 1;
				}
				Ok(())
			},
			_ => Err(self.unexpected("an escape sequence")),
		}
	}

	fn parse_number(&mut self) -> Result<Node<'a>, SyntaxError> {
		let start = self.finger;
		if self.peek() == Some(b'-') {
			self.finger += 1;
		}

		match self.peek() {
			Some(b'0') => self.finger += 1,
			Some(b'1'..=b'9') => self.skip_digits(),
			_ => return Err(self.unexpected("a digit")),
		}

		let mut integer = true;
		if self.peek() == Some(b'.') {
			integer = false;
			self.finger += 1;
			self.expect_digits()?;
		}
		if let Some(b'e' | b'E') = self.peek() {
			integer = false;
			self.finger += 1;
			if let Some(b'+' | b'-') = self.peek() {
				self.finger += 1;
			}
			self.expect_digits()?;
		}

		if integer {
			Ok(Node::Integer(&self.input[start..self.finger]))
		} else {
			Ok(Node::Other)
		}
	}

	fn skip_digits(&mut self) {
		while self.peek().is_some_and(|c| c.is_ascii_digit()) {
			self.finger += 1;
		}
	}

	fn expect_digits(&mut self) -> Result<(), SyntaxError> {
		if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
			return Err(self.unexpected("a digit"));
		}
		self.skip_digits();
		Ok(())
	}

	fn parse_word(&mut self, word: &'static str) -> Result<Node<'a>, SyntaxError> {
		if self.input[self.finger..].starts_with(word) {
			self.finger += word.len();
			Ok(Node::Other)
		} else {
			Err(self.unexpected("a value"))
		}
	}
}

/// Unquoted keys consist of letters, digits, underscores and dollar signs.
///
/// Bytes of non-ASCII characters are accepted as a whole.
fn is_key_byte(c: u8) -> bool {
	c.is_ascii_alphanumeric() || c == b'_' || c == b'$' || c >= 0x80
}
