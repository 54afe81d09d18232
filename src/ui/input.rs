/// Single-line query editor with a character limit.
///
/// The cursor is a character index into the value, never a byte offset.
#[derive(Debug, Clone, Default)]
pub struct QueryInput {
	value: String,
	cursor: usize,
	max_len: usize,
}

impl QueryInput {
	#[must_use]
	pub fn new(max_len: usize) -> Self {
		Self {
			value: String::new(),
			cursor: 0,
			max_len,
		}
	}

	#[must_use]
	pub fn value(&self) -> &str {
		&self.value
	}

	#[must_use]
	pub fn cursor(&self) -> usize {
		self.cursor
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.value.is_empty()
	}

	fn char_len(&self) -> usize {
		self.value.chars().count()
	}

	fn byte_offset(&self, char_index: usize) -> usize {
		self.value
			.char_indices()
			.nth(char_index)
			.map_or(self.value.len(), |(offset, _)| offset)
	}

	/// Insert `ch` at the cursor. Returns `true` if the value changed.
	pub fn insert(&mut self, ch: char) -> bool {
		if ch.is_control() || self.char_len() >= self.max_len {
			return false;
		}
		let offset = self.byte_offset(self.cursor);
		self.value.insert(offset, ch);
		self.cursor += 1;
		true
	}

	/// Remove the character before the cursor.
	pub fn backspace(&mut self) -> bool {
		if self.cursor == 0 {
			return false;
		}
		self.cursor -= 1;
		let offset = self.byte_offset(self.cursor);
		self.value.remove(offset);
		true
	}

	/// Remove the character under the cursor.
	pub fn delete(&mut self) -> bool {
		if self.cursor >= self.char_len() {
			return false;
		}
		let offset = self.byte_offset(self.cursor);
		self.value.remove(offset);
		true
	}

	pub fn move_left(&mut self) {
		self.cursor = self.cursor.saturating_sub(1);
	}

	pub fn move_right(&mut self) {
		self.cursor = (self.cursor + 1).min(self.char_len());
	}

	pub fn move_home(&mut self) {
		self.cursor = 0;
	}

	pub fn move_end(&mut self) {
		self.cursor = self.char_len();
	}
}
