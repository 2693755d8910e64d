//! # Text Field Model
//!
//! Single-line editable text with a char-indexed cursor and a length cap.

/// A labeled single-line input
#[derive(Debug, Clone, PartialEq)]
pub struct TextField {
    prompt: String,
    placeholder: String,
    value: Vec<char>,
    cursor: usize,
    char_limit: usize,
}

impl TextField {
    /// Create an empty field
    pub fn new(prompt: impl Into<String>, placeholder: impl Into<String>, char_limit: usize) -> Self {
        Self {
            prompt: prompt.into(),
            placeholder: placeholder.into(),
            value: Vec::new(),
            cursor: 0,
            char_limit,
        }
    }

    /// Replace the value, truncated to the limit, cursor at the end
    pub fn with_value(mut self, value: &str) -> Self {
        self.set_value(value);
        self
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.chars().take(self.char_limit).collect();
        self.cursor = self.value.len();
    }

    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn char_limit(&self) -> usize {
        self.char_limit
    }

    /// Cursor position in chars
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Insert at the cursor. Returns false when the field is full.
    pub fn insert_char(&mut self, ch: char) -> bool {
        if self.value.len() >= self.char_limit || ch.is_control() {
            return false;
        }
        self.value.insert(self.cursor, ch);
        self.cursor += 1;
        true
    }

    /// Delete the char before the cursor
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.value.remove(self.cursor);
        true
    }

    /// Delete the char under the cursor
    pub fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.value.len() {
            return false;
        }
        self.value.remove(self.cursor);
        true
    }

    pub fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn move_right(&mut self) -> bool {
        if self.cursor >= self.value.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn move_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_to_end(&mut self) {
        self.cursor = self.value.len();
    }

    /// Remove everything before the cursor
    pub fn delete_to_start(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.value.drain(..self.cursor);
        self.cursor = 0;
        true
    }

    /// Remove everything from the cursor on
    pub fn delete_to_end(&mut self) -> bool {
        if self.cursor >= self.value.len() {
            return false;
        }
        self.value.truncate(self.cursor);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(limit: usize) -> TextField {
        TextField::new("From: ", "user@example.com", limit)
    }

    #[test]
    fn insert_should_follow_cursor() {
        let mut f = field(32);
        for ch in "hllo".chars() {
            f.insert_char(ch);
        }
        f.move_to_start();
        f.move_right();
        f.insert_char('e');

        assert_eq!(f.value(), "hello");
        assert_eq!(f.cursor(), 2);
    }

    #[test]
    fn insert_past_limit_should_be_noop() {
        let mut f = field(3);
        assert!(f.insert_char('a'));
        assert!(f.insert_char('b'));
        assert!(f.insert_char('c'));
        assert!(!f.insert_char('d'));

        assert_eq!(f.value(), "abc");
        assert_eq!(f.cursor(), 3);
    }

    #[test]
    fn prefilled_value_should_be_truncated_to_limit() {
        let f = field(4).with_value("abcdefgh");
        assert_eq!(f.value(), "abcd");
        assert_eq!(f.cursor(), 4);
    }

    #[test]
    fn backspace_and_delete_should_respect_bounds() {
        let mut f = field(32).with_value("ab");
        assert!(!f.delete_forward());
        assert!(f.backspace());
        assert_eq!(f.value(), "a");

        f.move_to_start();
        assert!(!f.backspace());
        assert!(f.delete_forward());
        assert!(f.is_empty());
    }

    #[test]
    fn multibyte_chars_should_count_once() {
        let mut f = field(3);
        f.insert_char('é');
        f.insert_char('日');
        f.insert_char('本');
        assert!(!f.insert_char('x'));
        assert_eq!(f.len(), 3);

        f.move_left();
        f.backspace();
        assert_eq!(f.value(), "é本");
    }

    #[test]
    fn kill_commands_should_split_at_cursor() {
        let mut f = field(32).with_value("hello world");
        f.move_to_start();
        for _ in 0..5 {
            f.move_right();
        }

        let mut tail = f.clone();
        assert!(tail.delete_to_end());
        assert_eq!(tail.value(), "hello");

        assert!(f.delete_to_start());
        assert_eq!(f.value(), " world");
        assert_eq!(f.cursor(), 0);
    }

    #[test]
    fn control_chars_should_be_rejected() {
        let mut f = field(32);
        assert!(!f.insert_char('\n'));
        assert!(f.is_empty());
    }
}
