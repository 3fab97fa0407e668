use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Submit,
    Cancel,
}

/// Single-line free-text editor for drill answers. Cursor positions are char
/// indices so CJK and accented input edit correctly.
pub struct LineInput {
    text: String,
    /// Cursor position as a char index (0 = before first char).
    cursor: usize,
}

impl LineInput {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
        }
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Returns (before_cursor, cursor_char, after_cursor) for styled
    /// rendering. When the cursor is at the end of text, cursor_char is None.
    pub fn render_parts(&self) -> (&str, Option<char>, &str) {
        let byte_offset = self.char_to_byte(self.cursor);
        match self.text[byte_offset..].chars().next() {
            None => (&self.text, None, ""),
            Some(ch) => {
                let next_byte = byte_offset + ch.len_utf8();
                (&self.text[..byte_offset], Some(ch), &self.text[next_byte..])
            }
        }
    }

    pub fn handle(&mut self, key: KeyEvent) -> InputResult {
        match key.code {
            KeyCode::Esc => return InputResult::Cancel,
            KeyCode::Enter => return InputResult::Submit,

            KeyCode::Left => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                }
            }
            KeyCode::Right => {
                if self.cursor < self.text.chars().count() {
                    self.cursor += 1;
                }
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.text.chars().count(),
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    let byte_offset = self.char_to_byte(self.cursor - 1);
                    let ch = self.text[byte_offset..].chars().next();
                    if let Some(ch) = ch {
                        self.text
                            .replace_range(byte_offset..byte_offset + ch.len_utf8(), "");
                        self.cursor -= 1;
                    }
                }
            }
            KeyCode::Delete => {
                let byte_offset = self.char_to_byte(self.cursor);
                if let Some(ch) = self.text[byte_offset..].chars().next() {
                    self.text
                        .replace_range(byte_offset..byte_offset + ch.len_utf8(), "");
                }
            }
            KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.cursor = 0;
            }
            KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.cursor = self.text.chars().count();
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear();
            }
            KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.delete_word_back();
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let byte_offset = self.char_to_byte(self.cursor);
                self.text.insert(byte_offset, ch);
                self.cursor += 1;
            }
            _ => {}
        }
        InputResult::Continue
    }

    /// Convert char index to byte offset.
    fn char_to_byte(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(b, _)| b)
            .unwrap_or(self.text.len())
    }

    /// Delete word before cursor (unix-word-rubout: skip whitespace, then
    /// non-whitespace).
    fn delete_word_back(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let chars: Vec<char> = self.text.chars().collect();
        let mut pos = self.cursor;

        while pos > 0 && chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        while pos > 0 && !chars[pos - 1].is_whitespace() {
            pos -= 1;
        }

        let start_byte = self.char_to_byte(pos);
        let end_byte = self.char_to_byte(self.cursor);
        self.text.replace_range(start_byte..end_byte, "");
        self.cursor = pos;
    }
}

impl Default for LineInput {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(input: &mut LineInput, code: KeyCode) -> InputResult {
        input.handle(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(input: &mut LineInput, ch: char) -> InputResult {
        input.handle(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL))
    }

    fn type_str(input: &mut LineInput, text: &str) {
        for ch in text.chars() {
            press(input, KeyCode::Char(ch));
        }
    }

    #[test]
    fn test_typing_and_submit() {
        let mut input = LineInput::new();
        type_str(&mut input, "hello");
        assert_eq!(input.value(), "hello");
        assert_eq!(press(&mut input, KeyCode::Enter), InputResult::Submit);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = LineInput::new();
        type_str(&mut input, "你好a");
        press(&mut input, KeyCode::Backspace);
        assert_eq!(input.value(), "你好");
        press(&mut input, KeyCode::Left);
        press(&mut input, KeyCode::Backspace);
        assert_eq!(input.value(), "好");
    }

    #[test]
    fn test_render_parts_at_cursor() {
        let mut input = LineInput::new();
        type_str(&mut input, "abc");
        press(&mut input, KeyCode::Left);
        let (before, at, after) = input.render_parts();
        assert_eq!((before, at, after), ("ab", Some('c'), ""));
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut input = LineInput::new();
        type_str(&mut input, "some text");
        ctrl(&mut input, 'u');
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_ctrl_w_deletes_last_word() {
        let mut input = LineInput::new();
        type_str(&mut input, "hello brave world");
        ctrl(&mut input, 'w');
        assert_eq!(input.value(), "hello brave ");
    }

    #[test]
    fn test_control_chars_are_not_inserted() {
        let mut input = LineInput::new();
        ctrl(&mut input, 'n');
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_esc_cancels() {
        let mut input = LineInput::new();
        assert_eq!(press(&mut input, KeyCode::Esc), InputResult::Cancel);
    }
}
