use std::iter::once;

/// Cursor over a single line of text.
///
/// The text itself lives in the ledger's draft fields; the editor only
/// remembers where the cursor is, counted in characters.
#[derive(Debug, Default)]
pub struct LineEditor {
    cursor_position: usize,
}

impl LineEditor {
    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    /// Puts the cursor behind the last character.
    pub fn move_to_end(&mut self, s: &str) {
        self.cursor_position = s.chars().count();
    }

    /// Keeps the cursor inside `s` after the text was replaced from outside.
    pub fn clamp(&mut self, s: &str) {
        self.cursor_position = self.cursor_position.min(s.chars().count());
    }

    pub fn insert_char(&mut self, s: &mut String, c: char) {
        let before = s.chars().take(self.cursor_position);
        let after = s.chars().skip(self.cursor_position);
        *s = before.chain(once(c)).chain(after).collect();
        self.cursor_position += 1;
    }

    pub fn delete_left(&mut self, s: &mut String) {
        if self.cursor_position > 0 {
            let before = s.chars().take(self.cursor_position - 1);
            let after = s.chars().skip(self.cursor_position);
            *s = before.chain(after).collect();
            self.cursor_position -= 1;
        }
    }

    pub fn delete_right(&mut self, s: &mut String) {
        if self.cursor_position < s.chars().count() {
            let before = s.chars().take(self.cursor_position);
            let after = s.chars().skip(self.cursor_position + 1);
            *s = before.chain(after).collect();
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_right(&mut self, s: &str) {
        if self.cursor_position < s.chars().count() {
            self.cursor_position += 1;
        }
    }
}
