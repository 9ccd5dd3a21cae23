//! Single-line text fields grouped into forms.

use unicode_width::UnicodeWidthStr;

/// A labelled single-line input; the cursor always sits at the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    pub label: &'static str,
    value: String,
}

impl TextField {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// Display width of the value, for cursor placement.
    pub fn width(&self) -> usize {
        self.value.width()
    }

    pub fn push(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }
}

/// Fields edited one at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    fields: Vec<TextField>,
    focused: usize,
}

impl Form {
    pub fn new(labels: &[&'static str]) -> Self {
        Self {
            fields: labels.iter().map(|label| TextField::new(label)).collect(),
            focused: 0,
        }
    }

    pub fn fields(&self) -> &[TextField] {
        &self.fields
    }

    pub fn focused_index(&self) -> usize {
        self.focused
    }

    pub fn is_last_focused(&self) -> bool {
        self.focused + 1 >= self.fields.len()
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(TextField::value).unwrap_or("")
    }

    pub fn field_mut(&mut self, index: usize) -> Option<&mut TextField> {
        self.fields.get_mut(index)
    }

    pub fn focused_mut(&mut self) -> Option<&mut TextField> {
        self.fields.get_mut(self.focused)
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn push(&mut self, c: char) {
        if let Some(field) = self.focused_mut() {
            field.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.focused_mut() {
            field.backspace();
        }
    }

    /// Empty every field and focus the first.
    pub fn reset(&mut self) {
        self.fields.iter_mut().for_each(TextField::clear);
        self.focused = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_wraps() {
        let mut form = Form::new(&["a", "b", "c"]);
        form.focus_prev();
        assert_eq!(form.focused_index(), 2);
        assert!(form.is_last_focused());
        form.focus_next();
        assert_eq!(form.focused_index(), 0);
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = Form::new(&["content", "tags"]);
        form.push('h');
        form.push('i');
        form.focus_next();
        form.push('x');
        form.backspace();

        assert_eq!(form.value(0), "hi");
        assert_eq!(form.value(1), "");
        assert_eq!(form.value(7), "");
    }

    #[test]
    fn test_reset() {
        let mut form = Form::new(&["a", "b"]);
        form.push('z');
        form.focus_next();
        form.reset();
        assert_eq!(form.value(0), "");
        assert_eq!(form.focused_index(), 0);
    }

    #[test]
    fn test_width_counts_wide_chars() {
        let mut field = TextField::new("x");
        field.set("日本");
        assert_eq!(field.width(), 4);
        assert!(!field.is_blank());
    }
}
