//! Single-line text field state for form screens.

/// A labeled single-line input with an optional field-scoped error.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    pub value: String,
    /// Render the value as bullets (passwords).
    pub masked: bool,
    /// Validation message shown under the field.
    pub error: Option<String>,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn masked() -> Self {
        Self {
            masked: true,
            ..Self::default()
        }
    }

    /// Appends a typed character and clears the field error.
    pub fn push(&mut self, c: char) {
        self.value.push(c);
        self.error = None;
    }

    /// Removes the last character and clears the field error.
    pub fn backspace(&mut self) {
        self.value.pop();
        self.error = None;
    }

    /// Inserts pasted text and clears the field error.
    pub fn paste(&mut self, text: &str) {
        self.value
            .extend(text.chars().filter(|c| !c.is_control()));
        self.error = None;
    }

    /// The value as displayed (masked fields render bullets).
    pub fn display(&self) -> String {
        if self.masked {
            "\u{2022}".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}
