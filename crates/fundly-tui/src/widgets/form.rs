//! Shared form-field plumbing for the auth and entity forms.
//!
//! Every form screen keeps its input as local [`TextField`]s until
//! submission: a failed required-field check marks all fields touched
//! (surfacing inline errors) and never reaches the store; a valid
//! submission dispatches exactly one command action.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::theme;

/// One text input with required-field validation state.
#[derive(Debug, Default)]
pub struct TextField {
    pub label: &'static str,
    pub value: String,
    pub required: bool,
    /// Hide the value behind mask characters (passwords).
    pub masked: bool,
    /// Set on submit-with-errors so the inline error shows.
    pub touched: bool,
}

impl TextField {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            required: true,
            ..Self::default()
        }
    }

    pub fn optional(label: &'static str) -> Self {
        Self {
            label,
            required: false,
            ..Self::default()
        }
    }

    pub fn masked(label: &'static str) -> Self {
        Self {
            label,
            required: true,
            masked: true,
            ..Self::default()
        }
    }

    /// Apply an edit keystroke. Returns `true` if the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) => {
                self.value.push(c);
                true
            }
            KeyCode::Backspace => {
                self.value.pop();
                true
            }
            _ => false,
        }
    }

    /// The inline error to show, if any (required + empty + touched).
    pub fn error(&self) -> Option<String> {
        if self.required && self.touched && self.value.trim().is_empty() {
            Some(format!("{} is required", self.label))
        } else {
            None
        }
    }

    /// `true` when the required constraint is satisfied.
    pub fn is_valid(&self) -> bool {
        !self.required || !self.value.trim().is_empty()
    }

    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.touched = false;
    }
}

/// Validate a whole form: marks every field touched when any required
/// one is empty, so all inline errors surface at once. Returns `true`
/// when the form may be submitted.
pub fn validate(fields: &mut [&mut TextField]) -> bool {
    let valid = fields.iter().all(|f| f.is_valid());
    if !valid {
        for field in fields {
            field.touched = true;
        }
    }
    valid
}

/// Render one labelled, bordered input (3 rows + 1 label row + 1 error
/// row). `active` highlights the border and appends a block cursor.
pub fn render_field(frame: &mut Frame, area: Rect, field: &TextField, active: bool) {
    if area.height < 4 {
        return;
    }

    let label_style = if active {
        theme::title_style()
    } else {
        ratatui::style::Style::default().fg(theme::DIM_WHITE)
    };
    frame.render_widget(
        Paragraph::new(Span::styled(field.label, label_style)),
        Rect::new(area.x, area.y, area.width, 1),
    );

    let display = if field.masked && !field.value.is_empty() {
        "\u{25CF}".repeat(field.value.chars().count())
    } else {
        field.value.clone()
    };
    let text = if active {
        format!("{display}\u{2588}")
    } else {
        display
    };

    let border = if active {
        theme::border_focused()
    } else {
        theme::border_default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border);

    let input_area = Rect::new(area.x, area.y + 1, area.width, 3.min(area.height - 1));
    let inner = block.inner(input_area);
    frame.render_widget(block, input_area);
    frame.render_widget(
        Paragraph::new(Span::styled(text, theme::table_row())),
        inner,
    );

    if let Some(error) = field.error() {
        if area.height >= 5 {
            frame.render_widget(
                Paragraph::new(Span::styled(error, theme::error_text())),
                Rect::new(area.x, area.y + 4, area.width, 1),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn editing_appends_and_deletes() {
        let mut field = TextField::new("Name");
        field.handle_key(key(KeyCode::Char('h')));
        field.handle_key(key(KeyCode::Char('i')));
        assert_eq!(field.value, "hi");
        field.handle_key(key(KeyCode::Backspace));
        assert_eq!(field.value, "h");
    }

    #[test]
    fn untouched_empty_field_shows_no_error() {
        let field = TextField::new("Name");
        assert!(field.error().is_none());
    }

    #[test]
    fn failed_validation_touches_every_field() {
        let mut name = TextField::new("Name");
        let mut email = TextField::new("Email");
        email.value = "jane@example.com".into();

        assert!(!validate(&mut [&mut name, &mut email]));
        assert!(name.touched);
        assert!(email.touched);
        assert_eq!(name.error(), Some("Name is required".into()));
        assert!(email.error().is_none());
    }

    #[test]
    fn optional_fields_do_not_block_submission() {
        let mut note = TextField::optional("Note");
        assert!(validate(&mut [&mut note]));
    }
}
