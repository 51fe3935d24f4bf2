//! Account-creation screen.
//!
//! Server-side validation failures come back as a field-keyed map
//! (`username` / `email` / `password`), rendered under the matching
//! input; anything else shows as a single message.

use std::collections::HashMap;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use secrecy::SecretString;

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::form::{self, TextField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Username,
    Email,
    Password,
}

const FIELDS: [Field; 3] = [Field::Username, Field::Email, Field::Password];

pub struct RegisterScreen {
    focused: bool,
    username: TextField,
    email: TextField,
    password: TextField,
    active: Field,
    submitting: bool,
    server_errors: HashMap<String, String>,
    message: Option<String>,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl RegisterScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            username: TextField::new("Username"),
            email: TextField::new("Email"),
            password: TextField::masked("Password"),
            active: Field::Username,
            submitting: false,
            server_errors: HashMap::new(),
            message: None,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    fn reset(&mut self) {
        self.username.clear();
        self.email.clear();
        self.password.clear();
        self.active = Field::Username;
        self.submitting = false;
        self.server_errors.clear();
        self.message = None;
    }

    fn active_field(&mut self) -> &mut TextField {
        match self.active {
            Field::Username => &mut self.username,
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
        }
    }

    fn shift_focus(&mut self, delta: isize) {
        let idx = FIELDS
            .iter()
            .position(|f| *f == self.active)
            .unwrap_or_default();
        let next = idx
            .checked_add_signed(delta)
            .map_or(FIELDS.len() - 1, |i| i % FIELDS.len());
        self.active = FIELDS[next];
    }

    fn submit(&mut self) -> Option<Action> {
        if self.submitting {
            return None;
        }
        if !form::validate(&mut [&mut self.username, &mut self.email, &mut self.password]) {
            return None;
        }
        self.submitting = true;
        self.server_errors.clear();
        self.message = None;
        Some(Action::Register {
            username: self.username.trimmed().to_owned(),
            email: self.email.trimmed().to_owned(),
            password: SecretString::from(self.password.value.clone()),
        })
    }

    fn server_error(&self, field: Field) -> Option<&str> {
        let key = match field {
            Field::Username => "username",
            Field::Email => "email",
            Field::Password => "password",
        };
        self.server_errors.get(key).map(String::as_str)
    }

    fn render_field(&self, frame: &mut Frame, area: Rect, field: Field) {
        let input = match field {
            Field::Username => &self.username,
            Field::Email => &self.email,
            Field::Password => &self.password,
        };
        form::render_field(frame, area, input, self.active == field);

        // Inline required errors win; server errors fill the same row.
        if input.error().is_none() {
            if let Some(error) = self.server_error(field) {
                if area.height >= 5 {
                    frame.render_widget(
                        Paragraph::new(Span::styled(error.to_owned(), theme::error_text())),
                        Rect::new(area.x, area.y + 4, area.width, 1),
                    );
                }
            }
        }
    }
}

impl Component for RegisterScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Esc => Ok(Some(Action::GoBack)),
            KeyCode::Tab | KeyCode::Down => {
                self.shift_focus(1);
                Ok(None)
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.shift_focus(-1);
                Ok(None)
            }
            KeyCode::Enter => Ok(self.submit()),
            _ => {
                self.active_field().handle_key(key);
                Ok(None)
            }
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::RegisterFinished(result) => {
                self.submitting = false;
                match result {
                    Ok(_) => self.reset(),
                    Err(failure) => {
                        self.server_errors = failure.fields.clone();
                        if !failure.message.is_empty() {
                            self.message = Some(failure.message.clone());
                        }
                    }
                }
            }
            Action::Tick if self.submitting => {
                self.throbber_state.calc_next();
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let width = 48u16.min(area.width.saturating_sub(4));
        let x = (area.width.saturating_sub(width)) / 2;
        let column = Rect::new(area.x + x, area.y, width, area.height);

        let layout = Layout::vertical([
            Constraint::Length(2), // title
            Constraint::Length(5), // username
            Constraint::Length(5), // email
            Constraint::Length(5), // password
            Constraint::Length(2), // message / spinner
            Constraint::Length(2), // hints
            Constraint::Fill(1),
        ])
        .split(column);

        frame.render_widget(
            Paragraph::new(Span::styled("Create account", theme::title_style())),
            layout[0],
        );

        self.render_field(frame, layout[1], Field::Username);
        self.render_field(frame, layout[2], Field::Email);
        self.render_field(frame, layout[3], Field::Password);

        if self.submitting {
            let throbber = throbber_widgets_tui::Throbber::default()
                .label(" Creating account\u{2026}")
                .style(theme::table_row())
                .throbber_style(theme::border_focused());
            frame.render_stateful_widget(throbber, layout[4], &mut self.throbber_state.clone());
        } else if let Some(message) = &self.message {
            frame.render_widget(
                Paragraph::new(Span::styled(message.clone(), theme::error_text())),
                layout[4],
            );
        }

        let hints = Line::from(vec![
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("create  ", theme::key_hint()),
            Span::styled("Tab ", theme::key_hint_key()),
            Span::styled("next field  ", theme::key_hint()),
            Span::styled("Esc ", theme::key_hint_key()),
            Span::styled("back", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[5]);
    }

    fn set_focused(&mut self, focused: bool) {
        if focused && !self.focused {
            self.reset();
        }
        self.focused = focused;
    }
}
