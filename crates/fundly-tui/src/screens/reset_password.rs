//! Reset-password screen — completes a reset with the mailed token.

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
    Email,
    Token,
    Password,
}

const FIELDS: [Field; 3] = [Field::Email, Field::Token, Field::Password];

pub struct ResetPasswordScreen {
    focused: bool,
    email: TextField,
    token: TextField,
    password: TextField,
    active: Field,
    submitting: bool,
    error: Option<String>,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl ResetPasswordScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            email: TextField::new("Email"),
            token: TextField::new("Reset token"),
            password: TextField::masked("New password"),
            active: Field::Email,
            submitting: false,
            error: None,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    fn reset(&mut self) {
        self.email.clear();
        self.token.clear();
        self.password.clear();
        self.active = Field::Email;
        self.submitting = false;
        self.error = None;
    }

    fn active_field(&mut self) -> &mut TextField {
        match self.active {
            Field::Email => &mut self.email,
            Field::Token => &mut self.token,
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
        if !form::validate(&mut [&mut self.email, &mut self.token, &mut self.password]) {
            return None;
        }
        self.submitting = true;
        self.error = None;
        Some(Action::SubmitNewPassword {
            email: self.email.trimmed().to_owned(),
            token: self.token.trimmed().to_owned(),
            password: SecretString::from(self.password.value.clone()),
        })
    }
}

impl Component for ResetPasswordScreen {
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
            Action::NewPasswordFinished(result) => {
                self.submitting = false;
                match result {
                    Ok(()) => self.reset(),
                    Err(message) => self.error = Some(message.clone()),
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
            Constraint::Length(5), // email
            Constraint::Length(5), // token
            Constraint::Length(5), // new password
            Constraint::Length(2), // error / spinner
            Constraint::Length(2), // hints
            Constraint::Fill(1),
        ])
        .split(column);

        frame.render_widget(
            Paragraph::new(Span::styled("Reset password", theme::title_style())),
            layout[0],
        );

        form::render_field(frame, layout[1], &self.email, self.active == Field::Email);
        form::render_field(frame, layout[2], &self.token, self.active == Field::Token);
        form::render_field(frame, layout[3], &self.password, self.active == Field::Password);

        if self.submitting {
            let throbber = throbber_widgets_tui::Throbber::default()
                .label(" Changing password\u{2026}")
                .style(theme::table_row())
                .throbber_style(theme::border_focused());
            frame.render_stateful_widget(throbber, layout[4], &mut self.throbber_state.clone());
        } else if let Some(error) = &self.error {
            frame.render_widget(
                Paragraph::new(Span::styled(error.clone(), theme::error_text())),
                layout[4],
            );
        }

        let hints = Line::from(vec![
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("change password  ", theme::key_hint()),
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
