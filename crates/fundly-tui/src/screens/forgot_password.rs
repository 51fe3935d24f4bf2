//! Forgot-password screen — requests a reset mail for an address.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::action::Action;
use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme;
use crate::widgets::form::{self, TextField};

pub struct ForgotPasswordScreen {
    focused: bool,
    email: TextField,
    submitting: bool,
    /// Set once the server accepted the request; replaces the form.
    sent: bool,
    error: Option<String>,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl ForgotPasswordScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            email: TextField::new("Email"),
            submitting: false,
            sent: false,
            error: None,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    fn reset(&mut self) {
        self.email.clear();
        self.submitting = false;
        self.sent = false;
        self.error = None;
    }

    fn submit(&mut self) -> Option<Action> {
        if self.submitting || self.sent {
            return None;
        }
        if !form::validate(&mut [&mut self.email]) {
            return None;
        }
        self.submitting = true;
        self.error = None;
        Some(Action::RequestPasswordReset {
            email: self.email.trimmed().to_owned(),
        })
    }
}

impl Component for ForgotPasswordScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc) => Ok(Some(Action::GoBack)),
            (KeyModifiers::CONTROL, KeyCode::Char('t')) => {
                // Jump straight to entering the token from the mail.
                Ok(Some(Action::Navigate(ScreenId::ResetPassword)))
            }
            (_, KeyCode::Enter) => Ok(self.submit()),
            _ => {
                self.email.handle_key(key);
                Ok(None)
            }
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::PasswordResetRequested(result) => {
                self.submitting = false;
                match result {
                    Ok(()) => self.sent = true,
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
            Constraint::Length(5), // email / notice
            Constraint::Length(2), // error / spinner
            Constraint::Length(2), // hints
            Constraint::Fill(1),
        ])
        .split(column);

        frame.render_widget(
            Paragraph::new(Span::styled("Forgot password", theme::title_style())),
            layout[0],
        );

        if self.sent {
            let notice = vec![
                Line::from(Span::styled(
                    "Reset mail sent.",
                    Style::default().fg(theme::ACCENT_GREEN),
                )),
                Line::from(Span::styled(
                    "Check your inbox for the reset token.",
                    Style::default().fg(theme::DIM_WHITE),
                )),
            ];
            frame.render_widget(Paragraph::new(notice), layout[1]);
        } else {
            form::render_field(frame, layout[1], &self.email, true);
        }

        if self.submitting {
            let throbber = throbber_widgets_tui::Throbber::default()
                .label(" Requesting reset\u{2026}")
                .style(theme::table_row())
                .throbber_style(theme::border_focused());
            frame.render_stateful_widget(throbber, layout[2], &mut self.throbber_state.clone());
        } else if let Some(error) = &self.error {
            frame.render_widget(
                Paragraph::new(Span::styled(error.clone(), theme::error_text())),
                layout[2],
            );
        }

        let hints = Line::from(vec![
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("send mail  ", theme::key_hint()),
            Span::styled("^t ", theme::key_hint_key()),
            Span::styled("enter token  ", theme::key_hint()),
            Span::styled("Esc ", theme::key_hint_key()),
            Span::styled("back", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[3]);
    }

    fn set_focused(&mut self, focused: bool) {
        if focused && !self.focused {
            self.reset();
        }
        self.focused = focused;
    }
}
