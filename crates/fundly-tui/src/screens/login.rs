//! Sign-in screen.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use secrecy::SecretString;

use crate::action::Action;
use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme;
use crate::widgets::form::{self, TextField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Username,
    Password,
}

pub struct LoginScreen {
    focused: bool,
    username: TextField,
    password: TextField,
    active: Field,
    submitting: bool,
    /// Fixed message on any sign-in failure; never echoes server detail.
    error: Option<String>,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            username: TextField::new("Username"),
            password: TextField::masked("Password"),
            active: Field::Username,
            submitting: false,
            error: None,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    fn reset(&mut self) {
        self.username.clear();
        self.password.clear();
        self.active = Field::Username;
        self.submitting = false;
        self.error = None;
    }

    fn active_field(&mut self) -> &mut TextField {
        match self.active {
            Field::Username => &mut self.username,
            Field::Password => &mut self.password,
        }
    }

    fn focus_next(&mut self) {
        self.active = match self.active {
            Field::Username => Field::Password,
            Field::Password => Field::Username,
        };
    }

    fn submit(&mut self) -> Option<Action> {
        if self.submitting {
            return None;
        }
        if !form::validate(&mut [&mut self.username, &mut self.password]) {
            return None;
        }
        self.submitting = true;
        self.error = None;
        Some(Action::SignIn {
            username: self.username.trimmed().to_owned(),
            password: SecretString::from(self.password.value.clone()),
        })
    }
}

impl Component for LoginScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc) => Ok(Some(Action::GoBack)),
            (KeyModifiers::CONTROL, KeyCode::Char('f')) => {
                Ok(Some(Action::Navigate(ScreenId::ForgotPassword)))
            }
            (KeyModifiers::CONTROL, KeyCode::Char('r')) => {
                Ok(Some(Action::Navigate(ScreenId::Register)))
            }
            (_, KeyCode::Tab | KeyCode::Down | KeyCode::BackTab | KeyCode::Up) => {
                // Two fields, so next and previous are the same hop.
                self.focus_next();
                Ok(None)
            }
            (_, KeyCode::Enter) => Ok(self.submit()),
            _ => {
                self.active_field().handle_key(key);
                Ok(None)
            }
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::SignInFinished(result) => {
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
            Constraint::Length(5), // username
            Constraint::Length(5), // password
            Constraint::Length(2), // error / spinner
            Constraint::Length(2), // hints
            Constraint::Fill(1),
        ])
        .split(column);

        frame.render_widget(
            Paragraph::new(Span::styled("Sign in", theme::title_style())),
            layout[0],
        );

        form::render_field(frame, layout[1], &self.username, self.active == Field::Username);
        form::render_field(frame, layout[2], &self.password, self.active == Field::Password);

        if self.submitting {
            let throbber = throbber_widgets_tui::Throbber::default()
                .label(" Signing in\u{2026}")
                .style(theme::table_row())
                .throbber_style(theme::border_focused());
            frame.render_stateful_widget(throbber, layout[3], &mut self.throbber_state.clone());
        } else if let Some(error) = &self.error {
            frame.render_widget(
                Paragraph::new(Span::styled(error.clone(), theme::error_text())),
                layout[3],
            );
        }

        let hints = Line::from(vec![
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("sign in  ", theme::key_hint()),
            Span::styled("Tab ", theme::key_hint_key()),
            Span::styled("next field  ", theme::key_hint()),
            Span::styled("^f ", theme::key_hint_key()),
            Span::styled("forgot password  ", theme::key_hint()),
            Span::styled("^r ", theme::key_hint_key()),
            Span::styled("register  ", theme::key_hint()),
            Span::styled("Esc ", theme::key_hint_key()),
            Span::styled("back", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[4]);
    }

    fn set_focused(&mut self, focused: bool) {
        if focused && !self.focused {
            self.reset();
        }
        self.focused = focused;
    }
}
