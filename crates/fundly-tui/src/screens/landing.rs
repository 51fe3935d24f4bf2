//! Landing screen — the entry point for signed-out users.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::action::Action;
use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme;

const BANNER: &str = "  f u n d l y";

pub struct LandingScreen {
    focused: bool,
}

impl LandingScreen {
    pub fn new() -> Self {
        Self { focused: false }
    }
}

impl Component for LandingScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('l') | KeyCode::Enter => {
                Ok(Some(Action::Navigate(ScreenId::Login)))
            }
            KeyCode::Char('r') => Ok(Some(Action::Navigate(ScreenId::Register))),
            _ => Ok(None),
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(7),
            Constraint::Fill(2),
        ])
        .split(area);

        let lines = vec![
            Line::from(Span::styled(
                BANNER,
                theme::title_style(),
            ))
            .centered(),
            Line::from(""),
            Line::from(Span::styled(
                "Budgets, expenses and categories in one place.",
                Style::default().fg(theme::DIM_WHITE),
            ))
            .centered(),
            Line::from(""),
            Line::from(vec![
                Span::styled("l ", theme::key_hint_key()),
                Span::styled("sign in    ", theme::key_hint()),
                Span::styled("r ", theme::key_hint_key()),
                Span::styled("create account    ", theme::key_hint()),
                Span::styled("q ", theme::key_hint_key()),
                Span::styled("quit", theme::key_hint()),
            ])
            .centered(),
        ];

        frame.render_widget(Paragraph::new(lines), layout[1]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
