//! New-budget form.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use fundly_core::model::NewBudget;

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::form::{self, TextField};

pub struct BudgetFormScreen {
    focused: bool,
    name: TextField,
    submitting: bool,
    error: Option<String>,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl BudgetFormScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            name: TextField::new("Budget name"),
            submitting: false,
            error: None,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    fn reset(&mut self) {
        self.name.clear();
        self.submitting = false;
        self.error = None;
    }

    fn submit(&mut self) -> Option<Action> {
        if self.submitting {
            return None;
        }
        if !form::validate(&mut [&mut self.name]) {
            return None;
        }
        self.submitting = true;
        self.error = None;
        Some(Action::CreateBudget(NewBudget {
            name: self.name.trimmed().to_owned(),
        }))
    }
}

impl Component for BudgetFormScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Esc => Ok(Some(Action::GoBack)),
            KeyCode::Enter => Ok(self.submit()),
            _ => {
                self.name.handle_key(key);
                Ok(None)
            }
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::BudgetCreated(result) => {
                self.submitting = false;
                match result {
                    Ok(_) => self.reset(),
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
            Constraint::Length(5), // name
            Constraint::Length(2), // error / spinner
            Constraint::Length(2), // hints
            Constraint::Fill(1),
        ])
        .split(column);

        frame.render_widget(
            Paragraph::new(Span::styled("New budget", theme::title_style())),
            layout[0],
        );

        form::render_field(frame, layout[1], &self.name, true);

        if self.submitting {
            let throbber = throbber_widgets_tui::Throbber::default()
                .label(" Creating\u{2026}")
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
            Span::styled("create  ", theme::key_hint()),
            Span::styled("Esc ", theme::key_hint_key()),
            Span::styled("cancel", theme::key_hint()),
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
