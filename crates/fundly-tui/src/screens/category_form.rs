//! New-category form with a growable sub-category list.
//!
//! Submission state lives in the categories store (`FormState`), which
//! arrives through `CategoriesChanged`; the screen only keeps its own
//! input buffers.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use fundly_core::model::{NewCategory, NewSubCategory};
use fundly_core::{FormState, FormStatus};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::form::{self, TextField};

pub struct CategoryFormScreen {
    focused: bool,
    name: TextField,
    sub_categories: Vec<TextField>,
    /// 0 is the name field; 1.. index into `sub_categories`.
    active: usize,
    form: FormState,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl CategoryFormScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            name: TextField::new("Category name"),
            sub_categories: vec![TextField::optional("Sub-category 1")],
            active: 0,
            form: FormState::default(),
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    fn reset(&mut self) {
        self.name.clear();
        self.sub_categories = vec![TextField::optional("Sub-category 1")];
        self.active = 0;
    }

    fn field_count(&self) -> usize {
        1 + self.sub_categories.len()
    }

    fn shift_focus(&mut self, delta: isize) {
        let count = self.field_count();
        self.active = self
            .active
            .checked_add_signed(delta)
            .map_or(count - 1, |i| i % count);
    }

    fn active_field(&mut self) -> &mut TextField {
        if self.active == 0 {
            &mut self.name
        } else {
            &mut self.sub_categories[self.active - 1]
        }
    }

    fn add_sub_category(&mut self) {
        let label: &'static str = match self.sub_categories.len() {
            0 => "Sub-category 1",
            1 => "Sub-category 2",
            2 => "Sub-category 3",
            3 => "Sub-category 4",
            _ => "Sub-category",
        };
        self.sub_categories.push(TextField::optional(label));
        self.active = self.field_count() - 1;
    }

    fn remove_sub_category(&mut self) {
        if self.sub_categories.len() > 1 {
            self.sub_categories.pop();
            self.active = self.active.min(self.field_count() - 1);
        }
    }

    fn submit(&mut self) -> Option<Action> {
        if self.form.status == FormStatus::Loading {
            return None;
        }
        if !form::validate(&mut [&mut self.name]) {
            return None;
        }
        let sub_categories = self
            .sub_categories
            .iter()
            .map(TextField::trimmed)
            .filter(|name| !name.is_empty())
            .map(|name| NewSubCategory {
                name: name.to_owned(),
            })
            .collect();
        Some(Action::CreateCategory(NewCategory {
            name: self.name.trimmed().to_owned(),
            sub_categories,
        }))
    }
}

impl Component for CategoryFormScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc) => Ok(Some(Action::GoBack)),
            (KeyModifiers::CONTROL, KeyCode::Char('n')) => {
                self.add_sub_category();
                Ok(None)
            }
            (KeyModifiers::CONTROL, KeyCode::Char('d')) => {
                self.remove_sub_category();
                Ok(None)
            }
            (_, KeyCode::Tab | KeyCode::Down) => {
                self.shift_focus(1);
                Ok(None)
            }
            (_, KeyCode::BackTab | KeyCode::Up) => {
                self.shift_focus(-1);
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
            Action::CategoriesChanged(state) => {
                self.form = state.form.clone();
            }
            Action::CategoryCreated(Ok(_)) => {
                self.reset();
            }
            Action::Tick if self.form.status == FormStatus::Loading => {
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

        let mut constraints = vec![Constraint::Length(2), Constraint::Length(5)];
        constraints.extend(std::iter::repeat_n(
            Constraint::Length(4),
            self.sub_categories.len(),
        ));
        constraints.push(Constraint::Length(2)); // status / error
        constraints.push(Constraint::Length(2)); // hints
        constraints.push(Constraint::Fill(1));
        let layout = Layout::vertical(constraints).split(column);

        frame.render_widget(
            Paragraph::new(Span::styled("New category", theme::title_style())),
            layout[0],
        );

        form::render_field(frame, layout[1], &self.name, self.active == 0);
        for (i, field) in self.sub_categories.iter().enumerate() {
            form::render_field(frame, layout[2 + i], field, self.active == i + 1);
        }

        let status_area = layout[2 + self.sub_categories.len()];
        match self.form.status {
            FormStatus::Loading => {
                let throbber = throbber_widgets_tui::Throbber::default()
                    .label(" Saving\u{2026}")
                    .style(theme::table_row())
                    .throbber_style(theme::border_focused());
                frame.render_stateful_widget(
                    throbber,
                    status_area,
                    &mut self.throbber_state.clone(),
                );
            }
            FormStatus::Error => {
                frame.render_widget(
                    Paragraph::new(Span::styled(self.form.message.clone(), theme::error_text())),
                    status_area,
                );
            }
            FormStatus::Idle => {}
        }

        let hints = Line::from(vec![
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("save  ", theme::key_hint()),
            Span::styled("^n ", theme::key_hint_key()),
            Span::styled("add sub  ", theme::key_hint()),
            Span::styled("^d ", theme::key_hint_key()),
            Span::styled("remove sub  ", theme::key_hint()),
            Span::styled("Esc ", theme::key_hint_key()),
            Span::styled("cancel", theme::key_hint()),
        ]);
        frame.render_widget(
            Paragraph::new(hints),
            layout[3 + self.sub_categories.len()],
        );
    }

    fn set_focused(&mut self, focused: bool) {
        if focused && !self.focused {
            self.reset();
        }
        self.focused = focused;
    }
}
