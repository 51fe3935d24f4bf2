//! Expense / income form for one budget.
//!
//! The same screen serves both ledgers: the `OpenTransactionForm`
//! action carries the kind. Expenses require a category pick; incomes
//! may leave the category empty.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use fundly_core::TransactionKind;
use fundly_core::model::{Category, NewTransaction};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::form::{self, TextField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Amount,
    Category,
    SubCategory,
}

const FIELDS: [Field; 4] = [Field::Name, Field::Amount, Field::Category, Field::SubCategory];

pub struct TransactionFormScreen {
    focused: bool,
    budget_id: Option<i64>,
    kind: TransactionKind,
    name: TextField,
    amount: TextField,
    categories: Vec<Category>,
    /// Index into `categories`; `None` means no category picked.
    category_idx: Option<usize>,
    /// Index into the picked category's sub-categories.
    sub_category_idx: Option<usize>,
    active: Field,
    submitting: bool,
    error: Option<String>,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl TransactionFormScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            budget_id: None,
            kind: TransactionKind::Expenses,
            name: TextField::optional("Name"),
            amount: TextField::new("Amount"),
            categories: Vec::new(),
            category_idx: None,
            sub_category_idx: None,
            active: Field::Name,
            submitting: false,
            error: None,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    fn reset(&mut self) {
        self.name.clear();
        self.amount.clear();
        self.category_idx = None;
        self.sub_category_idx = None;
        self.active = Field::Name;
        self.submitting = false;
        self.error = None;
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

    fn selected_category(&self) -> Option<&Category> {
        self.category_idx.and_then(|i| self.categories.get(i))
    }

    /// Cycle the selection for the focused picker. `None` sits between
    /// the last and first entry so the pick can be cleared.
    fn cycle_pick(&mut self, forward: bool) {
        match self.active {
            Field::Category => {
                let len = self.categories.len();
                if len == 0 {
                    return;
                }
                self.category_idx = cycle(self.category_idx, len, forward);
                self.sub_category_idx = None;
            }
            Field::SubCategory => {
                let len = self
                    .selected_category()
                    .map_or(0, |c| c.sub_categories.len());
                if len == 0 {
                    return;
                }
                self.sub_category_idx = cycle(self.sub_category_idx, len, forward);
            }
            _ => {}
        }
    }

    fn submit(&mut self) -> Option<Action> {
        if self.submitting {
            return None;
        }
        let budget_id = self.budget_id?;

        let Ok(amount) = self.amount.trimmed().parse::<f64>() else {
            self.error = Some("Amount must be a number".into());
            return None;
        };
        if amount <= 0.0 {
            self.error = Some("Amount must be greater than zero".into());
            return None;
        }
        if self.kind == TransactionKind::Expenses && self.category_idx.is_none() {
            self.error = Some("Expenses need a category".into());
            return None;
        }

        let id_category = self.selected_category().map(|c| c.id);
        let id_sub_category = self
            .selected_category()
            .zip(self.sub_category_idx)
            .and_then(|(c, i)| c.sub_categories.get(i))
            .and_then(|s| s.id);

        self.submitting = true;
        self.error = None;
        Some(Action::AddTransaction {
            budget_id,
            kind: self.kind,
            tx: NewTransaction {
                name: self.name.trimmed().to_owned(),
                amount,
                id_category,
                id_sub_category,
            },
        })
    }

    fn render_picker(
        &self,
        frame: &mut Frame,
        area: Rect,
        label: &str,
        value: &str,
        field: Field,
    ) {
        if area.height < 2 {
            return;
        }
        let active = self.active == field;
        let label_style = if active {
            theme::title_style()
        } else {
            Style::default().fg(theme::DIM_WHITE)
        };
        frame.render_widget(
            Paragraph::new(Span::styled(label.to_owned(), label_style)),
            Rect::new(area.x, area.y, area.width, 1),
        );
        let line = Line::from(vec![
            Span::styled(
                if active { "◂ " } else { "  " },
                theme::key_hint_key(),
            ),
            Span::styled(value.to_owned(), theme::table_row()),
            Span::styled(
                if active { " ▸" } else { "  " },
                theme::key_hint_key(),
            ),
        ]);
        frame.render_widget(
            Paragraph::new(line),
            Rect::new(area.x, area.y + 1, area.width, 1),
        );
    }
}

/// Advance an optional index through `None, 0, 1, .., len - 1, None`.
fn cycle(current: Option<usize>, len: usize, forward: bool) -> Option<usize> {
    if forward {
        match current {
            None => Some(0),
            Some(i) if i + 1 < len => Some(i + 1),
            Some(_) => None,
        }
    } else {
        match current {
            None => Some(len - 1),
            Some(0) => None,
            Some(i) => Some(i - 1),
        }
    }
}

impl Component for TransactionFormScreen {
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
            KeyCode::Left => {
                self.cycle_pick(false);
                Ok(None)
            }
            KeyCode::Right => {
                self.cycle_pick(true);
                Ok(None)
            }
            KeyCode::Enter => Ok(self.submit()),
            _ => {
                match self.active {
                    Field::Name => {
                        self.name.handle_key(key);
                    }
                    Field::Amount => {
                        self.amount.handle_key(key);
                    }
                    Field::Category | Field::SubCategory => {}
                }
                Ok(None)
            }
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::OpenTransactionForm { budget_id, kind } => {
                self.reset();
                self.budget_id = Some(*budget_id);
                self.kind = *kind;
            }
            Action::CategoriesChanged(state) => {
                self.categories.clone_from(&state.categories);
                if self
                    .category_idx
                    .is_some_and(|i| i >= self.categories.len())
                {
                    self.category_idx = None;
                    self.sub_category_idx = None;
                }
            }
            Action::TransactionAdded { result, .. } => {
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
            Constraint::Length(5), // name
            Constraint::Length(5), // amount
            Constraint::Length(3), // category picker
            Constraint::Length(3), // sub-category picker
            Constraint::Length(2), // error / spinner
            Constraint::Length(2), // hints
            Constraint::Fill(1),
        ])
        .split(column);

        let title = match self.kind {
            TransactionKind::Expenses => "New expense",
            TransactionKind::Incomes => "New income",
        };
        frame.render_widget(
            Paragraph::new(Span::styled(title, theme::title_style())),
            layout[0],
        );

        form::render_field(frame, layout[1], &self.name, self.active == Field::Name);
        form::render_field(frame, layout[2], &self.amount, self.active == Field::Amount);

        let category_value = self
            .selected_category()
            .map_or("(none)", |c| c.name.as_str());
        let category_label = match self.kind {
            TransactionKind::Expenses => "Category (required)",
            TransactionKind::Incomes => "Category (optional)",
        };
        self.render_picker(frame, layout[3], category_label, category_value, Field::Category);

        let sub_value = self
            .selected_category()
            .zip(self.sub_category_idx)
            .and_then(|(c, i)| c.sub_categories.get(i))
            .map_or("(none)", |s| s.name.as_str());
        self.render_picker(frame, layout[4], "Sub-category", sub_value, Field::SubCategory);

        if self.submitting {
            let throbber = throbber_widgets_tui::Throbber::default()
                .label(" Saving\u{2026}")
                .style(theme::table_row())
                .throbber_style(theme::border_focused());
            frame.render_stateful_widget(throbber, layout[5], &mut self.throbber_state.clone());
        } else if let Some(error) = &self.error {
            frame.render_widget(
                Paragraph::new(Span::styled(error.clone(), theme::error_text())),
                layout[5],
            );
        }

        let hints = Line::from(vec![
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("save  ", theme::key_hint()),
            Span::styled("Tab ", theme::key_hint_key()),
            Span::styled("next field  ", theme::key_hint()),
            Span::styled("←/→ ", theme::key_hint_key()),
            Span::styled("pick  ", theme::key_hint()),
            Span::styled("Esc ", theme::key_hint_key()),
            Span::styled("cancel", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[6]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
