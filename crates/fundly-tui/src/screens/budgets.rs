//! Budget listing — the home screen for signed-in users.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};

use fundly_core::model::Budget;

use crate::action::Action;
use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme;
use crate::widgets::money;

pub struct BudgetsScreen {
    focused: bool,
    budgets: Vec<Budget>,
    table_state: TableState,
}

impl BudgetsScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            budgets: Vec::new(),
            table_state: TableState::default(),
        }
    }

    fn selected(&self) -> Option<&Budget> {
        self.budgets.get(self.table_state.selected().unwrap_or(0))
    }

    fn move_selection(&mut self, delta: isize) {
        if self.budgets.is_empty() {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let next = current
            .checked_add_signed(delta)
            .unwrap_or(0)
            .min(self.budgets.len() - 1);
        self.table_state.select(Some(next));
    }
}

impl Component for BudgetsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection(1);
                Ok(None)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection(-1);
                Ok(None)
            }
            KeyCode::Char('g') => {
                self.table_state.select(Some(0));
                Ok(None)
            }
            KeyCode::Char('G') => {
                if !self.budgets.is_empty() {
                    self.table_state.select(Some(self.budgets.len() - 1));
                }
                Ok(None)
            }
            KeyCode::Enter => Ok(self.selected().map(|b| Action::OpenBudget(b.id))),
            KeyCode::Char('s') => Ok(self.selected().map(|b| Action::OpenSummary(b.id))),
            KeyCode::Char('n') => Ok(Some(Action::Navigate(ScreenId::BudgetForm))),
            KeyCode::Char('d') => Ok(Some(Action::RequestDeleteBudget)),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::BudgetsChanged(state) = action {
            self.budgets.clone_from(&state.budgets);
            if !self.budgets.is_empty()
                && self.table_state.selected().unwrap_or(0) >= self.budgets.len()
            {
                self.table_state.select(Some(self.budgets.len() - 1));
            }
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" Budgets ({}) ", self.budgets.len()))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

        if self.budgets.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "  No budgets yet. Press n to create one.",
                    Style::default().fg(theme::DIM_WHITE),
                )),
                layout[0],
            );
        } else {
            let header = Row::new(vec![
                Cell::from("Name").style(theme::table_header()),
                Cell::from("Balance").style(theme::table_header()),
                Cell::from("Income").style(theme::table_header()),
                Cell::from("Expenses").style(theme::table_header()),
            ]);

            let selected_idx = self.table_state.selected().unwrap_or(0);
            let rows: Vec<Row> = self
                .budgets
                .iter()
                .enumerate()
                .map(|(i, budget)| {
                    let prefix = if i == selected_idx { "▸ " } else { "  " };
                    let balance_style = if budget.balance < 0.0 {
                        theme::amount_negative()
                    } else {
                        theme::amount_positive()
                    };
                    Row::new(vec![
                        Cell::from(format!("{prefix}{}", budget.name))
                            .style(Style::default().fg(theme::ACCENT_CYAN)),
                        Cell::from(money::format_signed(budget.balance)).style(balance_style),
                        Cell::from(money::format_amount(budget.total_income))
                            .style(theme::amount_positive()),
                        Cell::from(money::format_amount(budget.total_expense))
                            .style(theme::amount_negative()),
                    ])
                    .style(if i == selected_idx {
                        theme::table_selected()
                    } else {
                        theme::table_row()
                    })
                })
                .collect();

            let table = Table::new(
                rows,
                [
                    Constraint::Fill(2),
                    Constraint::Length(14),
                    Constraint::Length(14),
                    Constraint::Length(14),
                ],
            )
            .header(header);

            let mut state = self.table_state.clone();
            frame.render_stateful_widget(table, layout[0], &mut state);
        }

        let hints = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("navigate  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("open  ", theme::key_hint()),
            Span::styled("s ", theme::key_hint_key()),
            Span::styled("summary  ", theme::key_hint()),
            Span::styled("n ", theme::key_hint_key()),
            Span::styled("new budget  ", theme::key_hint()),
            Span::styled("d ", theme::key_hint_key()),
            Span::styled("delete", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[1]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
