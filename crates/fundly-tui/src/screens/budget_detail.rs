//! Budget detail — totals plus the expense and income ledgers.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};

use fundly_core::model::{Budget, Transaction};
use fundly_core::{Loadable, TransactionKind};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::money;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pane {
    Expenses,
    Incomes,
}

pub struct BudgetDetailScreen {
    focused: bool,
    budget: Loadable<Budget>,
    active_pane: Pane,
    expenses_state: TableState,
    incomes_state: TableState,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl BudgetDetailScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            budget: Loadable::Loading,
            active_pane: Pane::Expenses,
            expenses_state: TableState::default(),
            incomes_state: TableState::default(),
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let Some(budget) = self.budget.data() else {
            return;
        };
        let (state, len) = match self.active_pane {
            Pane::Expenses => (&mut self.expenses_state, budget.expenses.len()),
            Pane::Incomes => (&mut self.incomes_state, budget.incomes.len()),
        };
        if len == 0 {
            return;
        }
        let current = state.selected().unwrap_or(0);
        let next = current.checked_add_signed(delta).unwrap_or(0).min(len - 1);
        state.select(Some(next));
    }

    fn render_ledger(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        transactions: &[Transaction],
        pane: Pane,
    ) {
        let active = self.active_pane == pane;
        let block = Block::default()
            .title(format!(" {title} ({}) ", transactions.len()))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if active && self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if transactions.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "  Nothing recorded yet.",
                    Style::default().fg(theme::DIM_WHITE),
                )),
                inner,
            );
            return;
        }

        let header = Row::new(vec![
            Cell::from("Name").style(theme::table_header()),
            Cell::from("Date").style(theme::table_header()),
            Cell::from("Amount").style(theme::table_header()),
        ]);

        let amount_style = match pane {
            Pane::Expenses => theme::amount_negative(),
            Pane::Incomes => theme::amount_positive(),
        };
        let state = match pane {
            Pane::Expenses => &self.expenses_state,
            Pane::Incomes => &self.incomes_state,
        };
        let selected_idx = state.selected().unwrap_or(0);

        let rows: Vec<Row> = transactions
            .iter()
            .enumerate()
            .map(|(i, tx)| {
                let name = tx.name.as_deref().filter(|s| !s.is_empty()).unwrap_or("─");
                let date = tx
                    .local_date
                    .map_or_else(|| "─".into(), |d| d.format("%Y-%m-%d").to_string());
                Row::new(vec![
                    Cell::from(name.to_owned()).style(theme::table_row()),
                    Cell::from(date).style(Style::default().fg(theme::DIM_WHITE)),
                    Cell::from(money::format_amount(tx.amount)).style(amount_style),
                ])
                .style(if active && i == selected_idx {
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
                Constraint::Length(12),
                Constraint::Length(14),
            ],
        )
        .header(header);

        let mut table_state = state.clone();
        frame.render_stateful_widget(table, inner, &mut table_state);
    }
}

impl Component for BudgetDetailScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let budget_id = self.budget.data().map(|b| b.id);
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection(1);
                Ok(None)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection(-1);
                Ok(None)
            }
            KeyCode::Tab | KeyCode::Left | KeyCode::Right => {
                self.active_pane = match self.active_pane {
                    Pane::Expenses => Pane::Incomes,
                    Pane::Incomes => Pane::Expenses,
                };
                Ok(None)
            }
            KeyCode::Char('e') => Ok(budget_id.map(|id| Action::OpenTransactionForm {
                budget_id: id,
                kind: TransactionKind::Expenses,
            })),
            KeyCode::Char('i') => Ok(budget_id.map(|id| Action::OpenTransactionForm {
                budget_id: id,
                kind: TransactionKind::Incomes,
            })),
            KeyCode::Char('s') => Ok(budget_id.map(Action::OpenSummary)),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::BudgetsChanged(state) => {
                self.budget = state.current_budget.clone();
            }
            Action::OpenBudget(_) => {
                self.active_pane = Pane::Expenses;
                self.expenses_state.select(Some(0));
                self.incomes_state.select(Some(0));
            }
            Action::Tick if self.budget.is_loading() => {
                self.throbber_state.calc_next();
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        match &self.budget {
            Loadable::Loading => {
                let throbber = throbber_widgets_tui::Throbber::default()
                    .label("  Loading budget\u{2026}")
                    .style(theme::table_row())
                    .throbber_style(theme::border_focused());
                frame.render_stateful_widget(throbber, area, &mut self.throbber_state.clone());
            }
            Loadable::Error => {
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        "  Could not load this budget. Press Esc to go back.",
                        theme::error_text(),
                    )),
                    area,
                );
            }
            Loadable::Success(budget) => {
                let layout = Layout::vertical([
                    Constraint::Length(2), // header with totals
                    Constraint::Min(5),    // ledgers
                    Constraint::Length(1), // hints
                ])
                .split(area);

                let balance_style = if budget.balance < 0.0 {
                    theme::amount_negative()
                } else {
                    theme::amount_positive()
                };
                let header = Line::from(vec![
                    Span::styled(format!(" {} ", budget.name), theme::title_style()),
                    Span::styled("  Balance ", Style::default().fg(theme::DIM_WHITE)),
                    Span::styled(money::format_signed(budget.balance), balance_style),
                    Span::styled("  Income ", Style::default().fg(theme::DIM_WHITE)),
                    Span::styled(
                        money::format_amount(budget.total_income),
                        theme::amount_positive(),
                    ),
                    Span::styled("  Expenses ", Style::default().fg(theme::DIM_WHITE)),
                    Span::styled(
                        money::format_amount(budget.total_expense),
                        theme::amount_negative(),
                    ),
                ]);
                frame.render_widget(Paragraph::new(header), layout[0]);

                let panes =
                    Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                        .split(layout[1]);
                self.render_ledger(frame, panes[0], "Expenses", &budget.expenses, Pane::Expenses);
                self.render_ledger(frame, panes[1], "Incomes", &budget.incomes, Pane::Incomes);

                let hints = Line::from(vec![
                    Span::styled("  e ", theme::key_hint_key()),
                    Span::styled("add expense  ", theme::key_hint()),
                    Span::styled("i ", theme::key_hint_key()),
                    Span::styled("add income  ", theme::key_hint()),
                    Span::styled("s ", theme::key_hint_key()),
                    Span::styled("summary  ", theme::key_hint()),
                    Span::styled("Tab ", theme::key_hint_key()),
                    Span::styled("switch pane  ", theme::key_hint()),
                    Span::styled("Esc ", theme::key_hint_key()),
                    Span::styled("back", theme::key_hint()),
                ]);
                frame.render_widget(Paragraph::new(hints), layout[2]);
            }
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
