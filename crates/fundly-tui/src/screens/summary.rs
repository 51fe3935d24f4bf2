//! Expense summary — the server-computed per-category breakdown.

use std::collections::HashMap;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use fundly_core::Loadable;
use fundly_core::model::ExpensesSummary;

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::money;

const BAR_WIDTH: usize = 24;

pub struct SummaryScreen {
    focused: bool,
    summary: Loadable<ExpensesSummary>,
    /// Resolved from the category collection; summaries carry ids only.
    category_names: HashMap<i64, String>,
    sub_category_names: HashMap<i64, String>,
    scroll: u16,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl SummaryScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            summary: Loadable::Loading,
            category_names: HashMap::new(),
            sub_category_names: HashMap::new(),
            scroll: 0,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    fn category_name(&self, id: Option<i64>) -> String {
        id.and_then(|id| self.category_names.get(&id).cloned())
            .unwrap_or_else(|| "Uncategorised".into())
    }

    fn sub_category_name(&self, id: Option<i64>) -> String {
        id.and_then(|id| self.sub_category_names.get(&id).cloned())
            .unwrap_or_else(|| "Other".into())
    }

    fn breakdown_lines(&self, summary: &ExpensesSummary) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for entry in &summary.expenses_summary {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let filled = ((entry.percentage_of_total / 100.0) * BAR_WIDTH as f64)
                .round()
                .clamp(0.0, BAR_WIDTH as f64) as usize;
            let bar = format!(
                "{}{}",
                "█".repeat(filled),
                "░".repeat(BAR_WIDTH - filled)
            );

            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {:<20}", self.category_name(entry.category_id)),
                    Style::default().fg(theme::ACCENT_CYAN),
                ),
                Span::styled(bar, Style::default().fg(theme::ACCENT_GOLD)),
                Span::styled(
                    format!(" {:>7}", money::format_percent(entry.percentage_of_total)),
                    Style::default().fg(theme::DIM_WHITE),
                ),
                Span::styled(
                    format!("  {:>12}", money::format_amount(entry.total_expenses)),
                    theme::amount_negative(),
                ),
            ]));

            for sub in &entry.subcategories {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("   · {:<17}", self.sub_category_name(sub.subcategory_id)),
                        Style::default().fg(theme::DIM_WHITE),
                    ),
                    Span::styled(
                        format!("{:>12}", money::format_amount(sub.expense_amount)),
                        Style::default().fg(theme::DIM_WHITE),
                    ),
                ]));
            }
            lines.push(Line::from(""));
        }
        lines
    }
}

impl Component for SummaryScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll = self.scroll.saturating_add(1);
                Ok(None)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                Ok(None)
            }
            KeyCode::Char('g') => {
                self.scroll = 0;
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::BudgetsChanged(state) => {
                self.summary = state.summary.clone();
            }
            Action::CategoriesChanged(state) => {
                self.category_names = state
                    .categories
                    .iter()
                    .map(|c| (c.id, c.name.clone()))
                    .collect();
                self.sub_category_names = state
                    .categories
                    .iter()
                    .flat_map(|c| &c.sub_categories)
                    .filter_map(|s| s.id.map(|id| (id, s.name.clone())))
                    .collect();
            }
            Action::OpenSummary(_) => {
                self.scroll = 0;
            }
            Action::Tick if self.summary.is_loading() => {
                self.throbber_state.calc_next();
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Expense summary ")
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

        match &self.summary {
            Loadable::Loading => {
                let throbber = throbber_widgets_tui::Throbber::default()
                    .label("  Loading summary\u{2026}")
                    .style(theme::table_row())
                    .throbber_style(theme::border_focused());
                frame.render_stateful_widget(throbber, inner, &mut self.throbber_state.clone());
            }
            Loadable::Error => {
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        "  Could not load the summary. Press Esc to go back.",
                        theme::error_text(),
                    )),
                    inner,
                );
            }
            Loadable::Success(summary) => {
                if summary.expenses_summary.is_empty() {
                    frame.render_widget(
                        Paragraph::new(Span::styled(
                            "  No expenses recorded yet.",
                            Style::default().fg(theme::DIM_WHITE),
                        )),
                        inner,
                    );
                    return;
                }

                let layout =
                    Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

                let paragraph =
                    Paragraph::new(self.breakdown_lines(summary)).scroll((self.scroll, 0));
                frame.render_widget(paragraph, layout[0]);

                let hints = Line::from(vec![
                    Span::styled("  j/k ", theme::key_hint_key()),
                    Span::styled("scroll  ", theme::key_hint()),
                    Span::styled("Esc ", theme::key_hint_key()),
                    Span::styled("back", theme::key_hint()),
                ]);
                frame.render_widget(Paragraph::new(hints), layout[1]);
            }
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
