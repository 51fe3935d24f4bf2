//! Category listing with delete.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};

use fundly_core::model::Category;

use crate::action::Action;
use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme;

pub struct CategoriesScreen {
    focused: bool,
    categories: Vec<Category>,
    table_state: TableState,
}

impl CategoriesScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            categories: Vec::new(),
            table_state: TableState::default(),
        }
    }

    fn selected(&self) -> Option<&Category> {
        self.categories
            .get(self.table_state.selected().unwrap_or(0))
    }

    fn move_selection(&mut self, delta: isize) {
        if self.categories.is_empty() {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let next = current
            .checked_add_signed(delta)
            .unwrap_or(0)
            .min(self.categories.len() - 1);
        self.table_state.select(Some(next));
    }
}

impl Component for CategoriesScreen {
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
            KeyCode::Char('n') => Ok(Some(Action::Navigate(ScreenId::CategoryForm))),
            KeyCode::Char('d') | KeyCode::Delete => {
                Ok(self.selected().map(|c| Action::RequestDeleteCategory {
                    id: c.id,
                    name: c.name.clone(),
                }))
            }
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::CategoriesChanged(state) = action {
            self.categories.clone_from(&state.categories);
            if !self.categories.is_empty()
                && self.table_state.selected().unwrap_or(0) >= self.categories.len()
            {
                self.table_state.select(Some(self.categories.len() - 1));
            }
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" Categories ({}) ", self.categories.len()))
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

        if self.categories.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "  No categories yet. Press n to create one.",
                    Style::default().fg(theme::DIM_WHITE),
                )),
                layout[0],
            );
        } else {
            let header = Row::new(vec![
                Cell::from("Name").style(theme::table_header()),
                Cell::from("Sub-categories").style(theme::table_header()),
            ]);

            let selected_idx = self.table_state.selected().unwrap_or(0);
            let rows: Vec<Row> = self
                .categories
                .iter()
                .enumerate()
                .map(|(i, category)| {
                    let prefix = if i == selected_idx { "▸ " } else { "  " };
                    let subs = if category.sub_categories.is_empty() {
                        "─".to_owned()
                    } else {
                        category
                            .sub_categories
                            .iter()
                            .map(|s| s.name.as_str())
                            .collect::<Vec<_>>()
                            .join(", ")
                    };
                    Row::new(vec![
                        Cell::from(format!("{prefix}{}", category.name))
                            .style(Style::default().fg(theme::ACCENT_CYAN)),
                        Cell::from(subs).style(theme::table_row()),
                    ])
                    .style(if i == selected_idx {
                        theme::table_selected()
                    } else {
                        theme::table_row()
                    })
                })
                .collect();

            let table = Table::new(rows, [Constraint::Fill(1), Constraint::Fill(2)]).header(header);

            let mut state = self.table_state.clone();
            frame.render_stateful_widget(table, layout[0], &mut state);
        }

        let hints = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("navigate  ", theme::key_hint()),
            Span::styled("n ", theme::key_hint_key()),
            Span::styled("new category  ", theme::key_hint()),
            Span::styled("d ", theme::key_hint_key()),
            Span::styled("delete", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[1]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
