//! Application core — event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use fundly_core::{Stores, UserState};

use crate::action::{Action, ConfirmAction, Notification, RegisterFailure};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

/// Shown instead of server detail on any failed sign-in attempt.
const SIGN_IN_FAILED: &str = "Credentials are invalid. Please try again.";

/// Top-level application state and event loop.
pub struct App {
    /// Current active screen.
    active_screen: ScreenId,
    /// Previous screen for GoBack.
    previous_screen: Option<ScreenId>,
    /// All screen components, keyed by ScreenId.
    screens: HashMap<ScreenId, Box<dyn Component>>,
    /// Whether the app should keep running.
    running: bool,
    /// Action sender — components and command tasks dispatch through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver — main loop drains this.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// The store graph, shared with every spawned command task.
    stores: Stores,
    /// Cancellation token for the data bridge task.
    data_cancel: CancellationToken,
    /// Pending confirmation dialog (blocks other input while active).
    pending_confirm: Option<ConfirmAction>,
    /// Blocking alert modal; any key dismisses it.
    alert: Option<String>,
    /// Active notification toast with display timestamp.
    notification: Option<(Notification, Instant)>,
    /// Footer state mirrored from the app / user feeds.
    server_version: Option<i64>,
    user: UserState,
}

impl App {
    pub fn new(stores: Stores) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens().into_iter().collect();

        // A persisted session marker drops the user straight on the
        // budget listing; the first authenticated fetch decides whether
        // the cookie is actually still valid.
        let active_screen = if stores.user.is_authenticated() {
            ScreenId::Budgets
        } else {
            ScreenId::Landing
        };

        Self {
            active_screen,
            previous_screen: None,
            screens,
            running: true,
            action_tx,
            action_rx,
            stores,
            data_cancel: CancellationToken::new(),
            pending_confirm: None,
            alert: None,
            notification: None,
            server_version: None,
            user: UserState::default(),
        }
    }

    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.init_screens()?;

        // Bridge store snapshots into the action channel.
        {
            let stores = self.stores.clone();
            let tx = self.action_tx.clone();
            let cancel = self.data_cancel.clone();
            tokio::spawn(async move {
                crate::data_bridge::run_data_bridge(stores, tx, cancel).await;
            });
        }

        // Initial fetches: version always, the entity collections only
        // with a session.
        {
            let stores = self.stores.clone();
            let authenticated = self.stores.user.is_authenticated();
            tokio::spawn(async move {
                stores.app.fetch_version().await;
                if authenticated {
                    tokio::join!(
                        stores.user.fetch_current(),
                        stores.budgets.fetch_all(),
                        stores.categories.fetch_all(),
                    );
                }
            });
        }

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => {
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.data_cancel.cancel();
        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Modal overlays win, then global
    /// keys, then the active screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if self.alert.is_some() {
            return Ok(Some(Action::DismissAlert));
        }

        if self.pending_confirm.is_some() {
            return match key.code {
                KeyCode::Char('y' | 'Y') => Ok(Some(Action::ConfirmYes)),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Ok(Some(Action::ConfirmNo)),
                _ => Ok(None),
            };
        }

        // Form screens own the keyboard; they map Esc to GoBack
        // themselves.
        if self.active_screen.captures_input() {
            if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                return screen.handle_key_event(key);
            }
            return Ok(None);
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE, KeyCode::Esc) => return Ok(Some(Action::GoBack)),
            (KeyModifiers::CONTROL, KeyCode::Char('o')) => {
                if self.stores.user.is_authenticated() {
                    return Ok(Some(Action::RequestSignOut));
                }
            }
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='2')) => {
                if self.stores.user.is_authenticated() {
                    let idx = usize::from(c as u8 - b'1');
                    if let Some(&tab) = ScreenId::TABS.get(idx) {
                        return Ok(Some(Action::Navigate(tab)));
                    }
                }
            }
            (KeyModifiers::NONE, KeyCode::Tab) => {
                if self.stores.user.is_authenticated() {
                    if let Some(pos) =
                        ScreenId::TABS.iter().position(|&t| t == self.active_screen)
                    {
                        let next = ScreenId::TABS[(pos + 1) % ScreenId::TABS.len()];
                        return Ok(Some(Action::Navigate(next)));
                    }
                }
            }
            _ => {}
        }

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }

        Ok(None)
    }

    /// Switch the active screen, moving focus and recording history.
    fn switch_screen(&mut self, target: ScreenId) {
        if target == self.active_screen {
            return;
        }
        debug!("switching screen: {} → {}", self.active_screen, target);
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(false);
        }
        self.previous_screen = Some(self.active_screen);
        self.active_screen = target;
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
    }

    /// Forward an action to one screen, dispatching any follow-up.
    fn forward_to(&mut self, target: ScreenId, action: &Action) -> Result<()> {
        if let Some(screen) = self.screens.get_mut(&target) {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    /// Process a single action — update app state and propagate to components.
    #[allow(clippy::too_many_lines)]
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Resize(..) | Action::Render => {}

            Action::Tick => {
                // Auto-dismiss notifications after 3 seconds
                if let Some((_, created)) = &self.notification {
                    if created.elapsed() > Duration::from_secs(3) {
                        self.notification = None;
                    }
                }
                self.forward_to(self.active_screen, action)?;
            }

            // ── Navigation ───────────────────────────────────────────
            Action::Navigate(target) => {
                // Session guard: protected routes bounce to sign-in.
                let target = if target.is_public() || self.stores.user.is_authenticated() {
                    *target
                } else {
                    ScreenId::Login
                };
                self.switch_screen(target);

                // Listing screens refetch their collection on arrival.
                let stores = self.stores.clone();
                match target {
                    ScreenId::Budgets => {
                        tokio::spawn(async move { stores.budgets.fetch_all().await });
                    }
                    ScreenId::Categories => {
                        tokio::spawn(async move { stores.categories.fetch_all().await });
                    }
                    _ => {}
                }
            }

            Action::GoBack => {
                let target = self.previous_screen.take().unwrap_or_else(|| {
                    if self.stores.user.is_authenticated() {
                        ScreenId::Budgets
                    } else {
                        ScreenId::Landing
                    }
                });
                self.action_tx.send(Action::Navigate(target))?;
            }

            Action::OpenBudget(id) => {
                let stores = self.stores.clone();
                let id = *id;
                tokio::spawn(async move { stores.budgets.fetch(id).await });
                self.switch_screen(ScreenId::BudgetDetail);
                self.forward_to(ScreenId::BudgetDetail, action)?;
            }

            Action::OpenSummary(id) => {
                let stores = self.stores.clone();
                let id = *id;
                tokio::spawn(async move {
                    tokio::join!(
                        stores.budgets.fetch_summary(id),
                        // Summaries carry ids only; names come from here.
                        stores.categories.fetch_all(),
                    );
                });
                self.switch_screen(ScreenId::Summary);
                self.forward_to(ScreenId::Summary, action)?;
            }

            Action::OpenTransactionForm { .. } => {
                let stores = self.stores.clone();
                tokio::spawn(async move { stores.categories.fetch_all().await });
                self.switch_screen(ScreenId::TransactionForm);
                self.forward_to(ScreenId::TransactionForm, action)?;
            }

            // ── Data feeds go to ALL screens so they stay in sync ────
            Action::AppChanged(state) => {
                self.server_version = (state.version.version != 0).then_some(state.version.version);
                self.broadcast(action)?;
            }
            Action::UserChanged(state) => {
                self.user = state.clone();
                self.broadcast(action)?;
            }
            Action::BudgetsChanged(_) | Action::CategoriesChanged(_) => {
                self.broadcast(action)?;
            }

            // ── Command requests ─────────────────────────────────────
            Action::SignIn { username, password } => {
                let stores = self.stores.clone();
                let tx = self.action_tx.clone();
                let username = username.clone();
                let password = password.clone();
                tokio::spawn(async move {
                    let result = stores
                        .user
                        .sign_in(&username, &password)
                        .await
                        .map_err(|_| SIGN_IN_FAILED.to_owned());
                    let _ = tx.send(Action::SignInFinished(result));
                });
            }

            Action::Register {
                username,
                email,
                password,
            } => {
                let stores = self.stores.clone();
                let tx = self.action_tx.clone();
                let username = username.clone();
                let email = email.clone();
                let password = password.clone();
                tokio::spawn(async move {
                    let result = stores
                        .user
                        .register(&username, &email, &password)
                        .await
                        .map_err(|error| RegisterFailure {
                            fields: error.validation_errors().cloned().unwrap_or_default(),
                            message: error
                                .server_message()
                                .map_or_else(|| error.to_string(), str::to_owned),
                        });
                    let _ = tx.send(Action::RegisterFinished(result));
                });
            }

            Action::RequestPasswordReset { email } => {
                let stores = self.stores.clone();
                let tx = self.action_tx.clone();
                let email = email.clone();
                tokio::spawn(async move {
                    let result = stores
                        .user
                        .request_password_change(&email)
                        .await
                        .map_err(|error| error.to_string());
                    let _ = tx.send(Action::PasswordResetRequested(result));
                });
            }

            Action::SubmitNewPassword {
                email,
                token,
                password,
            } => {
                let stores = self.stores.clone();
                let tx = self.action_tx.clone();
                let email = email.clone();
                let token = token.clone();
                let password = password.clone();
                tokio::spawn(async move {
                    let result = stores
                        .user
                        .change_password(&email, &token, &password)
                        .await
                        .map_err(|error| error.to_string());
                    let _ = tx.send(Action::NewPasswordFinished(result));
                });
            }

            Action::CreateBudget(budget) => {
                let stores = self.stores.clone();
                let tx = self.action_tx.clone();
                let budget = budget.clone();
                tokio::spawn(async move {
                    let result = stores
                        .budgets
                        .create(budget)
                        .await
                        .map_err(|error| error.to_string());
                    let _ = tx.send(Action::BudgetCreated(result));
                });
            }

            Action::AddTransaction {
                budget_id,
                kind,
                tx: new_tx,
            } => {
                let stores = self.stores.clone();
                let tx = self.action_tx.clone();
                let budget_id = *budget_id;
                let kind = *kind;
                let new_tx = new_tx.clone();
                tokio::spawn(async move {
                    let result = match kind {
                        fundly_core::TransactionKind::Expenses => {
                            stores.budgets.add_expense(budget_id, new_tx).await
                        }
                        fundly_core::TransactionKind::Incomes => {
                            stores.budgets.add_income(budget_id, new_tx).await
                        }
                    }
                    .map_err(|error| error.to_string());
                    let _ = tx.send(Action::TransactionAdded { budget_id, result });
                });
            }

            Action::CreateCategory(category) => {
                let stores = self.stores.clone();
                let tx = self.action_tx.clone();
                let category = category.clone();
                tokio::spawn(async move {
                    // Failures land in the store's form state; only the
                    // success needs a result action for navigation.
                    let result = stores
                        .categories
                        .create(category)
                        .await
                        .map(|created| created.id)
                        .map_err(|error| error.to_string());
                    let _ = tx.send(Action::CategoryCreated(result));
                });
            }

            Action::RequestDeleteCategory { id, name } => {
                self.action_tx
                    .send(Action::ShowConfirm(ConfirmAction::DeleteCategory {
                        id: *id,
                        name: name.clone(),
                    }))?;
            }

            Action::RequestDeleteBudget => {
                self.action_tx.send(Action::ShowAlert(
                    "Deleting budgets is not available yet.".into(),
                ))?;
            }

            Action::RequestSignOut => {
                self.action_tx
                    .send(Action::ShowConfirm(ConfirmAction::SignOut))?;
            }

            // ── Command results ──────────────────────────────────────
            Action::SignInFinished(result) => {
                self.forward_to(ScreenId::Login, action)?;
                if result.is_ok() {
                    let stores = self.stores.clone();
                    tokio::spawn(async move {
                        tokio::join!(
                            stores.user.fetch_current(),
                            stores.categories.fetch_all(),
                        );
                    });
                    self.action_tx.send(Action::Navigate(ScreenId::Budgets))?;
                }
            }

            Action::SignOutFinished(result) => {
                match result {
                    Ok(()) => {
                        self.previous_screen = None;
                        self.switch_screen(ScreenId::Landing);
                        self.action_tx
                            .send(Action::Notify(Notification::info("Signed out")))?;
                    }
                    Err(message) => {
                        self.action_tx
                            .send(Action::Notify(Notification::error(message.clone())))?;
                    }
                }
            }

            Action::RegisterFinished(result) => {
                self.forward_to(ScreenId::Register, action)?;
                if let Ok(user) = result {
                    self.action_tx.send(Action::Notify(Notification::success(
                        format!("Account {} created — sign in", user.username),
                    )))?;
                    self.action_tx.send(Action::Navigate(ScreenId::Login))?;
                }
            }

            Action::PasswordResetRequested(_) => {
                self.forward_to(ScreenId::ForgotPassword, action)?;
            }

            Action::NewPasswordFinished(result) => {
                self.forward_to(ScreenId::ResetPassword, action)?;
                if result.is_ok() {
                    self.action_tx.send(Action::Notify(Notification::success(
                        "Password changed — sign in",
                    )))?;
                    self.action_tx.send(Action::Navigate(ScreenId::Login))?;
                }
            }

            Action::BudgetCreated(result) => {
                self.forward_to(ScreenId::BudgetForm, action)?;
                if let Ok(budget) = result {
                    self.action_tx.send(Action::Notify(Notification::success(
                        format!("Created {}", budget.name),
                    )))?;
                    // Navigating back to the listing refetches it.
                    self.action_tx.send(Action::Navigate(ScreenId::Budgets))?;
                }
            }

            Action::TransactionAdded { budget_id, result } => {
                self.forward_to(ScreenId::TransactionForm, action)?;
                if result.is_ok() {
                    self.action_tx.send(Action::Notify(Notification::success("Saved")))?;
                    // Reopening the detail refetches the ledgers.
                    self.action_tx.send(Action::OpenBudget(*budget_id))?;
                }
            }

            Action::CategoryCreated(result) => {
                self.forward_to(ScreenId::CategoryForm, action)?;
                if result.is_ok() {
                    self.action_tx
                        .send(Action::Navigate(ScreenId::Categories))?;
                }
            }

            Action::CategoryDeleted(result) => {
                match result {
                    Ok(()) => {
                        self.action_tx
                            .send(Action::Notify(Notification::success("Category deleted")))?;
                    }
                    // Delete failures block with an alert: the category
                    // is likely still referenced by recorded expenses.
                    Err(message) => {
                        self.action_tx.send(Action::ShowAlert(message.clone()))?;
                    }
                }
            }

            // ── Dialogs & notifications ──────────────────────────────
            Action::ShowConfirm(confirm) => {
                self.pending_confirm = Some(confirm.clone());
            }

            Action::ConfirmYes => {
                if let Some(confirm) = self.pending_confirm.take() {
                    self.execute_confirm(confirm);
                }
            }

            Action::ConfirmNo => {
                self.pending_confirm = None;
            }

            Action::ShowAlert(message) => {
                self.alert = Some(message.clone());
            }

            Action::DismissAlert => {
                self.alert = None;
            }

            Action::Notify(n) => {
                self.notification = Some((n.clone(), Instant::now()));
            }

            Action::DismissNotification => {
                self.notification = None;
            }
        }

        Ok(())
    }

    /// Send a data action to every screen.
    fn broadcast(&mut self, action: &Action) -> Result<()> {
        for screen in self.screens.values_mut() {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    /// Run the store command behind a confirmed dialog.
    fn execute_confirm(&self, confirm: ConfirmAction) {
        let stores = self.stores.clone();
        let tx = self.action_tx.clone();
        match confirm {
            ConfirmAction::DeleteCategory { id, .. } => {
                tokio::spawn(async move {
                    let result = stores
                        .categories
                        .delete(id)
                        .await
                        .map_err(|error| error.to_string());
                    let _ = tx.send(Action::CategoryDeleted(result));
                });
            }
            ConfirmAction::SignOut => {
                tokio::spawn(async move {
                    let result = stores
                        .user
                        .sign_out()
                        .await
                        .map_err(|error| error.to_string());
                    if let Err(ref error) = result {
                        warn!(%error, "sign-out failed");
                    }
                    let _ = tx.send(Action::SignOutFinished(result));
                });
            }
        }
    }

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let show_tabs = !self.active_screen.is_public();
        let layout = if show_tabs {
            Layout::vertical([
                Constraint::Min(1),    // screen content
                Constraint::Length(1), // tab bar
                Constraint::Length(1), // status bar
            ])
            .split(area)
        } else {
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area)
        };

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, layout[0]);
        }

        if show_tabs {
            self.render_tab_bar(frame, layout[1]);
        }
        self.render_status_bar(frame, layout[layout.len() - 1]);

        // Overlays, last one topmost.
        if let Some((ref notif, _)) = self.notification {
            Self::render_notification(frame, area, notif);
        }
        if let Some(ref confirm) = self.pending_confirm {
            Self::render_confirm_dialog(frame, area, confirm);
        }
        if let Some(ref alert) = self.alert {
            Self::render_alert(frame, area, alert);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::TABS
            .iter()
            .enumerate()
            .map(|(i, &id)| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(format!(" {} {} ", i + 1, id.label()), style))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(
                ScreenId::TABS
                    .iter()
                    .position(|&s| s == self.active_screen)
                    .unwrap_or(0),
            );

        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let version = self
            .server_version
            .map_or_else(String::new, |v| format!("server v{v}"));

        let mut spans = vec![
            Span::styled(" fundly ", theme::title_style()),
            Span::styled(version, theme::key_hint()),
        ];
        if !self.user.user.username.is_empty() {
            spans.push(Span::styled(" │ ", theme::key_hint()));
            spans.push(Span::styled(
                self.user.user.username.clone(),
                Style::default().fg(theme::ACCENT_GREEN),
            ));
        }
        if self.active_screen.is_public() {
            spans.push(Span::styled("  q quit", theme::key_hint()));
        } else {
            spans.push(Span::styled(
                "  1/2 tabs  ^o sign out  q quit",
                theme::key_hint(),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    /// Render a centered confirmation dialog.
    fn render_confirm_dialog(frame: &mut Frame, area: Rect, confirm: &ConfirmAction) {
        let dialog_area = centered(area, 54, 5);

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            dialog_area,
        );

        let block = Block::default()
            .title(" Confirm ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::ACCENT_GOLD));

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let text = vec![
            Line::from(Span::styled(
                format!("  {confirm}"),
                Style::default().fg(theme::DIM_WHITE),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("  y ", theme::key_hint_key()),
                Span::styled("confirm    ", theme::key_hint()),
                Span::styled("n ", theme::key_hint_key()),
                Span::styled("cancel", theme::key_hint()),
            ]),
        ];
        frame.render_widget(Paragraph::new(text), inner);
    }

    /// Render the blocking alert modal.
    fn render_alert(frame: &mut Frame, area: Rect, message: &str) {
        let dialog_area = centered(area, 54, 5);

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            dialog_area,
        );

        let block = Block::default()
            .title(" Notice ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::ERROR_RED));

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let text = vec![
            Line::from(Span::styled(
                format!("  {message}"),
                Style::default().fg(theme::DIM_WHITE),
            )),
            Line::from(""),
            Line::from(Span::styled("  press any key", theme::key_hint())),
        ];
        frame.render_widget(Paragraph::new(text), inner);
    }

    /// Render a notification toast in the bottom-right corner.
    fn render_notification(frame: &mut Frame, area: Rect, notif: &Notification) {
        use crate::action::NotificationLevel;

        let msg_len = u16::try_from(notif.message.len()).unwrap_or(u16::MAX);
        let toast_area = toast_rect(area, msg_len);

        let (border_color, icon) = match notif.level {
            NotificationLevel::Success => (theme::ACCENT_GREEN, "✓"),
            NotificationLevel::Error => (theme::ERROR_RED, "✗"),
            NotificationLevel::Info => (theme::ACCENT_CYAN, "·"),
        };

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            toast_area,
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color));

        let inner = block.inner(toast_area);
        frame.render_widget(block, toast_area);

        let line = Line::from(vec![
            Span::styled(format!(" {icon} "), Style::default().fg(border_color)),
            Span::styled(&notif.message, Style::default().fg(theme::DIM_WHITE)),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }
}

/// A centered rect of at most `width` × `height` inside `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    Rect::new(area.x + x, area.y + y, width, height)
}

/// Bottom-right toast rect for a message of `msg_len` display columns,
/// never exceeding `area`.
fn toast_rect(area: Rect, msg_len: u16) -> Rect {
    let width = (msg_len.saturating_add(6)).clamp(20, 60).min(area.width);
    let height = 3u16.min(area.height);
    let x = area.width.saturating_sub(width + 1);
    let y = area.height.saturating_sub(height + 2); // above status bar
    Rect::new(area.x + x, area.y + y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fits(outer: Rect, inner: Rect) -> bool {
        inner.right() <= outer.right() && inner.bottom() <= outer.bottom()
    }

    #[test]
    fn toast_rect_stays_inside_narrow_terminals() {
        for width in [1, 10, 19, 20, 21, 80] {
            let area = Rect::new(0, 0, width, 24);
            let toast = toast_rect(area, 40);
            assert!(fits(area, toast), "toast {toast:?} overflows {area:?}");
        }
    }

    #[test]
    fn toast_rect_stays_inside_short_terminals() {
        for height in [1, 2, 3, 24] {
            let area = Rect::new(0, 0, 80, height);
            let toast = toast_rect(area, 10);
            assert!(fits(area, toast), "toast {toast:?} overflows {area:?}");
        }
    }

    #[test]
    fn centered_never_exceeds_area() {
        let area = Rect::new(0, 0, 10, 4);
        let dialog = centered(area, 50, 10);
        assert!(fits(area, dialog), "dialog {dialog:?} overflows {area:?}");
    }
}
