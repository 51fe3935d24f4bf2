//! All possible UI actions. Actions are the sole mechanism for state
//! mutation: screens dispatch command requests, the app spawns the store
//! command and feeds the outcome back as a result action, and the data
//! bridge forwards store snapshots as `*Changed` actions.

use std::collections::HashMap;
use std::fmt;

use fundly_core::model::{Budget, NewBudget, NewCategory, NewTransaction, User};
use fundly_core::{AppState, BudgetsState, CategoryState, TransactionKind, UserState};
use secrecy::SecretString;

use crate::screen::ScreenId;

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A toast notification.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }
}

/// Pending confirmation dialog content.
#[derive(Debug, Clone)]
pub enum ConfirmAction {
    DeleteCategory { id: i64, name: String },
    SignOut,
}

impl fmt::Display for ConfirmAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeleteCategory { name, .. } => {
                write!(f, "Delete category {name}? This cannot be undone.")
            }
            Self::SignOut => write!(f, "Sign out?"),
        }
    }
}

/// Register failure payload: field-keyed errors when the server sent a
/// validation map, otherwise a single message.
#[derive(Debug, Clone, Default)]
pub struct RegisterFailure {
    pub fields: HashMap<String, String>,
    pub message: String,
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    Navigate(ScreenId),
    GoBack,
    /// Navigate to the detail screen of one budget (fetches it).
    OpenBudget(i64),
    /// Navigate to the summary screen of one budget (fetches it).
    OpenSummary(i64),
    /// Navigate to the add-expense / add-income form for one budget.
    OpenTransactionForm {
        budget_id: i64,
        kind: TransactionKind,
    },

    // ── Data (from the store watch feeds) ─────────────────────────
    AppChanged(AppState),
    UserChanged(UserState),
    BudgetsChanged(BudgetsState),
    CategoriesChanged(CategoryState),

    // ── Command requests (from screens) ───────────────────────────
    SignIn {
        username: String,
        password: SecretString,
    },
    Register {
        username: String,
        email: String,
        password: SecretString,
    },
    RequestPasswordReset {
        email: String,
    },
    SubmitNewPassword {
        email: String,
        token: String,
        password: SecretString,
    },
    CreateBudget(NewBudget),
    AddTransaction {
        budget_id: i64,
        kind: TransactionKind,
        tx: NewTransaction,
    },
    CreateCategory(NewCategory),
    /// Asks for confirmation before the delete command runs.
    RequestDeleteCategory {
        id: i64,
        name: String,
    },
    /// Budget deletion is not implemented server-side; this surfaces
    /// the placeholder alert.
    RequestDeleteBudget,
    RequestSignOut,

    // ── Command results (view-side effects decided here) ──────────
    SignInFinished(Result<(), String>),
    SignOutFinished(Result<(), String>),
    RegisterFinished(Result<User, RegisterFailure>),
    PasswordResetRequested(Result<(), String>),
    NewPasswordFinished(Result<(), String>),
    BudgetCreated(Result<Budget, String>),
    TransactionAdded {
        budget_id: i64,
        result: Result<(), String>,
    },
    CategoryCreated(Result<i64, String>),
    CategoryDeleted(Result<(), String>),

    // ── Dialogs & notifications ───────────────────────────────────
    ShowConfirm(ConfirmAction),
    ConfirmYes,
    ConfirmNo,
    /// Blocking alert modal; any key dismisses.
    ShowAlert(String),
    DismissAlert,
    Notify(Notification),
    DismissNotification,
}
