//! Screen identifier enum — one variant per route.

use std::fmt;

/// Identifies each TUI screen.
///
/// Route parameters (the budget behind the detail / summary /
/// transaction screens) live in the app's navigation context, set by
/// the `OpenBudget` / `OpenSummary` / `OpenTransactionForm` actions
/// before the screen switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    /// Welcome screen for signed-out users.
    #[default]
    Landing,
    Login,
    Register,
    ForgotPassword,
    ResetPassword,
    /// Budget listing — the home screen for signed-in users.
    Budgets,
    BudgetDetail,
    BudgetForm,
    TransactionForm,
    Summary,
    Categories,
    CategoryForm,
}

impl ScreenId {
    /// Home-area tabs, navigable by number keys when signed in.
    pub const TABS: [ScreenId; 2] = [Self::Budgets, Self::Categories];

    /// `true` for screens that capture free text input (number keys and
    /// other global shortcuts must not steal keystrokes there).
    pub fn captures_input(self) -> bool {
        matches!(
            self,
            Self::Login
                | Self::Register
                | Self::ForgotPassword
                | Self::ResetPassword
                | Self::BudgetForm
                | Self::TransactionForm
                | Self::CategoryForm
        )
    }

    /// `true` for screens reachable without a session.
    pub fn is_public(self) -> bool {
        matches!(
            self,
            Self::Landing
                | Self::Login
                | Self::Register
                | Self::ForgotPassword
                | Self::ResetPassword
        )
    }

    /// Short label for the tab bar / titles.
    pub fn label(self) -> &'static str {
        match self {
            Self::Landing => "Welcome",
            Self::Login => "Sign in",
            Self::Register => "Register",
            Self::ForgotPassword => "Forgot password",
            Self::ResetPassword => "Reset password",
            Self::Budgets => "Budgets",
            Self::BudgetDetail => "Budget",
            Self::BudgetForm => "New budget",
            Self::TransactionForm => "New transaction",
            Self::Summary => "Summary",
            Self::Categories => "Categories",
            Self::CategoryForm => "New category",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_screens_capture_input() {
        assert!(ScreenId::Login.captures_input());
        assert!(ScreenId::CategoryForm.captures_input());
        assert!(!ScreenId::Budgets.captures_input());
    }

    #[test]
    fn auth_screens_are_public() {
        assert!(ScreenId::Landing.is_public());
        assert!(ScreenId::ResetPassword.is_public());
        assert!(!ScreenId::BudgetDetail.is_public());
    }
}
