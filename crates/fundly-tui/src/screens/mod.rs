//! Screen implementations. Each screen is a top-level Component.

pub mod budget_detail;
pub mod budget_form;
pub mod budgets;
pub mod categories;
pub mod category_form;
pub mod forgot_password;
pub mod landing;
pub mod login;
pub mod register;
pub mod reset_password;
pub mod summary;
pub mod transaction_form;

use crate::component::Component;
use crate::screen::ScreenId;

/// Create one component per route.
pub fn create_screens() -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (
            ScreenId::Landing,
            Box::new(landing::LandingScreen::new()),
        ),
        (ScreenId::Login, Box::new(login::LoginScreen::new())),
        (
            ScreenId::Register,
            Box::new(register::RegisterScreen::new()),
        ),
        (
            ScreenId::ForgotPassword,
            Box::new(forgot_password::ForgotPasswordScreen::new()),
        ),
        (
            ScreenId::ResetPassword,
            Box::new(reset_password::ResetPasswordScreen::new()),
        ),
        (ScreenId::Budgets, Box::new(budgets::BudgetsScreen::new())),
        (
            ScreenId::BudgetDetail,
            Box::new(budget_detail::BudgetDetailScreen::new()),
        ),
        (
            ScreenId::BudgetForm,
            Box::new(budget_form::BudgetFormScreen::new()),
        ),
        (
            ScreenId::TransactionForm,
            Box::new(transaction_form::TransactionFormScreen::new()),
        ),
        (ScreenId::Summary, Box::new(summary::SummaryScreen::new())),
        (
            ScreenId::Categories,
            Box::new(categories::CategoriesScreen::new()),
        ),
        (
            ScreenId::CategoryForm,
            Box::new(category_form::CategoryFormScreen::new()),
        ),
    ]
}
