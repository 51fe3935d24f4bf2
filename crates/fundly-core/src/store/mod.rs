// ── Entity stores ──
//
// One store per domain entity. Each pairs an `ApiClient` with a
// `StateCell` and exposes async commands following one transition
// discipline: any pre-state patch is applied synchronously before the
// request is dispatched, and the post-state patch is applied exactly
// once after the single request settles. Commands return their outcome;
// navigation and alerts belong to the view layer.

pub mod app;
pub mod budgets;
pub mod categories;
pub mod cell;
pub mod user;

pub use app::AppStore;
pub use budgets::BudgetsStore;
pub use categories::CategoriesStore;
pub use cell::{StateCell, Subscription};
pub use user::UserStore;
