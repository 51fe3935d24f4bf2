//! Data bridge — connects store watch feeds to TUI actions.
//!
//! Runs as a background task: subscribes to every store's `watch()`
//! channel and forwards each snapshot as an [`Action`] through the TUI's
//! action channel, so screens receive state through the same mechanism
//! as everything else and never poll stores during render.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use fundly_core::Stores;

use crate::action::Action;

/// Forward store snapshots into the action channel until cancelled.
pub async fn run_data_bridge(
    stores: Stores,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let mut app = stores.app.watch();
    let mut user = stores.user.watch();
    let mut budgets = stores.budgets.watch();
    let mut categories = stores.categories.watch();

    // Push initial snapshots so screens have state immediately.
    let _ = action_tx.send(Action::AppChanged(app.borrow_and_update().clone()));
    let _ = action_tx.send(Action::UserChanged(user.borrow_and_update().clone()));
    let _ = action_tx.send(Action::BudgetsChanged(budgets.borrow_and_update().clone()));
    let _ = action_tx.send(Action::CategoriesChanged(
        categories.borrow_and_update().clone(),
    ));

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            Ok(()) = app.changed() => {
                let _ = action_tx.send(Action::AppChanged(app.borrow_and_update().clone()));
            }
            Ok(()) = user.changed() => {
                let _ = action_tx.send(Action::UserChanged(user.borrow_and_update().clone()));
            }
            Ok(()) = budgets.changed() => {
                let _ = action_tx.send(Action::BudgetsChanged(
                    budgets.borrow_and_update().clone(),
                ));
            }
            Ok(()) = categories.changed() => {
                let _ = action_tx.send(Action::CategoriesChanged(
                    categories.borrow_and_update().clone(),
                ));
            }
        }
    }

    debug!("data bridge shut down");
}
