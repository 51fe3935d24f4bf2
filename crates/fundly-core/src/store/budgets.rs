// ── Budgets store ──

use fundly_api::types::{Budget, ExpensesSummary, NewBudget, NewTransaction};
use fundly_api::{ApiClient, TransactionKind};
use tokio::sync::watch;
use tracing::warn;

use crate::error::Error;
use crate::loadable::Loadable;
use crate::store::cell::{StateCell, Subscription};

/// Budgets state: the listing collection plus the two loadable
/// single-entity views (detail and summary).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetsState {
    pub budgets: Vec<Budget>,
    pub current_budget: Loadable<Budget>,
    pub summary: Loadable<ExpensesSummary>,
}

/// Store for budgets and their nested transactions.
#[derive(Debug, Clone)]
pub struct BudgetsStore {
    api: ApiClient,
    cell: StateCell<BudgetsState>,
}

impl BudgetsStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            cell: StateCell::new(BudgetsState::default()),
        }
    }

    /// Snapshot of the latest applied state.
    pub fn state(&self) -> BudgetsState {
        self.cell.get()
    }

    pub fn subscribe(
        &self,
        listener: impl Fn(&BudgetsState) + Send + Sync + 'static,
    ) -> Subscription<BudgetsState> {
        self.cell.subscribe(listener)
    }

    pub fn watch(&self) -> watch::Receiver<BudgetsState> {
        self.cell.watch()
    }

    /// Fetch the budget listing. Success replaces the collection;
    /// failure leaves the prior collection untouched and logs.
    pub async fn fetch_all(&self) {
        match self.api.list_budgets().await {
            Ok(budgets) => self.cell.patch(|state| state.budgets = budgets),
            Err(error) => warn!(%error, "failed to fetch budgets"),
        }
    }

    /// Fetch one budget into `current_budget`.
    ///
    /// The wrapper goes to `Loading` before the request is dispatched
    /// and settles to exactly one of `Success`/`Error`.
    pub async fn fetch(&self, id: i64) {
        self.cell
            .patch(|state| state.current_budget = Loadable::Loading);

        match self.api.get_budget(id).await {
            Ok(budget) => self
                .cell
                .patch(|state| state.current_budget = Loadable::Success(budget)),
            Err(error) => {
                warn!(%error, id, "failed to fetch budget");
                self.cell
                    .patch(|state| state.current_budget = Loadable::Error);
            }
        }
    }

    /// Fetch the server-computed expense breakdown into `summary`.
    pub async fn fetch_summary(&self, id: i64) {
        self.cell.patch(|state| state.summary = Loadable::Loading);

        match self.api.get_budget_summary(id).await {
            Ok(summary) => self
                .cell
                .patch(|state| state.summary = Loadable::Success(summary)),
            Err(error) => {
                warn!(%error, id, "failed to fetch budget summary");
                self.cell.patch(|state| state.summary = Loadable::Error);
            }
        }
    }

    /// Create a budget. No state is patched here: the listing refreshes
    /// when the view navigates back to it on `Ok`.
    pub async fn create(&self, budget: NewBudget) -> Result<Budget, Error> {
        self.api.create_budget(&budget).await.map_err(|error| {
            warn!(%error, "failed to create budget");
            Error::from(error)
        })
    }

    /// Record an expense against a budget. The view navigates to the
    /// budget detail on `Ok`, which refetches.
    pub async fn add_expense(&self, budget_id: i64, tx: NewTransaction) -> Result<(), Error> {
        self.add_transaction(budget_id, TransactionKind::Expenses, tx)
            .await
    }

    /// Record an income against a budget.
    pub async fn add_income(&self, budget_id: i64, tx: NewTransaction) -> Result<(), Error> {
        self.add_transaction(budget_id, TransactionKind::Incomes, tx)
            .await
    }

    async fn add_transaction(
        &self,
        budget_id: i64,
        kind: TransactionKind,
        tx: NewTransaction,
    ) -> Result<(), Error> {
        self.api
            .add_transaction(budget_id, kind, &tx)
            .await
            .map_err(|error| {
                warn!(%error, budget_id, "failed to add transaction");
                Error::from(error)
            })
    }
}
