// Budget endpoints
//
// Listing omits the transaction arrays; the detail endpoint includes them.
// Expenses and incomes are only ever created nested under a budget.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{Budget, ExpensesSummary, NewBudget, NewTransaction};

/// Which side of a budget a transaction lands on. Doubles as the path
/// segment for the add-transaction endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Expenses,
    Incomes,
}

impl TransactionKind {
    pub fn as_path_segment(self) -> &'static str {
        match self {
            Self::Expenses => "expenses",
            Self::Incomes => "incomes",
        }
    }
}

impl ApiClient {
    /// List all budgets owned by the signed-in user.
    ///
    /// `GET /api/budgets`
    pub async fn list_budgets(&self) -> Result<Vec<Budget>, Error> {
        self.get("api/budgets").await
    }

    /// Fetch one budget with its transactions.
    ///
    /// `GET /api/budgets/{id}`
    pub async fn get_budget(&self, id: i64) -> Result<Budget, Error> {
        self.get(&format!("api/budgets/{id}")).await
    }

    /// Create a budget.
    ///
    /// `POST /api/budgets`
    pub async fn create_budget(&self, budget: &NewBudget) -> Result<Budget, Error> {
        debug!(name = %budget.name, "creating budget");
        self.post("api/budgets", budget).await
    }

    /// Fetch the server-computed per-category expense breakdown.
    ///
    /// `GET /api/budgets/{id}/summary`
    pub async fn get_budget_summary(&self, id: i64) -> Result<ExpensesSummary, Error> {
        self.get(&format!("api/budgets/{id}/summary")).await
    }

    /// Record an expense or income against a budget.
    ///
    /// `POST /api/budgets/{id}/expenses` or `.../incomes`; the server
    /// replies with an empty body.
    pub async fn add_transaction(
        &self,
        budget_id: i64,
        kind: TransactionKind,
        tx: &NewTransaction,
    ) -> Result<(), Error> {
        debug!(budget_id, kind = kind.as_path_segment(), "adding transaction");
        self.post_no_response(
            &format!("api/budgets/{budget_id}/{}", kind.as_path_segment()),
            tx,
        )
        .await
    }
}
