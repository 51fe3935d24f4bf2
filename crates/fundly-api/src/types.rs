//! Wire types for the Fundly API.
//!
//! These double as the client-side domain model: the server's JSON is
//! already shaped for display, so the client carries it verbatim
//! (`fundly-core` re-exports this module as `model`). Field names are
//! camelCase on the wire; ids are server-issued integers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ── Application ──────────────────────────────────────────────────────

/// Deployed server version, shown in the client footer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppVersion {
    #[serde(default)]
    pub version: i64,
    #[serde(default)]
    pub build_date: String,
}

// ── Users ────────────────────────────────────────────────────────────

/// The signed-in account. Default is the empty placeholder used before
/// the first fetch and after a failed one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub username: String,
}

// ── Budgets ──────────────────────────────────────────────────────────

/// A budget with its server-computed totals.
///
/// The list endpoint returns budgets without transaction arrays; the
/// detail endpoint includes them. Both deserialize into this type
/// (`expenses`/`incomes` default to empty).
///
/// Server invariant, not checked client-side:
/// `balance == total_income - total_expense`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub total_income: f64,
    #[serde(default)]
    pub total_expense: f64,
    #[serde(default)]
    pub expenses: Vec<Transaction>,
    #[serde(default)]
    pub incomes: Vec<Transaction>,
}

/// A recorded expense or income, always nested under a budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    pub amount: f64,
    #[serde(default)]
    pub id_category: Option<i64>,
    #[serde(default)]
    pub id_sub_category: Option<i64>,
    #[serde(default)]
    pub local_date: Option<NaiveDate>,
}

/// Payload for creating a budget. The server fills in id and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBudget {
    pub name: String,
}

/// Payload for recording an expense or income against a budget.
///
/// Incomes may omit the category pair; expense forms require it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub name: String,
    pub amount: f64,
    pub id_category: Option<i64>,
    pub id_sub_category: Option<i64>,
}

// ── Categories ───────────────────────────────────────────────────────

/// An expense category with its embedded sub-categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub sub_categories: Vec<SubCategory>,
}

/// A sub-category, only ever embedded in a [`Category`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubCategory {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
}

/// Payload for creating a category with its sub-categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    pub sub_categories: Vec<NewSubCategory>,
}

/// Sub-category row inside a [`NewCategory`] payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSubCategory {
    pub name: String,
}

// ── Summaries ────────────────────────────────────────────────────────

/// Server-computed expense breakdown for one budget. Read-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpensesSummary {
    #[serde(default)]
    pub expenses_summary: Vec<CategoryExpenses>,
}

/// Per-category slice of a budget's expenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryExpenses {
    pub category_id: Option<i64>,
    #[serde(default)]
    pub total_expenses: f64,
    #[serde(default)]
    pub subcategories: Vec<SubcategoryExpenses>,
    #[serde(default)]
    pub percentage_of_total: f64,
}

/// Per-sub-category slice inside a [`CategoryExpenses`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubcategoryExpenses {
    pub subcategory_id: Option<i64>,
    #[serde(default)]
    pub expense_amount: f64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn budget_detail_round_trips_camel_case() {
        let json = serde_json::json!({
            "id": 42,
            "name": "Groceries",
            "balance": 150.0,
            "totalIncome": 200.0,
            "totalExpense": 50.0,
            "expenses": [{
                "id": 7,
                "name": "weekly shop",
                "amount": 50.0,
                "idCategory": 3,
                "idSubCategory": 7,
                "localDate": "2024-06-01"
            }],
            "incomes": []
        });

        let budget: Budget = serde_json::from_value(json).unwrap();
        assert_eq!(budget.id, 42);
        assert_eq!(budget.expenses[0].id_sub_category, Some(7));
        assert_eq!(
            budget.expenses[0].local_date,
            Some(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
        );
    }

    #[test]
    fn budget_listing_entry_has_empty_transactions() {
        // The list endpoint omits the transaction arrays entirely.
        let json = serde_json::json!({
            "id": 1,
            "name": "Household",
            "balance": 0.0,
            "totalIncome": 0.0,
            "totalExpense": 0.0
        });

        let budget: Budget = serde_json::from_value(json).unwrap();
        assert!(budget.expenses.is_empty());
        assert!(budget.incomes.is_empty());
    }

    #[test]
    fn new_transaction_serializes_wire_names() {
        let tx = NewTransaction {
            name: String::new(),
            amount: 50.0,
            id_category: Some(3),
            id_sub_category: Some(7),
        };

        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "",
                "amount": 50.0,
                "idCategory": 3,
                "idSubCategory": 7
            })
        );
    }

    #[test]
    fn summary_parses_nested_breakdown() {
        let json = serde_json::json!({
            "expensesSummary": [{
                "categoryId": 3,
                "totalExpenses": 120.5,
                "subcategories": [
                    { "subcategoryId": 7, "expenseAmount": 80.0 },
                    { "subcategoryId": 8, "expenseAmount": 40.5 }
                ],
                "percentageOfTotal": 60.25
            }]
        });

        let summary: ExpensesSummary = serde_json::from_value(json).unwrap();
        assert_eq!(summary.expenses_summary.len(), 1);
        assert_eq!(summary.expenses_summary[0].subcategories.len(), 2);
        assert_eq!(summary.expenses_summary[0].category_id, Some(3));
    }
}
