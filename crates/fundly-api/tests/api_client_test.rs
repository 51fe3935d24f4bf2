#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fundly_api::types::{NewBudget, NewCategory, NewSubCategory, NewTransaction};
use fundly_api::{ApiClient, Error, TransactionKind};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn secret(s: &str) -> secrecy::SecretString {
    s.to_string().into()
}

// ── Version / users ─────────────────────────────────────────────────

#[tokio::test]
async fn test_app_version() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/version"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "version": 12,
            "buildDate": "2024-06-01"
        })))
        .mount(&server)
        .await;

    let version = client.app_version().await.unwrap();
    assert_eq!(version.version, 12);
    assert_eq!(version.build_date, "2024-06-01");
}

#[tokio::test]
async fn test_current_user() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/users/current-user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "email": "jane@example.com",
            "username": "jane"
        })))
        .mount(&server)
        .await;

    let user = client.current_user().await.unwrap();
    assert_eq!(user.username, "jane");
    assert_eq!(user.email, "jane@example.com");
}

#[tokio::test]
async fn test_current_user_unauthorized() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/users/current-user"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.current_user().await;
    assert!(
        matches!(result, Err(Error::Unauthorized)),
        "expected Unauthorized, got: {result:?}"
    );
}

// ── Authentication ──────────────────────────────────────────────────

#[tokio::test]
async fn test_sign_in_sends_form_credentials() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/signin"))
        .and(body_string_contains("username=jane"))
        .and(body_string_contains("password=hunter2"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    client.sign_in("jane", &secret("hunter2")).await.unwrap();
}

#[tokio::test]
async fn test_sign_in_failure_propagates() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/signin"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let result = client.sign_in("jane", &secret("wrong")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_register_success() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/register"))
        .and(body_json(json!({
            "username": "jane",
            "email": "jane@example.com",
            "password": "hunter2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "email": "jane@example.com",
            "username": "jane"
        })))
        .mount(&server)
        .await;

    let user = client
        .register("jane", "jane@example.com", &secret("hunter2"))
        .await
        .unwrap();
    assert_eq!(user.username, "jane");
}

#[tokio::test]
async fn test_register_field_errors_map_to_validation() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "email": "Email is already taken",
            "password": "Password too short"
        })))
        .mount(&server)
        .await;

    let err = client
        .register("jane", "jane@example.com", &secret("x"))
        .await
        .unwrap_err();

    let errors = err.validation_errors().expect("validation error expected");
    assert_eq!(errors["email"], "Email is already taken");
    assert_eq!(errors["password"], "Password too short");
}

#[tokio::test]
async fn test_change_password_query_encoding() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/change-password"))
        .and(query_param("email", "jane@example.com"))
        .and(query_param("token", "tok-123"))
        .and(query_param("newPassword", "s3cret"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    client
        .change_password("jane@example.com", "tok-123", &secret("s3cret"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_request_password_change() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/request-change-password"))
        .and(body_json(json!({ "email": "jane@example.com" })))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    client
        .request_password_change("jane@example.com")
        .await
        .unwrap();
}

// ── Budgets ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_budgets() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/budgets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Household", "balance": 150.0,
              "totalIncome": 200.0, "totalExpense": 50.0 },
            { "id": 2, "name": "Travel", "balance": 0.0,
              "totalIncome": 0.0, "totalExpense": 0.0 }
        ])))
        .mount(&server)
        .await;

    let budgets = client.list_budgets().await.unwrap();
    assert_eq!(budgets.len(), 2);
    assert_eq!(budgets[0].name, "Household");
    assert!(budgets[0].expenses.is_empty());
}

#[tokio::test]
async fn test_get_budget_with_transactions() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/budgets/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42,
            "name": "Groceries",
            "balance": 150.0,
            "totalIncome": 200.0,
            "totalExpense": 50.0,
            "expenses": [
                { "id": 7, "name": "weekly shop", "amount": 50.0,
                  "idCategory": 3, "idSubCategory": 7, "localDate": "2024-06-01" }
            ],
            "incomes": [
                { "id": 8, "name": "salary", "amount": 200.0 }
            ]
        })))
        .mount(&server)
        .await;

    let budget = client.get_budget(42).await.unwrap();
    assert_eq!(budget.id, 42);
    assert_eq!(budget.expenses.len(), 1);
    assert_eq!(budget.incomes.len(), 1);
    assert_eq!(budget.expenses[0].id_category, Some(3));
}

#[tokio::test]
async fn test_create_budget() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/budgets"))
        .and(body_json(json!({ "name": "Groceries" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 9, "name": "Groceries", "balance": 0.0,
            "totalIncome": 0.0, "totalExpense": 0.0
        })))
        .mount(&server)
        .await;

    let budget = client
        .create_budget(&NewBudget {
            name: "Groceries".into(),
        })
        .await
        .unwrap();
    assert_eq!(budget.id, 9);
    assert_eq!(budget.name, "Groceries");
}

#[tokio::test]
async fn test_add_expense_posts_to_budget_scoped_path() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/budgets/42/expenses"))
        .and(body_json(json!({
            "name": "",
            "amount": 50.0,
            "idCategory": 3,
            "idSubCategory": 7
        })))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    client
        .add_transaction(
            42,
            TransactionKind::Expenses,
            &NewTransaction {
                name: String::new(),
                amount: 50.0,
                id_category: Some(3),
                id_sub_category: Some(7),
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_add_income_uses_incomes_segment() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/budgets/42/incomes"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    client
        .add_transaction(
            42,
            TransactionKind::Incomes,
            &NewTransaction {
                name: "salary".into(),
                amount: 1000.0,
                id_category: None,
                id_sub_category: None,
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_budget_summary() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/budgets/42/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "expensesSummary": [{
                "categoryId": 3,
                "totalExpenses": 120.5,
                "subcategories": [{ "subcategoryId": 7, "expenseAmount": 80.0 }],
                "percentageOfTotal": 60.25
            }]
        })))
        .mount(&server)
        .await;

    let summary = client.get_budget_summary(42).await.unwrap();
    assert_eq!(summary.expenses_summary.len(), 1);
    assert_eq!(summary.expenses_summary[0].category_id, Some(3));
}

// ── Categories ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_categories() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 3, "name": "Food", "subCategories": [
                { "id": 7, "name": "Groceries" },
                { "id": 8, "name": "Restaurants" }
            ]}
        ])))
        .mount(&server)
        .await;

    let categories = client.list_categories().await.unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].sub_categories.len(), 2);
    assert_eq!(categories[0].sub_categories[1].name, "Restaurants");
}

#[tokio::test]
async fn test_create_category_with_subcategories() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/categories"))
        .and(body_json(json!({
            "name": "Food",
            "subCategories": [{ "name": "Groceries" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3, "name": "Food",
            "subCategories": [{ "id": 7, "name": "Groceries" }]
        })))
        .mount(&server)
        .await;

    let category = client
        .create_category(&NewCategory {
            name: "Food".into(),
            sub_categories: vec![NewSubCategory {
                name: "Groceries".into(),
            }],
        })
        .await
        .unwrap();
    assert_eq!(category.id, 3);
}

#[tokio::test]
async fn test_create_category_server_message_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "Category name already exists"
        })))
        .mount(&server)
        .await;

    let err = client
        .create_category(&NewCategory {
            name: "Food".into(),
            sub_categories: vec![],
        })
        .await
        .unwrap_err();

    assert_eq!(err.server_message(), Some("Category name already exists"));
}

#[tokio::test]
async fn test_delete_category() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/categories/3"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    client.delete_category(3).await.unwrap();
}

#[tokio::test]
async fn test_delete_category_failure() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/categories/3"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client.delete_category(3).await.unwrap_err();
    assert!(
        matches!(err, Error::Api { status: 500, .. }),
        "expected Api error, got: {err:?}"
    );
}

// ── Error mapping ───────────────────────────────────────────────────

#[tokio::test]
async fn test_malformed_success_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/budgets"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client.list_budgets().await.unwrap_err();
    assert!(
        matches!(err, Error::Deserialization { .. }),
        "expected Deserialization error, got: {err:?}"
    );
}

#[tokio::test]
async fn test_multibyte_body_preview_truncates_on_char_boundary() {
    let (server, client) = setup().await;

    // A non-JSON body where byte 200 lands inside a multi-byte character;
    // the preview must truncate cleanly instead of panicking.
    let body = format!("{}é-not-json", "x".repeat(199));
    Mock::given(method("GET"))
        .and(path("/api/budgets"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let err = client.list_budgets().await.unwrap_err();
    assert!(
        matches!(err, Error::Deserialization { .. }),
        "expected Deserialization error, got: {err:?}"
    );
}
