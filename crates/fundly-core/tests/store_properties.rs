#![allow(clippy::unwrap_used)]
// Store behavior tests: real stores against a wiremock server, headless
// (no view layer). Each test pins one of the state-transition contracts.

use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fundly_core::model::{NewBudget, NewCategory, NewTransaction};
use fundly_core::{ApiClient, FormStatus, Loadable, MemorySession, SessionStore, Stores};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Stores, Arc<MemorySession>) {
    let server = MockServer::start().await;
    let api = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    let session = Arc::new(MemorySession::new());
    let stores = Stores::new(api, Arc::clone(&session) as Arc<dyn SessionStore>);
    (server, stores, session)
}

fn budget_json(id: i64, name: &str) -> serde_json::Value {
    json!({
        "id": id, "name": name, "balance": 0.0,
        "totalIncome": 0.0, "totalExpense": 0.0
    })
}

// ── Loadable transitions ────────────────────────────────────────────

#[tokio::test]
async fn budget_detail_transitions_loading_then_success() {
    let (server, stores, _) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/budgets/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(budget_json(42, "Groceries")))
        .mount(&server)
        .await;

    // Record every observed loadable state through a synchronous
    // listener, so an intermediate empty-success state cannot hide.
    let observed = Arc::new(Mutex::new(Vec::new()));
    let observed_by_listener = Arc::clone(&observed);
    let _sub = stores.budgets.subscribe(move |state| {
        observed_by_listener
            .lock()
            .unwrap()
            .push(state.current_budget.clone());
    });

    stores.budgets.fetch(42).await;

    let observed = observed.lock().unwrap();
    assert_eq!(observed.len(), 2);
    assert!(observed[0].is_loading());
    assert_eq!(observed[1].data().unwrap().name, "Groceries");
}

#[tokio::test]
async fn budget_detail_failure_reaches_error_state() {
    let (server, stores, _) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/budgets/42"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    stores.budgets.fetch(42).await;
    assert!(stores.budgets.state().current_budget.is_error());
}

#[tokio::test]
async fn summary_fetch_transitions_to_success() {
    let (server, stores, _) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/budgets/42/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "expensesSummary": [{
                "categoryId": 3,
                "totalExpenses": 50.0,
                "subcategories": [],
                "percentageOfTotal": 100.0
            }]
        })))
        .mount(&server)
        .await;

    stores.budgets.fetch_summary(42).await;

    let summary = stores.budgets.state().summary;
    assert_eq!(summary.data().unwrap().expenses_summary.len(), 1);
}

// ── Collection fetches ──────────────────────────────────────────────

#[tokio::test]
async fn fetch_collection_failure_keeps_prior_collection() {
    let (server, stores, _) = setup().await;

    let ok = Mock::given(method("GET"))
        .and(path("/api/budgets"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([budget_json(1, "Household")])),
        )
        .expect(1)
        .mount_as_scoped(&server)
        .await;

    stores.budgets.fetch_all().await;
    assert_eq!(stores.budgets.state().budgets.len(), 1);
    drop(ok);

    Mock::given(method("GET"))
        .and(path("/api/budgets"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    stores.budgets.fetch_all().await;

    // Failed refetch leaves the last-known listing in place.
    assert_eq!(stores.budgets.state().budgets.len(), 1);
    assert_eq!(stores.budgets.state().budgets[0].name, "Household");
}

#[tokio::test]
async fn refetching_identical_collection_is_idempotent() {
    let (server, stores, _) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 3, "name": "Food", "subCategories": [{ "id": 7, "name": "Groceries" }] }
        ])))
        .mount(&server)
        .await;

    stores.categories.fetch_all().await;
    let first = stores.categories.state();
    stores.categories.fetch_all().await;
    let second = stores.categories.state();

    assert_eq!(first, second);
}

// ── Category creation form ──────────────────────────────────────────

#[tokio::test]
async fn create_category_4xx_message_lands_in_form_state() {
    let (server, stores, _) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "Category name already exists"
        })))
        .mount(&server)
        .await;

    let result = stores
        .categories
        .create(NewCategory {
            name: "Food".into(),
            sub_categories: vec![],
        })
        .await;

    assert!(result.is_err());
    let form = stores.categories.state().form;
    assert_eq!(form.status, FormStatus::Error);
    assert_eq!(form.message, "Category name already exists");
}

#[tokio::test]
async fn create_category_sets_loading_before_dispatch() {
    let (server, stores, _) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3, "name": "Food", "subCategories": []
        })))
        .mount(&server)
        .await;

    let observed = Arc::new(Mutex::new(Vec::new()));
    let observed_by_listener = Arc::clone(&observed);
    let _sub = stores.categories.subscribe(move |state| {
        observed_by_listener.lock().unwrap().push(state.form.status);
    });

    stores
        .categories
        .create(NewCategory {
            name: "Food".into(),
            sub_categories: vec![],
        })
        .await
        .unwrap();

    // The pre-patch is the only patch on success; the form resets via
    // the listing refetch after the view navigates.
    assert_eq!(*observed.lock().unwrap(), vec![FormStatus::Loading]);
}

#[tokio::test]
async fn successful_listing_fetch_resets_form_to_idle() {
    let (server, stores, _) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "message": "nope" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let _ = stores
        .categories
        .create(NewCategory {
            name: "Food".into(),
            sub_categories: vec![],
        })
        .await;
    assert_eq!(stores.categories.state().form.status, FormStatus::Error);

    stores.categories.fetch_all().await;
    assert_eq!(stores.categories.state().form.status, FormStatus::Idle);
    assert_eq!(stores.categories.state().form.message, "");
}

// ── Category deletion ───────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_only_the_matching_category() {
    let (server, stores, _) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 3, "name": "Food", "subCategories": [] },
            { "id": 4, "name": "Transport", "subCategories": [] }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/categories/3"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    stores.categories.fetch_all().await;
    stores.categories.delete(3).await.unwrap();

    let categories = stores.categories.state().categories;
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].id, 4);
}

#[tokio::test]
async fn delete_failure_leaves_collection_unchanged() {
    let (server, stores, _) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 3, "name": "Food", "subCategories": [] }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/categories/3"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    stores.categories.fetch_all().await;
    let result = stores.categories.delete(3).await;

    assert!(result.is_err());
    assert_eq!(stores.categories.state().categories.len(), 1);
}

// ── Session / user ──────────────────────────────────────────────────

#[tokio::test]
async fn failed_sign_in_never_sets_the_marker() {
    let (server, stores, session) = setup().await;

    Mock::given(method("POST"))
        .and(path("/signin"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let result = stores
        .user
        .sign_in("jane", &secrecy::SecretString::from("wrong"))
        .await;

    assert!(result.is_err());
    assert!(!session.is_authenticated());
    assert!(!stores.user.is_authenticated());
}

#[tokio::test]
async fn successful_sign_in_sets_the_marker() {
    let (server, stores, session) = setup().await;

    Mock::given(method("POST"))
        .and(path("/signin"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    stores
        .user
        .sign_in("jane", &secrecy::SecretString::from("hunter2"))
        .await
        .unwrap();

    assert!(session.is_authenticated());
}

#[tokio::test]
async fn sign_out_clears_marker_and_resets_user() {
    let (server, stores, session) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/users/current-user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "email": "jane@example.com", "username": "jane"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/logout"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    session.set_authenticated();
    stores.user.fetch_current().await;
    assert_eq!(stores.user.state().user.username, "jane");

    stores.user.sign_out().await.unwrap();

    assert!(!session.is_authenticated());
    assert_eq!(stores.user.state().user.username, "");
    assert!(stores.user.state().is_loading);
}

#[tokio::test]
async fn failed_user_fetch_resets_to_placeholder_and_clears_loading() {
    let (server, stores, _) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/users/current-user"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    assert!(stores.user.state().is_loading);
    stores.user.fetch_current().await;

    let state = stores.user.state();
    assert_eq!(state.user.username, "");
    assert!(!state.is_loading);
}

#[tokio::test]
async fn register_failure_carries_the_field_map() {
    let (server, stores, _) = setup().await;

    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "email": "Email is already taken"
        })))
        .mount(&server)
        .await;

    let err = stores
        .user
        .register("jane", "jane@example.com", &secrecy::SecretString::from("x"))
        .await
        .unwrap_err();

    let errors = err.validation_errors().expect("field map expected");
    assert_eq!(errors["email"], "Email is already taken");
}

// ── App version ─────────────────────────────────────────────────────

#[tokio::test]
async fn version_fetch_failure_keeps_default() {
    let (server, stores, _) = setup().await;

    Mock::given(method("GET"))
        .and(path("/version"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    stores.app.fetch_version().await;
    assert_eq!(stores.app.state().version.version, 0);
}

// ── End-to-end flows (store-level) ──────────────────────────────────

#[tokio::test]
async fn create_budget_then_listing_includes_it() {
    let (server, stores, _) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/budgets"))
        .and(body_json(json!({ "name": "Groceries" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(budget_json(9, "Groceries")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/budgets"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([budget_json(9, "Groceries")])),
        )
        .mount(&server)
        .await;

    let created = stores
        .budgets
        .create(NewBudget {
            name: "Groceries".into(),
        })
        .await
        .unwrap();
    assert_eq!(created.name, "Groceries");

    // The view navigates to the listing on Ok, which refetches.
    stores.budgets.fetch_all().await;
    assert!(
        stores
            .budgets
            .state()
            .budgets
            .iter()
            .any(|b| b.name == "Groceries")
    );
}

#[tokio::test]
async fn add_expense_posts_the_exact_body() {
    let (server, stores, _) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/budgets/42/expenses"))
        .and(body_json(json!({
            "name": "",
            "amount": 50.0,
            "idCategory": 3,
            "idSubCategory": 7
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    stores
        .budgets
        .add_expense(
            42,
            NewTransaction {
                name: String::new(),
                amount: 50.0,
                id_category: Some(3),
                id_sub_category: Some(7),
            },
        )
        .await
        .unwrap();
}
