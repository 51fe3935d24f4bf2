// ── Composition root ──
//
// The one place where the API client, session backend, and the four
// entity stores are constructed and wired together. Callers build this
// once at startup and pass clones down to the view layer.

use std::sync::Arc;

use fundly_api::ApiClient;

use crate::session::SessionStore;
use crate::store::{AppStore, BudgetsStore, CategoriesStore, UserStore};

/// The wired store bundle. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct Stores {
    pub app: AppStore,
    pub user: UserStore,
    pub budgets: BudgetsStore,
    pub categories: CategoriesStore,
}

impl Stores {
    /// Wire one [`ApiClient`] and one session backend into the four
    /// entity stores.
    pub fn new(api: ApiClient, session: Arc<dyn SessionStore>) -> Self {
        Self {
            app: AppStore::new(api.clone()),
            user: UserStore::new(api.clone(), session),
            budgets: BudgetsStore::new(api.clone()),
            categories: CategoriesStore::new(api),
        }
    }
}
