// ── Categories store ──

use fundly_api::ApiClient;
use fundly_api::types::{Category, NewCategory};
use tokio::sync::watch;
use tracing::warn;

use crate::error::Error;
use crate::store::cell::{StateCell, Subscription};

/// Status of the category-creation form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Loading,
    Error,
}

/// Creation-form sub-state tracked inside the store: the submit is in
/// flight, idle, or failed with a server message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub status: FormStatus,
    pub message: String,
}

/// Categories state: the collection plus the creation-form sub-state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryState {
    pub categories: Vec<Category>,
    pub form: FormState,
}

/// Store for expense categories and their sub-categories.
#[derive(Debug, Clone)]
pub struct CategoriesStore {
    api: ApiClient,
    cell: StateCell<CategoryState>,
}

impl CategoriesStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            cell: StateCell::new(CategoryState::default()),
        }
    }

    /// Snapshot of the latest applied state.
    pub fn state(&self) -> CategoryState {
        self.cell.get()
    }

    pub fn subscribe(
        &self,
        listener: impl Fn(&CategoryState) + Send + Sync + 'static,
    ) -> Subscription<CategoryState> {
        self.cell.subscribe(listener)
    }

    pub fn watch(&self) -> watch::Receiver<CategoryState> {
        self.cell.watch()
    }

    /// Fetch the category collection. Success replaces the collection
    /// and resets the creation form to idle; failure leaves the prior
    /// collection untouched and logs.
    pub async fn fetch_all(&self) {
        match self.api.list_categories().await {
            Ok(categories) => self.cell.patch(|state| {
                state.categories = categories;
                state.form = FormState::default();
            }),
            Err(error) => warn!(%error, "failed to fetch categories"),
        }
    }

    /// Create a category.
    ///
    /// The form sub-state goes to `Loading` before the request is
    /// dispatched. On failure it becomes `Error` with the server's
    /// message when one is present, else the error's display form. On
    /// success the form stays `Loading` until the view navigates back
    /// to the listing, whose refetch resets it to idle.
    pub async fn create(&self, category: NewCategory) -> Result<Category, Error> {
        self.cell.patch(|state| {
            state.form = FormState {
                status: FormStatus::Loading,
                message: String::new(),
            };
        });

        match self.api.create_category(&category).await {
            Ok(created) => Ok(created),
            Err(error) => {
                warn!(%error, "failed to create category");
                let message = error
                    .server_message()
                    .map_or_else(|| error.to_string(), str::to_owned);
                self.cell.patch(|state| {
                    state.form = FormState {
                        status: FormStatus::Error,
                        message,
                    };
                });
                Err(error.into())
            }
        }
    }

    /// Delete a category by id. On success the matching entry (and only
    /// that entry) is removed from the collection; on failure the
    /// collection is unchanged and the view surfaces a blocking alert.
    pub async fn delete(&self, id: i64) -> Result<(), Error> {
        match self.api.delete_category(id).await {
            Ok(()) => {
                self.cell
                    .patch(|state| state.categories.retain(|category| category.id != id));
                Ok(())
            }
            Err(error) => {
                warn!(%error, id, "failed to delete category");
                Err(error.into())
            }
        }
    }
}
