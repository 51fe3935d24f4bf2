// Category endpoints

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{Category, NewCategory};

impl ApiClient {
    /// List all categories with their embedded sub-categories.
    ///
    /// `GET /api/categories`
    pub async fn list_categories(&self) -> Result<Vec<Category>, Error> {
        self.get("api/categories").await
    }

    /// Create a category (with any number of sub-categories).
    ///
    /// `POST /api/categories`
    pub async fn create_category(&self, category: &NewCategory) -> Result<Category, Error> {
        debug!(name = %category.name, "creating category");
        self.post("api/categories", category).await
    }

    /// Delete a category by id.
    ///
    /// `DELETE /api/categories/{id}`
    pub async fn delete_category(&self, id: i64) -> Result<(), Error> {
        debug!(id, "deleting category");
        self.delete(&format!("api/categories/{id}")).await
    }
}
