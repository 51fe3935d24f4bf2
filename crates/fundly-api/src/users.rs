// User endpoints

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::User;

impl ApiClient {
    /// Fetch the account behind the current session.
    ///
    /// `GET /api/users/current-user`; 401 when the session is missing or
    /// expired.
    pub async fn current_user(&self) -> Result<User, Error> {
        self.get("api/users/current-user").await
    }
}
