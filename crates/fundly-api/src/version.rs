// Application version endpoint

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::AppVersion;

impl ApiClient {
    /// Fetch the deployed server version. Unauthenticated.
    ///
    /// `GET /version`
    pub async fn app_version(&self) -> Result<AppVersion, Error> {
        self.get("version").await
    }
}
