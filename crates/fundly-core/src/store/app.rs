// ── Application info store ──

use fundly_api::ApiClient;
use fundly_api::types::AppVersion;
use tokio::sync::watch;
use tracing::warn;

use crate::store::cell::{StateCell, Subscription};

/// Application-level state: the deployed server version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub version: AppVersion,
}

/// Store for application metadata (shown in the client footer).
#[derive(Debug, Clone)]
pub struct AppStore {
    api: ApiClient,
    cell: StateCell<AppState>,
}

impl AppStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            cell: StateCell::new(AppState::default()),
        }
    }

    /// Snapshot of the latest applied state.
    pub fn state(&self) -> AppState {
        self.cell.get()
    }

    pub fn subscribe(&self, listener: impl Fn(&AppState) + Send + Sync + 'static) -> Subscription<AppState> {
        self.cell.subscribe(listener)
    }

    pub fn watch(&self) -> watch::Receiver<AppState> {
        self.cell.watch()
    }

    /// Fetch the server version. On failure the default version stays in
    /// place and the error is logged.
    pub async fn fetch_version(&self) {
        match self.api.app_version().await {
            Ok(version) => self.cell.patch(|state| state.version = version),
            Err(error) => warn!(%error, "failed to fetch app version"),
        }
    }
}
