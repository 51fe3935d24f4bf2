// fundly-api: Async Rust client for the Fundly personal-finance REST API

pub mod auth;
pub mod budgets;
pub mod categories;
pub mod client;
pub mod error;
pub mod transport;
pub mod types;
pub mod users;
pub mod version;

pub use budgets::TransactionKind;
pub use client::ApiClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
