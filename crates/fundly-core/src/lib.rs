//! Reactive state layer between `fundly-api` and UI consumers.
//!
//! This crate owns the entity stores for the Fundly client:
//!
//! - **[`StateCell<S>`]** — generic reactive state container: snapshot
//!   reads, synchronous listener subscription with read-your-latest-write
//!   semantics, and a `tokio::sync::watch` feed for async observers.
//!
//! - **Entity stores** ([`AppStore`], [`UserStore`], [`BudgetsStore`],
//!   [`CategoriesStore`]) — one per domain entity. Each holds the
//!   last-known client-side view, exposes `state()` for synchronous
//!   reads, and async commands that issue exactly one API request and
//!   apply deterministic state transitions when it settles. Commands
//!   return their outcome so the view layer decides navigation; stores
//!   never navigate and never render.
//!
//! - **[`Stores`]** — the composition root bundling one [`ApiClient`]
//!   and one session-marker backend into the four stores. Constructed
//!   explicitly and passed by clone; there are no ambient singletons.
//!
//! - **[`SessionStore`]** — persistence seam for the single
//!   `login-state=authenticated` marker (file-backed in production,
//!   [`MemorySession`] in tests).

pub mod error;
pub mod loadable;
pub mod session;
pub mod store;
pub mod stores;

/// The wire types double as the domain model; the client performs no
/// transformation beyond typing.
pub mod model {
    pub use fundly_api::types::*;
}

pub use error::Error;
pub use fundly_api::{ApiClient, TransactionKind};
pub use loadable::Loadable;
pub use session::{MemorySession, SessionStore};
pub use store::app::{AppState, AppStore};
pub use store::budgets::{BudgetsState, BudgetsStore};
pub use store::categories::{CategoriesStore, CategoryState, FormState, FormStatus};
pub use store::cell::{StateCell, Subscription};
pub use store::user::{UserState, UserStore};
pub use stores::Stores;
