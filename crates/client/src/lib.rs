//! `taskdeck-client` -- HTTP client and query-keyed cache for the task
//! API.
//!
//! [`TaskApi`](api::TaskApi) is a thin [`reqwest`] wrapper over the five
//! REST endpoints; [`TaskStore`](store::TaskStore) layers the list cache
//! (stale-while-revalidate, invalidated on every mutation) and the
//! per-id detail cache on top of it.

pub mod api;
pub mod config;
pub mod store;

pub use api::{ApiError, TaskApi};
pub use config::ApiConfig;
pub use store::{StoreError, TaskStore};
