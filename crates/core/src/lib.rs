//! `taskdeck-core` -- pure domain logic for the taskdeck client.
//!
//! Everything in this crate is synchronous and I/O-free: query-string
//! parsing and serialization, the location adapter, the page-marker
//! strategy, the task model with input validation, and the paginated
//! response envelope.  The HTTP client and cache live in
//! `taskdeck-client`.

pub mod error;
pub mod location;
pub mod pagination;
pub mod query_state;
pub mod response;
pub mod task;

pub use error::CoreError;
