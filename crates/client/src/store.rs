//! Query-keyed task cache with stale-while-revalidate reads and
//! broad-sweep invalidation on mutation.
//!
//! [`TaskStore`] is the one component that owns cached task data.  List
//! pages are keyed by the exact serialized query string
//! (`QueryState::list_query_string`), so two states share an entry if
//! and only if they request the same page of results.  Every successful
//! mutation evicts all list entries rather than patching them in place;
//! the cache only ever holds server-confirmed state, so there is no
//! optimistic update and nothing to roll back.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use taskdeck_core::query_state::QueryState;
use taskdeck_core::response::PaginatedResponse;
use taskdeck_core::task::{CreateTaskInput, Task, TaskId, UpdateTaskInput};
use taskdeck_core::CoreError;

use crate::api::{ApiError, TaskApi};
use crate::config::ApiConfig;

/// Default freshness window for cached list pages.
pub const DEFAULT_LIST_TTL: Duration = Duration::from_secs(10);

/// Errors surfaced by store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Input rejected before any HTTP call was made.
    #[error(transparent)]
    Validation(#[from] CoreError),

    /// The underlying HTTP call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// One cached page of list results.
struct CachedPage {
    page: PaginatedResponse<Task>,
    fetched_at: Instant,
    /// Set while a background revalidation for this key is in flight,
    /// so concurrent stale reads spawn at most one refetch.
    refreshing: bool,
}

struct StoreInner {
    api: TaskApi,
    ttl: Duration,
    lists: RwLock<HashMap<String, CachedPage>>,
    details: RwLock<HashMap<TaskId, Task>>,
}

/// Cached task reads and invalidating mutations.
///
/// Cheaply cloneable; all clones share the same cache.  Clone it into
/// whatever drives the UI the same way request handlers clone shared
/// state.
#[derive(Clone)]
pub struct TaskStore {
    inner: Arc<StoreInner>,
}

impl TaskStore {
    /// Create a store over the given API client with the default
    /// 10-second list freshness window.
    pub fn new(api: TaskApi) -> Self {
        Self::with_ttl(api, DEFAULT_LIST_TTL)
    }

    /// Create a store with an explicit list freshness window.
    pub fn with_ttl(api: TaskApi, ttl: Duration) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                api,
                ttl,
                lists: RwLock::new(HashMap::new()),
                details: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Create a store from environment-derived configuration.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let api = TaskApi::from_config(config)?;
        Ok(Self::with_ttl(
            api,
            Duration::from_secs(config.list_cache_ttl_secs),
        ))
    }

    /// Fetch the page of tasks described by `state`.
    ///
    /// A fresh cache entry (age within the TTL) is returned without any
    /// HTTP call.  A stale entry is returned immediately while a single
    /// background refetch updates it (stale-while-revalidate).  A miss
    /// fetches synchronously and populates the cache.
    pub async fn list(&self, state: &QueryState) -> Result<PaginatedResponse<Task>, StoreError> {
        let key = state.list_query_string();

        // Write lock up front: a stale hit flips the refreshing flag,
        // and that check-and-set must be atomic across callers.
        {
            let mut lists = self.inner.lists.write().await;
            if let Some(entry) = lists.get_mut(&key) {
                if entry.fetched_at.elapsed() <= self.inner.ttl {
                    tracing::debug!(key = %key, "List cache hit");
                    return Ok(entry.page.clone());
                }

                let stale = entry.page.clone();
                if !entry.refreshing {
                    entry.refreshing = true;
                    let store = self.clone();
                    let refresh_key = key.clone();
                    tokio::spawn(async move {
                        store.revalidate(refresh_key).await;
                    });
                }
                tracing::debug!(key = %key, "Serving stale page while revalidating");
                return Ok(stale);
            }
        }

        tracing::debug!(key = %key, "List cache miss");
        let page = self.inner.api.list_tasks(&key).await?;

        let mut lists = self.inner.lists.write().await;
        lists.insert(
            key,
            CachedPage {
                page: page.clone(),
                fetched_at: Instant::now(),
                refreshing: false,
            },
        );
        Ok(page)
    }

    /// Fetch a single task by id, cached independently of list pages
    /// and not time-bounded.  Callers gate on non-empty ids.
    pub async fn get(&self, id: &str) -> Result<Task, StoreError> {
        if let Some(task) = self.inner.details.read().await.get(id) {
            tracing::debug!(id, "Detail cache hit");
            return Ok(task.clone());
        }

        let task = self.inner.api.get_task(id).await?;
        self.inner
            .details
            .write()
            .await
            .insert(task.id.clone(), task.clone());
        Ok(task)
    }

    /// Create a task.  Validation failures return before any HTTP call;
    /// on success every cached list page is evicted.
    pub async fn create(&self, input: &CreateTaskInput) -> Result<Task, StoreError> {
        input.validate()?;

        let task = self.inner.api.create_task(input).await?;
        tracing::info!(id = %task.id, "Task created");

        self.invalidate_lists().await;
        Ok(task)
    }

    /// Update a task.  On success every cached list page is evicted,
    /// along with the detail entry for this id.
    pub async fn update(&self, id: &str, input: &UpdateTaskInput) -> Result<Task, StoreError> {
        input.validate()?;

        let task = self.inner.api.update_task(id, input).await?;
        tracing::info!(id, "Task updated");

        self.invalidate_lists().await;
        self.inner.details.write().await.remove(id);
        Ok(task)
    }

    /// Delete a task.  On success every cached list page is evicted.
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.inner.api.delete_task(id).await?;
        tracing::info!(id, "Task deleted");

        self.invalidate_lists().await;
        Ok(())
    }

    // ---- private helpers ----

    /// Refetch one list key in the background.  On success the entry is
    /// replaced with a fresh timestamp; on failure the stale entry stays
    /// in place and only the refreshing flag is cleared.
    async fn revalidate(self, key: String) {
        match self.inner.api.list_tasks(&key).await {
            Ok(page) => {
                let mut lists = self.inner.lists.write().await;
                lists.insert(
                    key,
                    CachedPage {
                        page,
                        fetched_at: Instant::now(),
                        refreshing: false,
                    },
                );
            }
            Err(error) => {
                tracing::warn!(key = %key, error = %error, "Revalidation failed, keeping stale page");
                let mut lists = self.inner.lists.write().await;
                if let Some(entry) = lists.get_mut(&key) {
                    entry.refreshing = false;
                }
            }
        }
    }

    /// Evict every cached list page so the next read of any query key
    /// is forced to refetch.
    async fn invalidate_lists(&self) {
        let mut lists = self.inner.lists.write().await;
        let evicted = lists.len();
        lists.clear();
        tracing::debug!(evicted, "List cache invalidated");
    }
}
