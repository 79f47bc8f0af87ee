//! In-memory fake of the task API for integration tests.
//!
//! Serves the same contract the real backend exposes (`GET/POST /tasks`,
//! `GET/PATCH/DELETE /tasks/{id}` with search/status/sort/order/limit/page
//! list parameters) from a `Vec<Task>` behind a lock, on an ephemeral
//! `127.0.0.1` port.  A hit counter on the list route lets tests assert
//! exactly how many fetches the cache performed.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{Duration, Utc};

use taskdeck_core::response::PaginatedResponse;
use taskdeck_core::task::{CreateTaskInput, Task, TaskStatus, UpdateTaskInput};

#[derive(Clone)]
struct FakeState {
    tasks: Arc<RwLock<Vec<Task>>>,
    list_hits: Arc<AtomicUsize>,
    detail_hits: Arc<AtomicUsize>,
}

/// Handle to a running fake API server.
pub struct FakeApi {
    pub base_url: String,
    tasks: Arc<RwLock<Vec<Task>>>,
    list_hits: Arc<AtomicUsize>,
    detail_hits: Arc<AtomicUsize>,
}

impl FakeApi {
    /// Bind an ephemeral port and serve the fake API on it.
    pub async fn spawn() -> Self {
        let state = FakeState {
            tasks: Arc::new(RwLock::new(Vec::new())),
            list_hits: Arc::new(AtomicUsize::new(0)),
            detail_hits: Arc::new(AtomicUsize::new(0)),
        };

        let app = Router::new()
            .route("/tasks", get(list_tasks).post(create_task))
            .route(
                "/tasks/{id}",
                get(get_task).patch(update_task).delete(delete_task),
            )
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve fake api");
        });

        Self {
            base_url: format!("http://{addr}"),
            tasks: state.tasks,
            list_hits: state.list_hits,
            detail_hits: state.detail_hits,
        }
    }

    /// Insert tasks directly into the backing store, bypassing HTTP.
    ///
    /// Creation timestamps are staggered in insertion order so sorting
    /// by `createdAt` is deterministic.
    pub fn seed(&self, entries: &[(&str, TaskStatus)]) -> Vec<Task> {
        let base = Utc::now();
        let mut tasks = self.tasks.write().unwrap();
        let mut seeded = Vec::new();
        for (i, (title, status)) in entries.iter().enumerate() {
            let at = base + Duration::milliseconds(i as i64);
            let task = Task {
                id: uuid::Uuid::now_v7().to_string(),
                title: (*title).to_string(),
                description: None,
                status: *status,
                created_at: at,
                updated_at: at,
            };
            tasks.push(task.clone());
            seeded.push(task);
        }
        seeded
    }

    /// Number of `GET /tasks` requests served so far.
    pub fn list_hits(&self) -> usize {
        self.list_hits.load(Ordering::SeqCst)
    }

    /// Number of `GET /tasks/{id}` requests served so far.
    pub fn detail_hits(&self) -> usize {
        self.detail_hits.load(Ordering::SeqCst)
    }

    /// Current titles in the backing store, in insertion order.
    pub fn titles(&self) -> Vec<String> {
        self.tasks
            .read()
            .unwrap()
            .iter()
            .map(|t| t.title.clone())
            .collect()
    }
}

fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "message": "Task not found" })),
    )
}

async fn list_tasks(
    State(state): State<FakeState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<PaginatedResponse<Task>> {
    state.list_hits.fetch_add(1, Ordering::SeqCst);

    let mut matches: Vec<Task> = {
        let tasks = state.tasks.read().unwrap();
        tasks
            .iter()
            .filter(|task| {
                if let Some(search) = params.get("search") {
                    if !task.title.to_lowercase().contains(&search.to_lowercase()) {
                        return false;
                    }
                }
                if let Some(status) = params.get("status") {
                    if task.status.as_str() != status {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect()
    };

    match params.get("sort").map(String::as_str) {
        Some("title") => matches.sort_by(|a, b| a.title.cmp(&b.title)),
        _ => matches.sort_by_key(|t| t.created_at),
    }
    if params.get("order").map(String::as_str) == Some("desc") {
        matches.reverse();
    }

    let limit: u32 = params
        .get("limit")
        .and_then(|v| v.parse().ok())
        .unwrap_or(10)
        .max(1);
    let page: u32 = params
        .get("page")
        .and_then(|v| v.parse().ok())
        .unwrap_or(1)
        .max(1);

    let total = matches.len() as u64;
    let total_pages = total.div_ceil(limit as u64) as u32;
    let offset = ((page - 1) * limit) as usize;
    let data: Vec<Task> = matches
        .into_iter()
        .skip(offset)
        .take(limit as usize)
        .collect();

    Json(PaginatedResponse {
        data,
        total,
        page,
        limit,
        total_pages,
    })
}

async fn get_task(
    State(state): State<FakeState>,
    Path(id): Path<String>,
) -> Result<Json<Task>, (StatusCode, Json<serde_json::Value>)> {
    state.detail_hits.fetch_add(1, Ordering::SeqCst);
    let tasks = state.tasks.read().unwrap();
    tasks
        .iter()
        .find(|t| t.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(not_found)
}

async fn create_task(
    State(state): State<FakeState>,
    Json(input): Json<CreateTaskInput>,
) -> (StatusCode, Json<Task>) {
    let now = Utc::now();
    let task = Task {
        id: uuid::Uuid::now_v7().to_string(),
        title: input.title,
        description: input.description,
        status: TaskStatus::ToDo,
        created_at: now,
        updated_at: now,
    };
    state.tasks.write().unwrap().push(task.clone());
    (StatusCode::CREATED, Json(task))
}

async fn update_task(
    State(state): State<FakeState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateTaskInput>,
) -> Result<Json<Task>, (StatusCode, Json<serde_json::Value>)> {
    let mut tasks = state.tasks.write().unwrap();
    let task = tasks.iter_mut().find(|t| t.id == id).ok_or_else(not_found)?;

    if let Some(title) = input.title {
        task.title = title;
    }
    if let Some(description) = input.description {
        task.description = Some(description);
    }
    if let Some(status) = input.status {
        task.status = status;
    }
    task.updated_at = Utc::now();

    Ok(Json(task.clone()))
}

async fn delete_task(
    State(state): State<FakeState>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<serde_json::Value>)> {
    let mut tasks = state.tasks.write().unwrap();
    let before = tasks.len();
    tasks.retain(|t| t.id != id);
    if tasks.len() == before {
        return Err(not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}
