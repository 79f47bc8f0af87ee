//! `list-tasks` -- demo binary driving the full query-state data flow.
//!
//! Derives a [`QueryState`] from a raw query string, fetches the
//! matching page through the caching store, and prints the tasks plus
//! the page-marker strip a paginator would render.
//!
//! # Environment variables
//!
//! | Variable               | Required | Default                 | Description                          |
//! |------------------------|----------|-------------------------|--------------------------------------|
//! | `API_BASE_URL`         | no       | `http://localhost:3000` | Task API base URL                    |
//! | `TASKS_QUERY`          | no       | (empty)                 | Raw query string, e.g. `page=2&status=DONE` |
//! | `REQUEST_TIMEOUT_SECS` | no       | `30`                    | HTTP request timeout                 |
//! | `LIST_CACHE_TTL_SECS`  | no       | `10`                    | List cache freshness window          |

use taskdeck_client::{ApiConfig, TaskStore};
use taskdeck_core::location::UrlState;
use taskdeck_core::pagination::page_markers;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "list_tasks=info,taskdeck_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env();
    let query = std::env::var("TASKS_QUERY").unwrap_or_default();

    let url = UrlState::from_href(&format!("/tasks?{query}"));
    let state = url.state().clone();

    tracing::info!(
        base_url = %config.base_url,
        href = %url.href(),
        page = state.page,
        limit = state.limit,
        "Fetching tasks",
    );

    let store = match TaskStore::from_config(&config) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build API client");
            std::process::exit(1);
        }
    };

    let page = match store.list(&state).await {
        Ok(page) => page,
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch tasks");
            std::process::exit(1);
        }
    };

    println!(
        "Showing {} of {} tasks (page {} of {})",
        page.data.len(),
        page.total,
        page.page,
        page.total_pages,
    );
    for task in &page.data {
        println!("  [{}] {} ({})", task.status.label(), task.title, task.id);
    }

    let strip: Vec<String> = page_markers(page.page, page.total_pages)
        .iter()
        .map(ToString::to_string)
        .collect();
    println!("Pages: {}", strip.join(" "));
}
