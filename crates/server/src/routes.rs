//! Routing table.
//!
//! `/static/` is served by `ServeDir`. Only regular files are served: any
//! directory path, with or without a trailing slash, is a 404. There are no
//! listings, no `index.html` fallback and no slash redirects.

use std::path::Path;
use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handler::{self, AppState};

pub fn router(state: AppState, static_dir: &Path, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(handler::home))
        .route("/snippet", get(handler::show_snippet))
        .route("/snippet/newsnippet", get(handler::new_snippet))
        .route("/snippet/create", post(handler::create_snippet))
        .nest_service("/static", ServeDir::new(static_dir).append_index_html_on_directories(false))
        .fallback(handler::not_found)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
