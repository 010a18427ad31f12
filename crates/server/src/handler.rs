//! Request handlers.
//!
//! Each handler fetches what it needs from the snippet store and renders one
//! page from the template cache.

use std::sync::Arc;

use axum::extract::{Form, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::{Deserialize, Serialize};
use snipbox_core::{Snippet, SnippetDb, TemplateCache};

use crate::error::WebError;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub snippets: SnippetDb,
    pub templates: Arc<TemplateCache>,
    pub recent_limit: usize,
}

/// Data available to every page template.
#[derive(Debug, Default, Serialize)]
pub struct TemplateData {
    pub snippet: Option<Snippet>,
    pub snippets: Vec<Snippet>,
}

/// Query string of `GET /snippet`.
#[derive(Debug, Deserialize)]
pub struct ShowParams {
    pub id: Option<String>,
}

/// Fields of the new-snippet form.
#[derive(Debug, Deserialize)]
pub struct CreateSnippetForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub snippet: String,
    /// Days until the snippet expires.
    #[serde(default)]
    pub time: String,
}

fn render(state: &AppState, page: &str, data: &TemplateData) -> Result<Html<Vec<u8>>, WebError> {
    let mut body = Vec::new();
    state.templates.render(page, data, &mut body)?;
    Ok(Html(body))
}

/// `GET /`: the most recent active snippets.
pub async fn home(State(state): State<AppState>) -> Result<Html<Vec<u8>>, WebError> {
    let snippets = state.snippets.list_recent(state.recent_limit).await?;
    render(&state, "home.page.html", &TemplateData { snippets, ..Default::default() })
}

/// `GET /snippet?id=N`: a single active snippet.
pub async fn show_snippet(
    State(state): State<AppState>, Query(params): Query<ShowParams>,
) -> Result<Html<Vec<u8>>, WebError> {
    let id = params
        .id
        .as_deref()
        .and_then(|raw| raw.parse::<i64>().ok())
        .filter(|id| *id >= 1)
        .ok_or(WebError::NotFound)?;

    let snippet = state.snippets.get(id).await?;
    render(&state, "show.page.html", &TemplateData { snippet: Some(snippet), ..Default::default() })
}

/// `GET /snippet/newsnippet`: the submission form.
pub async fn new_snippet(State(state): State<AppState>) -> Result<Html<Vec<u8>>, WebError> {
    render(&state, "create.page.html", &TemplateData::default())
}

/// `POST /snippet/create`: store a snippet and redirect to it.
pub async fn create_snippet(
    State(state): State<AppState>, Form(form): Form<CreateSnippetForm>,
) -> Result<Redirect, WebError> {
    let id = state.snippets.insert(&form.title, &form.snippet, &form.time).await?;
    tracing::info!(id, "snippet created");
    Ok(Redirect::to(&format!("/snippet?id={id}")))
}

/// Fallback for every unrouted path.
pub async fn not_found() -> Response {
    WebError::NotFound.into_response()
}
