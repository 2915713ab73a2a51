//! Router construction and shared request state.

use std::path::Path;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use tera::Context;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::ErrorMessages;
use crate::handlers::articles;
use crate::render::Renderer;
use crate::store::ArticleStore;

/// Shared state accessible from every handler.
#[derive(Clone)]
pub struct AppState {
    pub renderer: Arc<Renderer>,
    pub articles: Arc<dyn ArticleStore>,
}

/// Build the application router.
pub fn router(state: AppState, public_dir: &Path) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::permanent("/articles") }))
        .route("/articles", get(articles::list).post(articles::create))
        .route("/articles/new", get(articles::new_form))
        .route("/articles/{id}", post(articles::update))
        .route("/articles/{id}/edit", get(articles::edit_form))
        .route("/articles/{id}/delete", post(articles::remove))
        .nest_service("/public", ServeDir::new(public_dir))
        .layer(middleware::from_fn_with_state(state.clone(), error_page))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Replace error responses with the rendered shared `400` template.
///
/// Runs after the handler has fully returned, so the error decision is
/// made on a complete response instead of racing a partially written
/// one. Responses without recorded messages pass through untouched.
async fn error_page(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let Some(messages) = response.extensions().get::<ErrorMessages>().cloned() else {
        return response;
    };
    let status = response.status();

    let mut context = Context::new();
    context.insert("title", "Something went wrong");
    context.insert("errors", &messages.0);
    match state.renderer.render("400", &context) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(error) => {
            // Last resort: the error page itself failed to render.
            tracing::error!(%error, "failed to render error page");
            (status, messages.0.join("\n")).into_response()
        }
    }
}
