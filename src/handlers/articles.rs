//! Article CRUD handlers.
//!
//! Each handler performs one store operation and either renders a page
//! or redirects back to the listing. Validation is limited to the
//! required-field check on the bound form; everything else surfaces as
//! an [`AppError`] and becomes the shared error page.

use axum::extract::{Form, Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use tera::Context;

use crate::error::AppError;
use crate::models::ArticleDraft;
use crate::web::AppState;

/// `GET /articles`
pub async fn list(State(state): State<AppState>) -> Result<Response, AppError> {
    let articles = state.articles.list().await?;

    let mut context = Context::new();
    context.insert("title", "Articles");
    context.insert("articles", &articles);
    let html = state.renderer.render("articles/list", &context)?;
    Ok(Html(html).into_response())
}

/// `GET /articles/new`
pub async fn new_form(State(state): State<AppState>) -> Result<Response, AppError> {
    let mut context = Context::new();
    context.insert("title", "New article");
    context.insert("article", &ArticleDraft::default());
    context.insert("action", "/articles");
    let html = state.renderer.render("articles/form", &context)?;
    Ok(Html(html).into_response())
}

/// `POST /articles`
pub async fn create(
    State(state): State<AppState>,
    Form(draft): Form<ArticleDraft>,
) -> Result<Response, AppError> {
    draft.validate().map_err(AppError::Validation)?;
    state.articles.insert(&draft).await?;
    Ok(Redirect::to("/articles").into_response())
}

/// `GET /articles/{id}/edit`
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let article = state.articles.find(&id).await?;

    let mut context = Context::new();
    context.insert("title", "Edit article");
    context.insert("article", &article);
    context.insert("action", &format!("/articles/{id}"));
    let html = state.renderer.render("articles/form", &context)?;
    Ok(Html(html).into_response())
}

/// `POST /articles/{id}`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(draft): Form<ArticleDraft>,
) -> Result<Response, AppError> {
    draft.validate().map_err(AppError::Validation)?;
    state.articles.update(&id, &draft).await?;
    Ok(Redirect::to("/articles").into_response())
}

/// `POST /articles/{id}/delete`
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    state.articles.delete(&id).await?;
    Ok(Redirect::to("/articles").into_response())
}
