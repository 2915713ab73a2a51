//! HTTP surface tests driven through the router in-process, backed by
//! the in-memory article store.

use std::fs;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use scrawl::config::{RunMode, TemplateConfig};
use scrawl::models::ArticleDraft;
use scrawl::render::{load, Renderer};
use scrawl::store::{ArticleStore, MemoryArticleStore};
use scrawl::web::{router, AppState};

fn template_tree() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("layout.html"),
        "<title>{{ title }}</title><main>{% block content %}{% endblock content %}</main>",
    )
    .unwrap();
    fs::write(
        dir.path().join("400.html"),
        "{% extends \"layout\" %}{% block content %}{% for error in errors %}<li class=\"error\">{{ error }}</li>{% endfor %}{% endblock content %}",
    )
    .unwrap();
    fs::create_dir(dir.path().join("articles")).unwrap();
    fs::write(
        dir.path().join("articles").join("list.html"),
        "{% extends \"layout\" %}{% block content %}{% for article in articles %}<article>{{ article.title }}</article>{% endfor %}{% endblock content %}",
    )
    .unwrap();
    fs::write(
        dir.path().join("articles").join("form.html"),
        "{% extends \"layout\" %}{% block content %}<form action=\"{{ action | safe }}\"><input value=\"{{ article.title }}\"></form>{% endblock content %}",
    )
    .unwrap();
    dir
}

fn app() -> (Router, Arc<MemoryArticleStore>, tempfile::TempDir) {
    let dir = template_tree();
    let config = TemplateConfig {
        root: dir.path().to_path_buf(),
        ..TemplateConfig::default()
    };
    let store = load(&config).unwrap();
    let articles = Arc::new(MemoryArticleStore::new());
    let state = AppState {
        renderer: Arc::new(Renderer::new(store, RunMode::Release)),
        articles: articles.clone(),
    };
    let public = dir.path().to_path_buf();
    (router(state, &public), articles, dir)
}

fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn root_redirects_to_articles() {
    let (app, _, _dir) = app();
    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(response.headers()[header::LOCATION], "/articles");
}

#[tokio::test]
async fn create_then_list_shows_newest_first() {
    let (app, _, _dir) = app();

    let response = app
        .clone()
        .oneshot(form_post("/articles", "title=First&body=older"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/articles");

    app.clone()
        .oneshot(form_post("/articles", "title=Second&body=newer"))
        .await
        .unwrap();

    let response = app.oneshot(get("/articles")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    let first = html.find("Second").unwrap();
    let second = html.find("First").unwrap();
    assert!(first < second, "newest article should be listed first");
}

#[tokio::test]
async fn create_with_empty_title_never_reaches_the_store() {
    let (app, articles, _dir) = app();

    let response = app
        .oneshot(form_post("/articles", "title=&body=B"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_text(response).await;
    assert!(html.contains("title is required"));
    assert!(articles.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_with_missing_body_field_is_rejected() {
    let (app, articles, _dir) = app();

    let response = app.oneshot(form_post("/articles", "title=A")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_text(response).await;
    assert!(html.contains("body is required"));
    assert!(articles.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn edit_form_shows_the_stored_article() {
    let (app, articles, _dir) = app();
    let id = articles
        .insert(&ArticleDraft {
            title: "Editable".to_string(),
            body: "text".to_string(),
        })
        .await
        .unwrap();

    let response = app
        .oneshot(get(&format!("/articles/{id}/edit")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Editable"));
    // The form action is a server-built path, marked safe in the
    // template; it must come through with its slashes intact.
    assert!(html.contains(&format!("action=\"/articles/{id}\"")));
    assert!(!html.contains("&#x2F;"));
}

#[tokio::test]
async fn update_rewrites_title_and_redirects() {
    let (app, articles, _dir) = app();
    let id = articles
        .insert(&ArticleDraft {
            title: "Before".to_string(),
            body: "text".to_string(),
        })
        .await
        .unwrap();

    let response = app
        .oneshot(form_post(
            &format!("/articles/{id}"),
            "title=After&body=text",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(articles.find(&id).await.unwrap().title, "After");
}

#[tokio::test]
async fn delete_removes_the_article() {
    let (app, articles, _dir) = app();
    let id = articles
        .insert(&ArticleDraft {
            title: "Doomed".to_string(),
            body: "text".to_string(),
        })
        .await
        .unwrap();

    let response = app
        .oneshot(form_post(&format!("/articles/{id}/delete"), ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(articles.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_unknown_id_is_a_request_error_not_a_crash() {
    let (app, _, _dir) = app();

    let response = app
        .clone()
        .oneshot(form_post("/articles/does-not-exist/delete", ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let html = body_text(response).await;
    assert!(html.contains("class=\"error\""));

    // The app keeps serving afterwards.
    let response = app.oneshot(get("/articles")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn user_content_is_still_html_escaped() {
    let (app, _, _dir) = app();

    app.clone()
        .oneshot(form_post(
            "/articles",
            "title=%3Cscript%3Ealert(1)%3C%2Fscript%3E&body=B",
        ))
        .await
        .unwrap();

    let response = app.oneshot(get("/articles")).await.unwrap();
    let html = body_text(response).await;
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[tokio::test]
async fn error_page_lists_every_validation_failure() {
    let (app, _, _dir) = app();

    let response = app
        .oneshot(form_post("/articles", "title=&body="))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_text(response).await;
    assert!(html.contains("title is required"));
    assert!(html.contains("body is required"));
}
