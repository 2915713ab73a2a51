//! In-memory article store for tests and offline development.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{now_millis, Article, ArticleDraft};

use super::{ArticleStore, StoreError};

/// Articles held in process memory, in insertion order.
#[derive(Debug, Default)]
pub struct MemoryArticleStore {
    articles: RwLock<Vec<Article>>,
}

impl MemoryArticleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArticleStore for MemoryArticleStore {
    async fn list(&self) -> Result<Vec<Article>, StoreError> {
        let articles = self.articles.read().await;
        // Iterate newest-insertion-first so the stable sort keeps the
        // most recent write ahead when update timestamps tie.
        let mut listed: Vec<Article> = articles.iter().rev().cloned().collect();
        listed.sort_by_key(|article| std::cmp::Reverse(article.updated_on));
        Ok(listed)
    }

    async fn find(&self, id: &str) -> Result<Article, StoreError> {
        self.articles
            .read()
            .await
            .iter()
            .find(|article| article.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn insert(&self, draft: &ArticleDraft) -> Result<String, StoreError> {
        let now = now_millis();
        let id = Uuid::new_v4().simple().to_string();
        self.articles.write().await.push(Article {
            id: id.clone(),
            title: draft.title.clone(),
            body: draft.body.clone(),
            created_on: now,
            updated_on: now,
        });
        Ok(id)
    }

    async fn update(&self, id: &str, draft: &ArticleDraft) -> Result<(), StoreError> {
        let mut articles = self.articles.write().await;
        let article = articles
            .iter_mut()
            .find(|article| article.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        article.title = draft.title.clone();
        article.body = draft.body.clone();
        article.updated_on = now_millis();
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut articles = self.articles.write().await;
        let before = articles.len();
        articles.retain(|article| article.id != id);
        if articles.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
