//! MongoDB-backed article store.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};

use crate::models::{now_millis, Article, ArticleDraft};

use super::{ArticleStore, StoreError};

const COLLECTION: &str = "articles";

/// Articles stored in a MongoDB collection.
///
/// The driver maintains its own connection pool; cloning the collection
/// handle per operation is cheap and each call checks a connection out
/// for exactly its own duration.
#[derive(Debug, Clone)]
pub struct MongoArticleStore {
    collection: Collection<ArticleDocument>,
}

impl MongoArticleStore {
    /// Connect to `uri` and use the `articles` collection of `database`.
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;
        Ok(Self {
            collection: client.database(database).collection(COLLECTION),
        })
    }
}

/// Wire shape of an article document. The driver assigns `_id` on
/// insert, which is why it is optional here but never on [`Article`].
#[derive(Debug, Serialize, Deserialize)]
struct ArticleDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    title: String,
    body: String,
    created_on: i64,
    updated_on: i64,
}

impl From<ArticleDocument> for Article {
    fn from(doc: ArticleDocument) -> Self {
        Self {
            id: doc.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            title: doc.title,
            body: doc.body,
            created_on: doc.created_on,
            updated_on: doc.updated_on,
        }
    }
}

fn object_id(id: &str) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}

#[async_trait]
impl ArticleStore for MongoArticleStore {
    async fn list(&self) -> Result<Vec<Article>, StoreError> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "updated_on": -1 })
            .await?;
        let documents: Vec<ArticleDocument> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn find(&self, id: &str) -> Result<Article, StoreError> {
        let oid = object_id(id)?;
        self.collection
            .find_one(doc! { "_id": oid })
            .await?
            .map(Into::into)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn insert(&self, draft: &ArticleDraft) -> Result<String, StoreError> {
        let now = now_millis();
        let document = ArticleDocument {
            id: None,
            title: draft.title.clone(),
            body: draft.body.clone(),
            created_on: now,
            updated_on: now,
        };
        let result = self.collection.insert_one(&document).await?;
        Ok(result
            .inserted_id
            .as_object_id()
            .map(|oid| oid.to_hex())
            .unwrap_or_default())
    }

    async fn update(&self, id: &str, draft: &ArticleDraft) -> Result<(), StoreError> {
        let oid = object_id(id)?;
        let result = self
            .collection
            .update_one(
                doc! { "_id": oid },
                doc! { "$set": {
                    "title": draft.title.as_str(),
                    "body": draft.body.as_str(),
                    "updated_on": now_millis(),
                }},
            )
            .await?;
        if result.matched_count == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let oid = object_id(id)?;
        let result = self.collection.delete_one(doc! { "_id": oid }).await?;
        if result.deleted_count == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
