//! MongoDB tutorial store.
//!
//! Records live in the `tutorials` collection as
//! `{ _id, title, description, published, createdAt, updatedAt, __v }`.
//! `_id` and `__v` are store bookkeeping: they are translated at this
//! boundary and never reach the domain layer.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, Document, doc};
use mongodb::error::{Error as MongoError, ErrorKind};
use mongodb::options::{ClientOptions, ReturnDocument};
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};

use tutorial_core::domain::{NewTutorial, Tutorial, TutorialChanges, TutorialFilter, TutorialId};
use tutorial_core::error::RepoError;
use tutorial_core::ports::TutorialRepository;

use super::connections::DatabaseConfig;

/// Name of the collection holding tutorial documents.
pub const COLLECTION: &str = "tutorials";

/// A tutorial as stored in MongoDB.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TutorialDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(rename = "createdAt")]
    pub created_at: bson::DateTime,
    #[serde(rename = "updatedAt")]
    pub updated_at: bson::DateTime,
    /// Document revision counter, written as 0 on insert.
    #[serde(rename = "__v", default)]
    pub version: i32,
}

impl TutorialDocument {
    pub fn new(new: NewTutorial, now: bson::DateTime) -> Self {
        Self {
            id: ObjectId::new(),
            title: new.title,
            description: new.description,
            published: new.published,
            created_at: now,
            updated_at: now,
            version: 0,
        }
    }
}

fn to_chrono(value: bson::DateTime) -> Result<DateTime<Utc>, RepoError> {
    DateTime::from_timestamp_millis(value.timestamp_millis()).ok_or_else(|| {
        RepoError::Serialization(format!("timestamp out of range: {}", value.timestamp_millis()))
    })
}

impl TryFrom<TutorialDocument> for Tutorial {
    type Error = RepoError;

    fn try_from(doc: TutorialDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TutorialId::new(doc.id.to_hex()),
            title: doc.title,
            description: doc.description,
            published: doc.published,
            created_at: to_chrono(doc.created_at)?,
            updated_at: to_chrono(doc.updated_at)?,
        })
    }
}

/// Build the query document for a listing filter.
///
/// The title is escaped before being used as a pattern, so user input is
/// always matched literally.
pub fn filter_document(filter: &TutorialFilter) -> Document {
    let mut query = Document::new();
    if let Some(title) = &filter.title_contains {
        query.insert(
            "title",
            doc! { "$regex": regex::escape(title), "$options": "i" },
        );
    }
    if let Some(published) = filter.published {
        query.insert("published", published);
    }
    query
}

/// Build the `$set` update for a partial change, refreshing `updatedAt`.
pub fn update_document(changes: TutorialChanges, now: bson::DateTime) -> Document {
    let mut set = doc! { "updatedAt": now };
    if let Some(title) = changes.title {
        set.insert("title", title);
    }
    if let Some(description) = changes.description {
        set.insert(
            "description",
            description.map_or(bson::Bson::Null, bson::Bson::String),
        );
    }
    if let Some(published) = changes.published {
        set.insert("published", published);
    }
    doc! { "$set": set }
}

fn parse_id(id: &TutorialId) -> Result<ObjectId, RepoError> {
    ObjectId::parse_str(id.as_str()).map_err(|_| RepoError::InvalidId(id.to_string()))
}

fn store_err(e: MongoError) -> RepoError {
    match e.kind.as_ref() {
        ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) => {
            RepoError::Connection(e.to_string())
        }
        _ => RepoError::Query(e.to_string()),
    }
}

/// MongoDB tutorial repository.
#[derive(Clone)]
pub struct MongoTutorialRepository {
    collection: Collection<TutorialDocument>,
}

impl MongoTutorialRepository {
    pub fn new(collection: Collection<TutorialDocument>) -> Self {
        Self { collection }
    }

    /// Connect to the configured deployment and verify it answers a ping.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, RepoError> {
        tracing::info!("Connecting to MongoDB...");

        let mut options = ClientOptions::parse(config.url.as_str())
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;
        options.max_pool_size = Some(config.max_connections);
        options.min_pool_size = Some(config.min_connections);
        options.connect_timeout = Some(Duration::from_secs(10));
        options.max_idle_time = Some(Duration::from_secs(300));

        let client =
            Client::with_options(options).map_err(|e| RepoError::Connection(e.to_string()))?;
        let database = client.database(&config.database_name);

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;

        tracing::info!(
            "MongoDB connected (database: {}, pool: {})",
            config.database_name,
            config.max_connections
        );

        Ok(Self::new(database.collection(COLLECTION)))
    }
}

#[async_trait]
impl TutorialRepository for MongoTutorialRepository {
    async fn create(&self, new: NewTutorial) -> Result<Tutorial, RepoError> {
        let document = TutorialDocument::new(new, bson::DateTime::now());

        self.collection
            .insert_one(&document)
            .await
            .map_err(store_err)?;

        document.try_into()
    }

    async fn find_all(&self, filter: &TutorialFilter) -> Result<Vec<Tutorial>, RepoError> {
        let query = filter_document(filter);
        tracing::debug!(filter = %query, "Finding tutorials");

        let documents: Vec<TutorialDocument> = self
            .collection
            .find(query)
            .await
            .map_err(store_err)?
            .try_collect()
            .await
            .map_err(store_err)?;

        documents.into_iter().map(Tutorial::try_from).collect()
    }

    async fn find_by_id(&self, id: &TutorialId) -> Result<Option<Tutorial>, RepoError> {
        let oid = parse_id(id)?;

        self.collection
            .find_one(doc! { "_id": oid })
            .await
            .map_err(store_err)?
            .map(Tutorial::try_from)
            .transpose()
    }

    async fn update(
        &self,
        id: &TutorialId,
        changes: TutorialChanges,
    ) -> Result<Option<Tutorial>, RepoError> {
        let oid = parse_id(id)?;

        self.collection
            .find_one_and_update(
                doc! { "_id": oid },
                update_document(changes, bson::DateTime::now()),
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(store_err)?
            .map(Tutorial::try_from)
            .transpose()
    }

    async fn delete(&self, id: &TutorialId) -> Result<bool, RepoError> {
        let oid = parse_id(id)?;

        let removed = self
            .collection
            .find_one_and_delete(doc! { "_id": oid })
            .await
            .map_err(store_err)?;

        Ok(removed.is_some())
    }

    async fn delete_all(&self) -> Result<u64, RepoError> {
        let result = self
            .collection
            .delete_many(doc! {})
            .await
            .map_err(store_err)?;

        Ok(result.deleted_count)
    }

    fn backend(&self) -> &'static str {
        "mongodb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(title: &str) -> TutorialDocument {
        let new = NewTutorial::try_new(Some(title.to_string()), None, Some(true)).unwrap();
        TutorialDocument::new(new, bson::DateTime::from_millis(1_700_000_000_000))
    }

    #[test]
    fn test_stored_shape_uses_store_field_names() {
        let document = bson::to_document(&stored("Rust")).unwrap();

        assert!(document.get_object_id("_id").is_ok());
        assert_eq!(document.get_i32("__v").unwrap(), 0);
        assert!(document.get_datetime("createdAt").is_ok());
        assert!(document.get_datetime("updatedAt").is_ok());
        assert!(!document.contains_key("description"));
    }

    #[test]
    fn test_document_to_domain_renames_id() {
        let document = stored("Rust");
        let hex = document.id.to_hex();

        let tutorial = Tutorial::try_from(document).unwrap();
        assert_eq!(tutorial.id.as_str(), hex);
        assert_eq!(tutorial.title, "Rust");
        assert!(tutorial.published);
        assert_eq!(tutorial.created_at.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_document_without_optional_fields_decodes() {
        let raw = doc! {
            "_id": ObjectId::new(),
            "title": "Legacy",
            "createdAt": bson::DateTime::now(),
            "updatedAt": bson::DateTime::now(),
        };

        let document: TutorialDocument = bson::from_document(raw).unwrap();
        assert!(!document.published);
        assert_eq!(document.version, 0);
    }

    #[test]
    fn test_filter_document_escapes_title() {
        let query = filter_document(&TutorialFilter::title_contains("c++ (v1.0)"));
        let title = query.get_document("title").unwrap();

        assert_eq!(title.get_str("$regex").unwrap(), r"c\+\+ \(v1\.0\)");
        assert_eq!(title.get_str("$options").unwrap(), "i");
        assert!(!query.contains_key("published"));
    }

    #[test]
    fn test_filter_document_published_and_all() {
        assert_eq!(
            filter_document(&TutorialFilter::published()),
            doc! { "published": true }
        );
        assert!(filter_document(&TutorialFilter::all()).is_empty());
    }

    #[test]
    fn test_update_document_sets_only_supplied_fields() {
        let now = bson::DateTime::now();
        let changes = TutorialChanges {
            title: Some("new".to_string()),
            ..Default::default()
        };

        let update = update_document(changes, now);
        let set = update.get_document("$set").unwrap();

        assert_eq!(set.get_str("title").unwrap(), "new");
        assert_eq!(set.get_datetime("updatedAt").unwrap(), &now);
        assert!(!set.contains_key("description"));
        assert!(!set.contains_key("published"));
    }

    #[test]
    fn test_update_document_clears_description_with_null() {
        let changes = TutorialChanges {
            description: Some(None),
            ..Default::default()
        };

        let update = update_document(changes, bson::DateTime::now());
        let set = update.get_document("$set").unwrap();

        assert_eq!(set.get("description"), Some(&bson::Bson::Null));
        assert!(!set.contains_key("title"));
    }

    #[test]
    fn test_parse_id_rejects_malformed() {
        assert!(matches!(
            parse_id(&TutorialId::new("nope")),
            Err(RepoError::InvalidId(_))
        ));
        let oid = ObjectId::new();
        assert_eq!(parse_id(&TutorialId::new(oid.to_hex())).unwrap(), oid);
    }
}
