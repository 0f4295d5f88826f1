//! In-memory tutorial store - used as fallback when no database is configured.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use tutorial_core::domain::{NewTutorial, Tutorial, TutorialChanges, TutorialFilter, TutorialId};
use tutorial_core::error::RepoError;
use tutorial_core::ports::TutorialRepository;

/// In-memory store keeping records in insertion order behind an async RwLock.
///
/// Ids are UUID v4 strings; a malformed id is reported as a store failure
/// the same way the database backends do.
/// Note: Data is lost on process restart.
pub struct InMemoryTutorialRepository {
    records: RwLock<Vec<Tutorial>>,
}

impl InMemoryTutorialRepository {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    fn check_id(id: &TutorialId) -> Result<(), RepoError> {
        Uuid::parse_str(id.as_str())
            .map(|_| ())
            .map_err(|_| RepoError::InvalidId(id.to_string()))
    }
}

impl Default for InMemoryTutorialRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TutorialRepository for InMemoryTutorialRepository {
    async fn create(&self, new: NewTutorial) -> Result<Tutorial, RepoError> {
        let tutorial = Tutorial::create(TutorialId::from(Uuid::new_v4()), new, Utc::now());

        let mut records = self.records.write().await;
        records.push(tutorial.clone());

        Ok(tutorial)
    }

    async fn find_all(&self, filter: &TutorialFilter) -> Result<Vec<Tutorial>, RepoError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &TutorialId) -> Result<Option<Tutorial>, RepoError> {
        Self::check_id(id)?;
        let records = self.records.read().await;
        Ok(records.iter().find(|t| &t.id == id).cloned())
    }

    async fn update(
        &self,
        id: &TutorialId,
        changes: TutorialChanges,
    ) -> Result<Option<Tutorial>, RepoError> {
        Self::check_id(id)?;
        let mut records = self.records.write().await;

        Ok(records.iter_mut().find(|t| &t.id == id).map(|t| {
            t.apply(changes, Utc::now());
            t.clone()
        }))
    }

    async fn delete(&self, id: &TutorialId) -> Result<bool, RepoError> {
        Self::check_id(id)?;
        let mut records = self.records.write().await;

        match records.iter().position(|t| &t.id == id) {
            Some(index) => {
                records.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_all(&self) -> Result<u64, RepoError> {
        let mut records = self.records.write().await;
        let count = records.len() as u64;
        records.clear();
        Ok(count)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
