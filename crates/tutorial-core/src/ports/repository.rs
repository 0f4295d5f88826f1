use async_trait::async_trait;

use crate::domain::{NewTutorial, Tutorial, TutorialChanges, TutorialFilter, TutorialId};
use crate::error::RepoError;

/// Tutorial store. Every method maps to exactly one store call.
///
/// "Matched nothing" is a successful outcome (`None` / `false`); `Err` is
/// reserved for genuine store failures, including ids the store cannot parse.
#[async_trait]
pub trait TutorialRepository: Send + Sync {
    /// Insert a new record; the store assigns the id and timestamps.
    async fn create(&self, new: NewTutorial) -> Result<Tutorial, RepoError>;

    /// List the records matching `filter`.
    async fn find_all(&self, filter: &TutorialFilter) -> Result<Vec<Tutorial>, RepoError>;

    /// Find a record by its id.
    async fn find_by_id(&self, id: &TutorialId) -> Result<Option<Tutorial>, RepoError>;

    /// Merge `changes` into the matching record, returning the updated record.
    async fn update(
        &self,
        id: &TutorialId,
        changes: TutorialChanges,
    ) -> Result<Option<Tutorial>, RepoError>;

    /// Remove the matching record. Returns whether a record was removed.
    async fn delete(&self, id: &TutorialId) -> Result<bool, RepoError>;

    /// Remove every record, returning how many were removed.
    async fn delete_all(&self) -> Result<u64, RepoError>;

    /// Short name of the backing store, for diagnostics.
    fn backend(&self) -> &'static str;
}
