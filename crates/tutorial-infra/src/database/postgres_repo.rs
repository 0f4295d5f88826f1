//! PostgreSQL tutorial store.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, ColumnTrait, DbConn, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use tutorial_core::domain::{NewTutorial, Tutorial, TutorialChanges, TutorialFilter, TutorialId};
use tutorial_core::error::RepoError;
use tutorial_core::ports::TutorialRepository;

use super::entity::tutorial::{self, Entity as TutorialEntity};

/// PostgreSQL tutorial repository.
pub struct PostgresTutorialRepository {
    pub(crate) db: DbConn,
}

impl PostgresTutorialRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

fn parse_id(id: &TutorialId) -> Result<Uuid, RepoError> {
    Uuid::parse_str(id.as_str()).map_err(|_| RepoError::InvalidId(id.to_string()))
}

fn query_err(e: DbErr) -> RepoError {
    match e {
        DbErr::Conn(err) => RepoError::Connection(err.to_string()),
        DbErr::ConnectionAcquire(err) => RepoError::Connection(err.to_string()),
        other => RepoError::Query(other.to_string()),
    }
}

/// Build a `LIKE` pattern matching `needle` anywhere in a lower-cased column.
/// `%`, `_` and the escape character itself are matched literally.
pub(crate) fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl TutorialRepository for PostgresTutorialRepository {
    async fn create(&self, new: NewTutorial) -> Result<Tutorial, RepoError> {
        let now = Utc::now();
        let model = tutorial::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(new.title),
            description: Set(new.description),
            published: Set(new.published),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let saved = model.insert(&self.db).await.map_err(query_err)?;
        Ok(saved.into())
    }

    async fn find_all(&self, filter: &TutorialFilter) -> Result<Vec<Tutorial>, RepoError> {
        let mut query = TutorialEntity::find();

        if let Some(title) = &filter.title_contains {
            tracing::debug!(title = %title, "Filtering tutorials by title");
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(tutorial::Column::Title)))
                    .like(LikeExpr::new(like_pattern(title)).escape('\\')),
            );
        }
        if let Some(published) = filter.published {
            query = query.filter(tutorial::Column::Published.eq(published));
        }

        let result = query
            .order_by_asc(tutorial::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: &TutorialId) -> Result<Option<Tutorial>, RepoError> {
        let result = TutorialEntity::find_by_id(parse_id(id)?)
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn update(
        &self,
        id: &TutorialId,
        changes: TutorialChanges,
    ) -> Result<Option<Tutorial>, RepoError> {
        let mut model = tutorial::ActiveModel {
            id: Unchanged(parse_id(id)?),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };
        if let Some(title) = changes.title {
            model.title = Set(title);
        }
        if let Some(description) = changes.description {
            model.description = Set(description);
        }
        if let Some(published) = changes.published {
            model.published = Set(published);
        }

        // UPDATE .. RETURNING reports a missing row as RecordNotUpdated.
        match model.update(&self.db).await {
            Ok(updated) => Ok(Some(updated.into())),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(query_err(e)),
        }
    }

    async fn delete(&self, id: &TutorialId) -> Result<bool, RepoError> {
        let result = TutorialEntity::delete_by_id(parse_id(id)?)
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn delete_all(&self) -> Result<u64, RepoError> {
        let result = TutorialEntity::delete_many()
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.rows_affected)
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
