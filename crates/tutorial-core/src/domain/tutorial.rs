use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Opaque tutorial identifier, assigned by the store on creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TutorialId(String);

impl TutorialId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for TutorialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Uuid> for TutorialId {
    fn from(id: Uuid) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TutorialId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Tutorial entity - a persisted tutorial record.
#[derive(Debug, Clone, PartialEq)]
pub struct Tutorial {
    pub id: TutorialId,
    pub title: String,
    pub description: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tutorial {
    /// Build a freshly created record from a validated payload.
    pub fn create(id: TutorialId, new: NewTutorial, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description,
            published: new.published,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge the supplied fields into this record.
    pub fn apply(&mut self, changes: TutorialChanges, now: DateTime<Utc>) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(published) = changes.published {
            self.published = published;
        }
        self.updated_at = now;
    }
}

/// Validated payload for creating a tutorial.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTutorial {
    pub title: String,
    pub description: Option<String>,
    pub published: bool,
}

impl NewTutorial {
    /// Validate a create payload: `title` must be present and non-empty,
    /// `published` defaults to `false`.
    pub fn try_new(
        title: Option<String>,
        description: Option<String>,
        published: Option<bool>,
    ) -> Result<Self, DomainError> {
        let title = title
            .filter(|t| !t.is_empty())
            .ok_or(DomainError::MissingTitle)?;

        Ok(Self {
            title,
            description,
            published: published.unwrap_or(false),
        })
    }
}

/// Partial update - only the supplied fields change.
///
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TutorialChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub published: Option<bool>,
}

impl TutorialChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.published.is_none()
    }

    /// Reject a change set that would touch nothing.
    pub fn non_empty(self) -> Result<Self, DomainError> {
        if self.is_empty() {
            Err(DomainError::EmptyChanges)
        } else {
            Ok(self)
        }
    }
}

/// Filter for listing tutorials. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TutorialFilter {
    /// Case-insensitive, unanchored substring of the title.
    pub title_contains: Option<String>,
    pub published: Option<bool>,
}

impl TutorialFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn title_contains(title: impl Into<String>) -> Self {
        Self {
            title_contains: Some(title.into()),
            published: None,
        }
    }

    pub fn published() -> Self {
        Self {
            title_contains: None,
            published: Some(true),
        }
    }

    /// Evaluate the filter against a record held in process memory.
    pub fn matches(&self, tutorial: &Tutorial) -> bool {
        let title_ok = self.title_contains.as_ref().is_none_or(|needle| {
            tutorial
                .title
                .to_lowercase()
                .contains(&needle.to_lowercase())
        });
        let published_ok = self
            .published
            .is_none_or(|published| tutorial.published == published);

        title_ok && published_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tutorial(title: &str, published: bool) -> Tutorial {
        let new = NewTutorial::try_new(Some(title.to_string()), None, Some(published)).unwrap();
        Tutorial::create(TutorialId::from(Uuid::new_v4()), new, Utc::now())
    }

    #[test]
    fn test_new_tutorial_requires_title() {
        assert_eq!(
            NewTutorial::try_new(None, Some("desc".to_string()), None),
            Err(DomainError::MissingTitle)
        );
        assert_eq!(
            NewTutorial::try_new(Some(String::new()), None, None),
            Err(DomainError::MissingTitle)
        );
    }

    #[test]
    fn test_new_tutorial_defaults_unpublished() {
        let new = NewTutorial::try_new(Some("Rust".to_string()), None, None).unwrap();
        assert!(!new.published);
        assert_eq!(new.description, None);
    }

    #[test]
    fn test_apply_only_touches_supplied_fields() {
        let mut t = tutorial("Old", true);
        t.description = Some("kept".to_string());
        let created = t.created_at;

        t.apply(
            TutorialChanges {
                title: Some("new".to_string()),
                ..Default::default()
            },
            Utc::now(),
        );

        assert_eq!(t.title, "new");
        assert_eq!(t.description.as_deref(), Some("kept"));
        assert!(t.published);
        assert_eq!(t.created_at, created);
        assert!(t.updated_at >= created);
    }

    #[test]
    fn test_apply_clears_description() {
        let mut t = tutorial("Old", false);
        t.description = Some("stale".to_string());

        t.apply(
            TutorialChanges {
                description: Some(None),
                ..Default::default()
            },
            Utc::now(),
        );

        assert_eq!(t.description, None);
        assert_eq!(t.title, "Old");
    }

    #[test]
    fn test_empty_changes_rejected() {
        assert_eq!(
            TutorialChanges::default().non_empty(),
            Err(DomainError::EmptyChanges)
        );
        let changes = TutorialChanges {
            published: Some(false),
            ..Default::default()
        };
        assert!(changes.non_empty().is_ok());
    }

    #[test]
    fn test_title_filter_is_case_insensitive_substring() {
        let filter = TutorialFilter::title_contains("tu");
        assert!(filter.matches(&tutorial("Tutorial", false)));
        assert!(filter.matches(&tutorial("TUTOR", false)));
        assert!(filter.matches(&tutorial("abcTUxyz", false)));
        assert!(!filter.matches(&tutorial("guide", false)));
    }

    #[test]
    fn test_title_filter_treats_input_literally() {
        let filter = TutorialFilter::title_contains("c++ (part 1)");
        assert!(filter.matches(&tutorial("Intro to C++ (Part 1)", false)));
        assert!(!TutorialFilter::title_contains(".*").matches(&tutorial("Rust", false)));
    }

    #[test]
    fn test_published_filter() {
        assert!(TutorialFilter::published().matches(&tutorial("a", true)));
        assert!(!TutorialFilter::published().matches(&tutorial("a", false)));
        assert!(TutorialFilter::all().matches(&tutorial("a", false)));
    }
}
