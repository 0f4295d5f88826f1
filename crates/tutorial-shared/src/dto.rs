//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

use tutorial_core::domain::{Tutorial, TutorialChanges};

/// Body of `POST /api/tutorials`. Validation happens in the domain layer.
///
/// Scalar fields are cast leniently: numbers and booleans become strings,
/// and `published` accepts the usual truthy/falsy spellings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTutorialRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub published: Option<bool>,
}

/// Body of `PUT /api/tutorials/{id}`. Unknown keys are ignored.
///
/// `description: null` clears the description; an omitted key leaves it alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTutorialRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub published: Option<bool>,
}

impl From<UpdateTutorialRequest> for TutorialChanges {
    fn from(req: UpdateTutorialRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            published: req.published,
        }
    }
}

fn cast_string(value: Value) -> Result<Option<String>, String> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(format!("cannot cast {other} to a string")),
    }
}

fn cast_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_f64() {
            Some(1.0) => Some(true),
            Some(0.0) => Some(false),
            _ => None,
        },
        Value::String(s) => match s.as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    cast_string(Value::deserialize(deserializer)?).map_err(de::Error::custom)
}

/// Present-but-null deserializes to `Some(None)`; a missing key never reaches here.
fn nullable_string<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_string(deserializer).map(Some)
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => cast_bool(&value)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("cannot cast {value} to a boolean"))),
    }
}

/// Query string of `GET /api/tutorials`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TutorialListQuery {
    pub title: Option<String>,
}

/// Public representation of a tutorial.
///
/// This is the only shape a record takes on the wire: the store's internal
/// identifier is exposed as `id` and store bookkeeping fields never appear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorialResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Tutorial> for TutorialResponse {
    fn from(tutorial: Tutorial) -> Self {
        Self {
            id: tutorial.id.into_inner(),
            title: tutorial.title,
            description: tutorial.description,
            published: tutorial.published,
            created_at: tutorial.created_at,
            updated_at: tutorial.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutorial_core::domain::{NewTutorial, TutorialId};

    #[test]
    fn test_response_exposes_id_and_camel_case_timestamps() {
        let new = NewTutorial::try_new(Some("Rust".to_string()), None, None).unwrap();
        let tutorial = Tutorial::create(TutorialId::new("65f0c0ffee"), new, Utc::now());

        let json = serde_json::to_value(TutorialResponse::from(tutorial)).unwrap();
        let obj = json.as_object().unwrap();

        assert_eq!(obj["id"], "65f0c0ffee");
        assert_eq!(obj["published"], false);
        assert!(obj.contains_key("createdAt"));
        assert!(obj.contains_key("updatedAt"));
        assert!(!obj.contains_key("_id"));
        assert!(!obj.contains_key("__v"));
    }

    #[test]
    fn test_update_request_ignores_unknown_keys() {
        let req: UpdateTutorialRequest =
            serde_json::from_str(r#"{"title":"new","_id":"x","__v":3}"#).unwrap();
        let changes = TutorialChanges::from(req);
        assert_eq!(changes.title.as_deref(), Some("new"));
        assert!(changes.description.is_none());
        assert!(changes.published.is_none());
    }

    #[test]
    fn test_update_request_null_description_clears() {
        let req: UpdateTutorialRequest =
            serde_json::from_str(r#"{"description":null}"#).unwrap();
        assert_eq!(req.description, Some(None));
        assert!(!TutorialChanges::from(req).is_empty());

        let req: UpdateTutorialRequest =
            serde_json::from_str(r#"{"description":"text"}"#).unwrap();
        assert_eq!(req.description, Some(Some("text".to_string())));
    }

    #[test]
    fn test_create_request_casts_scalars() {
        let req: CreateTutorialRequest =
            serde_json::from_str(r#"{"title":42,"published":"yes"}"#).unwrap();
        assert_eq!(req.title.as_deref(), Some("42"));
        assert_eq!(req.published, Some(true));

        for (raw, expected) in [("\"no\"", false), ("0", false), ("1", true), ("true", true)] {
            let req: CreateTutorialRequest =
                serde_json::from_str(&format!(r#"{{"title":"t","published":{raw}}}"#)).unwrap();
            assert_eq!(req.published, Some(expected), "published = {raw}");
        }
    }

    #[test]
    fn test_create_request_rejects_uncastable_published() {
        let err = serde_json::from_str::<CreateTutorialRequest>(
            r#"{"title":"Rust","published":"maybe"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("cannot cast"));
    }

    #[test]
    fn test_deleted_all_message_contains_count() {
        use crate::MessageResponse;
        assert_eq!(
            MessageResponse::deleted_all(3).message,
            "3 Tutorials were deleted successfully!"
        );
    }
}
