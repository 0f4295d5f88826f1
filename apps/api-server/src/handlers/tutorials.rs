//! Tutorial handlers - one store call per request.

use actix_web::http::StatusCode;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, web};
use serde::de::DeserializeOwned;
use serde_json::Value;

use tutorial_core::domain::{NewTutorial, Tutorial, TutorialChanges, TutorialFilter, TutorialId};
use tutorial_shared::{
    CreateTutorialRequest, MessageResponse, TutorialListQuery, TutorialResponse,
    UpdateTutorialRequest,
};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const RETRIEVE_ALL_FAILED: &str = "Some error occurred while retrieving tutorials.";

fn list_response(tutorials: Vec<Tutorial>) -> HttpResponse {
    let body: Vec<TutorialResponse> = tutorials.into_iter().map(TutorialResponse::from).collect();
    HttpResponse::Ok().json(body)
}

fn is_json(req: &HttpRequest) -> bool {
    let content_type = req.content_type();
    content_type == "application/json" || content_type.ends_with("+json")
}

/// Read a request body into `T`.
///
/// Bodies that are absent, not declared as JSON, or not a JSON object read as
/// `T::default()`. Malformed JSON and fields that cannot be cast are 400s, an
/// oversized body is a 413.
fn parse_body<T>(req: &HttpRequest, body: Result<web::Bytes, actix_web::Error>) -> AppResult<T>
where
    T: DeserializeOwned + Default,
{
    let bytes = body.map_err(|e| {
        if e.as_response_error().status_code() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge("Request body is too large.".to_string())
        } else {
            AppError::BadRequest(format!("Invalid request body: {e}"))
        }
    })?;

    if !is_json(req) || bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    match serde_json::from_slice(&bytes) {
        Ok(Value::Object(fields)) => serde_json::from_value(Value::Object(fields))
            .map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}"))),
        Ok(_) => Ok(T::default()),
        Err(e) => Err(AppError::BadRequest(format!("Invalid JSON body: {e}"))),
    }
}

/// POST /api/tutorials
///
/// A missing body is treated as a request without a title.
pub async fn create(
    state: web::Data<AppState>,
    request: HttpRequest,
    body: Result<web::Bytes, actix_web::Error>,
) -> AppResult<HttpResponse> {
    let req: CreateTutorialRequest = parse_body(&request, body)?;
    tracing::debug!(title = ?req.title, "Creating tutorial");
    let new = NewTutorial::try_new(req.title, req.description, req.published)?;

    let tutorial = state
        .tutorials
        .create(new)
        .await
        .map_err(|e| AppError::store(e, "Some error occurred while creating the tutorial."))?;

    tracing::debug!(id = %tutorial.id, "Tutorial created");
    Ok(HttpResponse::Ok().json(TutorialResponse::from(tutorial)))
}

/// GET /api/tutorials?title=
pub async fn find_all(
    state: web::Data<AppState>,
    query: web::Query<TutorialListQuery>,
) -> AppResult<HttpResponse> {
    let filter = match query.into_inner().title {
        Some(title) if !title.is_empty() => TutorialFilter::title_contains(title),
        _ => TutorialFilter::all(),
    };
    tracing::debug!(?filter, "Listing tutorials");

    let tutorials = state
        .tutorials
        .find_all(&filter)
        .await
        .map_err(|e| AppError::store(e, RETRIEVE_ALL_FAILED))?;

    Ok(list_response(tutorials))
}

/// GET /api/tutorials/{id}
pub async fn find_one(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = TutorialId::new(path.into_inner());
    tracing::debug!(%id, "Fetching tutorial");

    let tutorial = state
        .tutorials
        .find_by_id(&id)
        .await
        .map_err(|e| AppError::store(e, format!("Error retrieving tutorial with id={id}")))?
        .ok_or_else(|| AppError::NotFound(format!("Not found tutorial with id {id}")))?;

    Ok(HttpResponse::Ok().json(TutorialResponse::from(tutorial)))
}

/// PUT /api/tutorials/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<String>,
    request: HttpRequest,
    body: Result<web::Bytes, actix_web::Error>,
) -> AppResult<HttpResponse> {
    let id = TutorialId::new(path.into_inner());
    tracing::debug!(%id, "Updating tutorial");
    let changes = TutorialChanges::from(parse_body::<UpdateTutorialRequest>(&request, body)?)
        .non_empty()?;

    state
        .tutorials
        .update(&id, changes)
        .await
        .map_err(|e| AppError::store(e, format!("Error updating tutorial with id={id}")))?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Cannot update tutorial with id={id}. Maybe tutorial was not found!"
            ))
        })?;

    Ok(HttpResponse::Ok().json(MessageResponse::updated()))
}

/// DELETE /api/tutorials/{id}
pub async fn delete(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = TutorialId::new(path.into_inner());
    tracing::debug!(%id, "Deleting tutorial");

    let removed = state
        .tutorials
        .delete(&id)
        .await
        .map_err(|e| AppError::store(e, format!("Could not delete tutorial with id={id}")))?;

    if !removed {
        return Err(AppError::NotFound(format!(
            "Cannot delete tutorial with id={id}. Maybe tutorial was not found!"
        )));
    }

    Ok(HttpResponse::Ok().json(MessageResponse::deleted()))
}

/// DELETE /api/tutorials
pub async fn delete_all(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    tracing::debug!("Deleting all tutorials");
    let count = state
        .tutorials
        .delete_all()
        .await
        .map_err(|e| AppError::store(e, "Some error occurred while removing all tutorials."))?;

    tracing::info!(count, "All tutorials deleted");
    Ok(HttpResponse::Ok().json(MessageResponse::deleted_all(count)))
}

/// GET /api/tutorials/published
pub async fn find_all_published(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    tracing::debug!("Listing published tutorials");
    let tutorials = state
        .tutorials
        .find_all(&TutorialFilter::published())
        .await
        .map_err(|e| AppError::store(e, RETRIEVE_ALL_FAILED))?;

    Ok(list_response(tutorials))
}
