//! Task listing and creation handlers.

use std::sync::Arc;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Query, Request, State},
    http::header,
    Form, Json,
};
use serde_json::Value;

use super::error::ApiError;
use super::routes::AppState;
use super::types::{CreateTaskForm, CreateTaskRequest, ListTasksQuery, SuccessResponse};
use crate::pagination::{PaginatedCollection, PaginationRequest};
use crate::task::{NewTask, Task};

pub const TASK_CREATED_MESSAGE: &str = "Task added successfully";

/// `POST /api/tasks` body, decoded according to `Content-Type`.
///
/// Form-encoded bodies go through axum's `Form`; everything else must be a
/// JSON object or `null`. An empty body without a JSON content type and a
/// `null` body are both treated as an empty object so the missing fields
/// surface as validation errors.
pub struct TaskPayload(pub CreateTaskRequest);

#[async_trait]
impl<S> FromRequest<S> for TaskPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_ascii_lowercase())
            .unwrap_or_default();

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(form) = Form::<CreateTaskForm>::from_request(req, state)
                .await
                .map_err(|e| ApiError::Parse(e.body_text()))?;
            return Ok(Self(form.into()));
        }

        let claims_json =
            content_type.starts_with("application/json") || content_type.contains("+json");
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::Parse(e.body_text()))?;

        if body.is_empty() && !claims_json {
            return Ok(Self(CreateTaskRequest::default()));
        }

        let value: Value = serde_json::from_slice(&body)
            .map_err(|e| ApiError::Parse(format!("Invalid JSON body: {}", e)))?;
        match value {
            Value::Null => Ok(Self(CreateTaskRequest::default())),
            Value::Object(_) => serde_json::from_value(value)
                .map(Self)
                .map_err(|e| ApiError::Parse(format!("Invalid JSON body: {}", e))),
            _ => Err(ApiError::Parse(
                "Invalid JSON body: expected an object".to_string(),
            )),
        }
    }
}

/// GET /api/tasks - List tasks one page at a time.
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<PaginatedCollection<Task>>, ApiError> {
    let query = ListTasksQuery::from_pairs(pairs);
    let request = PaginationRequest::from_query(query.page.as_deref(), query.per_page.as_deref());
    request.validate()?;

    let page = state
        .tasks
        .list_page(request.offset(), request.limit())
        .await?;

    Ok(Json(PaginatedCollection::new(
        page.items,
        page.total,
        &request,
    )))
}

/// POST /api/tasks - Validate and store a new task.
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    TaskPayload(req): TaskPayload,
) -> Result<Json<SuccessResponse>, ApiError> {
    let task = NewTask::from_input(req.name.as_ref().into(), req.description.as_ref().into())?;
    let task = state.tasks.create(task).await?;
    tracing::info!("Created task {} ({:?})", task.id, task.name);

    Ok(Json(SuccessResponse {
        success: TASK_CREATED_MESSAGE.to_string(),
    }))
}
