//! API request and response types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Query string of `GET /api/tasks`.
///
/// Kept as raw strings so unparseable numbers reach validation instead of
/// being rejected by the extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTasksQuery {
    pub page: Option<String>,
    pub per_page: Option<String>,
}

impl ListTasksQuery {
    /// Pick the known keys out of decoded query pairs. A repeated key keeps
    /// its last value; unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "page" => query.page = Some(value),
                "per_page" => query.per_page = Some(value),
                _ => {}
            }
        }
        query
    }
}

/// Body of `POST /api/tasks`.
///
/// Fields stay untyped JSON so a non-string value is reported by validation
/// rather than failing the decode.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
}

/// Form-encoded body of `POST /api/tasks`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTaskForm {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl From<CreateTaskForm> for CreateTaskRequest {
    fn from(form: CreateTaskForm) -> Self {
        Self {
            name: form.name.map(Value::String),
            description: form.description.map(Value::String),
        }
    }
}

/// Body returned after a task was stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: String,
}

/// Body returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub errors: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Configured backend (`sqlite` or `memory`)
    pub store: String,
    /// Whether tasks survive a restart
    pub store_persistent: bool,
    pub task_count: u64,
}
