//! HTTP API for the task service.
//!
//! ## Endpoints
//!
//! - `GET /api/tasks?page=&per_page=` - List tasks, paginated
//! - `POST /api/tasks` - Create a task from a JSON or form body
//! - `GET /api/health` - Health check

mod error;
mod routes;
mod tasks;
pub mod types;

pub use error::ApiError;
pub use routes::{app, serve, AppState};
pub use types::*;
