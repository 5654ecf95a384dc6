//! # task_api
//!
//! A small REST service for listing and creating tasks.
//!
//! This library provides:
//! - `GET /api/tasks` with validated page/per-page parameters and a
//!   paginated envelope (`items`, `totalCount`, `page`, `perPage`)
//! - `POST /api/tasks` accepting JSON or form bodies
//! - An idempotent seeding routine for the administrative user
//!
//! ## Request Flow
//! 1. Decode and validate the request (violations are aggregated)
//! 2. Query or insert through a [`task::store::TaskStore`]
//! 3. Shape the response, mapping failures through [`api::ApiError`]
//!
//! ## Modules
//! - `api`: axum router, handlers and error mapping
//! - `pagination`: page window validation and the result envelope
//! - `task`: task records and storage backends
//! - `user`: users, password hashing and seeding
//! - `db`: shared SQLite connection

pub mod api;
pub mod config;
pub mod db;
pub mod pagination;
pub mod task;
pub mod user;
pub mod validation;

pub use config::Config;
pub use pagination::{PaginatedCollection, PaginationRequest};
pub use task::{NewTask, Task};
