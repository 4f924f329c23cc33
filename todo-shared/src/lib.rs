//! # Todo Shared Library
//!
//! Domain types, persistence, and business logic for the to-do service.
//! The HTTP layer lives in `todo-api`.
//!
//! ## Module Organization
//!
//! - `auth`: password hashing, session tokens, request identity
//! - `db`: connection pool and migrations
//! - `models`: `User` and `Task` rows with their SQL
//! - `store`: store traits with PostgreSQL and in-memory implementations
//! - `services`: `AuthService` and `TaskService`

pub mod auth;
pub mod db;
pub mod models;
pub mod services;
pub mod store;

/// Current version of the shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
