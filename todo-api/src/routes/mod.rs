/// API route handlers
///
/// - `health`: health check endpoint
/// - `auth`: register and login
/// - `tasks`: owner-scoped task CRUD

pub mod auth;
pub mod health;
pub mod tasks;
