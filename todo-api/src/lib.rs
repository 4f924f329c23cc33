//! # Todo API Server Library
//!
//! HTTP surface of the to-do service: account registration and login,
//! followed by owner-scoped task management.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
