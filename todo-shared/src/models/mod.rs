/// Database models
///
/// - `user`: registered accounts (credentials)
/// - `task`: to-do items, each owned by one user, plus `Priority` ranking

pub mod task;
pub mod user;
