/// Authentication endpoints
///
/// - `POST /api/register` - create an account and get a session token
/// - `POST /api/login` - exchange credentials for a session token
///
/// Both answer `{"token": "...", "email": "..."}` on success.

use crate::{app::AppState, error::ApiResult};
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use todo_shared::services::Session;
use validator::Validate;

/// Register request
///
/// Email syntax is checked by the auth service once the fields are present.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(required(message = "Email and password are required"))]
    pub email: Option<String>,

    #[validate(required(message = "Email and password are required"))]
    pub password: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(required(message = "Email and password are required"))]
    pub email: Option<String>,

    #[validate(required(message = "Email and password are required"))]
    pub password: Option<String>,
}

/// Session response for register and login
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Signed session token (valid for 7 days)
    pub token: String,

    /// Email of the authenticated user
    pub email: String,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            token: session.token,
            email: session.email,
        }
    }
}

/// Register a new user
///
/// ```text
/// POST /api/register
/// Content-Type: application/json
///
/// { "email": "ana@example.com", "password": "s3nha" }
/// ```
///
/// # Errors
///
/// - `400`: missing or empty fields, malformed email, or email already registered
/// - `500`: server error
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<Json<SessionResponse>> {
    let Json(req) = payload?;
    req.validate()?;

    let email = req.email.unwrap_or_default();
    let password = req.password.unwrap_or_default();
    let session = state.auth.register(&email, &password).await?;

    Ok(Json(session.into()))
}

/// Log in
///
/// ```text
/// POST /api/login
/// Content-Type: application/json
///
/// { "email": "ana@example.com", "password": "s3nha" }
/// ```
///
/// # Errors
///
/// - `400`: missing fields or invalid credentials (same message whether the
///   email or the password was wrong)
/// - `500`: server error
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<SessionResponse>> {
    let Json(req) = payload?;
    req.validate()?;

    let email = req.email.unwrap_or_default();
    let password = req.password.unwrap_or_default();
    let session = state.auth.login(&email, &password).await?;

    Ok(Json(session.into()))
}
