/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use todo_api::{app::{build_router, AppState}, config::Config};
/// use todo_shared::{db::pool::{create_pool, DatabaseConfig}, store::PgStore};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(DatabaseConfig {
///     url: config.database.url.clone(),
///     ..Default::default()
/// })
/// .await?;
///
/// let state = AppState::new(Arc::new(PgStore::new(pool)), config);
/// let app = build_router(state);
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, error::ApiError};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use todo_shared::{
    auth::middleware::bearer_token,
    services::{AuthService, TaskService},
    store::{CredentialStore, HealthCheck, TaskStore},
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned into every handler; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Registration, login, token verification
    pub auth: Arc<AuthService>,

    /// Owner-scoped task operations
    pub tasks: Arc<TaskService>,

    /// Store connectivity probe
    pub health: Arc<dyn HealthCheck>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Wires the services onto one store
    ///
    /// The token secret comes from `config.jwt.secret`.
    pub fn new<S>(store: Arc<S>, config: Config) -> Self
    where
        S: CredentialStore + TaskStore + HealthCheck + 'static,
    {
        let credentials: Arc<dyn CredentialStore> = store.clone();
        let task_store: Arc<dyn TaskStore> = store.clone();

        Self {
            auth: Arc::new(AuthService::new(credentials, config.jwt.secret.clone())),
            tasks: Arc::new(TaskService::new(task_store)),
            health: store,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete router
///
/// ```text
/// /
/// ├── GET /health                  # public
/// └── /api
///     ├── POST   /register         # public
///     ├── POST   /login            # public
///     ├── GET    /tasks            # bearer
///     ├── POST   /tasks            # bearer
///     ├── PUT    /tasks/:id        # bearer
///     └── DELETE /tasks/:id        # bearer
/// ```
///
/// Unknown `/api` paths answer 404 `{"error": "API route not found"}`; any
/// other unknown path answers 404 `{"error": "Not found"}`.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let task_routes = Router::new()
        .route(
            "/tasks",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/tasks/:id",
            put(routes::tasks::update_task).delete(routes::tasks::delete_task),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let api_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .merge(task_routes)
        .fallback(api_not_found);

    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/api", api_routes)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.allows_any_origin() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600))
}

/// Bearer authentication layer
///
/// Verifies the token and stores the caller's `AuthContext` in the request
/// extensions before the handler runs.
async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = {
        let token = bearer_token(req.headers())?;
        state.auth.verify(token)?
    };

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

async fn api_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "API route not found" })),
    )
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}
