/// Application state and router builder
///
/// The shared state carries the injected store backends and the
/// configuration; services are constructed from it per use (they are thin
/// wrappers over `Arc`s). Tests build the same router over the in-memory
/// stores, so every route is exercised without a database.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use taskledger_api::{app::{build_router, AppState}, config::Config};
/// use taskledger_shared::store::postgres::{PgCredentialStore, PgTaskStore};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(
///     Arc::new(PgCredentialStore::new(pool.clone())),
///     Arc::new(PgTaskStore::new(pool)),
///     config,
/// );
/// let app = build_router(state);
/// # Ok(())
/// # }
/// ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{delete, get, post, put},
    Router,
};
use chrono::Duration;
use taskledger_shared::auth::middleware;
use taskledger_shared::service::{auth::AuthService, tasks::TaskService};
use taskledger_shared::store::{CredentialStore, TaskStore};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::{config::Config, error::ApiError};

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. Store
/// backends are injected at construction, never reached through globals.
#[derive(Clone)]
pub struct AppState {
    /// Credential backend
    pub credentials: Arc<dyn CredentialStore>,

    /// Task backend
    pub tasks: Arc<dyn TaskStore>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates application state over explicit store backends
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        tasks: Arc<dyn TaskStore>,
        config: Config,
    ) -> Self {
        Self {
            credentials,
            tasks,
            config: Arc::new(config),
        }
    }

    /// Gets the token-signing secret
    pub fn token_secret(&self) -> &str {
        &self.config.auth.token_secret
    }

    /// Builds the authentication service
    pub fn auth_service(&self) -> AuthService {
        AuthService::new(
            self.credentials.clone(),
            self.config.auth.token_secret.as_str(),
            Duration::seconds(self.config.auth.token_ttl_seconds),
        )
    }

    /// Builds the task service
    pub fn task_service(&self) -> TaskService {
        TaskService::new(self.tasks.clone())
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                 # Health check (public)
/// ├── /auth/
/// │   ├── POST /register      # Create account (public)
/// │   └── POST /login         # Issue session token (public)
/// └── /tasks/                 # Owner-scoped (bearer token required)
///     ├── GET    /
///     ├── POST   /
///     ├── PUT    /:id
///     └── DELETE /:id
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Bearer-token guard (protected routes only)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Auth routes (public, no auth required)
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    // Task routes (require a bearer token)
    let task_routes = Router::new()
        .route("/", get(routes::tasks::list_tasks))
        .route("/", post(routes::tasks::create_task))
        .route("/:id", put(routes::tasks::update_task))
        .route("/:id", delete(routes::tasks::delete_task))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            bearer_auth_layer,
        ));

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
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
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .nest("/auth", auth_routes)
        .nest("/tasks", task_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// Bearer-token middleware layer
///
/// Delegates to the shared authorization guard, which verifies the token
/// and injects the resolved identity into the request extensions. No
/// database round trip: identity derives from the token signature alone.
async fn bearer_auth_layer(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    Ok(middleware::require_bearer(state.token_secret(), req, next).await?)
}
