use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::database::DatabaseManager;
use crate::handlers;
use crate::middleware::{jwt_auth_middleware, validate_user_middleware};

/// Shared state handed to every handler and middleware
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: AppConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }
}

pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_public_routes())
        // Protected
        .merge(protected_routes(state.clone()))
        .layer(RequestBodyLimitLayer::new(state.config.api.max_request_size_bytes));

    if state.config.security.enable_cors {
        router = router.layer(cors_layer(&state.config));
    }
    if state.config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    use handlers::public::auth;

    Router::new()
        .route("/register", post(auth::register_post))
        .route("/login", post(auth::login_post))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::{auth, entries, topics};

    Router::new()
        .route("/whoami", get(auth::whoami_get))
        .route("/entries", get(entries::entries_get).post(entries::entries_post))
        .route(
            "/entries/:id",
            get(entries::entry_get)
                .put(entries::entry_put)
                .delete(entries::entry_delete),
        )
        .route("/topics", get(topics::topics_get).post(topics::topics_post))
        .route(
            "/topics/:id",
            get(topics::topic_get)
                .put(topics::topic_put)
                .delete(topics::topic_delete),
        )
        // The last layer added runs first: token check, then caller resolution
        .route_layer(middleware::from_fn_with_state(state.clone(), validate_user_middleware))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": "Commonplace API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "home": "/ (public)",
            "health": "/health (public)",
            "auth": "/register, /login (public - token acquisition)",
            "whoami": "/whoami (protected)",
            "entries": "/entries[/:id] (protected)",
            "topics": "/topics[/:id] (protected)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;
    use crate::auth::issue_token;
    use crate::testing::TestContext;

    async fn test_app() -> (Router, AppState, TestContext) {
        let ctx = TestContext::new().await;
        let mut config = AppConfig::development();
        config.api.enable_request_logging = false;
        let state = AppState::new(ctx.pool.clone(), config);
        (app(state.clone()), state, ctx)
    }

    #[tokio::test]
    async fn root_lists_endpoints() {
        let (router, _, _ctx) = test_app().await;
        let res = router
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_path_is_not_found_without_token() {
        let (router, _, _ctx) = test_app().await;
        let res = router
            .oneshot(Request::builder().uri("/nowhere").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn protected_route_rejects_missing_token() {
        let (router, _, _ctx) = test_app().await;
        let res = router
            .oneshot(Request::builder().uri("/entries").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn token_for_deleted_user_is_rejected() {
        let (router, state, _ctx) = test_app().await;
        let token = issue_token(9999, "ghost", &state.config.security).unwrap();
        let res = router
            .oneshot(
                Request::builder()
                    .uri("/topics")
                    .header("Authorization", format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn valid_token_reaches_handler() {
        let (router, state, ctx) = test_app().await;
        let caller = ctx.create_caller("ada").await;
        let token = issue_token(caller.user_id, &caller.username, &state.config.security).unwrap();
        let res = router
            .oneshot(
                Request::builder()
                    .uri("/entries")
                    .header("Authorization", format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }
}
