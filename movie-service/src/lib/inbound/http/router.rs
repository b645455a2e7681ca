use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header;
use axum::http::HeaderValue;
use axum::http::Method;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::AllowOrigin;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::add_favorite::add_favorite;
use super::handlers::create_user::create_user;
use super::handlers::delete_user::delete_user;
use super::handlers::get_director::get_director;
use super::handlers::get_favorites::get_favorites;
use super::handlers::get_genre::get_genre;
use super::handlers::get_movie::get_movie;
use super::handlers::get_user::get_user;
use super::handlers::home::home;
use super::handlers::list_movies::list_movies;
use super::handlers::login::login;
use super::handlers::remove_favorite::remove_favorite;
use super::handlers::update_user::update_user;
use super::middleware::require_authentication;
use super::middleware::AccessPolicy;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::movie::ports::MovieServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub movie_service: Arc<dyn MovieServicePort>,
    pub auth_service: Arc<dyn AuthServicePort>,
    pub access_policy: Arc<AccessPolicy>,
}

/// Outer surface settings of the HTTP application.
#[derive(Debug, Clone, Default)]
pub struct RouterOptions {
    /// Origins allowed to make cross-origin requests; empty allows none.
    pub allowed_origins: Vec<String>,
    /// Directory served for any path no route matches.
    pub static_dir: PathBuf,
}

/// Routes reachable without a bearer token.
pub fn public_routes() -> AccessPolicy {
    AccessPolicy::new()
        .allow(Method::GET, "/")
        .allow(Method::POST, "/login")
        .allow(Method::POST, "/users")
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    movie_service: Arc<dyn MovieServicePort>,
    auth_service: Arc<dyn AuthServicePort>,
    options: RouterOptions,
) -> Router {
    let state = AppState {
        user_service,
        movie_service,
        auth_service,
        access_policy: Arc::new(public_routes()),
    };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .route("/", get(home))
        .route("/login", post(login))
        .route("/users", post(create_user))
        .route("/users/favorites/:username", get(get_favorites))
        .route(
            "/users/:username",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route(
            "/users/:username/favorites/:movie_id",
            post(add_favorite).delete(remove_favorite),
        )
        .route("/movies", get(list_movies))
        .route("/movies/:title", get(get_movie))
        .route("/movies/genres/:genre_name", get(get_genre))
        .route(
            "/movies/details/directors/:director_name",
            get(get_director),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_authentication,
        ))
        .fallback_service(ServeDir::new(&options.static_dir))
        .layer(trace_layer)
        .layer(cors_layer(&options.allowed_origins))
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
}
