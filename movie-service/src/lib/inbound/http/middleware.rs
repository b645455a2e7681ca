use std::collections::HashSet;

use axum::extract::MatchedPath;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::Method;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::auth::ports::AuthServicePort;
use crate::inbound::http::router::AppState;
use crate::user::models::User;

/// Account resolved from the bearer token, stored in request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// Routes reachable without a token.
///
/// Everything not listed here goes through [`require_authentication`].
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    public: HashSet<(Method, String)>,
}

impl AccessPolicy {
    /// Policy with no public routes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `route` (an axum route pattern such as `/users/:username`) as
    /// public for `method`.
    pub fn allow(mut self, method: Method, route: impl Into<String>) -> Self {
        self.public.insert((method, route.into()));
        self
    }

    /// Whether `method` on the matched `route` skips authentication.
    ///
    /// HEAD follows the GET entry of the same route.
    pub fn is_public(&self, method: &Method, route: &str) -> bool {
        let method = if *method == Method::HEAD {
            Method::GET
        } else {
            method.clone()
        };

        self.public.contains(&(method, route.to_string()))
    }
}

/// Middleware resolving the bearer token into an [`AuthenticatedUser`].
///
/// Applied to every route; routes allowed by the [`AccessPolicy`] pass
/// through untouched.
pub async fn require_authentication(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string());

    if let Some(route) = &route {
        if state.access_policy.is_public(req.method(), route) {
            return Ok(next.run(req).await);
        }
    }

    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let user = state
        .auth_service
        .authorize(authorization.as_deref())
        .await
        .map_err(|failure| {
            tracing::info!(
                method = %req.method(),
                route = route.as_deref().unwrap_or("unmatched"),
                reason = failure.reason(),
                "Request not authorized"
            );
            ApiError::from(failure)
        })?;

    req.extensions_mut().insert(AuthenticatedUser(user));

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_is_closed_by_default() {
        let policy = AccessPolicy::new();

        assert!(!policy.is_public(&Method::GET, "/"));
        assert!(!policy.is_public(&Method::POST, "/login"));
    }

    #[test]
    fn test_policy_matches_method_and_route() {
        let policy = AccessPolicy::new()
            .allow(Method::GET, "/")
            .allow(Method::POST, "/users");

        assert!(policy.is_public(&Method::GET, "/"));
        assert!(policy.is_public(&Method::HEAD, "/"));
        assert!(policy.is_public(&Method::POST, "/users"));
        assert!(!policy.is_public(&Method::GET, "/users"));
        assert!(!policy.is_public(&Method::DELETE, "/users/:username"));
    }
}
