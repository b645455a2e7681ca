use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;
use serde_json::json;

use crate::auth::errors::AuthFailure;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::movie::errors::MovieError;
use crate::movie::models::Director;
use crate::movie::models::Genre;
use crate::movie::models::Movie;
use crate::user::errors::PasswordError;
use crate::user::errors::UserError;
use crate::user::models::EmailAddress;
use crate::user::models::Password;
use crate::user::models::User;
use crate::user::models::Username;

pub mod add_favorite;
pub mod create_user;
pub mod delete_user;
pub mod get_director;
pub mod get_favorites;
pub mod get_genre;
pub mod get_movie;
pub mod get_user;
pub mod home;
pub mod list_movies;
pub mod login;
pub mod remove_favorite;
pub mod update_user;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Logged server-side; the body only says something went wrong.
    InternalServerError(String),
    ServiceUnavailable(String),
    UnprocessableEntity(Vec<String>),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Forbidden(String),
    Unauthorized {
        message: String,
        reason: &'static str,
    },
    /// Rejected login, in the `{message, user: null}` shape clients expect.
    LoginFailed(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
            ApiError::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::UnprocessableEntity(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "errors": errors })),
            )
                .into_response(),
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::Conflict(msg) => {
                (StatusCode::CONFLICT, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::Forbidden(msg) => {
                (StatusCode::FORBIDDEN, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::Unauthorized { message, reason } => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": message, "reason": reason })),
            )
                .into_response(),
            ApiError::LoginFailed(msg) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": msg, "user": null })),
            )
                .into_response(),
        }
    }
}

impl From<AuthFailure> for ApiError {
    fn from(failure: AuthFailure) -> Self {
        match failure {
            AuthFailure::InvalidCredentials => ApiError::LoginFailed(failure.to_string()),
            AuthFailure::MissingToken
            | AuthFailure::InvalidToken
            | AuthFailure::Expired
            | AuthFailure::UnknownSubject => ApiError::Unauthorized {
                message: failure.to_string(),
                reason: failure.reason(),
            },
            AuthFailure::StoreUnavailable => ApiError::ServiceUnavailable(failure.to_string()),
            AuthFailure::TokenIssuance => ApiError::InternalServerError(failure.to_string()),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) | UserError::MovieNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            UserError::UsernameAlreadyExists(_) | UserError::EmailAlreadyExists(_) => {
                ApiError::Conflict(err.to_string())
            }
            UserError::InvalidUsername(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidUserId(_)
            | UserError::Password(PasswordError::Empty) => {
                ApiError::UnprocessableEntity(vec![err.to_string()])
            }
            UserError::Password(PasswordError::HashingFailed(_)) | UserError::DatabaseError(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<MovieError> for ApiError {
    fn from(err: MovieError) -> Self {
        match err {
            MovieError::NotFound(_)
            | MovieError::GenreNotFound(_)
            | MovieError::DirectorNotFound(_) => ApiError::NotFound(err.to_string()),
            MovieError::InvalidMovieId(_) => ApiError::BadRequest(err.to_string()),
            MovieError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

/// Allow account changes only on the caller's own account.
pub fn ensure_owner(current: &AuthenticatedUser, username: &str) -> Result<Username, ApiError> {
    if current.0.username.as_str() == username {
        Ok(current.0.username.clone())
    } else {
        tracing::info!(
            user_id = %current.0.id,
            target = username,
            "Account change on another user refused"
        );
        Err(ApiError::Forbidden(
            "You can only change your own account".to_string(),
        ))
    }
}

/// Account fields accepted by registration and full update.
///
/// Missing fields default to empty so they are reported with the other
/// validation errors instead of as a body rejection.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct AccountRequest {
    username: String,
    pwd: String,
    email: String,
    birth_date: Option<String>,
}

/// Validated account fields.
pub struct AccountFields {
    pub username: Username,
    pub password: Password,
    pub email: EmailAddress,
    pub birth_date: Option<NaiveDate>,
}

impl AccountRequest {
    /// Validate every field, collecting all messages.
    pub fn validate(self) -> Result<AccountFields, ApiError> {
        let mut errors = Vec::new();

        let username = Username::new(self.username)
            .map_err(|e| errors.push(e.to_string()))
            .ok();
        let password = Password::new(self.pwd)
            .map_err(|e| errors.push(e.to_string()))
            .ok();
        let email = EmailAddress::new(self.email)
            .map_err(|e| errors.push(e.to_string()))
            .ok();
        let birth_date = match self.birth_date.as_deref().filter(|s| !s.is_empty()) {
            None => Some(None),
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| errors.push("Birth date must be a YYYY-MM-DD date".to_string()))
                .ok(),
        };

        match (username, password, email, birth_date) {
            (Some(username), Some(password), Some(email), Some(birth_date)) => Ok(AccountFields {
                username,
                password,
                email,
                birth_date,
            }),
            _ => Err(ApiError::UnprocessableEntity(errors)),
        }
    }
}

/// Public view of an account; the password digest is never included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub birth_date: Option<NaiveDate>,
    pub favorite_movies: Vec<String>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            birth_date: user.birth_date,
            favorite_movies: user.favorite_movies.iter().map(|id| id.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieData {
    pub id: String,
    pub title: String,
    pub description: String,
    pub genre: Genre,
    pub director: Director,
    pub image_path: Option<String>,
    pub featured: bool,
}

impl From<&Movie> for MovieData {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id.to_string(),
            title: movie.title.clone(),
            description: movie.description.clone(),
            genre: movie.genre.clone(),
            director: movie.director.clone(),
            image_path: movie.image_path.clone(),
            featured: movie.featured,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, pwd: &str, email: &str, birth_date: Option<&str>) -> AccountRequest {
        AccountRequest {
            username: username.to_string(),
            pwd: pwd.to_string(),
            email: email.to_string(),
            birth_date: birth_date.map(str::to_string),
        }
    }

    #[test]
    fn test_account_request_collects_every_error() {
        let result = request("ab", "", "nope", Some("12/31/1990")).validate();

        match result {
            Err(ApiError::UnprocessableEntity(errors)) => assert_eq!(errors.len(), 4),
            _ => panic!("expected validation errors"),
        }
    }

    #[test]
    fn test_account_request_accepts_valid_fields() {
        let fields = request("alice01", "secret", "alice@example.com", Some("1990-12-31"))
            .validate()
            .unwrap_or_else(|_| panic!("expected valid fields"));

        assert_eq!(fields.username.as_str(), "alice01");
        assert_eq!(fields.birth_date, NaiveDate::from_ymd_opt(1990, 12, 31));
    }

    #[test]
    fn test_auth_failures_map_to_statuses() {
        let statuses = [
            (AuthFailure::InvalidCredentials, StatusCode::BAD_REQUEST),
            (AuthFailure::MissingToken, StatusCode::UNAUTHORIZED),
            (AuthFailure::InvalidToken, StatusCode::UNAUTHORIZED),
            (AuthFailure::Expired, StatusCode::UNAUTHORIZED),
            (AuthFailure::UnknownSubject, StatusCode::UNAUTHORIZED),
            (AuthFailure::StoreUnavailable, StatusCode::SERVICE_UNAVAILABLE),
            (AuthFailure::TokenIssuance, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (failure, status) in statuses {
            assert_eq!(ApiError::from(failure).into_response().status(), status);
        }
    }
}
