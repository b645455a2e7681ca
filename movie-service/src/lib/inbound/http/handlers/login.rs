use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::auth::errors::AuthFailure;
use crate::auth::models::Credentials;
use crate::auth::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    // An unreadable form is answered like any other failed login.
    let Json(body) = body.map_err(|_| ApiError::from(AuthFailure::InvalidCredentials))?;

    let (user, issued) = state
        .auth_service
        .login(Credentials::new(body.username, body.pwd))
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            user: (&user).into(),
            token: issued.token,
        },
    ))
}

/// Login form; deliberately not `Debug`.
#[derive(Deserialize)]
pub struct LoginRequestBody {
    #[serde(default)]
    username: String,
    #[serde(default)]
    pwd: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub user: UserData,
    pub token: String,
}
