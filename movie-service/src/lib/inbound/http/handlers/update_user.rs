use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;

use super::ensure_owner;
use super::AccountRequest;
use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::UpdateUserCommand;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::ports::UserServicePort;

pub async fn update_user(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(username): Path<String>,
    Json(body): Json<AccountRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let username = ensure_owner(&current, &username)?;
    let fields = body.validate()?;
    let command = UpdateUserCommand {
        username: fields.username,
        email: fields.email,
        password: fields.password,
        birth_date: fields.birth_date,
    };

    state
        .user_service
        .update_user(&username, command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
