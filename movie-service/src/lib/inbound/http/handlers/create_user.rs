use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::AccountRequest;
use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<AccountRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let fields = body.validate()?;
    let command = CreateUserCommand {
        username: fields.username,
        email: fields.email,
        password: fields.password,
        birth_date: fields.birth_date,
    };

    state
        .user_service
        .create_user(command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}
