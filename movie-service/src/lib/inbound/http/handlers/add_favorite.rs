use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ensure_owner;
use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::movie::models::MovieId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn add_favorite(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path((username, movie_id)): Path<(String, String)>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let username = ensure_owner(&current, &username)?;
    let movie_id = MovieId::from_string(&movie_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .user_service
        .add_favorite(&username, &movie_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
