use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::get_user::lookup_username;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn get_favorites(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<ApiSuccess<Vec<String>>, ApiError> {
    let username = lookup_username(&username)?;
    let user = state.user_service.get_user_by_username(&username).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        user.favorite_movies.iter().map(|id| id.to_string()).collect(),
    ))
}
