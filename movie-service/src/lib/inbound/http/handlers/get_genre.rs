use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::movie::models::Genre;
use crate::domain::movie::ports::MovieServicePort;
use crate::inbound::http::router::AppState;

pub async fn get_genre(
    State(state): State<AppState>,
    Path(genre_name): Path<String>,
) -> Result<ApiSuccess<Genre>, ApiError> {
    state
        .movie_service
        .get_genre(&genre_name)
        .await
        .map_err(ApiError::from)
        .map(|genre| ApiSuccess::new(StatusCode::OK, genre))
}
