use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::movie::models::Director;
use crate::domain::movie::ports::MovieServicePort;
use crate::inbound::http::router::AppState;

pub async fn get_director(
    State(state): State<AppState>,
    Path(director_name): Path<String>,
) -> Result<ApiSuccess<Director>, ApiError> {
    state
        .movie_service
        .get_director(&director_name)
        .await
        .map_err(ApiError::from)
        .map(|director| ApiSuccess::new(StatusCode::OK, director))
}
