use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    response::IntoResponse,
};

use crate::shell::errors::ApiError;
use crate::shell::state::AppState;

pub async fn handle_list(State(state): State<AppState>) -> impl IntoResponse {
    match state.categories.list_categories().await {
        Ok(categories) => Json(categories).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}

pub async fn handle_show(
    State(state): State<AppState>,
    category_id: Result<Path<i64>, PathRejection>,
) -> impl IntoResponse {
    let Path(category_id) = match category_id {
        Ok(id) => id,
        Err(rejection) => return ApiError::bad_request(rejection.body_text()).into_response(),
    };

    match state.categories.get_category(category_id).await {
        Ok(category) => Json(category).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}
