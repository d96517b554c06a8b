use axum::{
    Json,
    extract::{Path, Query, State, rejection::PathRejection, rejection::QueryRejection},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::shell::errors::ApiError;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct ListBooksParams {
    /// Comma separated category ids, e.g. `1,2`.
    pub category_id: Option<String>,
    pub page: Option<u32>,
}

fn parse_category_ids(raw: Option<&str>) -> Result<Vec<i64>, ApiError> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>()
                .map_err(|_| ApiError::bad_request(format!("invalid category id {part:?}")))
        })
        .collect()
}

pub async fn handle_list(
    State(state): State<AppState>,
    params: Result<Query<ListBooksParams>, QueryRejection>,
) -> impl IntoResponse {
    let Query(params) = match params {
        Ok(p) => p,
        Err(rejection) => return ApiError::bad_request(rejection.body_text()).into_response(),
    };
    let category_ids = match parse_category_ids(params.category_id.as_deref()) {
        Ok(ids) => ids,
        Err(err) => return err.into_response(),
    };

    match state
        .catalog
        .list_books(category_ids, params.page.unwrap_or(1))
        .await
    {
        Ok(books) => Json(books).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}

pub async fn handle_show(
    State(state): State<AppState>,
    book_id: Result<Path<i64>, PathRejection>,
) -> impl IntoResponse {
    let Path(book_id) = match book_id {
        Ok(id) => id,
        Err(rejection) => return ApiError::bad_request(rejection.body_text()).into_response(),
    };

    match state.catalog.get_book(book_id).await {
        Ok(book) => Json(book).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}
