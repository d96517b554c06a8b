use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection, rejection::PathRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::modules::catalog::core::book::{BookChanges, NewBook};
use crate::shell::auth::AdminUser;
use crate::shell::errors::ApiError;
use crate::shell::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookBody {
    pub title: String,
    pub year: i32,
    pub author: String,
    pub price: u64,
    pub stock: u32,
    pub category_id: i64,
}

impl From<CreateBookBody> for NewBook {
    fn from(body: CreateBookBody) -> Self {
        NewBook {
            title: body.title,
            year: body.year,
            author: body.author,
            price: body.price,
            stock: body.stock,
            category_id: body.category_id,
        }
    }
}

/// Any `stock` field in the body is ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookBody {
    pub title: String,
    pub year: i32,
    pub author: String,
    pub price: u64,
    pub category_id: i64,
}

impl From<UpdateBookBody> for BookChanges {
    fn from(body: UpdateBookBody) -> Self {
        BookChanges {
            title: body.title,
            year: body.year,
            author: body.author,
            price: body.price,
            category_id: body.category_id,
        }
    }
}

#[derive(Serialize)]
pub struct DeleteBookResponse {
    pub deleted: bool,
}

pub async fn handle_create(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    body: Result<Json<CreateBookBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return ApiError::bad_request(rejection.body_text()).into_response(),
    };

    match state.catalog.create_book(body.into()).await {
        Ok(book) => (StatusCode::CREATED, Json(book)).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}

pub async fn handle_update(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    book_id: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateBookBody>, JsonRejection>,
) -> impl IntoResponse {
    let Path(book_id) = match book_id {
        Ok(id) => id,
        Err(rejection) => return ApiError::bad_request(rejection.body_text()).into_response(),
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return ApiError::bad_request(rejection.body_text()).into_response(),
    };

    match state.catalog.update_book(book_id, body.into()).await {
        Ok(book) => Json(book).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}

pub async fn handle_delete(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    book_id: Result<Path<i64>, PathRejection>,
) -> impl IntoResponse {
    let Path(book_id) = match book_id {
        Ok(id) => id,
        Err(rejection) => return ApiError::bad_request(rejection.body_text()).into_response(),
    };

    match state.catalog.delete_book(book_id).await {
        Ok(()) => Json(DeleteBookResponse { deleted: true }).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}
