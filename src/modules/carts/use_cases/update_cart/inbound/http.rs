use axum::{Json, extract::State, extract::rejection::JsonRejection, response::IntoResponse};
use serde::Deserialize;

use crate::shell::auth::AuthenticatedUser;
use crate::shell::errors::ApiError;
use crate::shell::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartBody {
    pub book_ids: Vec<i64>,
}

pub async fn handle(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    body: Result<Json<UpdateCartBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return ApiError::bad_request(rejection.body_text()).into_response(),
    };

    match state.carts.update_cart(&user, body.book_ids).await {
        Ok(cart) => Json(cart).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}
