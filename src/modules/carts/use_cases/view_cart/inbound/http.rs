use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;

use crate::shell::auth::AuthenticatedUser;
use crate::shell::errors::ApiError;
use crate::shell::state::AppState;

#[derive(Serialize)]
pub struct StockCheckResponse {
    pub sufficient: bool,
}

pub async fn handle(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> impl IntoResponse {
    match state.carts.get_cart(&user).await {
        Ok(cart) => Json(cart).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}

pub async fn handle_stock_check(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> impl IntoResponse {
    match state.carts.check_stocks(&user).await {
        Ok(sufficient) => Json(StockCheckResponse { sufficient }).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}
