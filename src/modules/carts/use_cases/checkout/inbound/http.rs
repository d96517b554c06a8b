use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;

use crate::shell::auth::AuthenticatedUser;
use crate::shell::errors::ApiError;
use crate::shell::state::AppState;

#[derive(Serialize)]
pub struct CheckoutResponse {
    pub ok: bool,
}

pub async fn handle(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> impl IntoResponse {
    match state.carts.checkout(&user).await {
        Ok(()) => Json(CheckoutResponse { ok: true }).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}
