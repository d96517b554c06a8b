use axum::{Json, extract::State, extract::rejection::JsonRejection, response::IntoResponse};
use serde::{Deserialize, Serialize};

use crate::modules::accounts::core::user::Credentials;
use crate::shell::errors::ApiError;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct SignInBody {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct SignInResponse {
    pub token: String,
}

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<SignInBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return ApiError::bad_request(rejection.body_text()).into_response(),
    };

    match state
        .accounts
        .sign_in(Credentials::new(body.username, body.password))
        .await
    {
        Ok(token) => Json(SignInResponse { token }).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}
