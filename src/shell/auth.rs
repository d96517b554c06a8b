//! Bearer token extractors.
//!
//! `AuthenticatedUser` resolves `Authorization: Bearer <token>` through the
//! state's token resolver. `AdminUser` additionally requires the admin flag.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
};

use crate::modules::accounts::core::user::User;
use crate::shell::errors::ApiError;
use crate::shell::state::AppState;

#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

fn bearer_token(parts: &Parts) -> Result<String, ApiError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            ApiError::new(StatusCode::UNAUTHORIZED, "unauthorized", "missing bearer token")
        })?;

    match header.strip_prefix("Bearer ").map(str::trim) {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        _ => Err(ApiError::new(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "expected 'Bearer <token>'",
        )),
    }
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let token = bearer_token(parts)?;
        let user = state.tokens.resolve(&token).await?;
        Ok(Self(user))
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let AuthenticatedUser(user) = AuthenticatedUser::from_request_parts(parts, state).await?;
        if !user.admin {
            tracing::warn!(user_id = %user.id, "admin route refused");
            return Err(ApiError::new(
                StatusCode::FORBIDDEN,
                "forbidden",
                "admin rights required",
            ));
        }
        Ok(Self(user))
    }
}
