use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::modules::accounts::adapters::outbound::token_resolver::TokenError;
use crate::modules::accounts::service::AccountError;
use crate::modules::carts::service::CartServiceError;
use crate::modules::catalog::service::CatalogError;
use crate::modules::categories::service::CategoryServiceError;

#[derive(Debug, Serialize)]
struct ErrorBody {
    slug: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Error response with a stable slug. Internal failures carry no message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    slug: &'static str,
    message: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, slug: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            slug,
            message: Some(message.into()),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid-input", message)
    }

    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            slug: "internal-error",
            message: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            slug: self.slug,
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<CartServiceError> for ApiError {
    fn from(err: CartServiceError) -> Self {
        match err {
            CartServiceError::InvalidInput(_) => ApiError::bad_request(err.to_string()),
            CartServiceError::NotFound(_) => {
                ApiError::new(StatusCode::NOT_FOUND, "not-found", err.to_string())
            }
            CartServiceError::NotEnoughStock(_) => {
                ApiError::new(StatusCode::CONFLICT, "not-enough-stock", err.to_string())
            }
            CartServiceError::Internal => ApiError::internal(),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::InvalidInput(_) => ApiError::bad_request(err.to_string()),
            CatalogError::NotFound(_) => {
                ApiError::new(StatusCode::NOT_FOUND, "not-found", err.to_string())
            }
            CatalogError::Internal => ApiError::internal(),
        }
    }
}

impl From<CategoryServiceError> for ApiError {
    fn from(err: CategoryServiceError) -> Self {
        match err {
            CategoryServiceError::InvalidInput(_) => ApiError::bad_request(err.to_string()),
            CategoryServiceError::NotFound(_) => {
                ApiError::new(StatusCode::NOT_FOUND, "not-found", err.to_string())
            }
            CategoryServiceError::Internal => ApiError::internal(),
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::InvalidInput(_) => ApiError::bad_request(err.to_string()),
            AccountError::UsernameTaken(_) => {
                ApiError::new(StatusCode::CONFLICT, "username-taken", err.to_string())
            }
            AccountError::InvalidCredentials => ApiError::new(
                StatusCode::UNAUTHORIZED,
                "invalid-credentials",
                err.to_string(),
            ),
            AccountError::Internal => ApiError::internal(),
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Unknown | TokenError::Expired => {
                ApiError::new(StatusCode::UNAUTHORIZED, "unauthorized", err.to_string())
            }
            TokenError::Unavailable(detail) => {
                tracing::error!(error = %detail, "token resolution failed");
                ApiError::internal()
            }
        }
    }
}
