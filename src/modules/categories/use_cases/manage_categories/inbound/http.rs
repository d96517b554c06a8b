use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection, rejection::PathRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::shell::auth::AdminUser;
use crate::shell::errors::ApiError;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct CategoryBody {
    pub name: String,
}

#[derive(Serialize)]
pub struct DeleteCategoryResponse {
    pub deleted: bool,
}

pub async fn handle_create(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    body: Result<Json<CategoryBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return ApiError::bad_request(rejection.body_text()).into_response(),
    };

    match state.categories.create_category(body.name).await {
        Ok(category) => (StatusCode::CREATED, Json(category)).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}

pub async fn handle_update(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    category_id: Result<Path<i64>, PathRejection>,
    body: Result<Json<CategoryBody>, JsonRejection>,
) -> impl IntoResponse {
    let Path(category_id) = match category_id {
        Ok(id) => id,
        Err(rejection) => return ApiError::bad_request(rejection.body_text()).into_response(),
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return ApiError::bad_request(rejection.body_text()).into_response(),
    };

    match state.categories.rename_category(category_id, body.name).await {
        Ok(category) => Json(category).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}

pub async fn handle_delete(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    category_id: Result<Path<i64>, PathRejection>,
) -> impl IntoResponse {
    let Path(category_id) = match category_id {
        Ok(id) => id,
        Err(rejection) => return ApiError::bad_request(rejection.body_text()).into_response(),
    };

    match state.categories.delete_category(category_id).await {
        Ok(()) => Json(DeleteCategoryResponse { deleted: true }).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}

#[cfg(test)]
mod manage_categories_http_inbound_tests {
    use axum::{
        Router,
        http::StatusCode,
        routing::{delete, post},
    };
    use rstest::{fixture, rstest};
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::modules::categories::service::{CategoryServiceError, MockCategoryService};
    use crate::shell::state::AppState;
    use crate::tests::fixtures::state::{TestApp, empty_request, json_body, json_request};

    use super::{handle_create, handle_delete, handle_update};

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/category", post(handle_create))
            .route("/category/{id}", delete(handle_delete).patch(handle_update))
            .with_state(state)
    }

    #[fixture]
    fn test_app() -> TestApp {
        TestApp::new()
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_let_an_admin_manage_categories(test_app: TestApp) {
        let token = test_app.admin_token(1).await;
        let app = app(test_app.state.clone());

        let created = app
            .clone()
            .oneshot(json_request("POST", "/category", Some(&token), r#"{"name":"Fiction"}"#))
            .await
            .unwrap();
        let renamed = app
            .clone()
            .oneshot(json_request("PATCH", "/category/1", Some(&token), r#"{"name":"Novels"}"#))
            .await
            .unwrap();
        let deleted = app
            .oneshot(empty_request("DELETE", "/category/1", Some(&token)))
            .await
            .unwrap();

        assert_eq!(created.status(), StatusCode::CREATED);
        assert_eq!(
            json_body(created).await,
            serde_json::json!({"id": 1, "name": "Fiction"})
        );
        assert_eq!(json_body(renamed).await["name"], "Novels");
        assert_eq!(json_body(deleted).await, serde_json::json!({"deleted": true}));
        assert!(test_app.state.categories.list_categories().await.unwrap().is_empty());
    }

    #[rstest]
    #[case("POST", "/category")]
    #[case("PATCH", "/category/1")]
    #[tokio::test]
    async fn it_should_forbid_regular_users(
        test_app: TestApp,
        #[case] method: &str,
        #[case] uri: &str,
    ) {
        let token = test_app.user_token(1).await;

        let response = app(test_app.state.clone())
            .oneshot(json_request(method, uri, Some(&token), r#"{"name":"Fiction"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[rstest]
    #[case("POST", "/category", r#"{"name":"  "}"#, StatusCode::BAD_REQUEST)]
    #[case("POST", "/category", r#"{"title":"Fiction"}"#, StatusCode::BAD_REQUEST)]
    #[case("PATCH", "/category/4", r#"{"name":"Plays"}"#, StatusCode::NOT_FOUND)]
    #[case("PATCH", "/category/abc", r#"{"name":"Plays"}"#, StatusCode::BAD_REQUEST)]
    #[tokio::test]
    async fn it_should_refuse_bad_requests(
        test_app: TestApp,
        #[case] method: &str,
        #[case] uri: &str,
        #[case] body: &str,
        #[case] status: StatusCode,
    ) {
        let token = test_app.admin_token(1).await;

        let response = app(test_app.state.clone())
            .oneshot(json_request(method, uri, Some(&token), body))
            .await
            .unwrap();

        assert_eq!(response.status(), status);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_return_500_without_leaking_details(test_app: TestApp) {
        let token = test_app.admin_token(1).await;
        let mut categories = MockCategoryService::new();
        categories
            .expect_delete_category()
            .returning(|_| Err(CategoryServiceError::Internal));
        let state = AppState {
            categories: Arc::new(categories),
            ..test_app.state.clone()
        };

        let response = app(state)
            .oneshot(empty_request("DELETE", "/category/1", Some(&token)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"slug": "internal-error"})
        );
    }
}
