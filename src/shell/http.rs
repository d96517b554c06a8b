use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::modules::accounts::use_cases::sign_in::inbound::http as sign_in_http;
use crate::modules::accounts::use_cases::sign_up::inbound::http as sign_up_http;
use crate::modules::carts::use_cases::checkout::inbound::http as checkout_http;
use crate::modules::carts::use_cases::clear_cart::inbound::http as clear_cart_http;
use crate::modules::carts::use_cases::update_cart::inbound::http as update_cart_http;
use crate::modules::carts::use_cases::view_cart::inbound::http as view_cart_http;
use crate::modules::catalog::use_cases::browse_books::inbound::http as browse_http;
use crate::modules::catalog::use_cases::manage_books::inbound::http as manage_http;
use crate::modules::categories::use_cases::browse_categories::inbound::http as browse_categories_http;
use crate::modules::categories::use_cases::manage_categories::inbound::http as manage_categories_http;
use crate::shell::state::AppState;

pub const BANNER: &str = "Book Shop API v0.1";

async fn banner() -> &'static str {
    BANNER
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(banner))
        .route("/signup", post(sign_up_http::handle))
        .route("/signin", post(sign_in_http::handle))
        .route("/categories", get(browse_categories_http::handle_list))
        .route("/category", post(manage_categories_http::handle_create))
        .route(
            "/category/{id}",
            get(browse_categories_http::handle_show)
                .patch(manage_categories_http::handle_update)
                .delete(manage_categories_http::handle_delete),
        )
        .route("/books", get(browse_http::handle_list))
        .route("/book", post(manage_http::handle_create))
        .route(
            "/book/{id}",
            get(browse_http::handle_show)
                .patch(manage_http::handle_update)
                .delete(manage_http::handle_delete),
        )
        .route(
            "/cart",
            get(view_cart_http::handle)
                .post(update_cart_http::handle)
                .delete(clear_cart_http::handle),
        )
        .route("/cart/stock", get(view_cart_http::handle_stock_check))
        .route("/checkout", post(checkout_http::handle))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
