use axum::http::StatusCode;
use std::time::Duration;
use tower::ServiceExt;

use crate::shared::core::primitives::BookId;
use crate::shell::http::router;
use crate::tests::fixtures::state::{TestApp, empty_request, json_body, json_request};

const DUNE: &str = r#"{"title":"Dune","year":1965,"author":"Frank Herbert","price":1099,"stock":2,"categoryId":1}"#;
const EMMA: &str = r#"{"title":"Emma","year":1815,"author":"Jane Austen","price":899,"stock":1,"categoryId":2}"#;

#[tokio::test]
async fn shops_from_catalog_to_checkout() {
    let test_app = TestApp::new();
    let app = router(test_app.state.clone());
    let admin = test_app.admin_token(100).await;
    let alice = test_app.user_token(1).await;
    let bob = test_app.user_token(2).await;

    for body in [DUNE, EMMA] {
        let created = app
            .clone()
            .oneshot(json_request("POST", "/book", Some(&admin), body))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);
    }

    let listed = app
        .clone()
        .oneshot(empty_request("GET", "/books", None))
        .await
        .unwrap();
    assert_eq!(json_body(listed).await.as_array().unwrap().len(), 2);

    let alice_cart = app
        .clone()
        .oneshot(json_request("POST", "/cart", Some(&alice), r#"{"bookIds":[1,2]}"#))
        .await
        .unwrap();
    assert_eq!(alice_cart.status(), StatusCode::OK);

    // Emma's only copy now sits in Alice's cart.
    let bob_cart = app
        .clone()
        .oneshot(json_request("POST", "/cart", Some(&bob), r#"{"bookIds":[2]}"#))
        .await
        .unwrap();
    assert_eq!(bob_cart.status(), StatusCode::CONFLICT);

    let alice_cart = app
        .clone()
        .oneshot(json_request("POST", "/cart", Some(&alice), r#"{"bookIds":[1]}"#))
        .await
        .unwrap();
    assert_eq!(alice_cart.status(), StatusCode::OK);

    let bob_cart = app
        .clone()
        .oneshot(json_request("POST", "/cart", Some(&bob), r#"{"bookIds":[2]}"#))
        .await
        .unwrap();
    assert_eq!(bob_cart.status(), StatusCode::OK);

    for token in [&alice, &bob] {
        let checkout = app
            .clone()
            .oneshot(empty_request("POST", "/checkout", Some(token)))
            .await
            .unwrap();
        assert_eq!(checkout.status(), StatusCode::OK);
    }

    let dune = test_app.db.book(BookId::new(1).unwrap()).await.unwrap();
    let emma = test_app.db.book(BookId::new(2).unwrap()).await.unwrap();
    assert_eq!(dune.stock, 1);
    assert_eq!(emma.stock, 0);

    let again = app
        .oneshot(empty_request("POST", "/checkout", Some(&alice)))
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn abandoned_carts_return_their_books() {
    let test_app = TestApp::new();
    let app = router(test_app.state.clone());
    let admin = test_app.admin_token(100).await;
    let alice = test_app.user_token(1).await;

    app.clone()
        .oneshot(json_request("POST", "/book", Some(&admin), EMMA))
        .await
        .unwrap();
    app.clone()
        .oneshot(json_request("POST", "/cart", Some(&alice), r#"{"bookIds":[1]}"#))
        .await
        .unwrap();
    assert_eq!(
        test_app.db.book(BookId::new(1).unwrap()).await.unwrap().stock,
        0
    );

    let removed = test_app
        .state
        .carts
        .clean_expired_carts(Duration::ZERO)
        .await
        .unwrap();

    assert_eq!(removed, 1);
    assert_eq!(
        test_app.db.book(BookId::new(1).unwrap()).await.unwrap().stock,
        1
    );
    let cart = app
        .oneshot(empty_request("GET", "/cart", Some(&alice)))
        .await
        .unwrap();
    assert_eq!(cart.status(), StatusCode::NOT_FOUND);
}

async fn sign_up_and_in(app: &axum::Router, username: &str) -> String {
    let credentials = format!(r#"{{"username":"{username}","password":"pw-{username}"}}"#);
    let signed_up = app
        .clone()
        .oneshot(json_request("POST", "/signup", None, &credentials))
        .await
        .unwrap();
    assert_eq!(signed_up.status(), StatusCode::OK);

    let signed_in = app
        .clone()
        .oneshot(json_request("POST", "/signin", None, &credentials))
        .await
        .unwrap();
    assert_eq!(signed_in.status(), StatusCode::OK);
    let token = json_body(signed_in).await["token"]
        .as_str()
        .unwrap()
        .to_string();
    format!("Bearer {token}")
}

#[tokio::test]
async fn signed_up_shoppers_compete_for_the_last_copy() {
    let test_app = TestApp::new();
    let app = router(test_app.state.clone());
    let admin = test_app.admin_token(100).await;
    app.clone()
        .oneshot(json_request("POST", "/book", Some(&admin), EMMA))
        .await
        .unwrap();

    let carol = sign_up_and_in(&app, "carol").await;
    let dave = sign_up_and_in(&app, "dave").await;

    let carol_cart = app
        .clone()
        .oneshot(json_request("POST", "/cart", Some(&carol), r#"{"bookIds":[1]}"#))
        .await
        .unwrap();
    let dave_cart = app
        .oneshot(json_request("POST", "/cart", Some(&dave), r#"{"bookIds":[1]}"#))
        .await
        .unwrap();

    assert_eq!(carol_cart.status(), StatusCode::OK);
    assert_eq!(dave_cart.status(), StatusCode::CONFLICT);
    let emma = test_app.db.book(BookId::new(1).unwrap()).await.unwrap();
    assert_eq!(emma.stock, 0);
}
