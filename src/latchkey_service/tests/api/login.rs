use latchkey_core::{Role, TokenCodec};
use serde_json::json;

use crate::helpers::{TestApp, random_email};

#[tokio::test]
async fn test_login_returns_a_token_bound_to_identity_and_roles() {
    let app = TestApp::new().await;
    let email = random_email();

    let token = app.login_as(&email, "pw1234").await;

    let principal = app.codec.parse(&token).unwrap();
    assert!(principal.has_role(Role::User));
    assert!(!principal.has_role(Role::Admin));
}

#[tokio::test]
async fn test_login_with_wrong_password_returns_401() {
    let app = TestApp::new().await;
    let email = random_email();
    app.signup_and_confirm(&email, "pw1234").await;

    let response = app
        .post_login(&json!({ "email": email, "password": "wrong-pw" }))
        .await;

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn test_login_with_unknown_email_returns_401() {
    let app = TestApp::new().await;

    let response = app
        .post_login(&json!({ "email": random_email(), "password": "pw1234" }))
        .await;

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn test_login_before_confirmation_returns_403() {
    let app = TestApp::new().await;
    let email = random_email();
    app.post_signup(&json!({ "email": email, "password": "pw1234" }))
        .await;

    let response = app
        .post_login(&json!({ "email": email, "password": "pw1234" }))
        .await;

    assert_eq!(response.status().as_u16(), 403);
}
