use latchkey_core::{Email, TokenPurpose, UserStore, RecoveryTokenStore};
use serde_json::json;

use crate::helpers::{TestApp, random_email};

#[tokio::test]
async fn test_following_the_link_enables_the_account_and_consumes_the_token() {
    let app = TestApp::new().await;
    let email = random_email();
    app.post_signup(&json!({ "email": email, "password": "pw1234" }))
        .await;
    let link = app.confirmation_link(&email).await;

    let response = app.get_url(&link).await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "Email successfully verified.");

    let user = app
        .user_store
        .find_by_email(&Email::try_from(email.as_str()).unwrap())
        .await
        .unwrap()
        .unwrap();
    assert!(user.is_enabled());
    let token = app
        .token_store
        .find_by_user(TokenPurpose::EmailVerification, user.id())
        .await
        .unwrap();
    assert!(token.is_none());
}

#[tokio::test]
async fn test_following_the_link_twice_returns_400() {
    let app = TestApp::new().await;
    let email = random_email();
    app.post_signup(&json!({ "email": email, "password": "pw1234" }))
        .await;
    let link = app.confirmation_link(&email).await;
    app.get_url(&link).await;

    let response = app.get_url(&link).await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Email verification token is invalid.");
}

#[tokio::test]
async fn test_unknown_token_returns_400() {
    let app = TestApp::new().await;

    let response = app.get_confirm_email("not-a-token").await;

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn test_password_reset_token_does_not_confirm_email() {
    let app = TestApp::new().await;
    let email = random_email();
    app.signup_and_confirm(&email, "pw1234").await;
    app.get_send_password_reset(&email).await;
    let reset_token = app.reset_token(&email).await;

    let response = app.get_confirm_email(&reset_token).await;

    assert_eq!(response.status().as_u16(), 400);
}
