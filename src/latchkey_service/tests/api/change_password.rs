use serde_json::json;

use crate::helpers::{TestApp, random_email};

#[tokio::test]
async fn test_reset_flow_replaces_the_password() {
    let app = TestApp::new().await;
    let email = random_email();
    app.signup_and_confirm(&email, "pw1234").await;

    let response = app.get_send_password_reset(&email).await;
    assert_eq!(response.status().as_u16(), 200);
    let message = app.notifier.last_to(&email).await.unwrap();
    assert_eq!(message.subject, "Password reset.");
    let token = app.reset_token(&email).await;

    let response = app
        .post_change_password(&json!({ "verificationToken": token, "newPassword": "new-pw-5678" }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let old = app
        .post_login(&json!({ "email": email, "password": "pw1234" }))
        .await;
    let new = app
        .post_login(&json!({ "email": email, "password": "new-pw-5678" }))
        .await;
    assert_eq!(old.status().as_u16(), 401);
    assert_eq!(new.status().as_u16(), 200);
}

#[tokio::test]
async fn test_reset_token_is_single_use() {
    let app = TestApp::new().await;
    let email = random_email();
    app.signup_and_confirm(&email, "pw1234").await;
    app.get_send_password_reset(&email).await;
    let token = app.reset_token(&email).await;
    app.post_change_password(&json!({ "verificationToken": token, "newPassword": "new-pw-5678" }))
        .await;

    let response = app
        .post_change_password(&json!({ "verificationToken": token, "newPassword": "third-pw" }))
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Password reset token is invalid.");
}

#[tokio::test]
async fn test_requesting_a_second_reset_invalidates_the_first_token() {
    let app = TestApp::new().await;
    let email = random_email();
    app.signup_and_confirm(&email, "pw1234").await;
    app.get_send_password_reset(&email).await;
    let first = app.reset_token(&email).await;
    app.get_send_password_reset(&email).await;
    let second = app.reset_token(&email).await;

    assert_ne!(first, second);
    let stale = app
        .post_change_password(&json!({ "verificationToken": first, "newPassword": "new-pw-5678" }))
        .await;
    let fresh = app
        .post_change_password(&json!({ "verificationToken": second, "newPassword": "new-pw-5678" }))
        .await;
    assert_eq!(stale.status().as_u16(), 400);
    assert_eq!(fresh.status().as_u16(), 200);
}

#[tokio::test]
async fn test_confirmation_token_cannot_reset_a_password() {
    let app = TestApp::new().await;
    let email = random_email();
    app.post_signup(&json!({ "email": email, "password": "pw1234" }))
        .await;
    let link = app.confirmation_link(&email).await;
    let confirmation_token = link.rsplit('/').next().unwrap();

    let response = app
        .post_change_password(
            &json!({ "verificationToken": confirmation_token, "newPassword": "new-pw-5678" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn test_reset_for_unknown_email_returns_404() {
    let app = TestApp::new().await;

    let response = app.get_send_password_reset(&random_email()).await;

    assert_eq!(response.status().as_u16(), 404);
}
