use latchkey_core::{Email, Role, TokenPurpose, UserStore, RecoveryTokenStore};
use serde_json::json;

use crate::helpers::{TestApp, random_email};

#[tokio::test]
async fn test_signup_returns_201_and_stores_a_disabled_user() {
    let app = TestApp::new().await;
    let email = random_email();

    let response = app
        .post_signup(&json!({ "email": email, "password": "pw1234" }))
        .await;

    assert_eq!(response.status().as_u16(), 201);
    let user = app
        .user_store
        .find_by_email(&Email::try_from(email.as_str()).unwrap())
        .await
        .unwrap()
        .unwrap();
    assert!(!user.is_enabled());
    assert!(user.roles().contains(&Role::User));
    assert_eq!(user.roles().len(), 1);

    let token = app
        .token_store
        .find_by_user(TokenPurpose::EmailVerification, user.id())
        .await
        .unwrap();
    assert!(token.is_some());
}

#[tokio::test]
async fn test_signup_mails_a_confirmation_link() {
    let app = TestApp::new().await;
    let email = random_email();

    app.post_signup(&json!({ "email": email, "password": "pw1234" }))
        .await;

    let message = app.notifier.last_to(&email).await.unwrap();
    assert_eq!(message.subject, "Email verification.");
    let link = app.confirmation_link(&email).await;
    assert!(link.starts_with(&format!("{}/api/v1/auth/email-confirm/", app.address)));
}

#[tokio::test]
async fn test_signup_with_taken_email_returns_400() {
    let app = TestApp::new().await;
    let email = random_email();
    app.post_signup(&json!({ "email": email, "password": "pw1234" }))
        .await;

    let response = app
        .post_signup(&json!({ "email": email.to_uppercase(), "password": "other-pw" }))
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "User with same email is already exists.");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_signup_with_invalid_input_returns_400() {
    let app = TestApp::new().await;
    let test_cases = [
        (json!({ "email": "", "password": "pw1234" }), "Email can't be blank."),
        (
            json!({ "email": "no-at-sign", "password": "pw1234" }),
            "Email format violation.",
        ),
        (
            json!({ "email": "a@x.com", "password": "pw" }),
            "Password must be between 4 and 60 characters.",
        ),
    ];

    for (body, message) in test_cases {
        let response = app.post_signup(&body).await;
        assert_eq!(response.status().as_u16(), 400, "{body}");
        let error: serde_json::Value = response.json().await.unwrap();
        assert_eq!(error["message"], message);
    }
}

#[tokio::test]
async fn test_signup_with_malformed_body_returns_400() {
    let app = TestApp::new().await;

    let response = app.post_signup(&json!({ "email": "a@x.com" })).await;

    assert_eq!(response.status().as_u16(), 400);
}
