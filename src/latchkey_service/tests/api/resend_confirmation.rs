use serde_json::json;

use crate::helpers::{TestApp, random_email};

#[tokio::test]
async fn test_resend_refreshes_the_link_and_invalidates_the_old_one() {
    let app = TestApp::new().await;
    let email = random_email();
    app.post_signup(&json!({ "email": email, "password": "pw1234" }))
        .await;
    let first_link = app.confirmation_link(&email).await;

    let response = app.get_resend_confirmation(&email).await;
    assert_eq!(response.status().as_u16(), 200);
    let second_link = app.confirmation_link(&email).await;

    assert_ne!(first_link, second_link);
    assert_eq!(app.get_url(&first_link).await.status().as_u16(), 400);
    assert_eq!(app.get_url(&second_link).await.status().as_u16(), 200);
}

#[tokio::test]
async fn test_resend_for_unknown_email_returns_404() {
    let app = TestApp::new().await;

    let response = app.get_resend_confirmation("ghost@example.com").await;

    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "User not found with email: ghost@example.com");
    assert!(app.notifier.messages().await.is_empty());
}
