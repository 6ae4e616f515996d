use latchkey_core::Role;

use crate::helpers::{TestApp, random_email};

#[tokio::test]
async fn test_current_user_requires_authentication() {
    let app = TestApp::new().await;

    let response = app.get_current_user(None).await;

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn test_current_user_returns_the_record_without_hash() {
    let app = TestApp::new().await;
    let email = random_email();
    let token = app.login_as(&email, "pw1234").await;

    let response = app.get_current_user(Some(&token)).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["email"], email);
    assert_eq!(body["enabled"], true);
    assert_eq!(body["roles"], serde_json::json!(["USER"]));
    assert!(body["id"].is_string());
    assert!(body.get("password_hash").is_none());
    assert!(body.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_tampered_token_returns_401_with_plain_text() {
    let app = TestApp::new().await;
    let token = app.login_as(&random_email(), "pw1234").await;
    let tampered = format!("{token}x");

    let response = app.get_current_user(Some(&tampered)).await;

    assert_eq!(response.status().as_u16(), 401);
    assert_eq!(response.text().await.unwrap(), "Invalid token.");
}

#[tokio::test]
async fn test_expired_token_returns_401() {
    let app = TestApp::with_ttl(1).await;
    let token = app.login_as(&random_email(), "pw1234").await;

    tokio::time::sleep(std::time::Duration::from_millis(2100)).await;
    let response = app.get_current_user(Some(&token)).await;

    assert_eq!(response.status().as_u16(), 401);
    assert_eq!(response.text().await.unwrap(), "Token is expired.");
}

#[tokio::test]
async fn test_listing_users_requires_admin_role() {
    let app = TestApp::new().await;
    let token = app.login_as(&random_email(), "pw1234").await;

    let response = app.get_all_users(&token, "").await;

    assert_eq!(response.status().as_u16(), 403);
}

#[tokio::test]
async fn test_roles_come_from_the_token_not_the_store() {
    let app = TestApp::new().await;
    let email = random_email();
    let token = app.login_as(&email, "pw1234").await;
    app.grant(&email, Role::Admin).await;

    let stale = app.get_all_users(&token, "").await;
    assert_eq!(stale.status().as_u16(), 403);

    let response = app
        .post_login(&serde_json::json!({ "email": email, "password": "pw1234" }))
        .await;
    let body: serde_json::Value = response.json().await.unwrap();
    let fresh_token = body["token"].as_str().unwrap();

    let response = app.get_all_users(fresh_token, "").await;
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn test_admin_pages_through_users() {
    let app = TestApp::new().await;
    let admin = random_email();
    app.signup_and_confirm(&admin, "pw1234").await;
    app.grant(&admin, Role::Admin).await;
    for _ in 0..2 {
        app.signup_and_confirm(&random_email(), "pw1234").await;
    }
    let response = app
        .post_login(&serde_json::json!({ "email": admin, "password": "pw1234" }))
        .await;
    let body: serde_json::Value = response.json().await.unwrap();
    let token = body["token"].as_str().unwrap();

    let response = app
        .get_all_users(token, "?page-number=1&page-size=2")
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let page: serde_json::Value = response.json().await.unwrap();
    assert_eq!(page["totalElements"], 3);
    assert_eq!(page["totalPages"], 2);
    assert_eq!(page["pageNumber"], 1);
    assert_eq!(page["content"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_page_size_returns_400() {
    let app = TestApp::new().await;
    let admin = random_email();
    app.signup_and_confirm(&admin, "pw1234").await;
    app.grant(&admin, Role::Admin).await;
    let response = app
        .post_login(&serde_json::json!({ "email": admin, "password": "pw1234" }))
        .await;
    let body: serde_json::Value = response.json().await.unwrap();
    let token = body["token"].as_str().unwrap();

    let response = app.get_all_users(token, "?page-size=0").await;

    assert_eq!(response.status().as_u16(), 400);
}
