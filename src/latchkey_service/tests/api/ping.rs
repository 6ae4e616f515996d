use crate::helpers::TestApp;

#[tokio::test]
async fn test_ping_returns_pong() {
    let app = TestApp::new().await;

    let response = app.get_ping().await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "pong");
}

#[tokio::test]
async fn test_ping_rejects_a_malformed_bearer_token() {
    let app = TestApp::new().await;

    let response = app
        .http_client
        .get(format!("{}/ping", app.address))
        .bearer_auth("not-a-token")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 401);
    assert_eq!(response.text().await.unwrap(), "Invalid token.");
}
