use bastion_axum::routes::CreateApiKeyResponse;

use crate::helpers::{TestApp, error_message};

#[tokio::test]
async fn should_return_201_with_a_usable_api_key() {
    let app = TestApp::new().await;
    let (_, tokens) = app.signed_in_user().await;

    let response = app.post_api_key(Some(&tokens.access_token)).await;
    assert_eq!(response.status().as_u16(), 201);
    let body: CreateApiKeyResponse = response.json().await.unwrap();

    let response = app
        .post_with_authorization("/sign-out", &format!("ApiKey {}", body.api_key))
        .await;
    assert_eq!(response.status().as_u16(), 204);
}

#[tokio::test]
async fn api_key_can_enroll_tfa() {
    let app = TestApp::new().await;
    let (_, tokens) = app.signed_in_user().await;
    let response = app.post_api_key(Some(&tokens.access_token)).await;
    let body: CreateApiKeyResponse = response.json().await.unwrap();

    let response = app
        .post_with_authorization("/2fa/generate", &format!("apikey {}", body.api_key))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "image/png"
    );
}

#[tokio::test]
async fn should_return_401_without_credentials() {
    let app = TestApp::new().await;

    let response = app.post_api_key(None).await;

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn should_return_401_for_tampered_api_key() {
    let app = TestApp::new().await;
    let (_, tokens) = app.signed_in_user().await;
    let response = app.post_api_key(Some(&tokens.access_token)).await;
    let body: CreateApiKeyResponse = response.json().await.unwrap();
    let (uuid, _) = body.api_key.split_once('.').unwrap();

    let response = app
        .post_with_authorization("/sign-out", &format!("ApiKey {uuid}.forged"))
        .await;

    assert_eq!(response.status().as_u16(), 401);
    assert_eq!(error_message(response).await, "Unauthorized");
}

#[tokio::test]
async fn unknown_and_malformed_api_keys_look_alike() {
    let app = TestApp::new().await;

    let unknown = app
        .post_with_authorization(
            "/sign-out",
            "ApiKey 3f0e7a52-7d4c-4b1e-9a57-2f4c1f0f9a11.deadbeef",
        )
        .await;
    let malformed = app
        .post_with_authorization("/sign-out", "ApiKey garbage")
        .await;

    assert_eq!(unknown.status().as_u16(), 401);
    assert_eq!(malformed.status().as_u16(), 401);
    assert_eq!(error_message(unknown).await, error_message(malformed).await);
}
