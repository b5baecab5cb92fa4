use crate::helpers::{PASSWORD, TestApp, error_message};

const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G'];

#[tokio::test]
async fn generate_requires_authentication() {
    let app = TestApp::new().await;

    let response = app.post_tfa_generate(None).await;

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn generate_returns_png_and_stores_pending_secret() {
    let app = TestApp::new().await;
    let (email, tokens) = app.signed_in_user().await;

    let response = app.post_tfa_generate(Some(&tokens.access_token)).await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "image/png"
    );
    let bytes = response.bytes().await.unwrap();
    assert!(bytes.starts_with(PNG_MAGIC));
    assert!(app.stored_tfa_secret(&email).await.is_some());
}

#[tokio::test]
async fn confirm_before_generate_is_a_conflict() {
    let app = TestApp::new().await;
    let (_, tokens) = app.signed_in_user().await;

    let response = app.post_tfa_confirm(&tokens.access_token, "123456").await;

    assert_eq!(response.status().as_u16(), 409);
}

#[tokio::test]
async fn enrolled_user_must_present_a_code_to_sign_in() {
    let app = TestApp::new().await;
    let (email, tokens) = app.signed_in_user().await;
    app.post_tfa_generate(Some(&tokens.access_token)).await;
    let secret = app.stored_tfa_secret(&email).await.unwrap();

    let wrong = app.post_tfa_confirm(&tokens.access_token, "not-a-code").await;
    assert_eq!(wrong.status().as_u16(), 401);

    let code = app.totp.generate_current_code(&secret).unwrap();
    let confirmed = app.post_tfa_confirm(&tokens.access_token, &code).await;
    assert_eq!(confirmed.status().as_u16(), 204);

    let again = app.post_tfa_confirm(&tokens.access_token, &code).await;
    assert_eq!(again.status().as_u16(), 409);

    let without_code = app
        .post_sign_in(&serde_json::json!({ "email": email, "password": PASSWORD }))
        .await;
    assert_eq!(without_code.status().as_u16(), 401);
    assert_eq!(error_message(without_code).await, "Unauthorized");

    let code = app.totp.generate_current_code(&secret).unwrap();
    let with_code = app
        .post_sign_in(&serde_json::json!({ "email": email, "password": PASSWORD, "tfaCode": code }))
        .await;
    assert_eq!(with_code.status().as_u16(), 200);
}
