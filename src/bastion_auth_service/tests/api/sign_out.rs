use crate::helpers::TestApp;

#[tokio::test]
async fn should_return_401_without_bearer_token() {
    let app = TestApp::new().await;

    let response = app.post_sign_out(None).await;

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn should_return_401_for_invalid_bearer_token() {
    let app = TestApp::new().await;

    let response = app.post_sign_out(Some("not.a.jwt")).await;

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn sign_out_revokes_the_refresh_token() {
    let app = TestApp::new().await;
    let (_, tokens) = app.signed_in_user().await;

    let response = app.post_sign_out(Some(&tokens.access_token)).await;
    assert_eq!(response.status().as_u16(), 204);

    let refresh = app.post_refresh_tokens(&tokens.refresh_token).await;
    assert_eq!(refresh.status().as_u16(), 401);

    // idempotent
    let again = app.post_sign_out(Some(&tokens.access_token)).await;
    assert_eq!(again.status().as_u16(), 204);
}

#[tokio::test]
async fn bearer_scheme_is_case_insensitive() {
    let app = TestApp::new().await;
    let (_, tokens) = app.signed_in_user().await;

    let response = app
        .post_with_authorization("/sign-out", &format!("bearer {}", tokens.access_token))
        .await;

    assert_eq!(response.status().as_u16(), 204);
}
