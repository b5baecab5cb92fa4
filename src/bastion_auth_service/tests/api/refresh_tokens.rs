use bastion_core::TokenPair;

use crate::helpers::{TestApp, error_message};

#[tokio::test]
async fn refresh_rotates_the_pair() {
    let app = TestApp::new().await;
    let (_, tokens) = app.signed_in_user().await;

    let response = app.post_refresh_tokens(&tokens.refresh_token).await;
    assert_eq!(response.status().as_u16(), 200);
    let rotated: TokenPair = response.json().await.unwrap();

    assert_ne!(rotated.refresh_token, tokens.refresh_token);
    assert_eq!(
        app.post_refresh_tokens(&rotated.refresh_token)
            .await
            .status()
            .as_u16(),
        200
    );
}

#[tokio::test]
async fn reusing_a_rotated_token_is_denied_and_revokes_the_session() {
    let app = TestApp::new().await;
    let (_, original) = app.signed_in_user().await;

    let rotated: TokenPair = app
        .post_refresh_tokens(&original.refresh_token)
        .await
        .json()
        .await
        .unwrap();

    let replay = app.post_refresh_tokens(&original.refresh_token).await;
    assert_eq!(replay.status().as_u16(), 401);
    assert_eq!(error_message(replay).await, "Access denied");

    let after_revocation = app.post_refresh_tokens(&rotated.refresh_token).await;
    assert_eq!(after_revocation.status().as_u16(), 401);
    assert_eq!(error_message(after_revocation).await, "Unauthorized");
}

#[tokio::test]
async fn malformed_or_wrong_kind_tokens_are_rejected() {
    let app = TestApp::new().await;
    let (_, tokens) = app.signed_in_user().await;

    for token in ["garbage", tokens.access_token.as_str()] {
        let response = app.post_refresh_tokens(token).await;
        assert_eq!(response.status().as_u16(), 401);
        assert_eq!(error_message(response).await, "Unauthorized");
    }
}
