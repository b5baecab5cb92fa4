use crate::helpers::{PASSWORD, TestApp, error_message, get_random_email};

#[tokio::test]
async fn should_return_token_pair_for_valid_credentials() {
    let app = TestApp::new().await;
    let credentials = serde_json::json!({ "email": get_random_email(), "password": PASSWORD });
    app.post_sign_up(&credentials).await;

    let response = app.post_sign_in(&credentials).await;

    assert_eq!(response.status().as_u16(), 200);
    assert!(response.headers().contains_key("x-request-id"));
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(!body["accessToken"].as_str().unwrap().is_empty());
    assert!(!body["refreshToken"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_user_and_wrong_password_look_the_same() {
    let app = TestApp::new().await;
    let email = get_random_email();
    app.post_sign_up(&serde_json::json!({ "email": email, "password": PASSWORD }))
        .await;

    let wrong_password = app
        .post_sign_in(&serde_json::json!({ "email": email, "password": "wrong" }))
        .await;
    let unknown_user = app
        .post_sign_in(&serde_json::json!({ "email": get_random_email(), "password": PASSWORD }))
        .await;

    assert_eq!(wrong_password.status().as_u16(), 401);
    assert_eq!(unknown_user.status().as_u16(), 401);
    assert_eq!(
        error_message(wrong_password).await,
        error_message(unknown_user).await
    );
}

#[tokio::test]
async fn should_return_400_for_invalid_email() {
    let app = TestApp::new().await;

    let response = app
        .post_sign_in(&serde_json::json!({ "email": "nope", "password": PASSWORD }))
        .await;

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn tfa_code_is_ignored_for_users_without_tfa() {
    let app = TestApp::new().await;
    let credentials = serde_json::json!({ "email": get_random_email(), "password": PASSWORD });
    app.post_sign_up(&credentials).await;

    let mut with_code = credentials.clone();
    with_code["tfaCode"] = serde_json::json!("000000");

    assert_eq!(app.post_sign_in(&with_code).await.status().as_u16(), 200);
}
