use crate::helpers::{PASSWORD, TestApp, error_message, get_random_email};

#[tokio::test]
async fn should_return_201_if_valid_input() {
    let app = TestApp::new().await;

    let response = app
        .post_sign_up(&serde_json::json!({ "email": get_random_email(), "password": PASSWORD }))
        .await;

    assert_eq!(response.status().as_u16(), 201);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["id"].as_i64().is_some());
}

#[tokio::test]
async fn should_return_400_if_invalid_input() {
    let app = TestApp::new().await;

    let test_cases = [
        serde_json::json!({ "email": "", "password": PASSWORD }),
        serde_json::json!({ "email": "not-an-email", "password": PASSWORD }),
        serde_json::json!({ "email": get_random_email(), "password": "" }),
    ];

    for test_case in test_cases.iter() {
        let response = app.post_sign_up(test_case).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "Failed for input: {:?}",
            test_case
        );
    }
}

#[tokio::test]
async fn should_return_409_if_email_already_exists() {
    let app = TestApp::new().await;
    let body = serde_json::json!({ "email": get_random_email(), "password": PASSWORD });

    assert_eq!(app.post_sign_up(&body).await.status().as_u16(), 201);
    let response = app.post_sign_up(&body).await;

    assert_eq!(response.status().as_u16(), 409);
    assert_eq!(error_message(response).await, "User already exists");
}

#[tokio::test]
async fn should_return_422_if_malformed_input() {
    let app = TestApp::new().await;

    let test_cases = [
        serde_json::json!({ "password": PASSWORD }),
        serde_json::json!({ "email": get_random_email() }),
        serde_json::json!({ "email": true, "password": PASSWORD }),
    ];

    for test_case in test_cases.iter() {
        let response = app.post_sign_up(test_case).await;
        assert_eq!(
            response.status().as_u16(),
            422,
            "Failed for input: {:?}",
            test_case
        );
    }
}
