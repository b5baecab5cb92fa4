use bastion_application::{OperationTable, PolicyHandlerRegistry};
use bastion_auth_service::{AUTHENTICATION_GROUP, operations};
use bastion_core::{Policy, Role};

use crate::helpers::{PASSWORD, TestApp, error_message, get_random_email};

#[tokio::test]
async fn email_domain_policy_guards_sign_out() {
    let table = OperationTable::builder()
        .operation(
            AUTHENTICATION_GROUP,
            operations::SIGN_OUT,
            vec![Policy::EmailDomain("bastion.dev".to_owned())],
        )
        .build(&PolicyHandlerRegistry::with_default_handlers())
        .unwrap();
    let app = TestApp::with_policies(table).await;

    let (_, outsider) = app.signed_in_user().await;
    let (_, insider) = app
        .signed_in_user_with_email("staff@bastion.dev".to_owned())
        .await;

    let denied = app.post_sign_out(Some(&outsider.access_token)).await;
    assert_eq!(denied.status().as_u16(), 403);
    assert_eq!(
        error_message(denied).await,
        "Only users from `bastion.dev` may perform this operation"
    );

    let allowed = app.post_sign_out(Some(&insider.access_token)).await;
    assert_eq!(allowed.status().as_u16(), 204);
}

#[tokio::test]
async fn operation_declaration_overrides_its_group() {
    let table = OperationTable::builder()
        .group(AUTHENTICATION_GROUP, vec![Policy::Role(Role::Admin)])
        .operation(AUTHENTICATION_GROUP, operations::SIGN_UP, vec![])
        .operation(AUTHENTICATION_GROUP, operations::SIGN_IN, vec![])
        .build(&PolicyHandlerRegistry::with_default_handlers())
        .unwrap();
    let app = TestApp::with_policies(table).await;

    let (_, tokens) = app.signed_in_user().await;

    let response = app.post_tfa_generate(Some(&tokens.access_token)).await;
    assert_eq!(response.status().as_u16(), 403);
    assert_eq!(error_message(response).await, "Role `admin` is required");
}

#[tokio::test]
async fn routes_without_policies_stay_open() {
    let app = TestApp::new().await;

    let response = app
        .post_sign_up(&serde_json::json!({ "email": get_random_email(), "password": PASSWORD }))
        .await;

    assert_eq!(response.status().as_u16(), 201);
}
