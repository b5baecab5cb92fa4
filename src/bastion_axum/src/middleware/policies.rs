use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use bastion_application::PoliciesGuard;
use bastion_core::ActiveUserData;

use crate::error::AuthApiError;

/// Names the operation a route serves so the guard can look up its policies.
#[derive(Clone)]
pub struct PolicyScope {
    pub guard: PoliciesGuard,
    pub group: &'static str,
    pub operation: &'static str,
}

impl PolicyScope {
    pub fn new(guard: PoliciesGuard, group: &'static str, operation: &'static str) -> Self {
        Self {
            guard,
            group,
            operation,
        }
    }
}

/// Runs the operation's policies against the principal attached by
/// [`authenticate`](super::authenticate). Operations without policies pass
/// even when no principal is present.
#[tracing::instrument(name = "Enforce policies", skip_all, fields(group = scope.group, operation = scope.operation))]
pub async fn enforce_policies(
    State(scope): State<PolicyScope>,
    request: Request,
    next: Next,
) -> Result<Response, AuthApiError> {
    let principal = request.extensions().get::<ActiveUserData>();

    scope
        .guard
        .evaluate(scope.group, scope.operation, principal)
        .await?;

    Ok(next.run(request).await)
}
