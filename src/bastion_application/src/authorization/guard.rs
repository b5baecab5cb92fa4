use std::sync::Arc;

use bastion_core::{ActiveUserData, Policy};
use futures::future::try_join_all;

use super::{AuthorizationError, OperationTable, PolicyHandlerRegistry};

/// Evaluates the policies declared for an operation against the principal
/// passed in explicitly by the caller.
///
/// Operations without declared policies are allowed, authenticated or not.
#[derive(Clone)]
pub struct PoliciesGuard {
    registry: Arc<PolicyHandlerRegistry>,
    table: Arc<OperationTable>,
}

impl PoliciesGuard {
    pub fn new(registry: Arc<PolicyHandlerRegistry>, table: Arc<OperationTable>) -> Self {
        Self { registry, table }
    }

    pub fn table(&self) -> &OperationTable {
        &self.table
    }

    #[tracing::instrument(name = "PoliciesGuard::evaluate", skip(self, principal))]
    pub async fn evaluate(
        &self,
        group: &str,
        operation: &str,
        principal: Option<&ActiveUserData>,
    ) -> Result<(), AuthorizationError> {
        self.evaluate_policies(self.table.policies_for(group, operation), principal)
            .await
    }

    /// All policies are dispatched concurrently; the first denial wins and
    /// its message becomes [`AuthorizationError::Forbidden`].
    pub async fn evaluate_policies(
        &self,
        policies: &[Policy],
        principal: Option<&ActiveUserData>,
    ) -> Result<(), AuthorizationError> {
        if policies.is_empty() {
            return Ok(());
        }
        let principal = principal.ok_or(AuthorizationError::MissingPrincipal)?;

        let checks = policies
            .iter()
            .map(|policy| {
                let kind = policy.kind();
                self.registry
                    .get(kind)
                    .map(|handler| handler.handle(policy, principal))
                    .ok_or(AuthorizationError::UnregisteredPolicy(kind))
            })
            .collect::<Result<Vec<_>, _>>()?;

        try_join_all(checks).await.map_err(|denied| {
            tracing::info!(user_id = %principal.sub, reason = %denied, "Policy denied");
            AuthorizationError::Forbidden(denied.0)
        })?;

        Ok(())
    }
}
