use async_trait::async_trait;
use bastion_core::{ActiveUserData, Policy, PolicyDenied, PolicyHandler, PolicyKind};

fn mismatched(expected: PolicyKind, policy: &Policy) -> PolicyDenied {
    tracing::error!(%expected, received = %policy.kind(), "Policy dispatched to the wrong handler");
    PolicyDenied::new("Policy could not be evaluated")
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RolePolicyHandler;

#[async_trait]
impl PolicyHandler for RolePolicyHandler {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Role
    }

    async fn handle(&self, policy: &Policy, user: &ActiveUserData) -> Result<(), PolicyDenied> {
        let Policy::Role(required) = policy else {
            return Err(mismatched(self.kind(), policy));
        };
        if user.role == *required {
            Ok(())
        } else {
            Err(PolicyDenied::new(format!("Role `{required}` is required")))
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionPolicyHandler;

#[async_trait]
impl PolicyHandler for PermissionPolicyHandler {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Permission
    }

    async fn handle(&self, policy: &Policy, user: &ActiveUserData) -> Result<(), PolicyDenied> {
        let Policy::Permission(required) = policy else {
            return Err(mismatched(self.kind(), policy));
        };
        if user.permissions.contains(required) {
            Ok(())
        } else {
            Err(PolicyDenied::new(format!(
                "Permission `{required}` is required"
            )))
        }
    }
}

/// Admits principals whose e-mail domain matches, ignoring ASCII case.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailDomainPolicyHandler;

#[async_trait]
impl PolicyHandler for EmailDomainPolicyHandler {
    fn kind(&self) -> PolicyKind {
        PolicyKind::EmailDomain
    }

    async fn handle(&self, policy: &Policy, user: &ActiveUserData) -> Result<(), PolicyDenied> {
        let Policy::EmailDomain(domain) = policy else {
            return Err(mismatched(self.kind(), policy));
        };
        let matches = user
            .email
            .rsplit_once('@')
            .is_some_and(|(_, actual)| actual.eq_ignore_ascii_case(domain));
        if matches {
            Ok(())
        } else {
            Err(PolicyDenied::new(format!(
                "Only users from `{domain}` may perform this operation"
            )))
        }
    }
}
