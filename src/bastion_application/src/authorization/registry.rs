use std::{collections::HashMap, sync::Arc};

use bastion_core::{PolicyHandler, PolicyKind};

use super::{
    PolicyRegistryError,
    handlers::{EmailDomainPolicyHandler, PermissionPolicyHandler, RolePolicyHandler},
};

/// Maps each policy kind to its single handler. Built once at start-up.
#[derive(Clone, Default)]
pub struct PolicyHandlerRegistry {
    handlers: HashMap<PolicyKind, Arc<dyn PolicyHandler>>,
}

impl PolicyHandlerRegistry {
    /// Registering two handlers for the same kind is rejected.
    pub fn new(handlers: Vec<Arc<dyn PolicyHandler>>) -> Result<Self, PolicyRegistryError> {
        let mut registry = Self::default();
        for handler in handlers {
            registry.register(handler)?;
        }
        Ok(registry)
    }

    /// Registry holding the role, permission and e-mail domain handlers.
    pub fn with_default_handlers() -> Self {
        let mut handlers: HashMap<PolicyKind, Arc<dyn PolicyHandler>> = HashMap::new();
        handlers.insert(PolicyKind::Role, Arc::new(RolePolicyHandler));
        handlers.insert(PolicyKind::Permission, Arc::new(PermissionPolicyHandler));
        handlers.insert(PolicyKind::EmailDomain, Arc::new(EmailDomainPolicyHandler));
        Self { handlers }
    }

    pub fn register(&mut self, handler: Arc<dyn PolicyHandler>) -> Result<(), PolicyRegistryError> {
        let kind = handler.kind();
        if self.handlers.contains_key(&kind) {
            return Err(PolicyRegistryError::DuplicateHandler(kind));
        }
        self.handlers.insert(kind, handler);
        Ok(())
    }

    pub fn get(&self, kind: PolicyKind) -> Option<&Arc<dyn PolicyHandler>> {
        self.handlers.get(&kind)
    }

    pub fn contains(&self, kind: PolicyKind) -> bool {
        self.handlers.contains_key(&kind)
    }
}
