use std::collections::HashMap;

use bastion_core::Policy;

use super::{PolicyHandlerRegistry, PolicyRegistryError};

/// Declares policies per group and per operation.
///
/// An operation-level declaration replaces its group's list entirely, even
/// when it is empty.
#[derive(Debug, Default)]
pub struct OperationTableBuilder {
    groups: HashMap<String, Vec<Policy>>,
    operations: HashMap<(String, String), Vec<Policy>>,
}

impl OperationTableBuilder {
    pub fn group(mut self, group: impl Into<String>, policies: Vec<Policy>) -> Self {
        self.groups.insert(group.into(), policies);
        self
    }

    pub fn operation(
        mut self,
        group: impl Into<String>,
        operation: impl Into<String>,
        policies: Vec<Policy>,
    ) -> Self {
        self.operations
            .insert((group.into(), operation.into()), policies);
        self
    }

    /// Fails if any declared policy kind has no handler in `registry`.
    pub fn build(self, registry: &PolicyHandlerRegistry) -> Result<OperationTable, PolicyRegistryError> {
        let declared = self
            .groups
            .iter()
            .map(|(group, policies)| (group.clone(), policies))
            .chain(
                self.operations
                    .iter()
                    .map(|((group, operation), policies)| (format!("{group}::{operation}"), policies)),
            );

        for (operation, policies) in declared {
            if let Some(policy) = policies.iter().find(|p| !registry.contains(p.kind())) {
                return Err(PolicyRegistryError::MissingHandler {
                    operation,
                    kind: policy.kind(),
                });
            }
        }

        Ok(OperationTable {
            groups: self.groups,
            operations: self.operations,
        })
    }
}

/// Resolved "closest declaration wins" policy lists.
#[derive(Debug, Default)]
pub struct OperationTable {
    groups: HashMap<String, Vec<Policy>>,
    operations: HashMap<(String, String), Vec<Policy>>,
}

impl OperationTable {
    pub fn builder() -> OperationTableBuilder {
        OperationTableBuilder::default()
    }

    /// Policies guarding `operation` within `group`; empty when none are declared.
    pub fn policies_for(&self, group: &str, operation: &str) -> &[Policy] {
        self.operations
            .get(&(group.to_owned(), operation.to_owned()))
            .or_else(|| self.groups.get(group))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
