//! Connector policy registry
//!
//! Lookup table from connector variant to its onboarding policy.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::connectors::{ConnectorVariant, VariantPolicy};

/// Error type for registry operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("No policy registered for connector '{variant}'")]
    PolicyNotFound { variant: ConnectorVariant },
}

/// Global registry seeded with the built-in policies
static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Registry of per-variant policies
#[derive(Debug, Clone)]
pub struct Registry {
    policies: HashMap<ConnectorVariant, VariantPolicy>,
}

impl Registry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            policies: HashMap::new(),
        }
    }

    /// Registry holding the built-in policy for every variant
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(VariantPolicy::standard(ConnectorVariant::Lnd));
        registry.register(VariantPolicy::tor(ConnectorVariant::NativeLnd));
        registry.register(VariantPolicy::standard(ConnectorVariant::LndHub));
        registry.register(VariantPolicy::standard(ConnectorVariant::LnBits));
        registry
    }

    /// Get the global registry instance
    pub fn global() -> &'static Registry {
        REGISTRY.get_or_init(Self::with_defaults)
    }

    /// Register or replace the policy for a variant
    pub fn register(&mut self, policy: VariantPolicy) {
        self.policies.insert(policy.variant, policy);
    }

    /// Get the policy for a variant
    pub fn get(&self, variant: ConnectorVariant) -> Result<&VariantPolicy, RegistryError> {
        self.policies
            .get(&variant)
            .ok_or(RegistryError::PolicyNotFound { variant })
    }

    /// Policy for a variant, falling back to validate-before-register when none is set
    pub fn policy_or_standard(&self, variant: ConnectorVariant) -> VariantPolicy {
        match self.get(variant) {
            Ok(policy) => policy.clone(),
            Err(err) => {
                tracing::warn!(%variant, "{err}; validating before registration");
                VariantPolicy::standard(variant)
            }
        }
    }

    /// All policies, sorted by variant for stable ordering
    pub fn list(&self) -> Vec<VariantPolicy> {
        let mut policies: Vec<_> = self.policies.values().cloned().collect();
        policies.sort_by_key(|policy| policy.variant);
        policies
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
