//! Connector policy types
//!
//! Per-variant onboarding behavior.

use serde::{Deserialize, Serialize};

use crate::connectors::ConnectorVariant;

/// How onboarding treats accounts of a given connector variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantPolicy {
    /// Variant this policy applies to
    pub variant: ConnectorVariant,
    /// Register without asking the account service to validate first
    pub skip_validation: bool,
    /// Connections are routed through Tor
    pub tor_routed: bool,
    /// Show the companion app download notice while the form targets this variant
    pub companion_notice: bool,
}

impl VariantPolicy {
    /// Validate before registering; plain clearnet connection.
    pub fn standard(variant: ConnectorVariant) -> Self {
        Self {
            variant,
            skip_validation: false,
            tor_routed: false,
            companion_notice: false,
        }
    }

    /// Tor routed through the companion app. Circuit bootstrap makes validation during
    /// onboarding too slow, so these accounts are validated on first use instead.
    pub fn tor(variant: ConnectorVariant) -> Self {
        Self {
            variant,
            skip_validation: true,
            tor_routed: true,
            companion_notice: true,
        }
    }
}
