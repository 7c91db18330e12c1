//! Connectors module
//!
//! - `ConnectorVariant`, the closed set of connector families, and url based inference
//! - Per-variant onboarding policies and the registry that holds them

pub mod metadata;
pub mod registry;
pub mod variant;

pub use metadata::VariantPolicy;
pub use registry::{Registry, RegistryError};
pub use variant::{ConnectorVariant, is_onion_address};
