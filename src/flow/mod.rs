//! Onboarding flow: form state, the bootstrap controller and outcome notices.

pub mod bootstrap;
pub mod form;
pub mod notice;

pub use bootstrap::{BootstrapOutcome, ConnectorBootstrap, Route};
pub use form::FormState;
pub use notice::Notice;
