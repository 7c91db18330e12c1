//! Account service traits
//!
//! `Transport` is the opaque `call(method, params)` boundary to the background service.
//! `AccountService` is the typed view of the operations onboarding needs.

use async_trait::async_trait;

use crate::error::CallError;
use crate::models::{AccountDraft, AccountRegistrationResult, SelectAccountParams, ValidationResult};

pub const VALIDATE_ACCOUNT: &str = "validateAccount";
pub const ADD_ACCOUNT: &str = "addAccount";
pub const SELECT_ACCOUNT: &str = "selectAccount";

/// Generic asynchronous call into the background service.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn call(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, CallError>;
}

#[async_trait]
pub trait AccountService: Send + Sync {
    /// Ask the service whether the node accepts these credentials.
    async fn validate_account(&self, account: &AccountDraft)
    -> Result<ValidationResult, CallError>;

    /// Register the account. The service decides whether an id is returned.
    async fn add_account(
        &self,
        account: &AccountDraft,
    ) -> Result<AccountRegistrationResult, CallError>;

    /// Make the given account the active one.
    async fn select_account(&self, params: &SelectAccountParams) -> Result<(), CallError>;
}
