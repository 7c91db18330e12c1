//! Typed account operations on top of a [`Transport`].

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::CallError;
use crate::models::{AccountDraft, AccountRegistrationResult, SelectAccountParams, ValidationResult};
use crate::service::trait_::{
    ADD_ACCOUNT, AccountService, SELECT_ACCOUNT, Transport, VALIDATE_ACCOUNT,
};

/// Account service reached by method name through any transport.
pub struct RpcAccountService<T> {
    transport: T,
}

impl<T: Transport> RpcAccountService<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn invoke<P, R>(&self, method: &str, params: &P) -> Result<R, CallError>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let params = serde_json::to_value(params)?;
        tracing::debug!(method, "calling account service");
        let value = self.transport.call(method, params).await?;
        serde_json::from_value(value).map_err(|err| {
            CallError::malformed(format!("{method} returned an unexpected payload: {err}"))
        })
    }
}

#[async_trait]
impl<T: Transport> AccountService for RpcAccountService<T> {
    async fn validate_account(
        &self,
        account: &AccountDraft,
    ) -> Result<ValidationResult, CallError> {
        self.invoke(VALIDATE_ACCOUNT, account).await
    }

    async fn add_account(
        &self,
        account: &AccountDraft,
    ) -> Result<AccountRegistrationResult, CallError> {
        // Some services reply with `null` when nothing was stored.
        let value: Option<AccountRegistrationResult> = self.invoke(ADD_ACCOUNT, account).await?;
        Ok(value.unwrap_or_default())
    }

    async fn select_account(&self, params: &SelectAccountParams) -> Result<(), CallError> {
        let params = serde_json::to_value(params)?;
        tracing::debug!(method = SELECT_ACCOUNT, "calling account service");
        self.transport.call(SELECT_ACCOUNT, params).await?;
        Ok(())
    }
}
