//! Test utilities for exercising the bootstrap flow without a real account service.

use std::sync::Mutex;

use async_trait::async_trait;
use onboard::error::CallError;
use onboard::models::{
    AccountDraft, AccountId, AccountRegistrationResult, SelectAccountParams, ValidationResult,
};
use onboard::service::AccountService;
use tokio::sync::Notify;

/// A call received by [`ScriptedService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Validate(AccountDraft),
    Add(AccountDraft),
    Select(SelectAccountParams),
}

/// Holds `validate_account` until released.
#[derive(Default)]
pub struct Gate {
    pub entered: Notify,
    pub release: Notify,
}

/// Account service replying with canned results and recording every call.
pub struct ScriptedService {
    validation: Result<ValidationResult, CallError>,
    registration: Result<AccountRegistrationResult, CallError>,
    selection: Result<(), CallError>,
    gate: Option<Gate>,
    calls: Mutex<Vec<RecordedCall>>,
}

#[allow(dead_code)]
impl ScriptedService {
    /// Accepts any credentials and registers them under `account_id`.
    pub fn accepting(account_id: &str) -> Self {
        Self {
            validation: Ok(ValidationResult {
                valid: true,
                error: String::new(),
            }),
            registration: Ok(AccountRegistrationResult {
                account_id: Some(AccountId::from(account_id)),
            }),
            selection: Ok(()),
            gate: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_validation(mut self, validation: Result<ValidationResult, CallError>) -> Self {
        self.validation = validation;
        self
    }

    pub fn with_registration(
        mut self,
        registration: Result<AccountRegistrationResult, CallError>,
    ) -> Self {
        self.registration = registration;
        self
    }

    pub fn with_selection(mut self, selection: Result<(), CallError>) -> Self {
        self.selection = selection;
        self
    }

    pub fn gated(mut self) -> Self {
        self.gate = Some(Gate::default());
        self
    }

    pub fn gate(&self) -> &Gate {
        self.gate.as_ref().expect("service was not gated")
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn validate_count(&self) -> usize {
        self.count(|call| matches!(call, RecordedCall::Validate(_)))
    }

    pub fn add_count(&self) -> usize {
        self.count(|call| matches!(call, RecordedCall::Add(_)))
    }

    pub fn select_count(&self) -> usize {
        self.count(|call| matches!(call, RecordedCall::Select(_)))
    }

    fn count(&self, predicate: impl Fn(&RecordedCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| predicate(c)).count()
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl AccountService for ScriptedService {
    async fn validate_account(
        &self,
        account: &AccountDraft,
    ) -> Result<ValidationResult, CallError> {
        self.record(RecordedCall::Validate(account.clone()));
        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        self.validation.clone()
    }

    async fn add_account(
        &self,
        account: &AccountDraft,
    ) -> Result<AccountRegistrationResult, CallError> {
        self.record(RecordedCall::Add(account.clone()));
        self.registration.clone()
    }

    async fn select_account(&self, params: &SelectAccountParams) -> Result<(), CallError> {
        self.record(RecordedCall::Select(params.clone()));
        self.selection.clone()
    }
}
