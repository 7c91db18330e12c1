//! Connector bootstrap
//!
//! Turns the onboarding form into a registered, selected account:
//! validate (unless the connector's policy skips it), register, select.
//! Every fault is contained and reported through [`BootstrapOutcome`].

use std::sync::{Mutex, MutexGuard};

use tracing::{error, info, instrument, warn};

use crate::connectors::{ConnectorVariant, Registry, VariantPolicy};
use crate::error::{CallError, FlowError};
use crate::flow::form::FormState;
use crate::flow::notice::Notice;
use crate::models::{AccountDraft, AccountId, SelectAccountParams, ValidationResult};
use crate::service::AccountService;
use crate::telemetry::{TraceContext, with_trace_context};

/// Where the screen goes next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Post-connection verification screen
    TestConnection,
    /// Previous entry in the navigation history
    Back,
}

impl Route {
    /// Router path, `None` for history navigation.
    pub fn path(&self) -> Option<&'static str> {
        match self {
            Route::TestConnection => Some("/test-connection"),
            Route::Back => None,
        }
    }
}

/// Result of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// Account registered and selected
    Connected { account_id: AccountId },
    /// The service rejected the credentials; nothing was registered
    Invalid { reason: String },
    /// Registration returned no account id
    Unregistered,
    /// A call failed
    Fault { detail: Option<String> },
}

impl BootstrapOutcome {
    pub fn is_connected(&self) -> bool {
        matches!(self, BootstrapOutcome::Connected { .. })
    }

    pub fn next_route(&self) -> Option<Route> {
        match self {
            BootstrapOutcome::Connected { .. } => Some(Route::TestConnection),
            _ => None,
        }
    }
}

/// Controller for the "connect your node" onboarding screen.
pub struct ConnectorBootstrap<S> {
    service: S,
    registry: Registry,
    profile_name: String,
    form: Mutex<FormState>,
}

impl<S: AccountService> ConnectorBootstrap<S> {
    pub fn new<N: Into<String>>(service: S, profile_name: N) -> Self {
        Self::with_registry(service, profile_name, Registry::global().clone())
    }

    pub fn with_registry<N: Into<String>>(service: S, profile_name: N, registry: Registry) -> Self {
        Self {
            service,
            registry,
            profile_name: profile_name.into(),
            form: Mutex::new(FormState::new()),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    fn form(&self) -> MutexGuard<'_, FormState> {
        self.form.lock().unwrap_or_else(|poison| poison.into_inner())
    }

    /// Snapshot of the current form.
    pub fn state(&self) -> FormState {
        self.form().clone()
    }

    pub fn set_url(&self, raw: &str) {
        self.form().set_url(raw);
    }

    pub fn set_macaroon(&self, raw: &str) {
        self.form().set_macaroon(raw);
    }

    pub fn can_submit(&self) -> bool {
        self.form().can_submit()
    }

    pub fn is_busy(&self) -> bool {
        self.form().is_busy()
    }

    pub fn connector(&self) -> ConnectorVariant {
        self.form().connector()
    }

    pub fn policy(&self) -> VariantPolicy {
        self.registry.policy_or_standard(self.connector())
    }

    /// Whether the companion app notice should be shown for the current url.
    pub fn shows_companion_notice(&self) -> bool {
        self.policy().companion_notice
    }

    /// Draft a submission would send right now.
    pub fn draft(&self) -> AccountDraft {
        self.form().draft(&self.profile_name)
    }

    pub fn notice(&self, outcome: &BootstrapOutcome) -> Option<Notice> {
        Notice::for_outcome(outcome, &self.profile_name)
    }

    pub fn back(&self) -> Route {
        Route::Back
    }

    /// Run one submission. Refused without any call while the form is incomplete or a
    /// previous submission is still in flight.
    pub async fn submit(&self) -> Result<BootstrapOutcome, FlowError> {
        let draft = {
            let mut form = self.form();
            form.begin_submit()?;
            form.draft(&self.profile_name)
        };
        let _busy = scopeguard::guard((), |_| self.form().end_submit());

        let context = TraceContext::generate();
        let trace_id = context.trace_id.clone();
        let outcome = with_trace_context(context, self.run(draft, trace_id)).await;
        Ok(outcome)
    }

    #[instrument(skip_all, fields(trace_id = %trace_id, connector = %draft.connector))]
    async fn run(&self, draft: AccountDraft, trace_id: String) -> BootstrapOutcome {
        let policy = self.registry.policy_or_standard(draft.connector);
        match self.register(&draft, &policy).await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(
                    error = %err,
                    retryable = err.is_retryable(),
                    details = ?err,
                    "account bootstrap failed"
                );
                BootstrapOutcome::Fault {
                    detail: err.detail(),
                }
            }
        }
    }

    async fn register(
        &self,
        draft: &AccountDraft,
        policy: &VariantPolicy,
    ) -> Result<BootstrapOutcome, CallError> {
        info!(
            tor_routed = policy.tor_routed,
            skip_validation = policy.skip_validation,
            "registering account"
        );
        let validation = if policy.skip_validation {
            info!("skipping validation; account is validated on first use");
            ValidationResult::skipped()
        } else {
            self.service.validate_account(draft).await?
        };

        if !validation.valid {
            warn!(reason = %validation.error, "account service rejected credentials");
            return Ok(BootstrapOutcome::Invalid {
                reason: validation.error,
            });
        }

        let registration = self.service.add_account(draft).await?;
        let Some(account_id) = registration.account_id else {
            warn!("addAccount returned no account id");
            return Ok(BootstrapOutcome::Unregistered);
        };

        self.service
            .select_account(&SelectAccountParams {
                id: account_id.clone(),
            })
            .await?;

        info!(%account_id, "account registered and selected");
        Ok(BootstrapOutcome::Connected { account_id })
    }
}
