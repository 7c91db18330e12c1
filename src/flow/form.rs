//! Form state of the onboarding screen.

use crate::connectors::ConnectorVariant;
use crate::error::FlowError;
use crate::models::{AccountConfig, AccountDraft, normalize_macaroon, normalize_url};

/// Draft fields plus the busy flag, changed only through the transitions below.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    url: String,
    macaroon: String,
    busy: bool,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn macaroon(&self) -> &str {
        &self.macaroon
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Stored value is the normalized one; it is also what the field displays.
    pub fn set_url(&mut self, raw: &str) {
        self.url = normalize_url(raw);
    }

    pub fn set_macaroon(&mut self, raw: &str) {
        self.macaroon = normalize_macaroon(raw);
    }

    /// Submit is disabled while either field is empty.
    pub fn can_submit(&self) -> bool {
        !self.url.is_empty() && !self.macaroon.is_empty()
    }

    /// Inferred from the current url on every call.
    pub fn connector(&self) -> ConnectorVariant {
        ConnectorVariant::infer(&self.url)
    }

    pub fn draft(&self, name: &str) -> AccountDraft {
        AccountDraft {
            name: name.to_string(),
            config: AccountConfig {
                url: self.url.clone(),
                macaroon: self.macaroon.clone(),
            },
            connector: self.connector(),
        }
    }

    pub fn begin_submit(&mut self) -> Result<(), FlowError> {
        if !self.can_submit() {
            return Err(FlowError::Incomplete);
        }
        if self.busy {
            return Err(FlowError::Busy);
        }
        self.busy = true;
        Ok(())
    }

    pub fn end_submit(&mut self) {
        self.busy = false;
    }
}
