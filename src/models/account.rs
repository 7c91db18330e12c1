//! Account payloads exchanged with the account service.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::connectors::ConnectorVariant;

const SECURE_SCHEME: &str = "https://";
const SCHEME_MARKER: &str = "http";

/// Trim user input and make sure it carries an explicit scheme.
///
/// Blank input stays blank so an empty field keeps the submit control disabled.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.starts_with(SCHEME_MARKER) {
        trimmed.to_string()
    } else {
        format!("{SECURE_SCHEME}{trimmed}")
    }
}

/// Macaroons are passed through as typed, minus surrounding whitespace.
pub fn normalize_macaroon(raw: &str) -> String {
    raw.trim().to_string()
}

/// Connector credentials for a remote node.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountConfig {
    pub url: String,
    pub macaroon: String,
}

impl AccountConfig {
    pub fn new(url: &str, macaroon: &str) -> Self {
        Self {
            url: normalize_url(url),
            macaroon: normalize_macaroon(macaroon),
        }
    }
}

impl fmt::Debug for AccountConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountConfig")
            .field("url", &self.url)
            .field("macaroon", &"[REDACTED]")
            .finish()
    }
}

/// Unpersisted account data collected during onboarding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountDraft {
    pub name: String,
    pub config: AccountConfig,
    pub connector: ConnectorVariant,
}

/// Reply of `validateAccount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(default)]
    pub error: String,
}

impl ValidationResult {
    /// Result used when a connector variant is not validated during onboarding.
    pub fn skipped() -> Self {
        Self {
            valid: true,
            error: String::new(),
        }
    }
}

/// Identifier the account service assigns to a registered account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Reply of `addAccount`. A missing id means nothing was registered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRegistrationResult {
    #[serde(
        rename = "accountId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub account_id: Option<AccountId>,
}

/// Parameters of `selectAccount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectAccountParams {
    pub id: AccountId,
}
