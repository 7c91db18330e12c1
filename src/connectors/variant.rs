//! Connector variants
//!
//! The closed set of connector families an account can be registered with, and the
//! inference of a variant from a normalized node url.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static ONION_ADDRESS: OnceLock<Regex> = OnceLock::new();

fn onion_address() -> &'static Regex {
    ONION_ADDRESS.get_or_init(|| Regex::new(r"(?i)\.onion").expect("onion pattern is valid"))
}

/// Protocol adapter family used to talk to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorVariant {
    /// LND REST over clearnet
    Lnd,
    /// LND REST routed through Tor by the companion app
    NativeLnd,
    /// LndHub accounts
    LndHub,
    /// LNbits wallets
    LnBits,
}

impl ConnectorVariant {
    pub const ALL: [ConnectorVariant; 4] = [
        ConnectorVariant::Lnd,
        ConnectorVariant::NativeLnd,
        ConnectorVariant::LndHub,
        ConnectorVariant::LnBits,
    ];

    /// Infer the variant for a node url. Hidden-service addresses need the native
    /// (Tor routed) connector; everything else uses plain LND.
    pub fn infer(url: &str) -> Self {
        if is_onion_address(url) {
            ConnectorVariant::NativeLnd
        } else {
            ConnectorVariant::Lnd
        }
    }

    /// Wire tag understood by the account service.
    pub fn tag(&self) -> &'static str {
        match self {
            ConnectorVariant::Lnd => "lnd",
            ConnectorVariant::NativeLnd => "nativelnd",
            ConnectorVariant::LndHub => "lndhub",
            ConnectorVariant::LnBits => "lnbits",
        }
    }
}

impl fmt::Display for ConnectorVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Whether the url points at a Tor hidden service.
pub fn is_onion_address(url: &str) -> bool {
    onion_address().is_match(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_onion_urls_infer_native() {
        for url in [
            "https://mynode.onion:8080",
            "https://MYNODE.ONION:8080",
            "http://abc.Onion",
            "https://x.onion.example",
        ] {
            assert_eq!(ConnectorVariant::infer(url), ConnectorVariant::NativeLnd, "{url}");
        }
    }

    #[test]
    fn test_clearnet_urls_infer_lnd() {
        for url in [
            "https://10.0.0.2:8080",
            "https://mynode.local",
            "https://onion.example.com",
            "",
        ] {
            assert_eq!(ConnectorVariant::infer(url), ConnectorVariant::Lnd, "{url}");
        }
    }

    #[test]
    fn test_tags_match_serde() {
        for variant in ConnectorVariant::ALL {
            let value = serde_json::to_value(variant).unwrap();
            assert_eq!(value, serde_json::Value::String(variant.tag().to_string()));
            let parsed: ConnectorVariant = serde_json::from_value(value).unwrap();
            assert_eq!(parsed, variant);
        }
    }
}
