//! User-facing notices for bootstrap outcomes.

use std::fmt;

use crate::flow::bootstrap::BootstrapOutcome;

/// Blocking notification text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    /// Notice for an outcome, `None` when the outcome needs no user feedback.
    pub fn for_outcome(outcome: &BootstrapOutcome, profile_name: &str) -> Option<Self> {
        let headline = format!("Connection failed. Are your {profile_name} credentials correct?");
        let message = match outcome {
            BootstrapOutcome::Connected { .. } => return None,
            BootstrapOutcome::Invalid { reason } => format!("{headline}\n\n({reason})"),
            BootstrapOutcome::Fault {
                detail: Some(detail),
            } => format!("{headline}\n\n{detail}"),
            BootstrapOutcome::Fault { detail: None } => headline,
            BootstrapOutcome::Unregistered => {
                "Connection failed. The account service did not return an account id.".to_string()
            }
        };
        Some(Self { message })
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccountId;

    #[test]
    fn test_connected_has_no_notice() {
        let outcome = BootstrapOutcome::Connected {
            account_id: AccountId::from("42"),
        };
        assert_eq!(Notice::for_outcome(&outcome, "RaspiBlitz"), None);
    }

    #[test]
    fn test_invalid_notice_carries_reason() {
        let outcome = BootstrapOutcome::Invalid {
            reason: "bad macaroon".to_string(),
        };
        let notice = Notice::for_outcome(&outcome, "RaspiBlitz").unwrap();
        assert_eq!(
            notice.message,
            "Connection failed. Are your RaspiBlitz credentials correct?\n\n(bad macaroon)"
        );
    }

    #[test]
    fn test_fault_notice_appends_detail_when_present() {
        let with_detail = BootstrapOutcome::Fault {
            detail: Some("timeout".to_string()),
        };
        let notice = Notice::for_outcome(&with_detail, "RaspiBlitz").unwrap();
        assert!(notice.to_string().ends_with("\n\ntimeout"));

        let without = BootstrapOutcome::Fault { detail: None };
        let notice = Notice::for_outcome(&without, "Umbrel").unwrap();
        assert_eq!(
            notice.message,
            "Connection failed. Are your Umbrel credentials correct?"
        );
    }

    #[test]
    fn test_unregistered_is_surfaced() {
        let notice = Notice::for_outcome(&BootstrapOutcome::Unregistered, "RaspiBlitz").unwrap();
        assert!(notice.message.contains("did not return an account id"));
    }
}
