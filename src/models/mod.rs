//! Payload types exchanged with the account service.

pub mod account;

pub use account::{
    AccountConfig, AccountDraft, AccountId, AccountRegistrationResult, SelectAccountParams,
    ValidationResult, normalize_macaroon, normalize_url,
};
