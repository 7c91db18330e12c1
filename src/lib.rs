//! # Node Onboarding Library
//!
//! Registers a remote Lightning node as a wallet account: normalizes the connection
//! form, infers the connector variant, validates through the background account
//! service when the variant allows it, registers the account and selects it.

pub mod config;
pub mod connectors;
pub mod error;
pub mod flow;
pub mod models;
pub mod service;
pub mod telemetry;
