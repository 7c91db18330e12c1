//! Account service boundary
//!
//! The background service that owns account records is reached through a generic
//! call interface. This module defines that boundary, the typed operations built on
//! it, and an HTTP transport.

pub mod http;
pub mod rpc;
pub mod trait_;

pub use http::{HttpTransport, TRACE_ID_HEADER, TransportInitError};
pub use rpc::RpcAccountService;
pub use trait_::{ADD_ACCOUNT, AccountService, SELECT_ACCOUNT, Transport, VALIDATE_ACCOUNT};
