//! HTTP client module for the remote sign-on service.
//!
//! This module provides the `SignOnClient` for calling the login and
//! logout endpoints of a configured provider. Endpoint selection lives in
//! the provider registry; this module only speaks the wire protocol.

pub mod client;

pub use client::SignOnClient;
