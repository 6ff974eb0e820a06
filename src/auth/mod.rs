//! Authentication module: session record and the login/logout state machine.
//!
//! This module provides:
//! - `Session`: the in-memory authenticated identity
//! - `AuthorityHandler`: owns the session, observers, and render boundary
//! - `Handler`: per-widget dispatch, authoritative or delegating
//!
//! Sessions are memory-only and vanish with their authority handler.

pub mod handler;
pub mod session;

pub use handler::{AuthorityHandler, Handler, Observer};
pub use session::Session;
