//! gatekey - client-side sign-on session core.
//!
//! This crate provides the authentication half of a login/logout widget:
//! an async session state machine backed by a remote sign-on provider,
//! observer notifications for login/logout transitions, and shared-context
//! delegation so a tree of widgets shares one logical session.
//!
//! Rendering stays with the host, which plugs in through [`RenderSurface`]
//! and the display texts carried by [`WidgetConfig`].

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod provider;
pub mod widget;

pub use api::SignOnClient;
pub use auth::{AuthorityHandler, Handler, Observer, Session};
pub use config::{DisplayTexts, WidgetConfig};
pub use error::SignOnError;
pub use provider::{
    NameSource, Provider, ProviderRegistry, DEFAULT_REALM, DEMO_PROVIDER, PRODUCTION_PROVIDER,
};
pub use widget::{RenderSurface, UserWidget};
