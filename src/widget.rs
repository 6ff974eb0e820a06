//! Widget instances and shared-context resolution.
//!
//! A `UserWidget` is either authoritative (owns the session) or delegating
//! (shares the session of the outermost widget in its context). The role
//! is resolved exactly once at construction and never changes.

use std::sync::Arc;

use anyhow::Result;

use crate::auth::{AuthorityHandler, Handler, Session};
use crate::config::{DisplayTexts, WidgetConfig};
use crate::error::SignOnError;
use crate::provider::ProviderRegistry;

/// Host-side render boundary.
///
/// After a session transition the authority asks `is_mounted` and requests
/// a re-render only for a widget that is live in the display tree. The
/// render itself is the host's concern.
pub trait RenderSurface: Send + Sync {
    fn is_mounted(&self) -> bool;
    fn request_render(&self);
}

/// One login/logout widget instance.
pub struct UserWidget {
    handler: Handler,
    parent: Option<Arc<UserWidget>>,
    texts: DisplayTexts,
}

impl UserWidget {
    /// Build a widget, resolving its authority exactly once.
    ///
    /// In context mode with a parent the widget adopts the authority of
    /// the outermost ancestor. Otherwise it becomes its own authority,
    /// which requires a `sign_on` id resolvable in the registry. The
    /// provider id is consumed here and cannot be read back from the
    /// widget.
    pub fn new(
        mut config: WidgetConfig,
        registry: &ProviderRegistry,
        parent: Option<Arc<UserWidget>>,
    ) -> Result<Arc<Self>> {
        // Privatize the provider id before anything else can observe it.
        let sign_on = config.sign_on.take();

        let handler = match (&parent, config.context) {
            (Some(parent), true) => Handler::Delegating(resolve_authority(parent)?),
            _ => {
                let id = sign_on.ok_or(SignOnError::MissingProvider)?;
                let provider = registry
                    .get(&id)
                    .ok_or_else(|| SignOnError::UnknownProvider(id.clone()))?
                    .clone();
                Handler::Authority(Arc::new(AuthorityHandler::new(provider)?))
            }
        };

        Ok(Arc::new(Self {
            handler,
            parent,
            texts: config.texts,
        }))
    }

    pub async fn login(&self) -> Result<Session> {
        self.handler.login().await
    }

    pub async fn logout(&self) -> Result<()> {
        self.handler.logout().await
    }

    pub fn is_logged_in(&self) -> bool {
        self.handler.is_logged_in()
    }

    pub fn session(&self) -> Option<Session> {
        self.handler.session()
    }

    pub fn add_observer(&self, observer: impl Fn(bool) + Send + Sync + 'static) {
        self.handler.add_observer(observer);
    }

    /// Install the host's render boundary on this widget's authority.
    pub fn attach_surface(&self, surface: Arc<dyn RenderSurface>) {
        self.handler.authority().attach_surface(surface);
    }

    /// Display strings for the host renderer.
    pub fn texts(&self) -> &DisplayTexts {
        &self.texts
    }

    /// True when this widget owns its session rather than delegating.
    pub fn is_authority(&self) -> bool {
        self.handler.is_authority()
    }

    /// The resolved handler, authoritative or delegating.
    pub fn handler(&self) -> &Handler {
        &self.handler
    }
}

/// Walk to the outermost widget of the context and return its authority.
///
/// Parent links are immutable `Arc`s fixed at construction, so a genuine
/// cycle cannot currently be built; the visited check keeps the walk from
/// spinning should the topology ever become mutable.
fn resolve_authority(start: &Arc<UserWidget>) -> Result<Arc<AuthorityHandler>> {
    let mut visited: Vec<*const UserWidget> = Vec::new();
    let mut current = Arc::clone(start);

    loop {
        let ptr = Arc::as_ptr(&current);
        if visited.contains(&ptr) {
            return Err(SignOnError::ContextCycle.into());
        }
        visited.push(ptr);

        match current.parent.clone() {
            Some(parent) => current = parent,
            None => return Ok(Arc::clone(current.handler.authority())),
        }
    }
}
