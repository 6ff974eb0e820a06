//! Login/logout state machine with observer notification.
//!
//! One `AuthorityHandler` owns the real session of a shared UI context.
//! Widgets hold a `Handler`, resolved once at construction to either their
//! own authority or the authority of the outermost widget in their
//! context; the delegating variant forwards every operation verbatim.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::Result;
use tokio::sync::Mutex as AsyncMutex;
use tracing::debug;

use crate::api::SignOnClient;
use crate::provider::Provider;
use crate::widget::RenderSurface;

use super::session::Session;

/// Callback invoked with `true` on login and `false` on logout.
pub type Observer = Arc<dyn Fn(bool) + Send + Sync>;

/// Owns the session, observer list, and render boundary for one
/// shared-context authority.
pub struct AuthorityHandler {
    client: SignOnClient,
    provider: Provider,
    /// Held across the remote call so overlapping login/logout calls
    /// collapse into one outstanding request.
    op_lock: AsyncMutex<()>,
    session: Mutex<Option<Session>>,
    observers: Mutex<Vec<Observer>>,
    surface: Mutex<Option<Arc<dyn RenderSurface>>>,
}

impl AuthorityHandler {
    pub fn new(provider: Provider) -> Result<Self> {
        Ok(Self {
            client: SignOnClient::new()?,
            provider,
            op_lock: AsyncMutex::new(()),
            session: Mutex::new(None),
            observers: Mutex::new(Vec::new()),
            surface: Mutex::new(None),
        })
    }

    /// Log in against the configured provider.
    ///
    /// Already logged in is a no-op that completes immediately with the
    /// current session: no remote call, no notification. A failed remote
    /// call leaves the session absent, notifies nobody, and surfaces the
    /// error to the caller.
    pub async fn login(&self) -> Result<Session> {
        let _guard = self.op_lock.lock().await;

        if let Some(session) = self.current() {
            return Ok(session);
        }

        let session = self.client.login(&self.provider).await?;
        self.store(Some(session.clone()));

        debug!(key = %session.key, "Logged in");
        self.request_render();
        self.notify(true);
        Ok(session)
    }

    /// Log out from the configured provider.
    ///
    /// Already logged out is a no-op that completes immediately. The remote
    /// logout call is fire-and-forget; the local session is cleared either
    /// way.
    pub async fn logout(&self) -> Result<()> {
        let _guard = self.op_lock.lock().await;

        if self.current().is_none() {
            return Ok(());
        }

        self.client.logout(&self.provider).await;
        self.store(None);

        debug!("Logged out");
        self.request_render();
        self.notify(false);
        Ok(())
    }

    /// True iff a session is present and its key is non-empty.
    pub fn is_logged_in(&self) -> bool {
        self.current().map(|s| !s.key.is_empty()).unwrap_or(false)
    }

    /// The current session, if any.
    pub fn session(&self) -> Option<Session> {
        self.current()
    }

    /// Register an observer for future login/logout transitions.
    ///
    /// Observers fire in registration order, once per real transition.
    /// There is no deduplication, no removal, and no immediate invocation
    /// for the already-current state.
    pub fn add_observer(&self, observer: impl Fn(bool) + Send + Sync + 'static) {
        lock(&self.observers).push(Arc::new(observer));
    }

    /// Install the host's render boundary.
    pub fn attach_surface(&self, surface: Arc<dyn RenderSurface>) {
        *lock(&self.surface) = Some(surface);
    }

    fn current(&self) -> Option<Session> {
        lock(&self.session).clone()
    }

    fn store(&self, session: Option<Session>) {
        *lock(&self.session) = session;
    }

    /// Request a re-render only while the widget is live in the display tree.
    fn request_render(&self) {
        let surface = lock(&self.surface).clone();
        if let Some(surface) = surface {
            if surface.is_mounted() {
                surface.request_render();
            }
        }
    }

    /// Notify observers in registration order. The list lock is released
    /// first so a callback may register further observers.
    fn notify(&self, logged_in: bool) {
        let snapshot: Vec<Observer> = lock(&self.observers).clone();
        for observer in snapshot {
            observer(logged_in);
        }
    }
}

// A panicking observer must not wedge the handler.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Authentication handler of one widget, resolved once at construction
/// and immutable thereafter.
#[derive(Clone)]
pub enum Handler {
    /// The widget owns the session.
    Authority(Arc<AuthorityHandler>),
    /// The widget forwards every operation to the authority of its
    /// shared context.
    Delegating(Arc<AuthorityHandler>),
}

impl Handler {
    /// The authority behind this handler, own or shared.
    pub fn authority(&self) -> &Arc<AuthorityHandler> {
        match self {
            Handler::Authority(authority) | Handler::Delegating(authority) => authority,
        }
    }

    pub fn is_authority(&self) -> bool {
        matches!(self, Handler::Authority(_))
    }

    pub async fn login(&self) -> Result<Session> {
        self.authority().login().await
    }

    pub async fn logout(&self) -> Result<()> {
        self.authority().logout().await
    }

    pub fn is_logged_in(&self) -> bool {
        self.authority().is_logged_in()
    }

    pub fn session(&self) -> Option<Session> {
        self.authority().session()
    }

    pub fn add_observer(&self, observer: impl Fn(bool) + Send + Sync + 'static) {
        self.authority().add_observer(observer);
    }
}
