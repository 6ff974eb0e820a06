//! Sign-on provider registry.
//!
//! Maps a provider identifier to the endpoint pair and realm used for the
//! remote login and logout calls. The dispatch is an open lookup table:
//! the two built-in providers cover the demo and production sign-on
//! services, and hosts may register additional providers without touching
//! any dispatch logic.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Realm shared by both built-in providers.
pub const DEFAULT_REALM: &str = "hbrsinfkaul";

/// Built-in demo provider id.
pub const DEMO_PROVIDER: &str = "demo";

/// Built-in production provider id.
pub const PRODUCTION_PROVIDER: &str = "hbrsinfkaul";

const DEMO_LOGIN_URL: &str = "https://kaul.inf.h-brs.de/login/demo_login.php";
const DEMO_LOGOUT_URL: &str = "https://logout@kaul.inf.h-brs.de/login/demo_logout.php";
const PRODUCTION_LOGIN_URL: &str = "https://kaul.inf.h-brs.de/login/login.php";
const PRODUCTION_LOGOUT_URL: &str = "https://logout@kaul.inf.h-brs.de/login/logout.php";

/// Which login response field supplies the display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NameSource {
    /// Copy the `user` field. The demo service has no separate name field.
    Username,
    /// Take the `name` field.
    DisplayName,
}

/// Endpoint pair and realm for one sign-on provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    pub login_url: String,
    pub logout_url: String,
    pub realm: String,
    pub name_source: NameSource,
}

/// Lookup table from provider identifier to provider definition.
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    providers: HashMap<String, Provider>,
}

impl ProviderRegistry {
    /// Registry without any providers.
    pub fn empty() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Registry preloaded with the demo and production providers.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(Provider {
            id: DEMO_PROVIDER.to_string(),
            login_url: DEMO_LOGIN_URL.to_string(),
            logout_url: DEMO_LOGOUT_URL.to_string(),
            realm: DEFAULT_REALM.to_string(),
            name_source: NameSource::Username,
        });
        registry.register(Provider {
            id: PRODUCTION_PROVIDER.to_string(),
            login_url: PRODUCTION_LOGIN_URL.to_string(),
            logout_url: PRODUCTION_LOGOUT_URL.to_string(),
            realm: DEFAULT_REALM.to_string(),
            name_source: NameSource::DisplayName,
        });
        registry
    }

    /// Register a provider, replacing any previous definition with the same id.
    pub fn register(&mut self, provider: Provider) {
        self.providers.insert(provider.id.clone(), provider);
    }

    pub fn get(&self, id: &str) -> Option<&Provider> {
        self.providers.get(id)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
