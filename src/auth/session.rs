use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SignOnError;

/// In-memory record of the currently authenticated identity.
///
/// A session either does not exist at all or carries a non-empty `key` and
/// `token`; `Session::new` enforces this. Sessions live only for the
/// lifetime of the owning authority handler and are never written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Opaque unique user identifier.
    pub key: String,
    /// Opaque security token returned by the provider.
    pub token: String,
    /// Display name, if the provider supplies one.
    pub name: Option<String>,
    pub email: Option<String>,
    /// When this session was established locally.
    pub established_at: DateTime<Utc>,
}

impl Session {
    pub fn new(
        key: String,
        token: String,
        name: Option<String>,
        email: Option<String>,
    ) -> Result<Self, SignOnError> {
        if key.is_empty() {
            return Err(SignOnError::InvalidSession(
                "user key must not be empty".to_string(),
            ));
        }
        if token.is_empty() {
            return Err(SignOnError::InvalidSession(
                "security token must not be empty".to_string(),
            ));
        }
        Ok(Self {
            key,
            token,
            name,
            email,
            established_at: Utc::now(),
        })
    }
}
