//! HTTP client for the remote sign-on endpoints.
//!
//! This module provides the `SignOnClient` for issuing the login and
//! logout calls of a configured provider. Both calls carry a `realm`
//! query parameter matching the provider's realm.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::auth::Session;
use crate::error::SignOnError;
use crate::provider::{NameSource, Provider};

/// HTTP request timeout in seconds.
/// Bounds calls that would otherwise never resolve their completion.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Login response payload shared by all providers.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    user: String,
    token: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

/// Client for the remote sign-on service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Debug, Clone)]
pub struct SignOnClient {
    client: Client,
}

impl SignOnClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self { client })
    }

    /// Log in against the provider's login endpoint and map the response
    /// into a validated session. A failed call populates nothing.
    pub async fn login(&self, provider: &Provider) -> Result<Session> {
        let response = self
            .client
            .get(&provider.login_url)
            .query(&[("realm", provider.realm.as_str())])
            .send()
            .await
            .context("Failed to send login request")?;

        let response = Self::check_response(response).await?;

        let payload: LoginResponse = response
            .json()
            .await
            .context("Failed to parse login response")?;

        debug!(user = %payload.user, provider = %provider.id, "Login response received");

        let name = match provider.name_source {
            NameSource::Username => Some(payload.user.clone()),
            NameSource::DisplayName => payload.name,
        };

        let session = Session::new(payload.user, payload.token, name, payload.email)?;
        Ok(session)
    }

    /// Fire the provider's logout endpoint. The response body is ignored
    /// and failures are only logged; logout is a local state transition
    /// with a courtesy notification to the server.
    pub async fn logout(&self, provider: &Provider) {
        let result = self
            .client
            .get(&provider.logout_url)
            .query(&[("realm", provider.realm.as_str())])
            .send()
            .await;

        match result {
            Ok(response) if !response.status().is_success() => {
                warn!(status = %response.status(), provider = %provider.id, "Logout request rejected");
            }
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, provider = %provider.id, "Logout request failed");
            }
        }
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(SignOnError::from_status(status, &body).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::DEFAULT_REALM;
    use httpmock::prelude::*;
    use httpmock::MockServer;

    fn test_provider(server: &MockServer, name_source: NameSource) -> Provider {
        Provider {
            id: "test".to_string(),
            login_url: server.url("/login"),
            logout_url: server.url("/logout"),
            realm: DEFAULT_REALM.to_string(),
            name_source,
        }
    }

    #[tokio::test]
    async fn test_login_maps_production_response() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/login")
                .query_param("realm", DEFAULT_REALM);
            then.status(200).json_body(serde_json::json!({
                "user": "alice",
                "token": "t1",
                "name": "Alice A",
                "email": "a@x.com"
            }));
        });

        let client = SignOnClient::new()?;
        let provider = test_provider(&server, NameSource::DisplayName);
        let session = client.login(&provider).await?;

        mock.assert();
        assert_eq!(session.key, "alice");
        assert_eq!(session.token, "t1");
        assert_eq!(session.name.as_deref(), Some("Alice A"));
        assert_eq!(session.email.as_deref(), Some("a@x.com"));
        Ok(())
    }

    #[tokio::test]
    async fn test_login_demo_name_comes_from_user_field() -> Result<()> {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/login");
            then.status(200).json_body(serde_json::json!({
                "user": "demo_user",
                "token": "t2"
            }));
        });

        let client = SignOnClient::new()?;
        let provider = test_provider(&server, NameSource::Username);
        let session = client.login(&provider).await?;

        assert_eq!(session.name.as_deref(), Some("demo_user"));
        assert!(session.email.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_login_unauthorized_is_classified() -> Result<()> {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/login");
            then.status(401);
        });

        let client = SignOnClient::new()?;
        let provider = test_provider(&server, NameSource::DisplayName);
        let err = client
            .login(&provider)
            .await
            .expect_err("unauthorized login should fail");

        assert!(matches!(
            err.downcast_ref::<SignOnError>(),
            Some(SignOnError::Unauthorized)
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_login_rejects_empty_token() -> Result<()> {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/login");
            then.status(200).json_body(serde_json::json!({
                "user": "alice",
                "token": ""
            }));
        });

        let client = SignOnClient::new()?;
        let provider = test_provider(&server, NameSource::DisplayName);
        let err = client
            .login(&provider)
            .await
            .expect_err("empty token should be rejected");

        assert!(matches!(
            err.downcast_ref::<SignOnError>(),
            Some(SignOnError::InvalidSession(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_login_malformed_payload_fails() -> Result<()> {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/login");
            then.status(200).body("not json");
        });

        let client = SignOnClient::new()?;
        let provider = test_provider(&server, NameSource::DisplayName);
        assert!(client.login(&provider).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_logout_ignores_server_failure() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/logout")
                .query_param("realm", DEFAULT_REALM);
            then.status(500);
        });

        let client = SignOnClient::new()?;
        let provider = test_provider(&server, NameSource::DisplayName);
        client.logout(&provider).await;

        mock.assert();
        Ok(())
    }
}
