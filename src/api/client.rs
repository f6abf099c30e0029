//! HTTP client for the form service
//!
//! Two endpoints: `POST /create-user` with a JSON identity record and
//! `GET /get-form?rollNumber=...` returning the schema document.

use super::traits::FormApiTrait;
use crate::config::TuiConfig;
use crate::state::UserRegistration;
use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;

/// Optional `message` carried by every service response
#[derive(Debug, Default, Deserialize)]
struct MessageBody {
    #[serde(default)]
    message: Option<String>,
}

impl MessageBody {
    /// Service message, or `fallback` when absent or blank
    fn message_or(self, fallback: &str) -> String {
        self.message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }

    async fn read(response: Response) -> Self {
        response.json().await.unwrap_or_default()
    }
}

/// Client for communicating with the form service
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url` with a per-request `timeout`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &TuiConfig) -> Result<Self> {
        Self::new(config.api_base_url(), config.request_timeout())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl FormApiTrait for ApiClient {
    async fn create_user(&mut self, user: &UserRegistration) -> Result<String> {
        let response = self
            .http
            .post(self.url("create-user"))
            .json(user)
            .send()
            .await
            .map_err(|e| anyhow!("Could not reach the form service: {e}"))?;

        let status = response.status();
        let body = MessageBody::read(response).await;
        if !status.is_success() {
            tracing::warn!(%status, "registration refused");
            bail!(body.message_or("Failed to create user"));
        }
        Ok(body.message_or("User created successfully"))
    }

    async fn get_form(&mut self, roll_number: &str) -> Result<serde_json::Value> {
        let response = self
            .http
            .get(self.url("get-form"))
            .query(&[("rollNumber", roll_number)])
            .send()
            .await
            .map_err(|e| anyhow!("Could not reach the form service: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = MessageBody::read(response).await;
            bail!("{} ({status})", body.message_or("Failed to fetch form"));
        }

        response
            .json()
            .await
            .context("Form service returned a body that is not JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = ApiClient::new("http://localhost:8080/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.url("create-user"), "http://localhost:8080/create-user");
        assert_eq!(client.url("/get-form"), "http://localhost:8080/get-form");
    }

    #[test]
    fn test_configured_url_reaches_client() {
        let base = TuiConfig::resolve_base_url(None, Some("http://forms.test/"));
        let client = ApiClient::new(base, Duration::from_secs(1)).unwrap();
        assert_eq!(client.url("get-form"), "http://forms.test/get-form");
    }

    mod message_body {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_service_message_wins() {
            let body: MessageBody = serde_json::from_str(r#"{"message":"Roll taken"}"#).unwrap();
            assert_eq!(body.message_or("Failed to create user"), "Roll taken");
        }

        #[test]
        fn test_fallback_when_missing_or_blank() {
            let body: MessageBody = serde_json::from_str("{}").unwrap();
            assert_eq!(body.message_or("Failed to create user"), "Failed to create user");
            let blank: MessageBody = serde_json::from_str(r#"{"message":" "}"#).unwrap();
            assert_eq!(blank.message_or("fallback"), "fallback");
        }
    }
}
