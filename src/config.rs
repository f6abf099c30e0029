//! Configuration handling for the TUI

use crate::state::SubmitPolicy;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Form service used when nothing else is configured
pub const DEFAULT_API_URL: &str = "https://dynamic-form-generator-9rl7.onrender.com";
/// Environment variable overriding the form service URL
pub const API_URL_ENV: &str = "DYNFORM_API_URL";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Form service base URL
    pub api_base_url: Option<String>,
    /// Request timeout for the form service, in seconds
    pub request_timeout_secs: Option<u64>,
    /// Which sections are validated on submit
    pub submit_validation: Option<SubmitPolicy>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "dynform", "dynform-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                let content = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let config: TuiConfig = serde_json::from_str(&content)
                    .with_context(|| format!("Invalid config file {}", path.display()))?;
                tracing::debug!(path = %path.display(), "loaded config");
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Base URL of the form service, without a trailing slash.
    ///
    /// `DYNFORM_API_URL` wins over the config file.
    pub fn api_base_url(&self) -> String {
        Self::resolve_base_url(std::env::var(API_URL_ENV).ok(), self.api_base_url.as_deref())
    }

    pub(crate) fn resolve_base_url(env: Option<String>, configured: Option<&str>) -> String {
        let url = env
            .filter(|v| !v.trim().is_empty())
            .or_else(|| configured.map(str::to_string))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        url.trim().trim_end_matches('/').to_string()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .filter(|s| *s > 0)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        )
    }

    pub fn submit_policy(&self) -> SubmitPolicy {
        self.submit_validation.unwrap_or_default()
    }
}
