//! Configuration handling for the intake client

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:8080/api/";
const DEFAULT_CREATE_LISTING_PATH: &str = "condominium/create-condominium";
const DEFAULT_UPLOAD_PATH: &str = "images/create";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User configuration, as stored in `config.json`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IntakeConfig {
    /// Base URL of the listing API
    pub api_base_url: Option<String>,
    /// Bearer token sent with every request
    pub api_token: Option<String>,
    /// Path of the create-listing endpoint, relative to the base URL
    pub create_listing_path: Option<String>,
    /// Path of the document upload endpoint, relative to the base URL
    pub upload_path: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl IntakeConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "rentyard", "rentyard-intake")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: IntakeConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Settings with defaults filled in and `RENTYARD_API_URL` /
    /// `RENTYARD_API_TOKEN` taking precedence over the file
    pub fn api_settings(&self) -> ApiSettings {
        self.api_settings_with(|key| std::env::var(key).ok())
    }

    fn api_settings_with(&self, env: impl Fn(&str) -> Option<String>) -> ApiSettings {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        let mut base_url = non_empty(env("RENTYARD_API_URL"))
            .or_else(|| non_empty(self.api_base_url.clone()))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        ApiSettings {
            base_url,
            token: non_empty(env("RENTYARD_API_TOKEN")).or_else(|| non_empty(self.api_token.clone())),
            create_listing_path: self
                .create_listing_path
                .clone()
                .unwrap_or_else(|| DEFAULT_CREATE_LISTING_PATH.to_string()),
            upload_path: self
                .upload_path
                .clone()
                .unwrap_or_else(|| DEFAULT_UPLOAD_PATH.to_string()),
            timeout: Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        }
    }
}

/// Resolved connection settings for the listing API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    /// Always ends with `/`
    pub base_url: String,
    pub token: Option<String>,
    pub create_listing_path: String,
    pub upload_path: String,
    pub timeout: Duration,
}
