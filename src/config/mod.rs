#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::cache::CACHE_DURATION_MS;
use crate::core::tenant_url::DEFAULT_TENANT_URL_TEMPLATE;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const API_URL_ENV: &str = "NEXT_PUBLIC_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_MAX_TENANTS: usize = 24;
pub const DEFAULT_MAX_TENANTS_CATEGORY: usize = 50;

/// Resolved discovery settings.
///
/// Built from defaults, then an optional TOML file, then the environment,
/// then CLI flags. Later layers win.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoverConfig {
    pub api_url: String,
    pub max_tenants: usize,
    pub max_tenants_category: usize,
    pub cache_duration_ms: i64,
    pub request_timeout_seconds: u64,
    pub session_dir: String,
    pub tenant_url_template: String,
}

impl Default for DiscoverConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            max_tenants: DEFAULT_MAX_TENANTS,
            max_tenants_category: DEFAULT_MAX_TENANTS_CATEGORY,
            cache_duration_ms: CACHE_DURATION_MS,
            request_timeout_seconds: 10,
            session_dir: "./.fibidy-session".to_string(),
            tenant_url_template: DEFAULT_TENANT_URL_TEMPLATE.to_string(),
        }
    }
}

impl DiscoverConfig {
    /// Defaults, the optional file, then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = path {
            tracing::debug!("Loading configuration from {}", path.display());
            toml_config::TomlConfig::from_file(path)?.apply_to(&mut config);
        }

        Ok(config.with_env_overrides_from(|key| std::env::var(key).ok()))
    }

    pub fn with_env_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            tracing::debug!("{} overrides api_url", API_URL_ENV);
            self.api_url = api_url;
        }
        self
    }
}

impl Validate for DiscoverConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_url", &self.api_url)?;
        validation::validate_positive_number("max_tenants", self.max_tenants, 1)?;
        validation::validate_positive_number("max_tenants_category", self.max_tenants_category, 1)?;
        validation::validate_range("cache_duration_ms", self.cache_duration_ms, 0, i64::MAX)?;
        validation::validate_range("request_timeout_seconds", self.request_timeout_seconds, 1, 300)?;
        validation::validate_path("session_dir", &self.session_dir)?;
        validation::validate_slug_template("tenant_url_template", &self.tenant_url_template)?;
        Ok(())
    }
}

impl ConfigProvider for DiscoverConfig {
    fn api_url(&self) -> &str {
        &self.api_url
    }

    fn max_tenants(&self) -> usize {
        self.max_tenants
    }

    fn max_tenants_category(&self) -> usize {
        self.max_tenants_category
    }

    fn cache_duration_ms(&self) -> i64 {
        self.cache_duration_ms
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    fn tenant_url_template(&self) -> &str {
        &self.tenant_url_template
    }
}
