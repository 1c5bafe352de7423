use crate::config::DiscoverConfig;
use crate::utils::error::{DiscoverError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk layout of `fibidy-discover.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub api: Option<ApiSection>,
    pub discover: Option<DiscoverSection>,
    pub cache: Option<CacheSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiSection {
    pub url: Option<String>,
    pub request_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoverSection {
    pub max_tenants: Option<usize>,
    pub max_tenants_category: Option<usize>,
    pub tenant_url_template: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheSection {
    pub duration_ms: Option<i64>,
    pub session_dir: Option<String>,
}

impl TomlConfig {
    /// Reads and parses a TOML config file, expanding `${VAR}` references.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DiscoverError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DiscoverError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn apply_to(&self, config: &mut DiscoverConfig) {
        if let Some(api) = &self.api {
            if let Some(url) = &api.url {
                config.api_url = url.clone();
            }
            if let Some(timeout) = api.request_timeout_seconds {
                config.request_timeout_seconds = timeout;
            }
        }

        if let Some(discover) = &self.discover {
            if let Some(max) = discover.max_tenants {
                config.max_tenants = max;
            }
            if let Some(max) = discover.max_tenants_category {
                config.max_tenants_category = max;
            }
            if let Some(template) = &discover.tenant_url_template {
                config.tenant_url_template = template.clone();
            }
        }

        if let Some(cache) = &self.cache {
            if let Some(duration) = cache.duration_ms {
                config.cache_duration_ms = duration;
            }
            if let Some(dir) = &cache.session_dir {
                config.session_dir = dir.clone();
            }
        }
    }
}
