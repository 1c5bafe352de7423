use crate::domain::model::{SitemapPage, TenantDetail};
use crate::domain::ports::{ConfigProvider, TenantSource};
use crate::utils::error::{DiscoverError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// `TenantSource` backed by the Fibidy REST API.
///
/// Every request carries `timeout`, so a hanging tenant lookup ends as a
/// missing tenant instead of stalling the whole batch.
#[derive(Debug, Clone)]
pub struct HttpTenantSource {
    client: Client,
    api_url: Url,
}

impl HttpTenantSource {
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self> {
        let api_url = Url::parse(api_url)?;
        if api_url.cannot_be_a_base() {
            return Err(DiscoverError::InvalidConfigValueError {
                field: "api_url".to_string(),
                value: api_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, api_url })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Self::new(config.api_url(), config.request_timeout())
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| DiscoverError::ConfigError {
                    message: format!("api_url cannot be a base: {}", self.api_url),
                })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }
}

#[async_trait]
impl TenantSource for HttpTenantSource {
    async fn fetch_sitemap(&self, page: u32, limit: usize) -> Result<SitemapPage> {
        let url = self.endpoint(&["sitemap", "tenants", "paginated"])?;
        tracing::debug!("Fetching sitemap page {} (limit {}) from {}", page, limit, url);

        let response = self
            .client
            .get(url.clone())
            .query(&[("page", page.to_string()), ("limit", limit.to_string())])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Sitemap response status: {}", status);

        if !status.is_success() {
            return Err(DiscoverError::ListingFailed {
                endpoint: url.to_string(),
                status: status.as_u16(),
            });
        }

        // a malformed 2xx body is a Serialization error, not an Http one
        let body = response.text().await?;
        let sitemap: SitemapPage = serde_json::from_str(&body)?;
        tracing::debug!(
            "Sitemap returned {} slugs (total: {:?}, pages: {:?})",
            sitemap.tenants.len(),
            sitemap.total,
            sitemap.total_pages
        );
        Ok(sitemap)
    }

    async fn fetch_tenant_by_slug(&self, slug: &str) -> Option<TenantDetail> {
        let url = match self.endpoint(&["tenants", "by-slug", slug]) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Cannot build tenant URL for '{}': {}", slug, e);
                return None;
            }
        };

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                tracing::warn!("Tenant '{}' timed out, skipping", slug);
                return None;
            }
            Err(e) => {
                tracing::warn!("Tenant '{}' request failed: {}", slug, e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!("Tenant '{}' not available: HTTP {}", slug, response.status());
            return None;
        }

        match response.json::<TenantDetail>().await {
            Ok(detail) => Some(detail),
            Err(e) => {
                tracing::warn!("Tenant '{}' returned an unreadable body: {}", slug, e);
                None
            }
        }
    }
}
