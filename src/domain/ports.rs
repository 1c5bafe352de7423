use crate::domain::model::{ShowcaseTenant, SitemapPage, TenantDetail};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Read side of the Fibidy API used by discovery.
#[async_trait]
pub trait TenantSource: Send + Sync {
    /// Lists one page of tenant slugs. A failed listing is an error.
    async fn fetch_sitemap(&self, page: u32, limit: usize) -> Result<SitemapPage>;

    /// Looks up one tenant. Every failure comes back as `None`.
    async fn fetch_tenant_by_slug(&self, slug: &str) -> Option<TenantDetail>;
}

/// Single-slot TTL cache of the unfiltered tenant listing.
pub trait TenantCache: Send + Sync {
    fn get(&self) -> Option<Vec<ShowcaseTenant>>;
    fn set(&self, data: Vec<ShowcaseTenant>);
    fn clear(&self);
}

/// Text key/value store with sessionStorage semantics.
pub trait SessionStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
}

impl<T: SessionStore + ?Sized> SessionStore for Box<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}

/// Epoch-millisecond time source.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

pub trait ConfigProvider: Send + Sync {
    fn api_url(&self) -> &str;
    fn max_tenants(&self) -> usize;
    fn max_tenants_category(&self) -> usize;
    fn cache_duration_ms(&self) -> i64;
    fn request_timeout(&self) -> Duration;
    fn tenant_url_template(&self) -> &str;
}
