use crate::core::tenant_url::TenantUrlBuilder;
use crate::domain::model::{ShowcaseTenant, TenantDetail};
use crate::domain::ports::{TenantCache, TenantSource};
use crate::utils::error::Result;
use futures_util::future::join_all;

/// Sitemap → per-slug details → merge/filter, with the memory tier in front.
pub struct DiscoveryPipeline<S: TenantSource, C: TenantCache> {
    source: S,
    cache: C,
    urls: TenantUrlBuilder,
}

impl<S: TenantSource, C: TenantCache> DiscoveryPipeline<S, C> {
    pub fn new(source: S, cache: C, urls: TenantUrlBuilder) -> Self {
        Self {
            source,
            cache,
            urls,
        }
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetches up to `limit` tenants, optionally narrowed to one category.
    ///
    /// Only the unfiltered listing is read from or written to the cache, so a
    /// category query can never stand in for the full set.
    pub async fn fetch_all_tenants(
        &self,
        limit: usize,
        category_filter: Option<&str>,
    ) -> Result<Vec<ShowcaseTenant>> {
        if category_filter.is_none() {
            if let Some(cached) = self.cache.get() {
                tracing::info!("📦 Serving {} tenants from memory cache", cached.len());
                return Ok(cached);
            }
        }

        let sitemap = self.source.fetch_sitemap(1, limit).await?;
        if sitemap.tenants.is_empty() {
            tracing::info!("Sitemap is empty, nothing to fetch");
            return Ok(Vec::new());
        }

        tracing::info!("🚀 Fetching {} tenant records", sitemap.tenants.len());

        // all lookups in flight at once; join_all keeps slug order
        let details = join_all(
            sitemap
                .tenants
                .iter()
                .map(|item| self.source.fetch_tenant_by_slug(&item.slug)),
        )
        .await;

        let requested = details.len();
        let mut tenants: Vec<ShowcaseTenant> = sitemap
            .tenants
            .iter()
            .zip(details)
            .filter_map(|(item, detail)| detail.map(|d| (item, d)))
            .filter(|(_, detail)| detail.has_id())
            .map(|(item, detail)| self.to_showcase(&item.slug, detail))
            .collect();

        let missing = requested - tenants.len();
        if missing > 0 {
            tracing::debug!("Dropped {} of {} tenants that failed to load", missing, requested);
        }

        match category_filter {
            Some(category) => {
                tenants.retain(|t| t.category() == Some(category));
                tracing::info!("📊 {} tenants in category '{}'", tenants.len(), category);
            }
            None => {
                self.cache.set(tenants.clone());
                tracing::info!("📊 Loaded {} tenants", tenants.len());
            }
        }

        Ok(tenants)
    }

    fn to_showcase(&self, sitemap_slug: &str, mut detail: TenantDetail) -> ShowcaseTenant {
        if detail.slug.is_empty() {
            detail.slug = sitemap_slug.to_string();
        }
        let url = self.urls.build(&detail.slug);
        ShowcaseTenant::new(detail, url)
    }
}
