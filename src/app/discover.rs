use crate::adapters::{FileSessionStore, HttpTenantSource, MemorySessionStore};
use crate::cache::{MemoryTenantCache, SessionTenantCache, SystemClock};
use crate::core::pipeline::DiscoveryPipeline;
use crate::core::sort::{filter_tenants_by_search, sort_tenants};
use crate::core::tenant_url::TenantUrlBuilder;
use crate::domain::model::{ShowcaseTenant, SortOption};
use crate::domain::ports::{ConfigProvider, SessionStore, TenantCache, TenantSource};
use crate::utils::error::Result;

/// What the discover page asks for.
#[derive(Debug, Clone)]
pub struct DiscoverQuery {
    pub category: Option<String>,
    pub sort: SortOption,
    pub search: Option<String>,
    /// Read and write the session tier. The memory tier is always used.
    pub use_cache: bool,
}

impl Default for DiscoverQuery {
    fn default() -> Self {
        Self {
            category: None,
            sort: SortOption::default(),
            search: None,
            use_cache: true,
        }
    }
}

/// Composition root for discovery: session tier in front of the pipeline,
/// then search and sort on the way out.
pub struct DiscoverService<S: TenantSource, M: TenantCache, P: TenantCache> {
    pipeline: DiscoveryPipeline<S, M>,
    session: P,
    max_tenants: usize,
    max_tenants_category: usize,
}

pub type HttpDiscoverService = DiscoverService<
    HttpTenantSource,
    MemoryTenantCache<SystemClock>,
    SessionTenantCache<Box<dyn SessionStore>, SystemClock>,
>;

impl HttpDiscoverService {
    /// Wires the HTTP source, the memory tier and a file-backed session tier.
    pub fn from_config<C: ConfigProvider>(config: &C, session_dir: &str) -> Result<Self> {
        Self::with_session_store(config, Box::new(FileSessionStore::new(session_dir)))
    }

    /// Same wiring, but the session tier only lives as long as the process.
    pub fn in_memory<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::with_session_store(config, Box::new(MemorySessionStore::new()))
    }

    pub fn with_session_store<C: ConfigProvider>(
        config: &C,
        store: Box<dyn SessionStore>,
    ) -> Result<Self> {
        let source = HttpTenantSource::from_config(config)?;
        let ttl = config.cache_duration_ms();

        let pipeline = DiscoveryPipeline::new(
            source,
            MemoryTenantCache::new(SystemClock, ttl),
            TenantUrlBuilder::new(config.tenant_url_template()),
        );
        let session = SessionTenantCache::new(store, SystemClock, ttl);

        Ok(DiscoverService::new(
            pipeline,
            session,
            config.max_tenants(),
            config.max_tenants_category(),
        ))
    }
}

impl<S: TenantSource, M: TenantCache, P: TenantCache> DiscoverService<S, M, P> {
    pub fn new(
        pipeline: DiscoveryPipeline<S, M>,
        session: P,
        max_tenants: usize,
        max_tenants_category: usize,
    ) -> Self {
        Self {
            pipeline,
            session,
            max_tenants,
            max_tenants_category,
        }
    }

    pub fn pipeline(&self) -> &DiscoveryPipeline<S, M> {
        &self.pipeline
    }

    pub fn session(&self) -> &P {
        &self.session
    }

    /// The unfiltered or category listing, before search and sort.
    pub async fn load_tenants(
        &self,
        category: Option<&str>,
        use_cache: bool,
    ) -> Result<Vec<ShowcaseTenant>> {
        if let Some(category) = category {
            return self
                .pipeline
                .fetch_all_tenants(self.max_tenants_category, Some(category))
                .await;
        }

        if use_cache {
            if let Some(cached) = self.session.get() {
                tracing::info!("📦 Serving {} tenants from session cache", cached.len());
                return Ok(cached);
            }
        }

        let tenants = self.pipeline.fetch_all_tenants(self.max_tenants, None).await?;
        if use_cache {
            self.session.set(tenants.clone());
        }
        Ok(tenants)
    }

    pub async fn discover(&self, query: &DiscoverQuery) -> Result<Vec<ShowcaseTenant>> {
        let tenants = self
            .load_tenants(query.category.as_deref(), query.use_cache)
            .await?;

        let found = filter_tenants_by_search(&tenants, query.search.as_deref().unwrap_or_default());
        Ok(sort_tenants(&found, query.sort))
    }

    /// Drops both tiers so the next call hits the API.
    pub fn clear_caches(&self) {
        self.pipeline.cache().clear();
        self.session.clear();
        tracing::debug!("Discover caches cleared");
    }
}
