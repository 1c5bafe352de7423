pub mod adapters;
pub mod app;
pub mod cache;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::{FileSessionStore, HttpTenantSource, MemorySessionStore};
pub use app::{DiscoverQuery, DiscoverService, HttpDiscoverService};
pub use cache::{ManualClock, MemoryTenantCache, SessionTenantCache, SystemClock};
pub use config::DiscoverConfig;
pub use crate::core::{
    pipeline::DiscoveryPipeline,
    sort::{filter_tenants_by_search, sort_tenants},
    tenant_url::TenantUrlBuilder,
};
pub use domain::model::{ShowcaseTenant, SitemapPage, SortOption, TenantDetail, TenantSitemapItem};
pub use utils::error::{DiscoverError, Result};
