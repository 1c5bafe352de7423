use crate::config::DiscoverConfig;
use crate::domain::model::SortOption;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "fibidy-discover")]
#[command(about = "List Fibidy storefronts the way the discover page does")]
pub struct CliArgs {
    #[arg(long, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Fibidy API base URL (overrides NEXT_PUBLIC_API_URL)")]
    pub api_url: Option<String>,

    #[arg(long, help = "Only list tenants in this category")]
    pub category: Option<String>,

    #[arg(long, default_value = "popular", help = "name_asc, name_desc or popular")]
    pub sort: String,

    #[arg(long, help = "Case-insensitive match on name or description")]
    pub search: Option<String>,

    #[arg(long, help = "Maximum tenants to request")]
    pub limit: Option<usize>,

    #[arg(long, help = "Per-request timeout in seconds")]
    pub timeout: Option<u64>,

    #[arg(long, help = "Directory for the persisted session cache")]
    pub session_dir: Option<String>,

    #[arg(long, help = "Skip the session cache for this run")]
    pub no_cache: bool,

    #[arg(long, help = "Keep the session cache in memory instead of on disk")]
    pub no_persist: bool,

    #[arg(long, help = "Clear both caches before fetching")]
    pub clear_cache: bool,

    #[arg(long, help = "Print the listing as JSON")]
    pub json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliArgs {
    pub fn sort_option(&self) -> SortOption {
        // unknown values fall back to popular
        self.sort.parse().unwrap_or_default()
    }

    /// Flags win over every other configuration layer.
    pub fn apply_to(&self, config: &mut DiscoverConfig) {
        if let Some(api_url) = &self.api_url {
            config.api_url = api_url.clone();
        }
        if let Some(limit) = self.limit {
            if self.category.is_some() {
                config.max_tenants_category = limit;
            } else {
                config.max_tenants = limit;
            }
        }
        if let Some(timeout) = self.timeout {
            config.request_timeout_seconds = timeout;
        }
        if let Some(dir) = &self.session_dir {
            config.session_dir = dir.clone();
        }
    }
}
