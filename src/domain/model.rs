use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// One row of the sitemap listing. Only lives for a single fetch cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantSitemapItem {
    pub slug: String,
}

/// A page of `/sitemap/tenants/paginated`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SitemapPage {
    #[serde(default)]
    pub tenants: Vec<TenantSitemapItem>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default, rename = "totalPages")]
    pub total_pages: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TenantCount {
    #[serde(default)]
    pub products: Option<u64>,
}

/// Tenant record as returned by `/tenants/by-slug/{slug}`.
///
/// The backend owns this schema. Fields this crate does not read are kept in
/// `extra` so the record survives a trip through the session cache intact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TenantDetail {
    #[serde(
        default,
        deserialize_with = "deserialize_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default)]
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, rename = "_count", skip_serializing_if = "Option::is_none")]
    pub count: Option<TenantCount>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl TenantDetail {
    /// A record without a non-empty id is treated as missing.
    pub fn has_id(&self) -> bool {
        self.id.as_deref().is_some_and(|id| !id.is_empty())
    }

    pub fn product_count(&self) -> u64 {
        self.count.as_ref().and_then(|c| c.products).unwrap_or(0)
    }
}

// ids are strings today, but older API builds sent integers
fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// A tenant ready for the discover listing: the record plus its storefront URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowcaseTenant {
    #[serde(flatten)]
    pub tenant: TenantDetail,
    pub url: String,
}

impl ShowcaseTenant {
    pub fn new(tenant: TenantDetail, url: String) -> Self {
        Self { tenant, url }
    }

    pub fn id(&self) -> &str {
        self.tenant.id.as_deref().unwrap_or_default()
    }

    pub fn slug(&self) -> &str {
        &self.tenant.slug
    }

    pub fn name(&self) -> &str {
        self.tenant.name.as_deref().unwrap_or_default()
    }

    pub fn description(&self) -> &str {
        self.tenant.description.as_deref().unwrap_or_default()
    }

    pub fn category(&self) -> Option<&str> {
        self.tenant.category.as_deref()
    }

    pub fn product_count(&self) -> u64 {
        self.tenant.product_count()
    }
}

/// Timestamped cache envelope. `timestamp` is epoch milliseconds.
///
/// Serialised as `{ "tenants": [...], "timestamp": ... }`, the shape the
/// session store has always held.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    #[serde(rename = "tenants")]
    pub data: Vec<ShowcaseTenant>,
    pub timestamp: i64,
}

impl CacheEntry {
    pub fn new(data: Vec<ShowcaseTenant>, timestamp: i64) -> Self {
        Self { data, timestamp }
    }

    /// Valid while `now - timestamp <= ttl_ms`. An age that does not fit in
    /// an i64 means a nonsense timestamp and is never valid.
    pub fn is_valid(&self, now: i64, ttl_ms: i64) -> bool {
        now.checked_sub(self.timestamp)
            .is_some_and(|age| age <= ttl_ms)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    NameAsc,
    NameDesc,
    #[default]
    Popular,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NameAsc => "name_asc",
            Self::NameDesc => "name_desc",
            Self::Popular => "popular",
        }
    }
}

/// Unrecognised modes fall back to `Popular`.
impl FromStr for SortOption {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "name_asc" => Self::NameAsc,
            "name_desc" => Self::NameDesc,
            _ => Self::Popular,
        })
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
