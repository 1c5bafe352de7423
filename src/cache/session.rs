use crate::domain::model::{CacheEntry, ShowcaseTenant};
use crate::domain::ports::{Clock, SessionStore, TenantCache};

/// Persisted tier of the discover cache.
///
/// Holds one JSON envelope under a fixed key. Storage trouble of any kind
/// degrades to a miss on read and is ignored on write.
pub struct SessionTenantCache<S: SessionStore, K: Clock> {
    store: S,
    clock: K,
    ttl_ms: i64,
    key: String,
}

impl<S: SessionStore, K: Clock> SessionTenantCache<S, K> {
    pub fn new(store: S, clock: K, ttl_ms: i64) -> Self {
        Self {
            store,
            clock,
            ttl_ms,
            key: super::SESSION_CACHE_KEY.to_string(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn read_entry(&self) -> Option<CacheEntry> {
        let raw = match self.store.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Session cache unavailable, treating as miss: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<CacheEntry>(&raw) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Session cache entry is corrupt, ignoring: {}", e);
                None
            }
        }
    }
}

impl<S: SessionStore, K: Clock> TenantCache for SessionTenantCache<S, K> {
    fn get(&self) -> Option<Vec<ShowcaseTenant>> {
        let entry = self.read_entry()?;

        if !entry.is_valid(self.clock.now_millis(), self.ttl_ms) {
            tracing::debug!("Session cache entry expired, removing");
            if let Err(e) = self.store.remove_item(&self.key) {
                tracing::warn!("Failed to remove expired session cache entry: {}", e);
            }
            return None;
        }

        tracing::debug!("Session cache HIT ({} tenants)", entry.data.len());
        Some(entry.data)
    }

    fn set(&self, data: Vec<ShowcaseTenant>) {
        let entry = CacheEntry::new(data, self.clock.now_millis());
        let raw = match serde_json::to_string(&entry) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to serialise session cache entry: {}", e);
                return;
            }
        };

        if let Err(e) = self.store.set_item(&self.key, &raw) {
            tracing::warn!("Failed to write session cache, continuing without it: {}", e);
        }
    }

    fn clear(&self) {
        if let Err(e) = self.store.remove_item(&self.key) {
            tracing::warn!("Failed to clear session cache: {}", e);
        }
    }
}
