use crate::domain::model::{CacheEntry, ShowcaseTenant};
use crate::domain::ports::{Clock, TenantCache};
use std::sync::Mutex;

/// In-process cache holding at most one entry: the unfiltered listing.
pub struct MemoryTenantCache<K: Clock> {
    entry: Mutex<Option<CacheEntry>>,
    clock: K,
    ttl_ms: i64,
}

impl<K: Clock> MemoryTenantCache<K> {
    pub fn new(clock: K, ttl_ms: i64) -> Self {
        Self {
            entry: Mutex::new(None),
            clock,
            ttl_ms,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entry.lock().map(|e| e.is_none()).unwrap_or(true)
    }
}

impl<K: Clock> TenantCache for MemoryTenantCache<K> {
    fn get(&self) -> Option<Vec<ShowcaseTenant>> {
        let mut slot = self.entry.lock().ok()?;
        let now = self.clock.now_millis();

        let valid = slot.as_ref().map(|entry| entry.is_valid(now, self.ttl_ms))?;

        if !valid {
            tracing::debug!("Memory cache entry expired, clearing");
            *slot = None;
            return None;
        }

        let data = slot.as_ref().map(|entry| entry.data.clone());
        if let Some(data) = &data {
            tracing::debug!("Memory cache HIT ({} tenants)", data.len());
        }
        data
    }

    fn set(&self, data: Vec<ShowcaseTenant>) {
        let entry = CacheEntry::new(data, self.clock.now_millis());
        // a poisoned lock still holds a usable slot
        let mut slot = self.entry.lock().unwrap_or_else(|p| p.into_inner());
        *slot = Some(entry);
    }

    fn clear(&self) {
        let mut slot = self.entry.lock().unwrap_or_else(|p| p.into_inner());
        *slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::clock::ManualClock;
    use crate::cache::CACHE_DURATION_MS;
    use crate::domain::model::TenantDetail;
    use std::sync::Arc;

    fn tenant(id: &str) -> ShowcaseTenant {
        ShowcaseTenant::new(
            TenantDetail {
                id: Some(id.to_string()),
                slug: id.to_string(),
                ..Default::default()
            },
            format!("https://{}.fibidy.com", id),
        )
    }

    #[test]
    fn test_get_on_empty_cache() {
        let cache = MemoryTenantCache::new(ManualClock::new(0), CACHE_DURATION_MS);
        assert!(cache.get().is_none());
    }

    #[test]
    fn test_entry_valid_until_ttl_then_cleared() {
        let clock = Arc::new(ManualClock::new(10_000));
        let cache = MemoryTenantCache::new(clock.clone(), CACHE_DURATION_MS);
        cache.set(vec![tenant("a")]);

        clock.set(10_000 + CACHE_DURATION_MS - 1);
        assert_eq!(cache.get().unwrap().len(), 1);

        clock.set(10_000 + CACHE_DURATION_MS + 1);
        assert!(cache.get().is_none());
        assert!(cache.is_empty());

        // stays gone even if the clock goes back
        clock.set(10_000);
        assert!(cache.get().is_none());
    }

    #[test]
    fn test_set_overwrites_and_restarts_ttl() {
        let clock = Arc::new(ManualClock::new(0));
        let cache = MemoryTenantCache::new(clock.clone(), CACHE_DURATION_MS);
        cache.set(vec![tenant("a")]);

        clock.advance(CACHE_DURATION_MS - 10);
        cache.set(vec![tenant("b"), tenant("c")]);

        clock.advance(100);
        let data = cache.get().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0].id(), "b");
    }

    #[test]
    fn test_clear() {
        let cache = MemoryTenantCache::new(ManualClock::new(0), CACHE_DURATION_MS);
        cache.set(vec![tenant("a")]);
        cache.clear();
        assert!(cache.get().is_none());
    }
}
