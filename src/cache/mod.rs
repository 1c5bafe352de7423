//! Two-tier cache for the unfiltered discover listing.
//!
//! Both tiers hold a single `{data, timestamp}` entry and check its age on
//! every read. They are independent: the memory tier dies with the process,
//! the session tier survives it.

pub mod clock;
pub mod memory;
pub mod session;

pub use clock::{ManualClock, SystemClock};
pub use memory::MemoryTenantCache;
pub use session::SessionTenantCache;

/// Five minutes.
pub const CACHE_DURATION_MS: i64 = 300_000;

pub const SESSION_CACHE_KEY: &str = "fibidy_discover_tenants";
