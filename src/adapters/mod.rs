// Adapters layer: concrete implementations of the domain ports.

pub mod http;
pub mod session_store;

pub use http::HttpTenantSource;
pub use session_store::{FileSessionStore, MemorySessionStore};
