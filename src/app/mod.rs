pub mod discover;

pub use discover::{DiscoverQuery, DiscoverService, HttpDiscoverService};
