pub mod pipeline;
pub mod sort;
pub mod tenant_url;

pub use crate::domain::model::{ShowcaseTenant, SortOption, TenantDetail};
pub use crate::domain::ports::{TenantCache, TenantSource};
pub use crate::utils::error::Result;
