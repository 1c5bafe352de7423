/// Turns a slug into the public storefront URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantUrlBuilder {
    template: String,
}

pub const DEFAULT_TENANT_URL_TEMPLATE: &str = "https://{slug}.fibidy.com";

impl TenantUrlBuilder {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn build(&self, slug: &str) -> String {
        self.template.replace("{slug}", slug)
    }
}

impl Default for TenantUrlBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_TENANT_URL_TEMPLATE)
    }
}
