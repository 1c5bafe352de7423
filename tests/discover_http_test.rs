use fibidy_discover::cache::SESSION_CACHE_KEY;
use fibidy_discover::domain::ports::TenantCache;
use fibidy_discover::{DiscoverConfig, DiscoverError, DiscoverQuery, HttpDiscoverService, SortOption};
use httpmock::prelude::*;
use std::time::Duration;
use tempfile::TempDir;

fn config_for(server: &MockServer, session_dir: &TempDir) -> DiscoverConfig {
    DiscoverConfig {
        api_url: server.url("/api"),
        request_timeout_seconds: 1,
        session_dir: session_dir.path().to_str().unwrap().to_string(),
        ..Default::default()
    }
}

fn service_for(config: &DiscoverConfig) -> HttpDiscoverService {
    HttpDiscoverService::from_config(config, &config.session_dir).unwrap()
}

fn sitemap_body(slugs: &[&str]) -> serde_json::Value {
    let tenants: Vec<_> = slugs.iter().map(|s| serde_json::json!({ "slug": s })).collect();
    serde_json::json!({
        "tenants": tenants,
        "total": slugs.len(),
        "page": 1,
        "limit": 24,
        "totalPages": 1
    })
}

fn tenant_body(slug: &str, name: &str, category: &str, products: u64) -> serde_json::Value {
    serde_json::json!({
        "id": format!("tn_{}", slug),
        "slug": slug,
        "name": name,
        "description": format!("{} description", name),
        "category": category,
        "_count": { "products": products }
    })
}

#[tokio::test]
async fn test_end_to_end_with_one_missing_tenant() {
    let server = MockServer::start();
    let dir = TempDir::new().unwrap();

    let sitemap = server.mock(|when, then| {
        when.method(GET)
            .path("/api/sitemap/tenants/paginated")
            .query_param("page", "1")
            .query_param("limit", "24");
        then.status(200).json_body(sitemap_body(&["a", "b", "c"]));
    });
    let a = server.mock(|when, then| {
        when.method(GET).path("/api/tenants/by-slug/a");
        then.status(200).json_body(tenant_body("a", "Toko A", "FOOD", 3));
    });
    let b = server.mock(|when, then| {
        when.method(GET).path("/api/tenants/by-slug/b");
        then.status(404).json_body(serde_json::json!({ "message": "Tenant not found" }));
    });
    let c = server.mock(|when, then| {
        when.method(GET).path("/api/tenants/by-slug/c");
        then.status(200).json_body(tenant_body("c", "Toko C", "FASHION", 9));
    });

    let config = config_for(&server, &dir);
    let service = service_for(&config);
    let tenants = service.load_tenants(None, true).await.unwrap();

    sitemap.assert();
    a.assert();
    b.assert();
    c.assert();

    assert_eq!(tenants.len(), 2);
    assert_eq!(tenants[0].slug(), "a");
    assert_eq!(tenants[0].url, "https://a.fibidy.com");
    assert_eq!(tenants[1].slug(), "c");
    assert_eq!(tenants[1].url, "https://c.fibidy.com");
}

#[tokio::test]
async fn test_empty_sitemap_makes_no_detail_requests() {
    let server = MockServer::start();
    let dir = TempDir::new().unwrap();

    let sitemap = server.mock(|when, then| {
        when.method(GET).path("/api/sitemap/tenants/paginated");
        then.status(200).json_body(sitemap_body(&[]));
    });
    let details = server.mock(|when, then| {
        when.method(GET).path_contains("/api/tenants/by-slug/");
        then.status(200).json_body(tenant_body("x", "X", "FOOD", 1));
    });

    let service = service_for(&config_for(&server, &dir));
    let tenants = service.load_tenants(None, true).await.unwrap();

    sitemap.assert();
    details.assert_hits(0);
    assert!(tenants.is_empty());
}

#[tokio::test]
async fn test_listing_failure_is_returned() {
    let server = MockServer::start();
    let dir = TempDir::new().unwrap();

    let sitemap = server.mock(|when, then| {
        when.method(GET).path("/api/sitemap/tenants/paginated");
        then.status(500);
    });

    let service = service_for(&config_for(&server, &dir));
    let err = service.discover(&DiscoverQuery::default()).await.unwrap_err();

    sitemap.assert();
    assert!(matches!(err, DiscoverError::ListingFailed { status: 500, .. }));
    assert_eq!(err.user_friendly_message(), "Failed to load stores. Please try again.");
}

#[tokio::test]
async fn test_malformed_sitemap_body_is_a_serialization_error() {
    let server = MockServer::start();
    let dir = TempDir::new().unwrap();

    let sitemap = server.mock(|when, then| {
        when.method(GET).path("/api/sitemap/tenants/paginated");
        then.status(200).body("not json");
    });

    let service = service_for(&config_for(&server, &dir));
    let err = service.load_tenants(None, true).await.unwrap_err();

    sitemap.assert();
    assert!(matches!(err, DiscoverError::Serialization(_)));
    assert!(!dir.path().join(format!("{}.json", SESSION_CACHE_KEY)).exists());
}

#[tokio::test]
async fn test_category_query_does_not_fill_cache() {
    let server = MockServer::start();
    let dir = TempDir::new().unwrap();

    let sitemap = server.mock(|when, then| {
        when.method(GET).path("/api/sitemap/tenants/paginated");
        then.status(200).json_body(sitemap_body(&["a", "b"]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/tenants/by-slug/a");
        then.status(200).json_body(tenant_body("a", "Toko A", "FOOD", 3));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/tenants/by-slug/b");
        then.status(200).json_body(tenant_body("b", "Toko B", "FASHION", 1));
    });

    let service = service_for(&config_for(&server, &dir));

    let food = service.load_tenants(Some("FOOD"), true).await.unwrap();
    assert_eq!(food.len(), 1);
    assert_eq!(food[0].slug(), "a");
    assert!(!dir.path().join(format!("{}.json", SESSION_CACHE_KEY)).exists());

    let all = service.load_tenants(None, true).await.unwrap();
    assert_eq!(all.len(), 2);
    sitemap.assert_hits(2);
}

#[tokio::test]
async fn test_category_query_uses_category_limit() {
    let server = MockServer::start();
    let dir = TempDir::new().unwrap();

    let sitemap = server.mock(|when, then| {
        when.method(GET)
            .path("/api/sitemap/tenants/paginated")
            .query_param("limit", "50");
        then.status(200).json_body(sitemap_body(&[]));
    });

    let service = service_for(&config_for(&server, &dir));
    service.load_tenants(Some("FOOD"), true).await.unwrap();

    sitemap.assert();
}

#[tokio::test]
async fn test_session_cache_is_shared_across_instances() {
    let server = MockServer::start();
    let dir = TempDir::new().unwrap();

    let sitemap = server.mock(|when, then| {
        when.method(GET).path("/api/sitemap/tenants/paginated");
        then.status(200).json_body(sitemap_body(&["a"]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/tenants/by-slug/a");
        then.status(200).json_body(tenant_body("a", "Toko A", "FOOD", 3));
    });

    let config = config_for(&server, &dir);

    let first = service_for(&config).load_tenants(None, true).await.unwrap();
    let second = service_for(&config).load_tenants(None, true).await.unwrap();

    sitemap.assert_hits(1);
    assert_eq!(first, second);

    let raw = std::fs::read_to_string(dir.path().join(format!("{}.json", SESSION_CACHE_KEY))).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["tenants"][0]["url"], "https://a.fibidy.com");
    assert_eq!(json["tenants"][0]["_count"]["products"], 3);
    assert!(json["timestamp"].is_i64());
}

#[tokio::test]
async fn test_in_memory_session_tier_writes_nothing_to_disk() {
    let server = MockServer::start();
    let dir = TempDir::new().unwrap();

    let sitemap = server.mock(|when, then| {
        when.method(GET).path("/api/sitemap/tenants/paginated");
        then.status(200).json_body(sitemap_body(&["a"]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/tenants/by-slug/a");
        then.status(200).json_body(tenant_body("a", "Toko A", "FOOD", 3));
    });

    let config = config_for(&server, &dir);
    let service = HttpDiscoverService::in_memory(&config).unwrap();
    service.load_tenants(None, true).await.unwrap();

    sitemap.assert();
    assert_eq!(service.session().get().unwrap().len(), 1);
    assert!(!dir.path().join(format!("{}.json", SESSION_CACHE_KEY)).exists());

    // a second in-memory instance starts cold
    let other = HttpDiscoverService::in_memory(&config).unwrap();
    assert!(other.session().get().is_none());
}

#[tokio::test]
async fn test_corrupt_session_file_falls_back_to_api() {
    let server = MockServer::start();
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(format!("{}.json", SESSION_CACHE_KEY)), "{{broken").unwrap();

    let sitemap = server.mock(|when, then| {
        when.method(GET).path("/api/sitemap/tenants/paginated");
        then.status(200).json_body(sitemap_body(&["a"]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/tenants/by-slug/a");
        then.status(200).json_body(tenant_body("a", "Toko A", "FOOD", 3));
    });

    let service = service_for(&config_for(&server, &dir));
    let tenants = service.load_tenants(None, true).await.unwrap();

    sitemap.assert();
    assert_eq!(tenants.len(), 1);
}

#[tokio::test]
async fn test_hanging_tenant_is_dropped_after_timeout() {
    let server = MockServer::start();
    let dir = TempDir::new().unwrap();

    server.mock(|when, then| {
        when.method(GET).path("/api/sitemap/tenants/paginated");
        then.status(200).json_body(sitemap_body(&["fast", "slow"]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/tenants/by-slug/fast");
        then.status(200).json_body(tenant_body("fast", "Fast", "FOOD", 1));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/tenants/by-slug/slow");
        then.status(200)
            .delay(Duration::from_secs(3))
            .json_body(tenant_body("slow", "Slow", "FOOD", 1));
    });

    let service = service_for(&config_for(&server, &dir));
    let tenants = service.load_tenants(None, false).await.unwrap();

    assert_eq!(tenants.len(), 1);
    assert_eq!(tenants[0].slug(), "fast");
}

#[tokio::test]
async fn test_discover_sorts_and_searches() {
    let server = MockServer::start();
    let dir = TempDir::new().unwrap();

    server.mock(|when, then| {
        when.method(GET).path("/api/sitemap/tenants/paginated");
        then.status(200).json_body(sitemap_body(&["w", "k", "b"]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/tenants/by-slug/w");
        then.status(200).json_body(tenant_body("w", "Warung Makan", "FOOD", 5));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/tenants/by-slug/k");
        then.status(200).json_body(tenant_body("k", "Kopi Kenangan", "FOOD", 30));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/tenants/by-slug/b");
        then.status(200).json_body(tenant_body("b", "Butik Ayu", "FASHION", 12));
    });

    let service = service_for(&config_for(&server, &dir));

    let popular = service.discover(&DiscoverQuery::default()).await.unwrap();
    let names: Vec<&str> = popular.iter().map(|t| t.name()).collect();
    assert_eq!(names, vec!["Kopi Kenangan", "Butik Ayu", "Warung Makan"]);

    let query = DiscoverQuery {
        search: Some("warung".to_string()),
        sort: SortOption::NameAsc,
        ..Default::default()
    };
    let found = service.discover(&query).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name(), "Warung Makan");
}
