use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::json;

use shopadvisor_ai::{GenerationError, GenerationOptions, TextGenerator};
use shopadvisor_api::app::services::{self, AppServices};
use shopadvisor_core::{AffiliateLinkBuilder, CapabilityError, Product, ProductFilter, sample_products};
use shopadvisor_infra::{AppConfig, DocumentStore, InMemoryDocumentStore, ServiceMode, StoreError};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(services: AppServices) -> Self {
        shopadvisor_observability::init_pretty();

        // Same router as prod, bound to an ephemeral port.
        let app = shopadvisor_api::app::build_app(Arc::new(services));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn stub() -> Self {
        Self::spawn(services::build_services(&AppConfig::stub())).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// -------------------------
// Fakes
// -------------------------

#[derive(Default)]
struct FakeText {
    init_calls: AtomicUsize,
    init_error: Option<CapabilityError>,
    generate_error: Option<GenerationError>,
}

#[async_trait]
impl TextGenerator for FakeText {
    fn name(&self) -> &'static str {
        "fake-text"
    }

    async fn initialize(&self) -> Result<(), CapabilityError> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(std::time::Duration::from_millis(30)).await;
        match &self.init_error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    async fn generate(&self, _prompt: &str, _options: &GenerationOptions) -> Result<String, GenerationError> {
        match &self.generate_error {
            Some(e) => Err(e.clone()),
            None => Ok("Generated advice: pick the first one.".to_string()),
        }
    }
}

#[derive(Default)]
struct FakeStore {
    connect_calls: AtomicUsize,
    connect_error: Option<CapabilityError>,
    panic_on_find: bool,
}

#[async_trait]
impl DocumentStore for FakeStore {
    fn name(&self) -> &'static str {
        "fake-store"
    }

    async fn connect(&self) -> Result<(), CapabilityError> {
        self.connect_calls.fetch_add(1, Ordering::SeqCst);
        match &self.connect_error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(1)
    }

    async fn find(&self, _filter: &ProductFilter, _limit: usize) -> Result<Vec<Product>, StoreError> {
        if self.panic_on_find {
            panic!("store driver bug");
        }
        Ok(vec![Product {
            id: "db-1".to_string(),
            name: "HP 15s Ryzen 5".to_string(),
            brand: "HP".to_string(),
            category: "laptop".to_string(),
            price: 42_490,
            rating: 4.2,
            features: vec![],
            retailer: "flipkart".to_string(),
        }])
    }
}

fn services_with(text: Arc<dyn TextGenerator>, store: Arc<dyn DocumentStore>) -> AppServices {
    AppServices::new(text, store, AffiliateLinkBuilder::new("test-21"), 5, ServiceMode::Live)
}

async fn post_advise(srv: &TestServer, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let res = reqwest::Client::new()
        .post(format!("{}/api/advise", srv.base_url))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = res.status();
    (status, res.json().await.unwrap())
}

fn product_names(body: &serde_json::Value) -> Vec<String> {
    body["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect()
}

// -------------------------
// Tests
// -------------------------

#[tokio::test]
async fn health_reports_pending_until_first_request() {
    let srv = TestServer::stub().await;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/health", srv.base_url)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["services"]["api"], "ready");
    assert_eq!(body["services"]["ai"], "pending");
    assert_eq!(body["services"]["database"], "pending");
    assert_eq!(body["mode"], "stub");

    let (status, _) = post_advise(&srv, json!({"query": "phone under 20000"})).await;
    assert_eq!(status, StatusCode::OK);

    let body: serde_json::Value = client
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["services"]["ai"], "ready");
    assert_eq!(body["services"]["database"], "ready");
}

#[tokio::test]
async fn laptop_under_50000_with_both_services_ready() {
    let srv = TestServer::stub().await;

    let (status, body) = post_advise(
        &srv,
        json!({"query": "laptop under 50000", "userId": "user-42", "language": "en"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let products = body["products"].as_array().unwrap();
    assert!(products.len() <= 5);
    assert!(products.iter().all(|p| p["price"].as_u64().unwrap() <= 50_000));
    assert!(products.iter().all(|p| p["affiliateLink"]["url"].as_str().unwrap().contains("shopadvisor-21")));
    assert!(!body["advice"].as_str().unwrap().is_empty());
    assert_eq!(body["metadata"]["userId"], "user-42");
    assert_eq!(body["metadata"]["productSource"], "database");
    assert_eq!(body["metadata"]["adviceSource"], "ai");
}

#[tokio::test]
async fn both_capabilities_failing_still_answers_with_sample() {
    let text = Arc::new(FakeText {
        init_error: Some(CapabilityError::credential_missing("GEMINI_API_KEY is not set")),
        ..FakeText::default()
    });
    let store = Arc::new(FakeStore {
        connect_error: Some(CapabilityError::connection("connection refused")),
        ..FakeStore::default()
    });
    let srv = TestServer::spawn(services_with(text, store)).await;

    let (status, body) = post_advise(&srv, json!({"query": "laptop under 50000"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let expected: Vec<String> = sample_products().into_iter().map(|p| p.name).collect();
    assert_eq!(product_names(&body), expected);
    assert!(!body["advice"].as_str().unwrap().is_empty());
    assert_eq!(body["metadata"]["adviceSource"], "template");
    assert_eq!(body["metadata"]["productSource"], "sample");
    assert_eq!(body["metadata"]["services"]["ai"], "unavailable");
    assert_eq!(body["metadata"]["services"]["database"], "unavailable");
}

#[tokio::test]
async fn missing_text_credential_leaves_store_usable() {
    let text = Arc::new(FakeText {
        init_error: Some(CapabilityError::credential_missing("GEMINI_API_KEY is not set")),
        ..FakeText::default()
    });
    let srv = TestServer::spawn(services_with(text, Arc::new(FakeStore::default()))).await;

    let (_, body) = post_advise(&srv, json!({"query": "laptop"})).await;

    assert_eq!(body["success"], true);
    assert_eq!(product_names(&body), vec!["HP 15s Ryzen 5".to_string()]);
    assert_eq!(body["products"][0]["affiliateLink"]["retailer"], "flipkart");
    assert_eq!(body["metadata"]["services"]["ai"], "unavailable");
    assert_eq!(body["metadata"]["services"]["database"], "ready");
    assert_eq!(body["metadata"]["adviceSource"], "template");
}

#[tokio::test]
async fn generation_failure_falls_back_to_template() {
    let text = Arc::new(FakeText {
        generate_error: Some(GenerationError::Quota("RESOURCE_EXHAUSTED".to_string())),
        ..FakeText::default()
    });
    let srv = TestServer::spawn(services_with(text, Arc::new(FakeStore::default()))).await;

    let (_, body) = post_advise(&srv, json!({"query": "laptop", "language": "hi"})).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["metadata"]["services"]["ai"], "ready");
    assert_eq!(body["metadata"]["adviceSource"], "template");
    assert_eq!(body["metadata"]["language"], "hi");
    assert!(!body["advice"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn concurrent_requests_initialize_once() {
    let text = Arc::new(FakeText::default());
    let store = Arc::new(FakeStore::default());
    let srv = Arc::new(TestServer::spawn(services_with(text.clone(), store.clone())).await);

    let mut handles = Vec::new();
    for i in 0..16 {
        let srv = srv.clone();
        handles.push(tokio::spawn(async move {
            post_advise(&srv, json!({"query": format!("laptop {i}")})).await
        }));
    }
    for h in handles {
        let (status, body) = h.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    assert_eq!(text.init_calls.load(Ordering::SeqCst), 1);
    assert_eq!(store.connect_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn internal_failure_serves_degraded_payload() {
    let store = Arc::new(FakeStore {
        panic_on_find: true,
        ..FakeStore::default()
    });
    let srv = TestServer::spawn(services_with(Arc::new(FakeText::default()), store)).await;

    let (status, body) = post_advise(&srv, json!({"query": "laptop"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["products"].as_array().unwrap().len(), 2);
    assert!(!body["advice"].as_str().unwrap().is_empty());
    assert_eq!(body["metadata"]["productSource"], "sample");
}

#[tokio::test]
async fn invalid_requests_are_rejected() {
    let srv = TestServer::spawn(services_with(
        Arc::new(FakeText::default()),
        Arc::new(InMemoryDocumentStore::with_demo_catalog()),
    ))
    .await;

    let (status, body) = post_advise(&srv, json!({"query": "   "})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (status, body) = post_advise(&srv, json!({"userId": "no-query"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (status, _) = post_advise(&srv, json!({"query": "x".repeat(501)})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let res = reqwest::Client::new()
        .post(format!("{}/api/advise", srv.base_url))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_body");
}

#[tokio::test]
async fn request_id_is_echoed() {
    let srv = TestServer::stub().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/advise", srv.base_url))
        .header("x-request-id", "0190b6a4-7c3e-7000-8000-000000000001")
        .json(&json!({"query": "earbuds under 2000"}))
        .send()
        .await
        .unwrap();
    assert_eq!(
        res.headers()["x-request-id"].to_str().unwrap(),
        "0190b6a4-7c3e-7000-8000-000000000001"
    );
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["metadata"]["requestId"], "0190b6a4-7c3e-7000-8000-000000000001");

    let res = client.get(format!("{}/health", srv.base_url)).send().await.unwrap();
    assert!(res.headers().contains_key("x-request-id"));
}
