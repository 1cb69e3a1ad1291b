//! End-to-end client behavior over a scripted transport.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use blog_client::{
    AppError, BlogClient, Result,
    api::Credential,
    cache::{ManualClock, ResponseCache},
    models::{ArticleDraft, CategoryDraft, Config, SeoData},
    transport::{ApiRequest, ApiResponse, Method, Transport},
};

const BASE: &str = "http://blog.test";

#[derive(Clone)]
enum Reply {
    Status(u16, String),
    Offline,
}

/// Replays canned replies per `METHOD url`; the last reply of a route
/// repeats. Unknown routes answer 404.
#[derive(Default)]
struct Scripted {
    routes: Mutex<HashMap<String, VecDeque<Reply>>>,
    sent: Mutex<Vec<ApiRequest>>,
}

impl Scripted {
    fn on(self, method: Method, path: &str, status: u16, body: Value) -> Self {
        self.push(method, path, Reply::Status(status, body.to_string()))
    }

    fn offline(self, method: Method, path: &str) -> Self {
        self.push(method, path, Reply::Offline)
    }

    fn push(self, method: Method, path: &str, reply: Reply) -> Self {
        self.routes
            .lock()
            .unwrap()
            .entry(format!("{method} {BASE}{path}"))
            .or_default()
            .push_back(reply);
        self
    }

    fn sent(&self) -> Vec<ApiRequest> {
        self.sent.lock().unwrap().clone()
    }

    fn calls(&self, method: Method, path: &str) -> usize {
        let url = format!("{BASE}{path}");
        self.sent()
            .iter()
            .filter(|r| r.method == method && r.url == url)
            .count()
    }
}

#[async_trait]
impl Transport for Scripted {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        self.sent.lock().unwrap().push(request.clone());

        let key = format!("{} {}", request.method, request.url);
        let reply = {
            let mut routes = self.routes.lock().unwrap();
            match routes.get_mut(&key) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        match reply {
            Some(Reply::Status(status, body)) => Ok(ApiResponse::new(status, body)),
            Some(Reply::Offline) => Err(AppError::network(&request.url, "connection refused")),
            None => Ok(ApiResponse::new(404, r#"{"error":"Not found"}"#)),
        }
    }
}

fn config() -> Config {
    let mut config = Config::default();
    config.api.base_url = BASE.to_string();
    config.retry.backoff_ms = 0;
    config
}

fn client_with(transport: Scripted, config: &Config) -> (BlogClient<Scripted>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let cache = Arc::new(ResponseCache::new(config.cache.ttl(), clock.clone()));
    let client = BlogClient::new(transport, config, cache).unwrap();
    (client, clock)
}

fn client(transport: Scripted) -> (BlogClient<Scripted>, Arc<ManualClock>) {
    client_with(transport, &config())
}

fn articles_body() -> Value {
    json!({
        "articles": [
            {"id": 1, "slug": "async-rust", "title": "Async Rust", "tags": "Rust, async", "is_published": 1},
            {"id": 2, "slug": "grid", "title": "CSS Grid", "tags": ["css"], "published": true},
            {"id": 3, "slug": "wip", "title": "WIP", "tags": "rust", "is_published": 0},
            {"id": 4, "slug": "ownership", "title": "Ownership", "tags": "rust", "is_published": 1}
        ]
    })
}

fn draft() -> ArticleDraft {
    ArticleDraft {
        slug: "hello".into(),
        title: "Hello".into(),
        author: "Ada".into(),
        content: "Body".into(),
        summary: "Short".into(),
        tags: vec!["rust".into(), "web".into()],
        cover_image: None,
        is_published: true,
        seo: Some(SeoData {
            description: Some("About hello".into()),
            ..SeoData::default()
        }),
    }
}

#[tokio::test]
async fn test_reads_are_cached_until_ttl() {
    let (client, clock) =
        client(Scripted::default().on(Method::Get, "/api/articles", 200, articles_body()));

    let first = client.list_articles().await.unwrap();
    let second = client.list_articles().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(client.transport().calls(Method::Get, "/api/articles"), 1);

    clock.advance(Duration::from_secs(299));
    client.list_articles().await.unwrap();
    assert_eq!(client.transport().calls(Method::Get, "/api/articles"), 1);

    clock.advance(Duration::from_secs(1));
    client.list_articles().await.unwrap();
    assert_eq!(client.transport().calls(Method::Get, "/api/articles"), 2);
}

#[tokio::test]
async fn test_disabled_cache_always_fetches() {
    let mut config = config();
    config.cache.enabled = false;
    let (client, _) = client_with(
        Scripted::default().on(Method::Get, "/api/articles", 200, articles_body()),
        &config,
    );

    client.list_articles().await.unwrap();
    client.list_articles().await.unwrap();
    assert_eq!(client.transport().calls(Method::Get, "/api/articles"), 2);
    assert!(client.cache().is_empty());
}

#[tokio::test]
async fn test_list_articles_normalizes() {
    let (client, _) =
        client(Scripted::default().on(Method::Get, "/api/articles", 200, articles_body()));

    let articles = client.list_articles().await.unwrap();
    assert_eq!(articles.len(), 4);
    assert_eq!(articles[0].id, "1");
    assert_eq!(articles[0].tags, vec!["Rust", "async"]);
    assert_eq!(articles[0].category, "Rust");
    assert!(articles[1].published);
    assert!(!articles[2].published);
}

#[tokio::test]
async fn test_malformed_envelope_is_payload_error() {
    let (client, _) = client(Scripted::default().on(
        Method::Get,
        "/api/articles",
        200,
        json!({"items": []}),
    ));

    let err = client.list_articles().await.unwrap_err();
    assert!(matches!(err, AppError::Payload(_)));
}

#[tokio::test]
async fn test_missing_article_is_none_without_retry() {
    let (client, _) = client(Scripted::default());

    let article = client.get_article_by_slug("nope").await.unwrap();
    assert!(article.is_none());
    assert_eq!(client.transport().calls(Method::Get, "/api/articles/nope"), 1);
}

#[tokio::test]
async fn test_article_by_slug() {
    let (client, _) = client(Scripted::default().on(
        Method::Get,
        "/api/articles/hello",
        200,
        json!({"article": {"id": 9, "slug": "hello", "summary": "x", "seo": "{\"title\":\"Hi\"}"}}),
    ));

    let article = client.get_article_by_slug("hello").await.unwrap().unwrap();
    assert_eq!(article.excerpt, "x");
    assert_eq!(article.seo.and_then(|s| s.title).as_deref(), Some("Hi"));
}

#[tokio::test]
async fn test_server_errors_are_retried_then_exhausted() {
    let (client, _) = client(Scripted::default().on(
        Method::Get,
        "/api/categories",
        503,
        json!({"error": "busy"}),
    ));

    let err = client.list_categories().await.unwrap_err();
    match &err {
        AppError::RetriesExhausted { attempts, .. } => assert_eq!(*attempts, 3),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.status(), Some(503));
    assert_eq!(err.server_message().as_deref(), Some("busy"));
    assert_eq!(client.transport().calls(Method::Get, "/api/categories"), 3);
}

#[tokio::test]
async fn test_transient_failure_recovers() {
    let (client, _) = client(
        Scripted::default()
            .offline(Method::Get, "/api/categories")
            .on(Method::Get, "/api/categories", 500, json!({}))
            .on(
                Method::Get,
                "/api/categories",
                200,
                json!({"categories": [{"id": 1, "name": "rust"}]}),
            ),
    );

    let categories = client.list_categories().await.unwrap();
    assert_eq!(categories[0].name, "rust");
    assert_eq!(client.transport().calls(Method::Get, "/api/categories"), 3);
}

#[tokio::test]
async fn test_slugs_fall_back_to_article_list() {
    let (client, _) = client(
        Scripted::default()
            .on(Method::Get, "/api/articles/slugs", 500, json!({}))
            .on(Method::Get, "/api/articles", 200, articles_body()),
    );

    let slugs = client.list_article_slugs().await.unwrap();
    assert_eq!(slugs, vec!["async-rust", "grid", "ownership"]);
    assert_eq!(client.transport().calls(Method::Get, "/api/articles/slugs"), 3);
}

#[tokio::test]
async fn test_slugs_from_dedicated_endpoint() {
    let (client, _) = client(Scripted::default().on(
        Method::Get,
        "/api/articles/slugs",
        200,
        json!({"slugs": ["a", "b"]}),
    ));

    assert_eq!(client.list_article_slugs().await.unwrap(), vec!["a", "b"]);
    assert_eq!(client.transport().calls(Method::Get, "/api/articles"), 0);
}

#[tokio::test]
async fn test_category_articles_match_tags_exactly() {
    let (client, _) = client(Scripted::default().on(
        Method::Get,
        "/api/categories/rust",
        200,
        json!({
            "category": {"id": 1, "name": "rust", "description": "Systems"},
            "articles": [
                {"id": 1, "tags": "Rust, async", "is_published": 1},
                {"id": 2, "tags": "rustacean", "is_published": 1},
                {"id": 3, "tags": ["trust"], "is_published": 1}
            ]
        }),
    ));

    let group = client
        .get_category_with_articles("rust")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(group.category.description, "Systems");
    assert_eq!(group.article_count, 1);
    assert_eq!(group.articles[0].id, "1");

    assert!(
        client
            .get_category_with_articles("missing")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_categories_with_articles() {
    let (client, _) = client(
        Scripted::default()
            .on(Method::Get, "/api/articles", 200, articles_body())
            .on(
                Method::Get,
                "/api/categories",
                200,
                json!({"categories": [
                    {"id": 1, "name": "css"},
                    {"id": 2, "name": "rust"},
                    {"id": 3, "name": "go"}
                ]}),
            ),
    );

    let groups = client.list_categories_with_articles(6).await.unwrap();
    let summary: Vec<_> = groups
        .iter()
        .map(|g| (g.category.name.as_str(), g.article_count))
        .collect();
    assert_eq!(summary, vec![("rust", 2), ("css", 1)]);
}

#[tokio::test]
async fn test_related_articles() {
    let (client, _) = client(Scripted::default().on(
        Method::Get,
        "/api/articles",
        200,
        json!({"articles": [
            {"id": 1, "category": "Systems", "is_published": 1},
            {"id": 2, "category": "Systems", "is_published": 1},
            {"id": 3, "category": "Systems", "is_published": 0},
            {"id": 4, "category": "Web", "is_published": 1},
            {"id": 5, "category": "Systems", "published": true}
        ]}),
    ));

    let articles = client.list_articles().await.unwrap();
    let related = client.related_articles(&articles[0], 3).await.unwrap();
    let ids: Vec<_> = related.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "5"]);
    assert_eq!(client.transport().calls(Method::Get, "/api/articles"), 1);
}

#[tokio::test]
async fn test_admin_reads_carry_bearer_and_skip_cache() {
    let (client, _) = client(Scripted::default().on(
        Method::Get,
        "/api/admin/articles",
        200,
        articles_body(),
    ));
    let credential = Credential::new("s3cret");

    let articles = client.admin_list_articles(&credential).await.unwrap();
    client.admin_list_articles(&credential).await.unwrap();

    assert_eq!(articles.len(), 4);
    assert_eq!(client.transport().calls(Method::Get, "/api/admin/articles"), 2);
    let sent = client.transport().sent();
    assert!(
        sent.iter()
            .all(|r| r.header_value("Authorization") == Some("Bearer s3cret"))
    );
}

#[tokio::test]
async fn test_create_article_payload() {
    let (client, _) = client(Scripted::default().on(
        Method::Post,
        "/api/admin/articles",
        201,
        json!({"message": "Article created", "id": 42}),
    ));

    let outcome = client
        .create_article(&Credential::new("pw"), &draft())
        .await
        .unwrap();
    assert_eq!(outcome.message.as_deref(), Some("Article created"));
    assert_eq!(outcome.id().as_deref(), Some("42"));

    let sent = client.transport().sent();
    let body: Value = serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body["tags"], "rust, web");
    assert_eq!(body["is_published"], 1);
    assert!(body["cover_image"].is_null());
    let seo: Value = serde_json::from_str(body["seo"].as_str().unwrap()).unwrap();
    assert_eq!(seo["description"], "About hello");
}

#[tokio::test]
async fn test_successful_write_invalidates_cache() {
    let (client, _) = client(
        Scripted::default()
            .on(Method::Get, "/api/articles", 200, articles_body())
            .on(
                Method::Delete,
                "/api/admin/articles/4",
                200,
                json!({"message": "Article deleted"}),
            ),
    );

    client.list_articles().await.unwrap();
    let outcome = client
        .delete_article(&Credential::new("pw"), "4")
        .await
        .unwrap();
    assert_eq!(outcome.message.as_deref(), Some("Article deleted"));

    client.list_articles().await.unwrap();
    assert_eq!(client.transport().calls(Method::Get, "/api/articles"), 2);
}

#[tokio::test]
async fn test_failed_write_still_invalidates_cache() {
    let (client, _) = client(
        Scripted::default()
            .on(Method::Get, "/api/categories", 200, json!({"categories": []}))
            .on(
                Method::Post,
                "/api/admin/categories",
                401,
                json!({"error": "Unauthorized"}),
            ),
    );

    client.list_categories().await.unwrap();
    let draft = CategoryDraft {
        name: "rust".into(),
        description: "Systems".into(),
        cover: None,
    };
    let err = client
        .create_category(&Credential::new("wrong"), &draft)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Client { status: 401, .. }));
    assert_eq!(client.transport().calls(Method::Post, "/api/admin/categories"), 1);

    client.list_categories().await.unwrap();
    assert_eq!(client.transport().calls(Method::Get, "/api/categories"), 2);
}

#[tokio::test]
async fn test_update_category_body() {
    let (client, _) = client(Scripted::default().on(
        Method::Put,
        "/api/admin/categories/7",
        200,
        json!({"message": "Category updated"}),
    ));
    let draft = CategoryDraft {
        name: "rust".into(),
        description: "Systems".into(),
        cover: Some("/rust.png".into()),
    };

    client
        .update_category(&Credential::new("pw"), "7", &draft)
        .await
        .unwrap();
    let sent = client.transport().sent();
    let body: Value = serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body["cover_image"], "/rust.png");
    assert_eq!(body["name"], "rust");
}

#[tokio::test]
async fn test_health_check() {
    let (healthy, _) = client(Scripted::default().on(
        Method::Get,
        "/api/health",
        200,
        json!({"status": "OK"}),
    ));
    assert!(healthy.health_check().await);

    let (offline, _) = client(Scripted::default().offline(Method::Get, "/api/health"));
    assert!(!offline.health_check().await);
    assert_eq!(offline.transport().calls(Method::Get, "/api/health"), 3);
}

#[tokio::test]
async fn test_odd_record_does_not_sink_the_list() {
    let (client, _) = client(Scripted::default().on(
        Method::Get,
        "/api/articles",
        200,
        json!({"articles": [
            {"id": 1, "slug": "fine", "title": "Fine", "is_published": 1},
            {"id": 2, "title": 42, "readTime": 5, "author": {"name": "x"}, "tags": [1, 2]}
        ]}),
    ));

    let articles = client.list_articles().await.unwrap();
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].title, "Fine");
    assert!(articles[0].published);
    assert_eq!(articles[1].title, "42");
    assert_eq!(articles[1].read_time, "5");
    assert_eq!(articles[1].author, "");
    assert!(articles[1].tags.is_empty());
}

#[tokio::test]
async fn test_home_layout() {
    let (client, _) = client(Scripted::default().on(
        Method::Get,
        "/api/articles",
        200,
        json!({"articles": [
            {"id": 1, "is_published": 1},
            {"id": 2, "is_published": 1, "featured": true},
            {"id": 3, "is_published": 0},
            {"id": 4, "published": true}
        ]}),
    ));

    let home = client.home().await.unwrap();
    assert_eq!(home.featured.map(|a| a.id).as_deref(), Some("2"));
    let latest: Vec<_> = home.latest.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(latest, vec!["1", "4"]);
    assert_eq!(home.popular.len(), 3);
    assert_eq!(client.transport().calls(Method::Get, "/api/articles"), 1);
}
