#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, request, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use cs156_example_api::auth::{generate_jwt, Claims, Role};
use cs156_example_api::config::{AppConfig, SecurityConfig};
use cs156_example_api::database::{DatabaseError, MemoryRepository, Repositories, Repository};
use cs156_example_api::entities::{
    Article, Entity, HelpRequest, MenuItemReview, RecommendationRequest,
    UcsbDiningCommonsMenuItem, UcsbOrganization,
};
use cs156_example_api::middleware::XSRF_HEADER;

pub const SECRET: &str = "integration-test-secret";
const XSRF: &str = "test-xsrf-token";

/// In-memory repository that records how the controller used it
pub struct RecordingRepository<E: Entity> {
    inner: MemoryRepository<E>,
    saves: AtomicUsize,
    deleted: Mutex<Vec<E>>,
}

impl<E: Entity> RecordingRepository<E> {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: MemoryRepository::new(),
            saves: AtomicUsize::new(0),
            deleted: Mutex::new(Vec::new()),
        })
    }

    /// Insert a row without counting it as a controller save
    pub async fn seed(&self, entity: E) -> E {
        self.inner.save(entity).await.expect("seed row")
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn deleted(&self) -> Vec<E> {
        self.deleted.lock().unwrap().clone()
    }

    pub async fn rows(&self) -> Vec<E> {
        self.inner.find_all().await.unwrap()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for RecordingRepository<E> {
    async fn find_all(&self) -> Result<Vec<E>, DatabaseError> {
        self.inner.find_all().await
    }

    async fn find_by_id(&self, id: &E::Key) -> Result<Option<E>, DatabaseError> {
        self.inner.find_by_id(id).await
    }

    async fn save(&self, entity: E) -> Result<E, DatabaseError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(entity).await
    }

    async fn delete(&self, entity: &E) -> Result<(), DatabaseError> {
        self.deleted.lock().unwrap().push(entity.clone());
        self.inner.delete(entity).await
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Caller {
    Anonymous,
    /// USER role, presenting a valid anti-forgery token
    User,
    /// ADMIN + USER roles, presenting a valid anti-forgery token
    Admin,
    /// ADMIN + USER roles, no anti-forgery header
    AdminWithoutXsrf,
    /// ADMIN + USER roles, anti-forgery header from another session
    AdminWithWrongXsrf,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

pub struct Harness {
    pub articles: Arc<RecordingRepository<Article>>,
    pub help_requests: Arc<RecordingRepository<HelpRequest>>,
    pub recommendation_requests: Arc<RecordingRepository<RecommendationRequest>>,
    pub menu_items: Arc<RecordingRepository<UcsbDiningCommonsMenuItem>>,
    pub organizations: Arc<RecordingRepository<UcsbOrganization>>,
    pub menu_item_reviews: Arc<RecordingRepository<MenuItemReview>>,
    app: Router,
}

pub fn security() -> SecurityConfig {
    let mut security = AppConfig::development().security;
    security.jwt_secret = SECRET.to_string();
    security
}

fn token(roles: Vec<Role>) -> String {
    let mut claims = Claims::new("tester@ucsb.edu", roles, 1);
    claims.xsrf = XSRF.to_string();
    generate_jwt(&claims, SECRET).expect("sign test token")
}

fn authorized(mut builder: request::Builder, caller: Caller) -> request::Builder {
    let roles = match caller {
        Caller::Anonymous => None,
        Caller::User => Some(vec![Role::User]),
        _ => Some(vec![Role::Admin, Role::User]),
    };
    if let Some(roles) = roles {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token(roles)));
    }
    match caller {
        Caller::User | Caller::Admin => builder.header(XSRF_HEADER, XSRF),
        Caller::AdminWithWrongXsrf => builder.header(XSRF_HEADER, "forged"),
        _ => builder,
    }
}

/// Form-encode query parameters
pub fn query(params: &[(&str, &str)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish()
}

impl Harness {
    pub fn new() -> Self {
        let articles = RecordingRepository::<Article>::new();
        let help_requests = RecordingRepository::<HelpRequest>::new();
        let recommendation_requests = RecordingRepository::<RecommendationRequest>::new();
        let menu_items = RecordingRepository::<UcsbDiningCommonsMenuItem>::new();
        let organizations = RecordingRepository::<UcsbOrganization>::new();
        let menu_item_reviews = RecordingRepository::<MenuItemReview>::new();

        let repos = Repositories {
            articles: articles.clone(),
            help_requests: help_requests.clone(),
            recommendation_requests: recommendation_requests.clone(),
            menu_items: menu_items.clone(),
            organizations: organizations.clone(),
            menu_item_reviews: menu_item_reviews.clone(),
            database: None,
        };

        Self {
            articles,
            help_requests,
            recommendation_requests,
            menu_items,
            organizations,
            menu_item_reviews,
            app: cs156_example_api::app(repos, &security()),
        }
    }

    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        caller: Caller,
        body: Option<Value>,
    ) -> TestResponse {
        let builder = authorized(Request::builder().method(method).uri(uri), caller);

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("build request");

        self.raw(request).await
    }

    /// PUT a raw, possibly malformed, JSON body
    pub async fn put_text(&self, uri: &str, caller: Caller, body: &str) -> TestResponse {
        let request = authorized(Request::builder().method(Method::PUT).uri(uri), caller)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("build request");

        self.raw(request).await
    }

    pub async fn raw(&self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.expect("router call");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str, caller: Caller) -> TestResponse {
        self.call(Method::GET, uri, caller, None).await
    }

    pub async fn post(&self, uri: &str, caller: Caller) -> TestResponse {
        self.call(Method::POST, uri, caller, None).await
    }

    pub async fn put(&self, uri: &str, caller: Caller, body: Value) -> TestResponse {
        self.call(Method::PUT, uri, caller, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, caller: Caller) -> TestResponse {
        self.call(Method::DELETE, uri, caller, None).await
    }
}
