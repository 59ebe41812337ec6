#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use location_service::{
    build_router,
    config::{EnvironmentConfig, WritePolicy},
    repositories::InMemoryLocationRepository,
    AppState,
};

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

pub struct TestApp {
    router: Router,
    pub store: Arc<InMemoryLocationRepository>,
    pub config: EnvironmentConfig,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_policy(WritePolicy::Open)
    }

    pub fn with_policy(write_policy: WritePolicy) -> Self {
        let config = EnvironmentConfig {
            write_policy,
            ..EnvironmentConfig::default()
        };
        let store = Arc::new(InMemoryLocationRepository::new());
        let router = build_router(AppState::new(store.clone(), config.clone()));

        Self { router, store, config }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body), None).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, Some(body), None).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::PATCH, uri, Some(body), None).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None, None).await
    }

    /// Crea una location por la API y devuelve su id
    pub async fn create_location(&self, name: &str, lon: f64, lat: f64) -> i64 {
        let response = self.post("/api/locations/", feature(name, lon, lat)).await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["id"].as_i64().unwrap()
    }
}

pub fn feature(name: &str, lon: f64, lat: f64) -> Value {
    json!({
        "type": "Feature",
        "geometry": {"type": "Point", "coordinates": [lon, lat]},
        "properties": {"name": name}
    })
}
