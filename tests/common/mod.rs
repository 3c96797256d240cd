//! Shared helpers for driving the router in-process

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use roster_api::api::create_router_with_state;
use roster_api::create_in_memory_app_state;
use serde_json::{json, Value};
use tower::ServiceExt;

pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self {
            router: create_router_with_state(create_in_memory_app_state()),
        }
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);

        let request = match body {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        send(self.router(), request).await
    }

    pub async fn raw(&self, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        send(self.router(), request).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }

    pub async fn create_team(&self, name: &str) -> i64 {
        let (status, body) = self.post("/teams", json!({ "name": name })).await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["id"].as_i64().unwrap()
    }

    pub async fn create_user(&self, body: Value) -> i64 {
        let (status, body) = self.post("/users", body).await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["id"].as_i64().unwrap()
    }
}

pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };

    (status, body)
}

pub fn user(name: &str, age: i64, phone: &str) -> Value {
    json!({ "name": name, "age": age, "phone": phone })
}

pub fn error_message(body: &Value) -> &str {
    body["error"].as_str().unwrap_or_default()
}
