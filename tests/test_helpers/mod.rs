//! Shared helpers for HTTP-level integration tests.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use palladio::api::{API_PREFIX, AppState, build_router};
use serde_json::Value;
use std::env;
use std::ffi::OsString;
use std::sync::{Mutex, MutexGuard, OnceLock};
use tower::ServiceExt;

/// Router under test with JSON request helpers.
#[derive(Clone)]
pub struct TestApp {
    router: Router,
}

/// Status and decoded JSON body of a response. Empty bodies decode to
/// `Value::Null`.
#[derive(Debug)]
pub struct TestResponse {
    /// Response status.
    pub status: StatusCode,
    /// Decoded body.
    pub body: Value,
}

impl TestApp {
    /// Creates an app over fresh in-memory repositories.
    pub fn in_memory() -> Self {
        Self::with_state(AppState::in_memory())
    }

    /// Creates an app over the given state.
    pub fn with_state(state: AppState) -> Self {
        Self {
            router: build_router(state),
        }
    }

    /// Sends a request with an optional JSON body to a versioned path.
    pub async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> TestResponse {
        let raw = body.map(Value::to_string);
        self.send_raw(method, path, raw.as_deref()).await
    }

    /// Sends a request with an optional raw body to a versioned path.
    pub async fn send_raw(&self, method: Method, path: &str, body: Option<&str>) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(format!("{API_PREFIX}{path}"));
        if body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        let request = builder
            .body(body.map_or_else(Body::empty, |text| Body::from(text.to_owned())))
            .expect("request should build");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body should be readable")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("body should be JSON")
        };
        TestResponse { status, body }
    }

    /// `GET` shorthand.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.send(Method::GET, path, None).await
    }

    /// `POST` shorthand.
    pub async fn post(&self, path: &str, body: &Value) -> TestResponse {
        self.send(Method::POST, path, Some(body)).await
    }

    /// `PUT` shorthand.
    pub async fn put(&self, path: &str, body: &Value) -> TestResponse {
        self.send(Method::PUT, path, Some(body)).await
    }

    /// `DELETE` shorthand.
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.send(Method::DELETE, path, None).await
    }

    /// Creates a process and returns its UID.
    pub async fn create_process(&self, name: &str) -> String {
        let response = self
            .post("/processes", &serde_json::json!({ "name": name }))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["uid"]
            .as_str()
            .expect("process uid should be a string")
            .to_owned()
    }
}

static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Guard that applies scoped environment variable updates.
pub struct EnvVarGuard {
    previous: Vec<(OsString, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
    /// Sets or removes variables for the guard lifetime.
    pub fn set_many(changes: &[(&str, Option<&str>)]) -> Self {
        let lock = ENV_MUTEX
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut previous = Vec::with_capacity(changes.len());

        for (key, value) in changes {
            previous.push((OsString::from(key), env::var_os(key)));
            unsafe {
                // SAFETY: the global mutex serializes environment mutations in tests.
                match value {
                    Some(new_value) => env::set_var(key, new_value),
                    None => env::remove_var(key),
                }
            }
        }

        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..) {
            unsafe {
                // SAFETY: the global mutex serializes environment mutations in tests.
                match value {
                    Some(previous) => env::set_var(&key, &previous),
                    None => env::remove_var(&key),
                }
            }
        }
    }
}
