//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use axum::{
    Router,
    body::Body,
    extract::Request,
    http::{self, Method, header},
    routing::get,
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use casbin_authz::Enforce;

#[derive(Debug, thiserror::Error)]
#[error("policy store unreachable")]
pub struct EngineDown;

/// Engine allowing an explicit set of (subject, object, action) tuples.
/// Queries for `fail_on` return [`EngineDown`]. Every query is recorded.
#[derive(Default)]
pub struct FakeEnforcer {
    allow: Vec<(String, String, String)>,
    fail_on: Option<String>,
    queries: Mutex<Vec<String>>,
}

impl FakeEnforcer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow(mut self, subject: &str, object: &str, action: &str) -> Self {
        self.allow
            .push((subject.to_string(), object.to_string(), action.to_string()));
        self
    }

    pub fn fail_on(mut self, subject: &str) -> Self {
        self.fail_on = Some(subject.to_string());
        self
    }

    /// Subjects queried so far, in order.
    pub fn queried(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl Enforce for FakeEnforcer {
    type Error = EngineDown;

    fn enforce(&self, subject: &str, object: &str, action: &str) -> Result<bool, EngineDown> {
        self.queries.lock().unwrap().push(subject.to_string());

        if self.fail_on.as_deref() == Some(subject) {
            return Err(EngineDown);
        }

        Ok(self
            .allow
            .iter()
            .any(|(s, o, a)| s == subject && o == object && a == action))
    }
}

/// Counts how many times the downstream handler ran.
#[derive(Clone, Default)]
pub struct Hits(Arc<AtomicUsize>);

impl Hits {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// `GET /orders` handler that records each call.
pub fn orders_router(hits: &Hits) -> Router {
    let hits = hits.clone();
    Router::new().route(
        "/orders",
        get(move || {
            let hits = hits.clone();
            async move {
                hits.0.fetch_add(1, Ordering::SeqCst);
                "orders"
            }
        }),
    )
}

pub fn request(method: Method, uri: &str) -> Request {
    http::Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn request_as(method: Method, uri: &str, user: &str, password: &str) -> Request {
    let credentials = STANDARD.encode(format!("{user}:{password}"));
    http::Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Basic {credentials}"))
        .body(Body::empty())
        .unwrap()
}

pub fn fixed_subjects(
    subjects: &'static [&'static str],
) -> impl Fn(&Request) -> Vec<String> + Send + Sync + 'static {
    move |_: &Request| subjects.iter().map(|s| s.to_string()).collect()
}
