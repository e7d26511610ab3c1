//! Origin allow-list CORS.
//!
//! Applied per route as middleware: requests without an `Origin` header are
//! same-origin and pass untouched, listed origins are echoed back in
//! `Access-Control-Allow-Origin`, anything else gets no CORS headers and the
//! browser refuses the cross-origin read.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, Method},
    middleware::Next,
    response::Response,
};

/// Methods advertised on preflight responses.
pub const ALLOWED_METHODS: &str = "GET, POST, PUT, PATCH, DELETE";

#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allowed: Arc<[String]>,
}

/// Outcome of checking a request's `Origin`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsDecision {
    /// No `Origin` header.
    SameOrigin,
    /// Listed origin, to be echoed back.
    Allowed(HeaderValue),
    Denied,
}

impl CorsDecision {
    pub fn is_permitted(&self) -> bool {
        !matches!(self, CorsDecision::Denied)
    }
}

impl CorsPolicy {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: origins.into_iter().map(Into::into).collect(),
        }
    }

    /// Exact, case-sensitive comparison against the allow-list.
    pub fn allows(&self, origin: &str) -> bool {
        self.allowed.iter().any(|o| o == origin)
    }

    pub fn decide(&self, headers: &HeaderMap) -> CorsDecision {
        let Some(origin) = headers.get(header::ORIGIN) else {
            return CorsDecision::SameOrigin;
        };
        match origin.to_str() {
            Ok(o) if self.allows(o) => CorsDecision::Allowed(origin.clone()),
            _ => CorsDecision::Denied,
        }
    }
}

pub async fn cors_middleware(
    State(policy): State<CorsPolicy>,
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let decision = policy.decide(req.headers());
    let preflight = req.method() == Method::OPTIONS;

    if decision == CorsDecision::Denied {
        tracing::debug!(
            origin = ?req.headers().get(header::ORIGIN),
            path = %req.uri().path(),
            "origin not in CORS allow-list"
        );
    }

    let mut res = next.run(req).await;
    let headers = res.headers_mut();

    if let CorsDecision::Allowed(origin) = &decision {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
    }
    if preflight && decision.is_permitted() {
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );
    }

    res
}
