//! Integration test harness for Oakline Interiors.
//!
//! Tests drive the real storefront router in-process with
//! `tower::ServiceExt::oneshot` against an in-memory session store, so no
//! server or network is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p oakline-integration-tests
//! ```
//!
//! [`Visitor`] behaves like a browser: it keeps cookies between requests
//! and sends a fixed client address so rate limiting can key on it.

use std::collections::BTreeMap;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use oakline_core::recently_viewed::DEFAULT_CAPACITY;
use oakline_storefront::{app, catalog::seed_catalog, config::StorefrontConfig, state::AppState};
use tower::ServiceExt;
use tower_sessions::MemoryStore;

/// Default client address sent as `X-Forwarded-For`.
pub const CLIENT_IP: &str = "203.0.113.50";

/// Configuration pointing at the storefront crate's bundled assets.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 3000,
        base_url: "http://localhost:3000".to_string(),
        recently_viewed_limit: DEFAULT_CAPACITY,
        session_expiry_hours: 168,
        assets_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../storefront")),
        inquiry_webhook_url: None,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// Build the storefront router with the seeded catalog.
///
/// # Panics
///
/// Panics if the application state cannot be built.
#[must_use]
pub fn test_app(config: StorefrontConfig) -> Router {
    let state = AppState::new(config, seed_catalog()).expect("Failed to build test state");
    app(state, MemoryStore::default())
}

/// A buffered response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// Every `Set-Cookie` header value.
    #[must_use]
    pub fn set_cookies(&self) -> Vec<&str> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect()
    }
}

/// A browser-like client with its own cookie jar.
pub struct Visitor {
    app: Router,
    ip: String,
    cookies: BTreeMap<String, String>,
}

impl Visitor {
    /// A new visitor with an empty cookie jar.
    #[must_use]
    pub fn new(app: Router) -> Self {
        Self {
            app,
            ip: CLIENT_IP.to_string(),
            cookies: BTreeMap::new(),
        }
    }

    /// Use a different client address.
    #[must_use]
    pub fn with_ip(mut self, ip: &str) -> Self {
        self.ip = ip.to_string();
        self
    }

    /// Current value of a cookie in the jar.
    #[must_use]
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Put a cookie in the jar directly.
    pub fn set_cookie(&mut self, name: &str, value: &str) {
        self.cookies.insert(name.to_string(), value.to_string());
    }

    /// Send a GET request.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the router fails.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = self
            .request(Method::GET, uri)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(request).await
    }

    /// Send a URL-encoded form POST.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the router fails.
    pub async fn post_form(&mut self, uri: &str, form: &[(&str, &str)]) -> TestResponse {
        let body = form
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let request = self
            .request(Method::POST, uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("Failed to build request");
        self.send(request).await
    }

    fn request(&self, method: Method, uri: &str) -> axum::http::request::Builder {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("x-forwarded-for", &self.ip);
        if !self.cookies.is_empty() {
            let cookie_header = self
                .cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; ");
            builder = builder.header(header::COOKIE, cookie_header);
        }
        builder
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");

        let response = TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        };
        self.store_cookies(&response);
        response
    }

    fn store_cookies(&mut self, response: &TestResponse) {
        for set_cookie in response.set_cookies() {
            let mut attributes = set_cookie.split(';').map(str::trim);
            let Some((name, value)) = attributes.next().and_then(|pair| pair.split_once('=')) else {
                continue;
            };
            let expired = attributes.any(|attr| attr.eq_ignore_ascii_case("max-age=0"));
            if expired {
                self.cookies.remove(name);
            } else {
                self.cookies.insert(name.to_string(), value.to_string());
            }
        }
    }
}
