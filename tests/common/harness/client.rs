//! Cookie-tracking client that drives the router with `oneshot`.

// Allow dead code since not every test file uses every helper
#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use tower::ServiceExt;

/// An HTTP client bound to one router, remembering the session cookie.
pub struct TestClient {
    router: Router,
    cookie: Option<String>,
}

impl TestClient {
    pub fn new(router: Router) -> Self {
        Self {
            router,
            cookie: None,
        }
    }

    /// Returns true if the client holds a session cookie.
    pub fn has_session(&self) -> bool {
        self.cookie.is_some()
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri).await
    }

    pub async fn delete(&mut self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri).await
    }

    /// Sends an `application/x-www-form-urlencoded` POST.
    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(name, value)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(name, NON_ALPHANUMERIC),
                    utf8_percent_encode(value, NON_ALPHANUMERIC)
                )
            })
            .collect::<Vec<_>>()
            .join("&");
        self.post_raw(uri, Some("application/x-www-form-urlencoded"), &body)
            .await
    }

    /// Sends a POST with an arbitrary body, and no `Content-Type` when `None`.
    pub async fn post_raw(&mut self, uri: &str, content_type: Option<&str>, body: &str) -> TestResponse {
        let mut builder = Request::builder().method(Method::POST).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        self.dispatch(builder, Body::from(body.to_string())).await
    }

    async fn send(&mut self, method: Method, uri: &str) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        self.dispatch(builder, Body::empty()).await
    }

    async fn dispatch(&mut self, mut builder: axum::http::request::Builder, body: Body) -> TestResponse {
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = builder.body(body).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        for value in response.headers().get_all(header::SET_COOKIE) {
            let value = value.to_str().expect("Set-Cookie is not ASCII");
            self.remember_cookie(value);
        }

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().expect("Location is not ASCII").to_string());
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = String::from_utf8(bytes.to_vec()).expect("Body was not valid UTF-8");

        TestResponse {
            status,
            location,
            body,
        }
    }

    fn remember_cookie(&mut self, set_cookie: &str) {
        let pair = set_cookie.split(';').next().unwrap_or_default().trim();
        let expired = set_cookie.to_ascii_lowercase().contains("max-age=0");
        let empty = pair.ends_with('=');
        if expired || empty {
            self.cookie = None;
        } else {
            self.cookie = Some(pair.to_string());
        }
    }
}

/// What came back from one request.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    location: Option<String>,
    pub body: String,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Asserts a 302 to `target`.
    pub fn assert_redirect(&self, target: &str) {
        assert_eq!(self.status, StatusCode::FOUND, "body: {}", self.body);
        assert_eq!(self.location(), Some(target));
    }

    /// Asserts a 302 to the login page carrying `next`.
    pub fn assert_login_redirect(&self, next: &str) {
        self.assert_redirect(&yasite::web::urls::login_with_next(next));
    }

    pub fn assert_ok(&self) {
        assert_eq!(self.status, StatusCode::OK, "body: {}", self.body);
    }

    pub fn assert_not_found(&self) {
        assert_eq!(self.status, StatusCode::NOT_FOUND);
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.body.contains(needle)
    }
}
